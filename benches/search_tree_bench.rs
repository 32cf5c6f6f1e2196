//! Benchmark for BinarySearchTree, AvlTree, and BTree vs standard BTreeMap.
//!
//! Inserts use a pseudo-random permutation so the unbalanced tree stays
//! shallow enough to be worth measuring; the sequential group shows what
//! happens when it does not.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ordkit::tree::{AvlTree, BTree, BinarySearchTree};
use std::collections::BTreeMap;
use std::hint::black_box;

/// Multiplicative permutation of `0..size` for odd multipliers and
/// power-of-two sizes.
fn scrambled(size: u32) -> Vec<u32> {
    (0..size).map(|index| index.wrapping_mul(2_654_435_761) % size).collect()
}

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert");

    for size in [256, 4096, 16384] {
        let keys = scrambled(size);

        group.bench_with_input(BenchmarkId::new("BinarySearchTree", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut tree = BinarySearchTree::new();
                for &key in keys {
                    tree.add(black_box(key));
                }
                black_box(tree)
            });
        });

        group.bench_with_input(BenchmarkId::new("AvlTree", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut tree = AvlTree::new();
                for &key in keys {
                    tree.add(black_box(key));
                }
                black_box(tree)
            });
        });

        for split_threshold in [4, 32] {
            group.bench_with_input(
                BenchmarkId::new(format!("BTree/t={split_threshold}"), size),
                &keys,
                |bencher, keys| {
                    bencher.iter(|| {
                        let mut tree = BTree::new(split_threshold).unwrap();
                        for &key in keys {
                            tree.add(black_box(key), key);
                        }
                        black_box(tree)
                    });
                },
            );
        }

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map = BTreeMap::new();
                for &key in keys {
                    map.insert(black_box(key), key);
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// sequential insert Benchmark
// =============================================================================

fn benchmark_sequential_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("sequential_insert");

    for size in [256u32, 1024] {
        group.bench_with_input(BenchmarkId::new("BinarySearchTree", size), &size, |bencher, &size| {
            bencher.iter(|| black_box((0..size).collect::<BinarySearchTree<u32>>()));
        });

        group.bench_with_input(BenchmarkId::new("AvlTree", size), &size, |bencher, &size| {
            bencher.iter(|| black_box((0..size).collect::<AvlTree<u32>>()));
        });
    }

    group.finish();
}

// =============================================================================
// lookup Benchmark
// =============================================================================

fn benchmark_lookup(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("lookup");

    for size in [256, 4096, 16384] {
        let keys = scrambled(size);
        let avl: AvlTree<u32> = keys.iter().copied().collect();
        let btree: BTree<u32, u32> = keys.iter().map(|&key| (key, key)).collect();
        let standard: BTreeMap<u32, u32> = keys.iter().map(|&key| (key, key)).collect();

        group.bench_with_input(BenchmarkId::new("AvlTree", size), &size, |bencher, &size| {
            bencher.iter(|| (0..size).filter(|key| avl.contains(&black_box(*key))).count());
        });

        group.bench_with_input(BenchmarkId::new("BTree", size), &size, |bencher, &size| {
            bencher.iter(|| (0..size).filter_map(|key| btree.get(&black_box(key))).count());
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| (0..size).filter_map(|key| standard.get(&black_box(key))).count());
        });
    }

    group.finish();
}

// =============================================================================
// iteration Benchmark
// =============================================================================

fn benchmark_iteration(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("iteration");

    for size in [4096, 16384] {
        let keys = scrambled(size);
        let avl: AvlTree<u32> = keys.iter().copied().collect();
        let btree: BTree<u32, u32> = keys.iter().map(|&key| (key, key)).collect();

        group.bench_with_input(BenchmarkId::new("AvlTree", size), &size, |bencher, _| {
            bencher.iter(|| avl.iter().copied().map(u64::from).sum::<u64>());
        });

        group.bench_with_input(BenchmarkId::new("BTree", size), &size, |bencher, _| {
            bencher.iter(|| btree.iter().map(|(&key, _)| u64::from(key)).sum::<u64>());
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_sequential_insert,
    benchmark_lookup,
    benchmark_iteration
);

criterion_main!(benches);
