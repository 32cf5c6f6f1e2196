//! Benchmark for ChainedHashMap vs standard HashMap.
//!
//! Bucket counts are swept at a fixed entry count to show how chain length
//! (the load factor) dominates lookup cost once the table stops growing.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ordkit::hashing::ChainedHashMap;
use std::collections::HashMap;
use std::hint::black_box;

const ENTRIES: u64 = 10_000;

// =============================================================================
// put Benchmark
// =============================================================================

fn benchmark_put(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("put");

    for bucket_count in [31, 1021, 16381] {
        group.bench_with_input(
            BenchmarkId::new("ChainedHashMap", bucket_count),
            &bucket_count,
            |bencher, &bucket_count| {
                bencher.iter(|| {
                    let mut map = ChainedHashMap::new(bucket_count).unwrap();
                    for key in 0..ENTRIES {
                        map.put(black_box(key), key);
                    }
                    black_box(map)
                });
            },
        );
    }

    group.bench_function("HashMap", |bencher| {
        bencher.iter(|| {
            let mut map = HashMap::new();
            for key in 0..ENTRIES {
                map.insert(black_box(key), key);
            }
            black_box(map)
        });
    });

    group.finish();
}

// =============================================================================
// get Benchmark
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for bucket_count in [31, 1021, 16381] {
        let mut map = ChainedHashMap::new(bucket_count).unwrap();
        for key in 0..ENTRIES {
            map.put(key, key);
        }

        group.bench_with_input(
            BenchmarkId::new("ChainedHashMap", bucket_count),
            &bucket_count,
            |bencher, _| {
                bencher.iter(|| {
                    (0..ENTRIES)
                        .filter_map(|key| map.get(&black_box(key)).ok())
                        .sum::<u64>()
                });
            },
        );
    }

    let standard: HashMap<u64, u64> = (0..ENTRIES).map(|key| (key, key)).collect();
    group.bench_function("HashMap", |bencher| {
        bencher.iter(|| {
            (0..ENTRIES)
                .filter_map(|key| standard.get(&black_box(key)))
                .sum::<u64>()
        });
    });

    group.finish();
}

// =============================================================================
// delete Benchmark
// =============================================================================

fn benchmark_delete(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("delete");

    for bucket_count in [31, 1021] {
        let mut template = ChainedHashMap::new(bucket_count).unwrap();
        for key in 0..ENTRIES {
            template.put(key, key);
        }

        group.bench_with_input(
            BenchmarkId::new("ChainedHashMap", bucket_count),
            &template,
            |bencher, template| {
                bencher.iter_batched(
                    || template.clone(),
                    |mut map| {
                        for key in (0..ENTRIES).step_by(2) {
                            map.delete(&black_box(key));
                        }
                        map
                    },
                    criterion::BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(benches, benchmark_put, benchmark_get, benchmark_delete);

criterion_main!(benches);
