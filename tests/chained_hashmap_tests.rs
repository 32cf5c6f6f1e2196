#![cfg(feature = "hashing")]
//! Unit tests for ChainedHashMap.

use std::hash::{BuildHasherDefault, Hasher};

use ordkit::error::CollectionError;
use ordkit::hashing::{ChainedHashMap, DEFAULT_BUCKET_COUNT};
use rstest::rstest;

/// Sends every key to bucket 0 so every operation walks one long chain.
#[derive(Default)]
struct ConstantHasher;

impl Hasher for ConstantHasher {
    fn finish(&self) -> u64 {
        0
    }

    fn write(&mut self, _bytes: &[u8]) {}
}

type Colliding = BuildHasherDefault<ConstantHasher>;

fn colliding_map(bucket_count: usize) -> ChainedHashMap<String, i32, Colliding> {
    ChainedHashMap::with_hasher(bucket_count, Colliding::default()).unwrap()
}

// =============================================================================
// Construction Tests
// =============================================================================

#[rstest]
fn test_zero_buckets_is_rejected() {
    let result: Result<ChainedHashMap<&str, i32>, _> = ChainedHashMap::new(0);
    assert_eq!(
        result.err(),
        Some(CollectionError::InvalidConfiguration {
            parameter: "bucket_count",
            value: 0,
            minimum: 1,
        })
    );
}

#[rstest]
#[case(1)]
#[case(4)]
#[case(97)]
fn test_bucket_count_is_fixed(#[case] bucket_count: usize) {
    let mut map = ChainedHashMap::new(bucket_count).unwrap();
    for key in 0..200 {
        map.put(key, key);
    }
    assert_eq!(map.bucket_count(), bucket_count);
    let chained: usize = (0..bucket_count).filter_map(|index| map.bucket_len(index)).sum();
    assert_eq!(chained, 200);
    assert_eq!(map.bucket_len(bucket_count), None);
}

#[rstest]
fn test_default_uses_default_bucket_count() {
    let map: ChainedHashMap<i32, i32> = ChainedHashMap::default();
    assert_eq!(map.bucket_count(), DEFAULT_BUCKET_COUNT);
    assert!(map.is_empty());
}

// =============================================================================
// Put / Get / Delete Tests
// =============================================================================

#[rstest]
fn test_put_get_delete_scenario() {
    let mut map = ChainedHashMap::new(4).unwrap();
    map.put("a", 1);
    map.put("b", 2);
    assert_eq!(map.get("a"), Ok(&1));

    assert_eq!(map.delete("a"), Some(1));
    assert_eq!(map.get("a"), Err(CollectionError::KeyNotFound));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("b"), Ok(&2));
}

#[rstest]
fn test_falsy_values_are_found() {
    let mut map = ChainedHashMap::new(4).unwrap();
    map.put("zero", 0);
    map.put("empty", 0);
    assert_eq!(map.get("zero"), Ok(&0));
    assert!(map.contains_key("empty"));
    assert!(!map.contains_key("missing"));
}

#[rstest]
fn test_put_overwrites_and_returns_previous() {
    let mut map = ChainedHashMap::new(4).unwrap();
    assert_eq!(map.put("k", 1), None);
    assert_eq!(map.put("k", 2), Some(1));
    assert_eq!(map.get("k"), Ok(&2));
    assert_eq!(map.len(), 1);
}

#[rstest]
fn test_delete_absent_key_is_noop() {
    let mut map = ChainedHashMap::new(4).unwrap();
    map.put("a", 1);
    assert_eq!(map.delete("b"), None);
    assert_eq!(map.len(), 1);
}

#[rstest]
fn test_get_mut_updates_value() {
    let mut map = ChainedHashMap::new(4).unwrap();
    map.put("counter".to_string(), 1);
    *map.get_mut("counter").unwrap() += 1;
    assert_eq!(map["counter"], 2);
    assert_eq!(map.get_mut("missing"), Err(CollectionError::KeyNotFound));
}

#[rstest]
#[should_panic(expected = "key not found")]
fn test_index_panics_on_missing_key() {
    let map: ChainedHashMap<&str, i32> = ChainedHashMap::new(4).unwrap();
    let _value: i32 = map["nothing"];
}

// =============================================================================
// Collision Tests
// =============================================================================

#[rstest]
fn test_colliding_keys_share_one_chain() {
    let mut map = colliding_map(8);
    for (value, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
        map.put(key.to_string(), i32::try_from(value).unwrap());
    }
    assert_eq!(map.bucket_len(0), Some(4));
    assert_eq!(map.bucket_len(1), Some(0));
    assert_eq!(map.get("c"), Ok(&2));
}

#[rstest]
#[case::head("a")]
#[case::middle("b")]
#[case::tail("c")]
fn test_delete_from_chain_keeps_neighbours(#[case] removed: &str) {
    let mut map = colliding_map(2);
    for key in ["a", "b", "c"] {
        map.put(key.to_string(), 0);
    }
    map.delete(removed);
    assert_eq!(map.bucket_len(0), Some(2));
    for key in ["a", "b", "c"] {
        assert_eq!(map.contains_key(key), key != removed);
    }
}

// =============================================================================
// Iteration and Trait Tests
// =============================================================================

#[rstest]
fn test_iter_visits_every_entry_once() {
    let map: ChainedHashMap<i32, i32> = (0..50).map(|key| (key, key * 2)).collect();
    let mut keys: Vec<i32> = map.keys().copied().collect();
    keys.sort_unstable();
    assert_eq!(keys, (0..50).collect::<Vec<_>>());
    assert_eq!(map.iter().len(), 50);
    assert_eq!(map.values().sum::<i32>(), (0..50).map(|key| key * 2).sum());
}

#[rstest]
fn test_load_factor() {
    let mut map = ChainedHashMap::new(4).unwrap();
    for key in 0..10 {
        map.put(key, ());
    }
    assert!((map.load_factor() - 2.5).abs() < f64::EPSILON);
}

#[rstest]
fn test_clear_keeps_buckets() {
    let mut map: ChainedHashMap<i32, i32> = (0..10).map(|key| (key, key)).collect();
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.bucket_count(), DEFAULT_BUCKET_COUNT);
    assert_eq!(map.iter().next(), None);
}

#[rstest]
fn test_equality_ignores_bucket_count() {
    let mut small = ChainedHashMap::new(2).unwrap();
    let mut large = ChainedHashMap::new(64).unwrap();
    for key in 0..20 {
        small.put(key, key);
        large.put(19 - key, 19 - key);
    }
    assert_eq!(small, large);
    large.put(0, 100);
    assert_ne!(small, large);
}

#[rstest]
fn test_display_single_entry() {
    let mut map = ChainedHashMap::new(4).unwrap();
    map.put("a", 1);
    assert_eq!(format!("{map}"), "{a: 1}");
}
