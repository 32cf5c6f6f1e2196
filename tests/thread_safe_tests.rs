#![cfg(all(feature = "hashing", feature = "tree"))]
//! Shared use of the containers behind an external lock.
//!
//! The containers carry no internal synchronisation. Wrapping one in a
//! read-write lock lets readers run together while each mutation holds the
//! lock exclusively.

use std::sync::Arc;
use std::thread;

use ordkit::hashing::ChainedHashMap;
use ordkit::tree::{AvlTree, BTree};
use parking_lot::RwLock;
use rstest::rstest;

const WRITERS: u32 = 4;
const KEYS_PER_WRITER: u32 = 250;

#[rstest]
fn test_concurrent_writers_behind_lock() {
    let tree = Arc::new(RwLock::new(BTree::new(3).unwrap()));

    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let tree = Arc::clone(&tree);
            thread::spawn(move || {
                for offset in 0..KEYS_PER_WRITER {
                    let key = writer * KEYS_PER_WRITER + offset;
                    tree.write().add(key, writer);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let tree = tree.read();
    assert_eq!(tree.len(), (WRITERS * KEYS_PER_WRITER) as usize);
    assert_eq!(tree.validate(), Ok(()));
    assert_eq!(tree.get(&(KEYS_PER_WRITER + 1)), Some(&1));
}

#[rstest]
fn test_concurrent_readers_share_lock() {
    let map: ChainedHashMap<u32, u32> = (0..100).map(|key| (key, key * key)).collect();
    let map = Arc::new(RwLock::new(map));

    let handles: Vec<_> = (0..8)
        .map(|reader| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                let guard = map.read();
                (0..100).filter(|key| key % 8 == reader).all(|key| guard.get(&key) == Ok(&(key * key)))
            })
        })
        .collect();

    assert!(handles.into_iter().all(|handle| handle.join().unwrap()));
}

#[rstest]
fn test_avl_stays_balanced_under_interleaved_writers() {
    let tree = Arc::new(RwLock::new(AvlTree::new()));

    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let tree = Arc::clone(&tree);
            thread::spawn(move || {
                for value in (0..KEYS_PER_WRITER).map(|offset| offset * WRITERS + writer) {
                    tree.write().add(value);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let tree = tree.read();
    assert_eq!(tree.validate(), Ok(()));
    assert!(tree.iter().copied().eq(0..WRITERS * KEYS_PER_WRITER));
}
