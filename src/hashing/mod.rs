//! Hash map with separate chaining.
//!
//! - [`ChainedHashMap`]: fixed bucket count, one [`LinkedList`](crate::linked::LinkedList)
//!   of [`Entry`] values per bucket
//!
//! # Hashing
//!
//! Bucket selection needs `hash(key) -> u64` to be deterministic and spread
//! keys reasonably well; cryptographic strength is not required. The hasher
//! used by default is chosen at compile time:
//!
//! | Feature   | `DefaultHashBuilder`                 |
//! |-----------|--------------------------------------|
//! | (none)    | std `DefaultHasher` (SipHash, zero keys) |
//! | `ahash`   | `AHasher` with fixed keys            |
//! | `fxhash`  | `rustc_hash::FxBuildHasher`          |
//!
//! When both `fxhash` and `ahash` are enabled, `fxhash` wins.
//!
//! # Examples
//!
//! ```rust
//! use ordkit::hashing::ChainedHashMap;
//!
//! let mut map = ChainedHashMap::new(4).unwrap();
//! map.put("a", 1);
//! map.put("b", 2);
//! assert_eq!(map.get("a"), Ok(&1));
//!
//! map.delete("a");
//! assert!(map.get("a").is_err());
//! assert_eq!(map.len(), 1);
//! ```

mod chained_map;

pub use chained_map::ChainedHashMap;
pub use chained_map::ChainedHashMapIterator;
pub use chained_map::DEFAULT_BUCKET_COUNT;
pub use chained_map::Entry;

// =============================================================================
// Default Hasher Selection
// =============================================================================

/// Builder for the hasher [`ChainedHashMap`] uses when none is supplied.
#[cfg(feature = "fxhash")]
pub type DefaultHashBuilder = rustc_hash::FxBuildHasher;

/// Builder for the hasher [`ChainedHashMap`] uses when none is supplied.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type DefaultHashBuilder = std::hash::BuildHasherDefault<ahash::AHasher>;

/// Builder for the hasher [`ChainedHashMap`] uses when none is supplied.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultHashBuilder =
    std::hash::BuildHasherDefault<std::collections::hash_map::DefaultHasher>;

static_assertions::assert_impl_all!(ChainedHashMap<String, i32>: Send, Sync, Clone);
