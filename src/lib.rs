//! # ordkit
//!
//! Classic mutable collections with explicit, checkable invariants.
//!
//! ## Overview
//!
//! - **Linked**: arena-backed doubly-linked list, plus `Queue` and `Stack`
//!   facades over it
//! - **Hashing**: separate-chaining hash map with a fixed bucket count
//! - **Trees**: binary search tree, AVL tree, and B-tree
//!
//! All structures are single-threaded and synchronous. They own their
//! nodes exclusively and are `Send + Sync` whenever their elements are, so
//! callers that need shared mutation wrap an instance in a lock.
//!
//! ## Feature Flags
//!
//! - `linked`: `LinkedList`, `Queue`, `Stack`
//! - `hashing`: `ChainedHashMap` (enables `linked`)
//! - `tree`: `BinarySearchTree`, `AvlTree`, `BTree`
//! - `serde`: `Serialize`/`Deserialize` for every container
//! - `fxhash` / `ahash`: alternative default bucket hashers
//! - `full`: every container plus `serde`
//!
//! ## Example
//!
//! ```rust
//! use ordkit::prelude::*;
//!
//! let mut map = ChainedHashMap::new(8).unwrap();
//! map.put("answer", 42);
//! assert_eq!(map.get("answer"), Ok(&42));
//!
//! let tree: AvlTree<i32> = [5, 3, 8, 1, 4].into_iter().collect();
//! assert_eq!(tree.height(), 3);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use ordkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{CollectionError, InvariantViolation};

    #[cfg(feature = "linked")]
    pub use crate::linked::*;

    #[cfg(feature = "hashing")]
    pub use crate::hashing::*;

    #[cfg(feature = "tree")]
    pub use crate::tree::*;
}

pub mod error;

#[cfg(feature = "linked")]
pub mod linked;

#[cfg(feature = "hashing")]
pub mod hashing;

#[cfg(feature = "tree")]
pub mod tree;
