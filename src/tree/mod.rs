//! Ordered trees.
//!
//! - [`SearchTree`]: binary search tree generic over a [`BalancePolicy`]
//!   - [`BinarySearchTree`]: no rebalancing
//!   - [`AvlTree`]: height-balanced with rotations
//! - [`BTree`]: multi-way ordered map with node splitting
//!
//! Every tree maintains its invariants after each completed insertion and
//! exposes a `validate()` self-check that walks the whole structure.
//!
//! Deletion is not supported.
//!
//! # Examples
//!
//! ```rust
//! use ordkit::tree::{AvlTree, BTree};
//!
//! let avl: AvlTree<u32> = (1..=1000).collect();
//! assert!(avl.height() <= 14);
//!
//! let btree: BTree<u32, ()> = (1..=1000).map(|key| (key, ())).collect();
//! assert!(btree.contains(&500));
//! assert!(btree.validate().is_ok());
//! ```

mod btree;
mod node;
mod policy;
mod search_tree;

pub use btree::BTree;
pub use btree::BTreeIterator;
pub use btree::DEFAULT_SPLIT_THRESHOLD;
pub use btree::NodeId;
pub use node::TreeNode;
pub use policy::BalancePolicy;
pub use policy::HeightBalanced;
pub use policy::Unbalanced;
pub use search_tree::AvlTree;
pub use search_tree::BinarySearchTree;
pub use search_tree::SearchTree;
pub use search_tree::SearchTreeIterator;

static_assertions::assert_impl_all!(AvlTree<String>: Send, Sync, Clone);
static_assertions::assert_impl_all!(BinarySearchTree<String>: Send, Sync, Clone);
static_assertions::assert_impl_all!(BTree<String, Vec<u8>>: Send, Sync, Clone);
