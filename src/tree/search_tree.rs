//! Binary search trees with a compile-time balance policy.
//!
//! This module provides [`SearchTree`], a mutable binary search tree whose
//! post-insert repair is chosen by a [`BalancePolicy`] type parameter:
//!
//! - [`BinarySearchTree`] (`SearchTree<T, Unbalanced>`): no repair
//! - [`AvlTree`] (`SearchTree<T, HeightBalanced>`): AVL rotations
//!
//! # Overview
//!
//! Values equal to a node's value are routed left, so duplicates are kept.
//! For a rebalancing policy, insertion recurses down to an empty slot, and
//! each level of the recursion returns the (possibly new) root of its
//! subtree to the caller, which reattaches it. On the way back up every node
//! refreshes its cached height and hands itself to the policy. Recursion
//! depth is then bounded by the balanced height.
//!
//! Without rebalancing, the tree can be as tall as it is long, so insertion
//! walks a cursor down to the empty slot and then raises the cached heights
//! along the same path. Cloning and dropping are iterative for both.
//!
//! | Operation  | `BinarySearchTree` | `AvlTree`  |
//! |------------|--------------------|------------|
//! | `add`      | O(h), h up to n    | O(log n)   |
//! | `contains` | O(h), h up to n    | O(log n)   |
//! | `height`   | O(1)               | O(1)       |
//! | `iter`     | O(n) total         | O(n) total |
//!
//! # Examples
//!
//! ```rust
//! use ordkit::tree::{AvlTree, BinarySearchTree};
//!
//! let unbalanced: BinarySearchTree<i32> = (0..100).collect();
//! let balanced: AvlTree<i32> = (0..100).collect();
//!
//! assert_eq!(unbalanced.height(), 100);
//! assert_eq!(balanced.height(), 7);
//! assert!(balanced.iter().copied().eq(0..100));
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;

use smallvec::SmallVec;

use super::node::{TreeNode, subtree_height};
use super::policy::{BalancePolicy, HeightBalanced, Unbalanced};
use crate::error::InvariantViolation;

// =============================================================================
// Constants
// =============================================================================

/// Traversal frames kept inline before the iterator stack spills to the heap.
///
/// An AVL tree of height 32 holds millions of values.
const INLINE_STACK_DEPTH: usize = 32;

// =============================================================================
// SearchTree Definition
// =============================================================================

/// A binary search tree parameterised by its rebalancing policy.
///
/// Every value in a node's left subtree is `<=` the node's value, and every
/// value in its right subtree is `>`. With [`HeightBalanced`], every node's
/// balance factor is also in `{-1, 0, 1}` after each completed [`add`](Self::add).
///
/// # Examples
///
/// ```rust
/// use ordkit::tree::AvlTree;
///
/// let mut tree = AvlTree::new();
/// for value in [5, 3, 8, 1, 4] {
///     tree.add(value);
/// }
///
/// assert_eq!(tree.height(), 3);
/// assert!(tree.contains(&4));
/// assert!(!tree.contains(&7));
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 8]);
/// ```
pub struct SearchTree<T, P> {
    root: Option<Box<TreeNode<T>>>,
    /// Number of stored values, duplicates included
    length: usize,
    policy: PhantomData<fn() -> P>,
}

/// A binary search tree without rebalancing.
pub type BinarySearchTree<T> = SearchTree<T, Unbalanced>;

/// A height-balanced (AVL) binary search tree.
pub type AvlTree<T> = SearchTree<T, HeightBalanced>;

impl<T, P> SearchTree<T, P> {
    /// Creates an empty tree.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            length: 0,
            policy: PhantomData,
        }
    }

    /// Returns the number of stored values.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the tree is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of levels; 0 for an empty tree.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        subtree_height(self.root())
    }

    /// Returns the root node for read-only inspection.
    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<&TreeNode<T>> {
        self.root.as_deref()
    }

    /// Returns the smallest value.
    #[must_use]
    pub fn min(&self) -> Option<&T> {
        let mut node = self.root()?;
        while let Some(left) = node.left() {
            node = left;
        }
        Some(node.value())
    }

    /// Returns the largest value.
    #[must_use]
    pub fn max(&self) -> Option<&T> {
        let mut node = self.root()?;
        while let Some(right) = node.right() {
            node = right;
        }
        Some(node.value())
    }

    /// Returns an in-order iterator over the values.
    ///
    /// Two trees holding the same multiset of values iterate identically,
    /// whatever order the values were added in.
    #[must_use]
    pub fn iter(&self) -> SearchTreeIterator<'_, T> {
        SearchTreeIterator::new(self.root(), self.length)
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        release(self.root.take());
        self.length = 0;
    }

    /// Consumes the tree, returning its values in sorted order.
    #[must_use]
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.length);
        let mut pending: Vec<Box<TreeNode<T>>> = Vec::new();
        let mut cursor = self.root.take();
        loop {
            while let Some(mut node) = cursor {
                cursor = node.left.take();
                pending.push(node);
            }
            let Some(mut node) = pending.pop() else {
                break;
            };
            cursor = node.right.take();
            sorted.push(node.value);
        }
        sorted
    }
}

impl<T: Ord, P: BalancePolicy> SearchTree<T, P> {
    /// Inserts a value, keeping duplicates.
    ///
    /// The tree repairs itself before returning; there is no separate
    /// rebalance call.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordkit::tree::BinarySearchTree;
    ///
    /// let mut tree = BinarySearchTree::new();
    /// tree.add(2);
    /// tree.add(2);
    /// tree.add(1);
    /// assert_eq!(tree.len(), 3);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 2]);
    /// ```
    pub fn add(&mut self, value: T) {
        if P::REBALANCES {
            let root = self.root.take();
            self.root = Some(Self::add_recursive(root, value));
        } else {
            self.add_in_place(value);
        }
        self.length += 1;
    }

    /// Links a new leaf without touching the shape above it.
    ///
    /// The first walk finds the level the leaf lands on; the second
    /// descends the same path, raising each ancestor's cached height to
    /// cover it, and fills the empty slot.
    fn add_in_place(&mut self, value: T) {
        let mut leaf_level = 1;
        let mut cursor = self.root();
        while let Some(node) = cursor {
            leaf_level += 1;
            cursor = if value <= node.value {
                node.left()
            } else {
                node.right()
            };
        }

        let mut level = 0;
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            node.height = node.height.max(leaf_level - level);
            level += 1;
            slot = if value <= node.value {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *slot = Some(Box::new(TreeNode::leaf(value)));
    }

    /// Inserts below `node` and returns the root that replaces it.
    fn add_recursive(node: Option<Box<TreeNode<T>>>, value: T) -> Box<TreeNode<T>> {
        let Some(mut node) = node else {
            return Box::new(TreeNode::leaf(value));
        };
        if value <= node.value {
            node.left = Some(Self::add_recursive(node.left.take(), value));
        } else {
            node.right = Some(Self::add_recursive(node.right.take(), value));
        }
        node.refresh();
        P::rebalance(node)
    }

    /// Returns `true` if a value equal to `value` is stored.
    ///
    /// The value may be any borrowed form of `T` whose ordering matches.
    #[must_use]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cursor = self.root();
        while let Some(node) = cursor {
            cursor = match value.cmp(node.value.borrow()) {
                Ordering::Equal => return true,
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
            };
        }
        false
    }

    /// Walks the whole tree checking ordering, cached heights, the
    /// policy's balance invariant, and the stored length.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let mut pending: Vec<(&TreeNode<T>, Option<&T>, Option<&T>)> =
            self.root().map(|root| (root, None, None)).into_iter().collect();
        let mut visited = 0;

        while let Some((node, lower, upper)) = pending.pop() {
            visited += 1;
            if lower.is_some_and(|lower| node.value <= *lower) {
                return Err(InvariantViolation::new(
                    P::NAME,
                    "right subtree holds a value not greater than its ancestor",
                ));
            }
            if upper.is_some_and(|upper| node.value > *upper) {
                return Err(InvariantViolation::new(
                    P::NAME,
                    "left subtree holds a value greater than its ancestor",
                ));
            }
            let expected = 1 + subtree_height(node.left()).max(subtree_height(node.right()));
            if node.height != expected {
                return Err(InvariantViolation::new(
                    P::NAME,
                    format!("cached height {} but children give {expected}", node.height),
                ));
            }
            P::check(node)?;

            if let Some(left) = node.left() {
                pending.push((left, lower, Some(&node.value)));
            }
            if let Some(right) = node.right() {
                pending.push((right, Some(&node.value), upper));
            }
        }

        if visited == self.length {
            Ok(())
        } else {
            Err(InvariantViolation::new(
                P::NAME,
                format!("length is {} but {visited} nodes are reachable", self.length),
            ))
        }
    }
}

/// Drops a subtree without recursing once per level.
fn release<T>(root: Option<Box<TreeNode<T>>>) {
    let mut pending: Vec<Box<TreeNode<T>>> = root.into_iter().collect();
    while let Some(mut node) = pending.pop() {
        pending.extend(node.left.take());
        pending.extend(node.right.take());
    }
}

impl<T, P> Drop for SearchTree<T, P> {
    fn drop(&mut self) {
        release(self.root.take());
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// In-order iterator over a [`SearchTree`].
///
/// Holds the left spine of the unvisited part of the tree, so memory is
/// proportional to the tree's height.
pub struct SearchTreeIterator<'a, T> {
    stack: SmallVec<[&'a TreeNode<T>; INLINE_STACK_DEPTH]>,
    remaining: usize,
}

impl<'a, T> SearchTreeIterator<'a, T> {
    fn new(root: Option<&'a TreeNode<T>>, remaining: usize) -> Self {
        let mut iterator = Self {
            stack: SmallVec::new(),
            remaining,
        };
        iterator.push_left_spine(root);
        iterator
    }

    fn push_left_spine(&mut self, mut node: Option<&'a TreeNode<T>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left();
        }
    }
}

impl<'a, T> Iterator for SearchTreeIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        self.remaining = self.remaining.saturating_sub(1);
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for SearchTreeIterator<'_, T> {}

impl<T> FusedIterator for SearchTreeIterator<'_, T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, P> Default for SearchTree<T, P> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Copies the tree node by node from an explicit stack, so a degenerate
/// tree clones without deep recursion.
impl<T: Clone, P> Clone for SearchTree<T, P> {
    fn clone(&self) -> Self {
        Self {
            root: copy_subtree(self.root()),
            length: self.length,
            policy: PhantomData,
        }
    }
}

/// Copies a subtree bottom-up.
///
/// Nodes are collected root first with the right child explored before the
/// left; reversed, that order visits the left subtree, then the right, then
/// the node itself, so both children's copies are on top of `built` when a
/// node is copied.
fn copy_subtree<T: Clone>(root: Option<&TreeNode<T>>) -> Option<Box<TreeNode<T>>> {
    let mut pending: Vec<&TreeNode<T>> = root.into_iter().collect();
    let mut order = Vec::new();
    while let Some(node) = pending.pop() {
        order.push(node);
        pending.extend(node.left());
        pending.extend(node.right());
    }

    let mut built: Vec<Box<TreeNode<T>>> = Vec::with_capacity(order.len());
    for node in order.into_iter().rev() {
        let right = node.right.as_ref().and_then(|_| built.pop());
        let left = node.left.as_ref().and_then(|_| built.pop());
        built.push(Box::new(TreeNode {
            value: node.value.clone(),
            height: node.height,
            left,
            right,
        }));
    }
    built.pop()
}

impl<T: Ord, P: BalancePolicy> FromIterator<T> for SearchTree<T, P> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord, P: BalancePolicy> Extend<T> for SearchTree<T, P> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<'a, T, P> IntoIterator for &'a SearchTree<T, P> {
    type Item = &'a T;
    type IntoIter = SearchTreeIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Trees are equal when they hold the same values, whatever their shape.
impl<T: PartialEq, P> PartialEq for SearchTree<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<T: Eq, P> Eq for SearchTree<T, P> {}

impl<T: fmt::Debug, P> fmt::Debug for SearchTree<T, P> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, P> fmt::Display for SearchTree<T, P> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        for (position, value) in self.iter().enumerate() {
            if position > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{value}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize, P> serde::Serialize for SearchTree<T, P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut sequence = serializer.serialize_seq(Some(self.len()))?;
        for value in self {
            sequence.serialize_element(value)?;
        }
        sequence.end()
    }
}

#[cfg(feature = "serde")]
struct SearchTreeVisitor<T, P> {
    marker: PhantomData<(T, fn() -> P)>,
}

#[cfg(feature = "serde")]
impl<'de, T, P> serde::de::Visitor<'de> for SearchTreeVisitor<T, P>
where
    T: serde::Deserialize<'de> + Ord,
    P: BalancePolicy,
{
    type Value = SearchTree<T, P>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut tree = SearchTree::new();
        while let Some(value) = access.next_element()? {
            tree.add(value);
        }
        Ok(tree)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, P> serde::Deserialize<'de> for SearchTree<T, P>
where
    T: serde::Deserialize<'de> + Ord,
    P: BalancePolicy,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(SearchTreeVisitor {
            marker: PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
