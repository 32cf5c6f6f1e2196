//! Rebalancing policies for [`SearchTree`](super::SearchTree).
//!
//! A policy decides what happens to a subtree root on the way back up from
//! an insertion. The policy is a type parameter, so the choice is made at
//! compile time and the insert path has no dynamic dispatch.

use super::node::TreeNode;
use crate::error::InvariantViolation;

/// Post-insert repair applied at every level of the insertion path.
///
/// `rebalance` receives a node whose children are already repaired and
/// whose height has been refreshed, and returns the root of the subtree
/// that replaces it.
pub trait BalancePolicy {
    /// Name used in diagnostics.
    const NAME: &'static str;

    /// Whether `rebalance` can change a subtree's root.
    ///
    /// When `false`, insertion links the new leaf in place with a loop and
    /// never calls `rebalance`, so an arbitrarily deep tree is built
    /// without recursion.
    const REBALANCES: bool;

    /// Repairs the subtree rooted at `node` and returns its new root.
    fn rebalance<T>(node: Box<TreeNode<T>>) -> Box<TreeNode<T>>;

    /// Checks the policy's own per-node invariant.
    ///
    /// # Errors
    ///
    /// Returns an [`InvariantViolation`] describing the offending node.
    fn check<T>(_node: &TreeNode<T>) -> Result<(), InvariantViolation> {
        Ok(())
    }
}

// =============================================================================
// Unbalanced
// =============================================================================

/// No repair: a plain binary search tree.
///
/// Sorted insertion degrades the tree into a chain of height `n`.
#[derive(Debug)]
pub enum Unbalanced {}

impl BalancePolicy for Unbalanced {
    const NAME: &'static str = "BinarySearchTree";
    const REBALANCES: bool = false;

    #[inline]
    fn rebalance<T>(node: Box<TreeNode<T>>) -> Box<TreeNode<T>> {
        node
    }
}

// =============================================================================
// HeightBalanced
// =============================================================================

/// AVL repair: keeps every balance factor in `{-1, 0, 1}`.
///
/// | balance | heavy child's balance | rotation                      |
/// |---------|-----------------------|-------------------------------|
/// | +2      | >= 0 (left-left)      | right on node                 |
/// | +2      | < 0 (left-right)      | left on left child, then right|
/// | -2      | <= 0 (right-right)    | left on node                  |
/// | -2      | > 0 (right-left)      | right on right child, then left|
#[derive(Debug)]
pub enum HeightBalanced {}

impl BalancePolicy for HeightBalanced {
    const NAME: &'static str = "AvlTree";
    const REBALANCES: bool = true;

    fn rebalance<T>(mut node: Box<TreeNode<T>>) -> Box<TreeNode<T>> {
        match node.balance_factor() {
            balance if balance > 1 => {
                if node.left().is_some_and(|left| left.balance_factor() < 0) {
                    node.left = node.left.take().map(TreeNode::rotate_left);
                }
                node.rotate_right()
            }
            balance if balance < -1 => {
                if node.right().is_some_and(|right| right.balance_factor() > 0) {
                    node.right = node.right.take().map(TreeNode::rotate_right);
                }
                node.rotate_left()
            }
            _ => node,
        }
    }

    fn check<T>(node: &TreeNode<T>) -> Result<(), InvariantViolation> {
        let balance = node.balance_factor();
        if balance.abs() > 1 {
            return Err(InvariantViolation::new(
                Self::NAME,
                format!("balance factor {balance} at a node of height {}", node.height()),
            ));
        }
        Ok(())
    }
}
