//! Binary tree node shared by the BST and AVL trees.

use std::fmt;

/// A node of a [`SearchTree`](super::SearchTree).
///
/// Each node exclusively owns its children. The cached `height` counts
/// levels: a leaf has height 1 and an absent child counts as 0.
///
/// Nodes are exposed read-only through [`SearchTree::root`](super::SearchTree::root)
/// so callers can inspect the shape of a tree. The `Debug` output shows the
/// node alone, not its subtree; walk [`left`](Self::left) and
/// [`right`](Self::right) to see more.
///
/// # Examples
///
/// ```rust
/// use ordkit::tree::AvlTree;
///
/// let tree: AvlTree<i32> = [2, 1, 3].into_iter().collect();
/// let root = tree.root().unwrap();
///
/// assert_eq!(root.value(), &2);
/// assert_eq!(root.height(), 2);
/// assert_eq!(root.balance_factor(), 0);
/// assert_eq!(root.left().map(|node| *node.value()), Some(1));
/// ```
pub struct TreeNode<T> {
    pub(crate) value: T,
    pub(crate) height: usize,
    pub(crate) left: Option<Box<Self>>,
    pub(crate) right: Option<Box<Self>>,
}

impl<T> TreeNode<T> {
    pub(crate) const fn leaf(value: T) -> Self {
        Self {
            value,
            height: 1,
            left: None,
            right: None,
        }
    }

    /// Returns the stored value.
    #[inline]
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Returns the left child, whose values are all `<=` this node's value.
    #[inline]
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// Returns the right child, whose values are all `>` this node's value.
    #[inline]
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Returns the number of levels in the subtree rooted here.
    #[inline]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns `true` if the node has no children.
    #[inline]
    pub const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Returns `height(left) - height(right)`.
    #[allow(clippy::cast_possible_wrap)]
    pub fn balance_factor(&self) -> isize {
        subtree_height(self.left()) as isize - subtree_height(self.right()) as isize
    }

    /// Recomputes the cached height from the children.
    pub(crate) fn refresh(&mut self) {
        self.height = 1 + subtree_height(self.left()).max(subtree_height(self.right()));
    }

    /// Rotates the subtree left, promoting the right child.
    ///
    /// ```text
    ///     a              b
    ///    / \            / \
    ///   x   b    =>    a   z
    ///      / \        / \
    ///     y   z      x   y
    /// ```
    pub(crate) fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let Some(mut pivot) = self.right.take() else {
            return self;
        };
        self.right = pivot.left.take();
        self.refresh();
        pivot.left = Some(self);
        pivot.refresh();
        tracing::trace!(height = pivot.height, "rotated left");
        pivot
    }

    /// Rotates the subtree right, promoting the left child.
    pub(crate) fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let Some(mut pivot) = self.left.take() else {
            return self;
        };
        self.left = pivot.right.take();
        self.refresh();
        pivot.right = Some(self);
        pivot.refresh();
        tracing::trace!(height = pivot.height, "rotated right");
        pivot
    }
}

impl<T: fmt::Debug> fmt::Debug for TreeNode<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TreeNode")
            .field("value", &self.value)
            .field("height", &self.height)
            .field("balance_factor", &self.balance_factor())
            .finish()
    }
}

/// Height of an optional subtree; absent subtrees have height 0.
pub(crate) fn subtree_height<T>(node: Option<&TreeNode<T>>) -> usize {
    node.map_or(0, TreeNode::height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn branch(value: i32, left: Option<TreeNode<i32>>, right: Option<TreeNode<i32>>) -> TreeNode<i32> {
        let mut node = TreeNode {
            value,
            height: 1,
            left: left.map(Box::new),
            right: right.map(Box::new),
        };
        node.refresh();
        node
    }

    fn in_order(node: Option<&TreeNode<i32>>, values: &mut Vec<i32>) {
        if let Some(node) = node {
            in_order(node.left(), values);
            values.push(node.value);
            in_order(node.right(), values);
        }
    }

    #[rstest]
    fn test_leaf_has_height_one() {
        let leaf = TreeNode::leaf(5);
        assert_eq!(leaf.height(), 1);
        assert_eq!(leaf.balance_factor(), 0);
        assert!(leaf.is_leaf());
    }

    #[rstest]
    fn test_rotate_left_moves_middle_subtree() {
        let right = branch(20, Some(TreeNode::leaf(15)), Some(TreeNode::leaf(30)));
        let root = Box::new(branch(10, Some(TreeNode::leaf(5)), Some(right)));

        let rotated = root.rotate_left();
        assert_eq!(rotated.value, 20);
        assert_eq!(rotated.left().map(|node| node.value), Some(10));
        assert_eq!(
            rotated.left().and_then(TreeNode::right).map(|node| node.value),
            Some(15)
        );
        assert_eq!(rotated.height(), 3);
        assert_eq!(rotated.left().map(TreeNode::height), Some(2));

        let mut values = Vec::new();
        in_order(Some(&rotated), &mut values);
        assert_eq!(values, vec![5, 10, 15, 20, 30]);
    }

    #[rstest]
    fn test_rotate_right_on_left_chain() {
        let chain = branch(3, Some(branch(2, Some(TreeNode::leaf(1)), None)), None);
        assert_eq!(chain.balance_factor(), 2);

        let rotated = Box::new(chain).rotate_right();
        assert_eq!(rotated.value, 2);
        assert_eq!(rotated.height(), 2);
        assert_eq!(rotated.balance_factor(), 0);
    }

    #[rstest]
    fn test_debug_shows_only_the_node() {
        let node = branch(2, Some(TreeNode::leaf(1)), None);
        assert_eq!(
            format!("{node:?}"),
            "TreeNode { value: 2, height: 2, balance_factor: 1 }"
        );
    }

    #[rstest]
    fn test_rotation_without_pivot_is_identity() {
        let leaf = Box::new(TreeNode::leaf(1));
        let rotated = leaf.rotate_left().rotate_right();
        assert_eq!(rotated.value, 1);
        assert!(rotated.is_leaf());
    }
}
