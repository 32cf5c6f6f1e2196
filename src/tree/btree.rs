//! Multi-way ordered map with node splitting.
//!
//! [`BTree`] stores its nodes in an arena and addresses them with [`NodeId`]
//! indices. Downward links (`children`) express ownership; the upward
//! `parent` link is a plain index used to find where a promoted median goes.
//!
//! # Splitting
//!
//! A node may hold at most `split_threshold` keys. Insertion places the key
//! in a leaf, then checks every node on the path back to the root; a node
//! holding `split_threshold + 1` keys gives up its median:
//!
//! ```text
//!  split_threshold = 2, inserting 3:
//!
//!    [1 2 3]   =>     [2]
//!                    /   \
//!                  [1]   [3]
//! ```
//!
//! The low half stays in the original node and the high half moves to a new
//! right sibling. At the root the median becomes a new root and the height
//! grows by one; elsewhere it is inserted into the parent, which may then
//! overflow in turn.
//!
//! # Time Complexity
//!
//! | Operation  | Complexity           |
//! |------------|----------------------|
//! | `get`      | O(log n)             |
//! | `add`      | O(t log n)           |
//! | `iter`     | O(n) total           |
//! | `validate` | O(n)                 |
//!
//! where `t` is the split threshold.

use std::borrow::Borrow;
use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::mem;

use smallvec::SmallVec;

use crate::error::{CollectionError, InvariantViolation};

// =============================================================================
// Constants
// =============================================================================

/// Split threshold used by [`Default`], [`FromIterator`], and deserialisation.
pub const DEFAULT_SPLIT_THRESHOLD: usize = 4;

/// Smallest split threshold that still splits into two non-empty halves.
const MIN_SPLIT_THRESHOLD: usize = 2;

const NAME: &str = "BTree";

// =============================================================================
// Node Definitions
// =============================================================================

/// Index of a node in a [`BTree`]'s arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena slot.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Node<K, V> {
    /// Strictly increasing
    keys: Vec<K>,
    values: Vec<V>,
    /// Empty for leaves, otherwise `keys.len() + 1` entries
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    const fn leaf(parent: Option<NodeId>) -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
            children: Vec::new(),
            parent,
        }
    }

    #[inline]
    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

// =============================================================================
// BTree Definition
// =============================================================================

/// An ordered map whose nodes hold up to `split_threshold` keys each.
///
/// Keys are unique: adding an existing key replaces its value.
///
/// # Examples
///
/// ```rust
/// use ordkit::tree::BTree;
///
/// let mut tree = BTree::new(2).unwrap();
/// for key in 1..=7 {
///     tree.add(key, key * 10);
/// }
///
/// assert_eq!(tree.len(), 7);
/// assert_eq!(tree.get(&5), Some(&50));
/// assert_eq!(tree.get(&8), None);
/// assert_eq!(tree.height(), 2);
/// assert!(tree.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct BTree<K, V> {
    nodes: Vec<Node<K, V>>,
    root: NodeId,
    split_threshold: usize,
    /// Number of splits that reached the root
    height: usize,
    length: usize,
}

impl<K, V> BTree<K, V> {
    /// Creates an empty tree whose nodes split above `split_threshold` keys.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidConfiguration`] if `split_threshold`
    /// is less than 2.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordkit::tree::BTree;
    ///
    /// assert!(BTree::<i32, ()>::new(1).is_err());
    /// assert_eq!(BTree::<i32, ()>::new(3).unwrap().split_threshold(), 3);
    /// ```
    pub fn new(split_threshold: usize) -> Result<Self, CollectionError> {
        let split_threshold =
            CollectionError::require_at_least("split_threshold", split_threshold, MIN_SPLIT_THRESHOLD)?;
        tracing::debug!(split_threshold, "created b-tree");
        Ok(Self::with_split_threshold(split_threshold))
    }

    fn with_split_threshold(split_threshold: usize) -> Self {
        Self {
            nodes: vec![Node::leaf(None)],
            root: NodeId(0),
            split_threshold,
            height: 0,
            length: 0,
        }
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the tree holds no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of times a split has reached the root.
    ///
    /// A tree that never split has height 0; the number of levels is
    /// `height() + 1`.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the maximum number of keys a node may hold.
    #[inline]
    #[must_use]
    pub const fn split_threshold(&self) -> usize {
        self.split_threshold
    }

    /// Returns the minimum number of keys held by any non-root node.
    ///
    /// Splitting `t + 1` keys around the median leaves `t / 2` (rounded
    /// down) keys in the high half.
    #[inline]
    #[must_use]
    pub const fn min_fill(&self) -> usize {
        self.split_threshold / 2
    }

    /// Returns the number of allocated nodes.
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the id of the root node.
    #[inline]
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the smallest entry.
    #[must_use]
    pub fn min(&self) -> Option<(&K, &V)> {
        let mut node = self.node(self.root);
        while let Some(&first) = node.children.first() {
            node = self.node(first);
        }
        node.keys.first().zip(node.values.first())
    }

    /// Returns the largest entry.
    #[must_use]
    pub fn max(&self) -> Option<(&K, &V)> {
        let mut node = self.node(self.root);
        while let Some(&last) = node.children.last() {
            node = self.node(last);
        }
        node.keys.last().zip(node.values.last())
    }

    /// Returns an iterator over the entries in key order.
    #[must_use]
    pub fn iter(&self) -> BTreeIterator<'_, K, V> {
        BTreeIterator::new(self)
    }

    /// Returns an iterator over the keys in order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + DoubleEndedIterator + '_ {
        self.collect_in_order().into_iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values in key order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> + DoubleEndedIterator + '_ {
        self.collect_in_order().into_iter().map(|(_, value)| value)
    }

    fn collect_in_order(&self) -> Vec<(&K, &V)> {
        let mut entries = Vec::with_capacity(self.length);
        entries.extend(self.iter());
        entries
    }

    /// Removes every entry, keeping the split threshold.
    pub fn clear(&mut self) {
        *self = Self::with_split_threshold(self.split_threshold);
    }

    #[inline]
    fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.0]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id.0]
    }
}

impl<K: Ord, V> BTree<K, V> {
    /// Finds the node and slot holding `key`.
    fn locate<Q>(&self, key: &Q) -> Option<(NodeId, usize)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut id = self.root;
        loop {
            let node = self.node(id);
            match node.keys.binary_search_by(|probe| probe.borrow().cmp(key)) {
                Ok(position) => return Some((id, position)),
                Err(_) if node.is_leaf() => return None,
                Err(position) => id = node.children[position],
            }
        }
    }

    /// Returns the stored key and value for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordkit::tree::BTree;
    ///
    /// let tree: BTree<String, u32> = [("a".to_string(), 1)].into_iter().collect();
    /// assert_eq!(tree.find("a"), Some((&"a".to_string(), &1)));
    /// ```
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (id, position) = self.locate(key)?;
        let node = self.node(id);
        Some((&node.keys[position], &node.values[position]))
    }

    /// Returns the value stored for `key`.
    ///
    /// `None` means the key is absent, never that the value is empty.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (id, position) = self.locate(key)?;
        Some(&mut self.node_mut(id).values[position])
    }

    /// Returns `true` if `key` is stored.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(key).is_some()
    }

    /// Inserts an entry, returning the previous value if `key` was present.
    ///
    /// Overwriting leaves the structure and the length unchanged. A new key
    /// goes into a leaf, and every node on the path back to the root is
    /// split if it overflows.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordkit::tree::BTree;
    ///
    /// let mut tree = BTree::new(2).unwrap();
    /// assert_eq!(tree.add(1, "one"), None);
    /// assert_eq!(tree.add(1, "uno"), Some("one"));
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(tree.get(&1), Some(&"uno"));
    /// ```
    pub fn add(&mut self, key: K, value: V) -> Option<V> {
        let previous = self.insert_into(self.root, key, value);
        if previous.is_none() {
            self.length += 1;
        }
        previous
    }

    fn insert_into(&mut self, id: NodeId, key: K, value: V) -> Option<V> {
        let node = self.node_mut(id);
        let previous = match node.keys.binary_search(&key) {
            Ok(position) => return Some(mem::replace(&mut node.values[position], value)),
            Err(position) if node.is_leaf() => {
                node.keys.insert(position, key);
                node.values.insert(position, value);
                None
            }
            Err(position) => {
                let child = node.children[position];
                self.insert_into(child, key, value)
            }
        };
        if self.node(id).keys.len() > self.split_threshold {
            self.split(id);
        }
        previous
    }

    /// Moves the median of an overflowing node up a level.
    fn split(&mut self, id: NodeId) {
        let sibling = NodeId(self.nodes.len());
        let node = self.node_mut(id);
        let median = node.keys.len() / 2;
        let high_keys = node.keys.split_off(median + 1);
        let high_values = node.values.split_off(median + 1);
        let high_children = if node.is_leaf() {
            Vec::new()
        } else {
            node.children.split_off(median + 1)
        };
        let (Some(median_key), Some(median_value)) = (node.keys.pop(), node.values.pop()) else {
            return;
        };
        let parent = node.parent;

        for &child in &high_children {
            self.node_mut(child).parent = Some(sibling);
        }
        self.nodes.push(Node {
            keys: high_keys,
            values: high_values,
            children: high_children,
            parent,
        });

        match parent {
            None => {
                let root = NodeId(self.nodes.len());
                self.nodes.push(Node {
                    keys: vec![median_key],
                    values: vec![median_value],
                    children: vec![id, sibling],
                    parent: None,
                });
                self.node_mut(id).parent = Some(root);
                self.node_mut(sibling).parent = Some(root);
                self.root = root;
                self.height += 1;
                tracing::trace!(height = self.height, "split b-tree root");
            }
            Some(parent) => {
                let parent_node = self.node_mut(parent);
                let (Ok(position) | Err(position)) = parent_node.keys.binary_search(&median_key);
                parent_node.keys.insert(position, median_key);
                parent_node.values.insert(position, median_value);
                parent_node.children.insert(position + 1, sibling);
                tracing::trace!(
                    parent = parent.0,
                    sibling = sibling.0,
                    height = self.height,
                    "split b-tree node"
                );
            }
        }
    }

    /// Walks the whole tree checking key order, node fill, child counts,
    /// parent links, uniform leaf depth, and the stored length.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        if self.node(self.root).parent.is_some() {
            return Err(InvariantViolation::new(NAME, "root has a parent"));
        }

        let mut pending: Vec<(NodeId, Option<&K>, Option<&K>, usize)> =
            vec![(self.root, None, None, 0)];
        let mut entries = 0;
        let mut reachable = 0;

        while let Some((id, lower, upper, depth)) = pending.pop() {
            let node = self.node(id);
            reachable += 1;
            entries += node.keys.len();

            if node.keys.len() != node.values.len() {
                return Err(InvariantViolation::new(
                    NAME,
                    format!("node {} holds {} keys but {} values", id.0, node.keys.len(), node.values.len()),
                ));
            }
            if node.keys.len() > self.split_threshold {
                return Err(InvariantViolation::new(
                    NAME,
                    format!("node {} holds {} keys, above the threshold", id.0, node.keys.len()),
                ));
            }
            if id != self.root && node.keys.len() < self.min_fill() {
                return Err(InvariantViolation::new(
                    NAME,
                    format!("node {} holds {} keys, below the minimum fill", id.0, node.keys.len()),
                ));
            }
            if node.keys.windows(2).any(|pair| pair[0] >= pair[1]) {
                return Err(InvariantViolation::new(
                    NAME,
                    format!("keys of node {} are not strictly increasing", id.0),
                ));
            }
            let below_lower = lower.zip(node.keys.first()).is_some_and(|(lower, first)| first <= lower);
            let above_upper = upper.zip(node.keys.last()).is_some_and(|(upper, last)| last >= upper);
            if below_lower || above_upper {
                return Err(InvariantViolation::new(
                    NAME,
                    format!("keys of node {} fall outside the range set by its ancestors", id.0),
                ));
            }

            if node.is_leaf() {
                if depth != self.height {
                    return Err(InvariantViolation::new(
                        NAME,
                        format!("leaf {} at depth {depth}, expected {}", id.0, self.height),
                    ));
                }
                continue;
            }
            if node.children.len() != node.keys.len() + 1 {
                return Err(InvariantViolation::new(
                    NAME,
                    format!(
                        "node {} has {} keys but {} children",
                        id.0,
                        node.keys.len(),
                        node.children.len()
                    ),
                ));
            }
            for (position, &child) in node.children.iter().enumerate() {
                if self.node(child).parent != Some(id) {
                    return Err(InvariantViolation::new(
                        NAME,
                        format!("node {} does not point back to its parent {}", child.0, id.0),
                    ));
                }
                let child_lower = position.checked_sub(1).map_or(lower, |left| node.keys.get(left));
                let child_upper = node.keys.get(position).or(upper);
                pending.push((child, child_lower, child_upper, depth + 1));
            }
        }

        if reachable != self.nodes.len() {
            return Err(InvariantViolation::new(
                NAME,
                format!("{} nodes allocated but {reachable} reachable", self.nodes.len()),
            ));
        }
        if entries != self.length {
            return Err(InvariantViolation::new(
                NAME,
                format!("length is {} but {entries} entries are stored", self.length),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// In-order iterator over the entries of a [`BTree`].
pub struct BTreeIterator<'a, K, V> {
    tree: &'a BTree<K, V>,
    /// Node and the next key slot to yield from it
    stack: SmallVec<[(NodeId, usize); 16]>,
    remaining: usize,
}

impl<'a, K, V> BTreeIterator<'a, K, V> {
    fn new(tree: &'a BTree<K, V>) -> Self {
        let mut iterator = Self {
            tree,
            stack: SmallVec::new(),
            remaining: tree.length,
        };
        iterator.descend(tree.root);
        iterator
    }

    fn descend(&mut self, mut id: NodeId) {
        loop {
            self.stack.push((id, 0));
            match self.tree.node(id).children.first() {
                Some(&first) => id = first,
                None => break,
            }
        }
    }
}

impl<'a, K, V> Iterator for BTreeIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        loop {
            let frame = self.stack.last_mut()?;
            let (id, position) = *frame;
            let node = tree.node(id);
            if position < node.keys.len() {
                frame.1 += 1;
                if let Some(&child) = node.children.get(position + 1) {
                    self.descend(child);
                }
                self.remaining = self.remaining.saturating_sub(1);
                return Some((&node.keys[position], &node.values[position]));
            }
            self.stack.pop();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for BTreeIterator<'_, K, V> {}

impl<K, V> FusedIterator for BTreeIterator<'_, K, V> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for BTree<K, V> {
    fn default() -> Self {
        Self::with_split_threshold(DEFAULT_SPLIT_THRESHOLD)
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for BTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a BTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = BTreeIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Trees are equal when they hold the same entries, whatever their
/// split thresholds.
impl<K: PartialEq, V: PartialEq> PartialEq for BTree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for BTree<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for BTree<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K: serde::Serialize, V: serde::Serialize> serde::Serialize for BTree<K, V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct BTreeVisitor<K, V> {
    marker: std::marker::PhantomData<(K, V)>,
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for BTreeVisitor<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    type Value = BTree<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut tree = BTree::default();
        while let Some((key, value)) = access.next_entry()? {
            tree.add(key, value);
        }
        Ok(tree)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for BTree<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(BTreeVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
