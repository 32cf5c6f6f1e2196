//! Doubly-linked list backed by an index arena.
//!
//! This module provides [`LinkedList`], the sequence substrate that the
//! [`Queue`](super::Queue), [`Stack`](super::Stack), and the hash map
//! buckets are built on.
//!
//! # Overview
//!
//! - O(1) `append` / `prepend`
//! - O(1) `pop_front` / `pop_back`
//! - O(1) `front` / `back` / `len`
//! - O(n) `find`, `remove_first`, `contains`
//!
//! # Internal Structure
//!
//! Nodes live in a `Vec` of slots and refer to their neighbours by slot
//! index. Unlinked slots are threaded onto a free list and reused by the
//! next insertion. The list maintains:
//!
//! 1. `length == 0` exactly when `head` and `tail` are both `None`
//! 2. Walking `next` from `head` reaches `tail` in `length - 1` steps
//! 3. `node.next == Some(j)` exactly when `slots[j].previous == Some(node)`
//!
//! # Examples
//!
//! ```rust
//! use ordkit::linked::LinkedList;
//!
//! let mut list = LinkedList::new();
//! list.append(2);
//! list.append(3);
//! list.prepend(1);
//!
//! assert_eq!(list.len(), 3);
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
//! assert_eq!(format!("{list}"), "[1, 2, 3]");
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::{FromIterator, FusedIterator};

// =============================================================================
// Node Definition
// =============================================================================

#[derive(Clone)]
struct Node<T> {
    value: T,
    previous: Option<usize>,
    next: Option<usize>,
}

#[derive(Clone)]
enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

// =============================================================================
// LinkedList Definition
// =============================================================================

/// A doubly-linked list with O(1) insertion and removal at both ends.
///
/// Iteration is lazy and restartable: every call to [`iter`](Self::iter)
/// starts a fresh head-to-tail traversal.
///
/// # Time Complexity
///
/// | Operation              | Complexity |
/// |------------------------|------------|
/// | `append` / `prepend`   | O(1)       |
/// | `pop_front`/`pop_back` | O(1)       |
/// | `front` / `back`       | O(1)       |
/// | `len` / `is_empty`     | O(1)       |
/// | `find` / `contains`    | O(n)       |
/// | `remove_first`         | O(n)       |
#[derive(Clone)]
pub struct LinkedList<T> {
    slots: Vec<Slot<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    /// Head of the vacant-slot chain
    free: Option<usize>,
    length: usize,
}

impl<T> LinkedList<T> {
    /// Creates an empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordkit::linked::LinkedList;
    ///
    /// let list: LinkedList<i32> = LinkedList::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            head: None,
            tail: None,
            free: None,
            length: 0,
        }
    }

    /// Creates an empty list with room for `capacity` nodes before the
    /// arena reallocates.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the list holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Appends an element after the current tail.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordkit::linked::LinkedList;
    ///
    /// let mut list = LinkedList::new();
    /// list.append("a");
    /// list.append("b");
    /// assert_eq!(list.front(), Some(&"a"));
    /// assert_eq!(list.back(), Some(&"b"));
    /// ```
    pub fn append(&mut self, value: T) {
        let index = self.allocate(Node {
            value,
            previous: self.tail,
            next: None,
        });
        if let Some(tail) = self.tail {
            if let Some(node) = self.node_mut(tail) {
                node.next = Some(index);
            }
        } else {
            self.head = Some(index);
        }
        self.tail = Some(index);
        self.length += 1;
    }

    /// Prepends an element before the current head.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordkit::linked::LinkedList;
    ///
    /// let mut list = LinkedList::new();
    /// list.prepend(2);
    /// list.prepend(1);
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    /// ```
    pub fn prepend(&mut self, value: T) {
        let index = self.allocate(Node {
            value,
            previous: None,
            next: self.head,
        });
        if let Some(head) = self.head {
            if let Some(node) = self.node_mut(head) {
                node.previous = Some(index);
            }
        } else {
            self.tail = Some(index);
        }
        self.head = Some(index);
        self.length += 1;
    }

    /// Returns the element at the head.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.head
            .and_then(|index| self.node(index))
            .map(|node| &node.value)
    }

    /// Returns the element at the tail.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.tail
            .and_then(|index| self.node(index))
            .map(|node| &node.value)
    }

    /// Removes and returns the element at the head.
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        self.unlink(head)
    }

    /// Removes and returns the element at the tail.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordkit::linked::LinkedList;
    ///
    /// let mut list: LinkedList<i32> = (1..=3).collect();
    /// assert_eq!(list.pop_back(), Some(3));
    /// assert_eq!(list.pop_back(), Some(2));
    /// assert_eq!(list.len(), 1);
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail?;
        self.unlink(tail)
    }

    /// Returns the first element matching `predicate`.
    pub fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().find(|value| predicate(value))
    }

    /// Returns a mutable reference to the first element matching `predicate`.
    pub fn find_mut<P>(&mut self, predicate: P) -> Option<&mut T>
    where
        P: FnMut(&T) -> bool,
    {
        let index = self.index_where(predicate)?;
        self.node_mut(index).map(|node| &mut node.value)
    }

    /// Unlinks and returns the first element matching `predicate`.
    ///
    /// Neighbouring links are rewired in place; the rest of the chain is
    /// left untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordkit::linked::LinkedList;
    ///
    /// let mut list: LinkedList<i32> = (1..=5).collect();
    /// assert_eq!(list.remove_first(|value| value % 2 == 0), Some(2));
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5]);
    /// assert_eq!(list.remove_first(|value| *value > 10), None);
    /// ```
    pub fn remove_first<P>(&mut self, predicate: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        let index = self.index_where(predicate)?;
        self.unlink(index)
    }

    /// Returns `true` if any element equals `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|element| element == value)
    }

    /// Removes every element and releases the arena.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.tail = None;
        self.free = None;
        self.length = 0;
    }

    /// Returns a head-to-tail iterator over the elements.
    ///
    /// The iterator is double-ended, so `.rev()` walks tail-to-head.
    #[must_use]
    pub const fn iter(&self) -> LinkedListIterator<'_, T> {
        LinkedListIterator {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.length,
        }
    }

    // =========================================================================
    // Arena management
    // =========================================================================

    fn node(&self, index: usize) -> Option<&Node<T>> {
        match self.slots.get(index) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    fn node_mut(&mut self, index: usize) -> Option<&mut Node<T>> {
        match self.slots.get_mut(index) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    fn allocate(&mut self, node: Node<T>) -> usize {
        if let Some(index) = self.free {
            if let Some(Slot::Vacant { next_free }) = self.slots.get(index) {
                self.free = *next_free;
            }
            self.slots[index] = Slot::Occupied(node);
            index
        } else {
            self.slots.push(Slot::Occupied(node));
            self.slots.len() - 1
        }
    }

    fn release(&mut self, index: usize) -> Option<T> {
        let vacant = Slot::Vacant {
            next_free: self.free,
        };
        match std::mem::replace(self.slots.get_mut(index)?, vacant) {
            Slot::Occupied(node) => {
                self.free = Some(index);
                Some(node.value)
            }
            previous @ Slot::Vacant { .. } => {
                self.slots[index] = previous;
                None
            }
        }
    }

    fn index_where<P>(&self, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let node = self.node(index)?;
            if predicate(&node.value) {
                return Some(index);
            }
            cursor = node.next;
        }
        None
    }

    fn unlink(&mut self, index: usize) -> Option<T> {
        let (previous, next) = {
            let node = self.node(index)?;
            (node.previous, node.next)
        };

        match previous {
            Some(previous_index) => {
                if let Some(node) = self.node_mut(previous_index) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(next_index) => {
                if let Some(node) = self.node_mut(next_index) {
                    node.previous = previous;
                }
            }
            None => self.tail = previous,
        }

        self.length -= 1;
        self.release(index)
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// Borrowing iterator over a [`LinkedList`].
pub struct LinkedListIterator<'a, T> {
    list: &'a LinkedList<T>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for LinkedListIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.front?)?;
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for LinkedListIterator<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.back?)?;
        self.back = node.previous;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for LinkedListIterator<'_, T> {}

impl<T> FusedIterator for LinkedListIterator<'_, T> {}

/// Owning iterator over a [`LinkedList`], popping from either end.
pub struct LinkedListIntoIterator<T> {
    list: LinkedList<T>,
}

impl<T> Iterator for LinkedListIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for LinkedListIntoIterator<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for LinkedListIntoIterator<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for LinkedList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = LinkedListIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        LinkedListIntoIterator { list: self }
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = LinkedListIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T: Hash> Hash for LinkedList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for value in self {
            value.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for LinkedList<T> {
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
impl<T: serde::Serialize> serde::Serialize for LinkedList<T> {
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
struct LinkedListVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::de::Visitor<'de> for LinkedListVisitor<T> {
    type Value = LinkedList<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut list = LinkedList::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(value) = access.next_element()? {
            list.append(value);
        }
        Ok(list)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for LinkedList<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(LinkedListVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
