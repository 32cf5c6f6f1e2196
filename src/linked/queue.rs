//! First-in, first-out queue over [`LinkedList`].
//!
//! New elements enter at the list's head and leave from its tail, so the
//! tail is always the front of the queue.

use std::fmt;

use super::LinkedList;
use crate::error::CollectionError;

/// A FIFO queue.
///
/// # Examples
///
/// ```rust
/// use ordkit::linked::Queue;
///
/// let mut queue = Queue::new();
/// queue.enqueue("first");
/// queue.enqueue("second");
///
/// assert_eq!(queue.front(), Ok(&"first"));
/// assert_eq!(queue.dequeue(), Ok("first"));
/// assert_eq!(queue.dequeue(), Ok("second"));
/// assert!(queue.dequeue().is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Queue<T> {
    elements: LinkedList<T>,
}

impl<T> Queue<T> {
    /// Creates an empty queue.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: LinkedList::new(),
        }
    }

    /// Returns the number of waiting elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if nothing is waiting.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Adds an element at the back of the queue.
    pub fn enqueue(&mut self, value: T) {
        self.elements.prepend(value);
    }

    /// Returns the element that would be dequeued next.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyStructureAccess`] if the queue is empty.
    pub fn front(&self) -> Result<&T, CollectionError> {
        self.elements
            .back()
            .ok_or(CollectionError::empty("Queue", "front"))
    }

    /// Removes and returns the element at the front of the queue.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyStructureAccess`] if the queue is empty.
    pub fn dequeue(&mut self) -> Result<T, CollectionError> {
        self.elements
            .pop_back()
            .ok_or(CollectionError::empty("Queue", "dequeue"))
    }

    /// Iterates from the front of the queue to the back.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.elements.iter().rev()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        for value in iter {
            queue.enqueue(value);
        }
        queue
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}
