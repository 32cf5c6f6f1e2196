//! Last-in, first-out stack over [`LinkedList`].

use std::fmt;

use super::LinkedList;
use crate::error::CollectionError;

/// A LIFO stack whose top is the tail of the underlying list.
///
/// # Examples
///
/// ```rust
/// use ordkit::linked::Stack;
///
/// let mut stack = Stack::new();
/// stack.push(1);
/// stack.push(2);
///
/// assert_eq!(stack.peek(), Ok(&2));
/// assert_eq!(stack.pop(), Ok(2));
/// assert_eq!(stack.pop(), Ok(1));
/// assert!(stack.pop().is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Stack<T> {
    elements: LinkedList<T>,
}

impl<T> Stack<T> {
    /// Creates an empty stack.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: LinkedList::new(),
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the stack is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Pushes an element onto the top.
    pub fn push(&mut self, value: T) {
        self.elements.append(value);
    }

    /// Returns the top element without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyStructureAccess`] if the stack is empty.
    pub fn peek(&self) -> Result<&T, CollectionError> {
        self.elements
            .back()
            .ok_or(CollectionError::empty("Stack", "peek"))
    }

    /// Removes and returns the top element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyStructureAccess`] if the stack is empty.
    pub fn pop(&mut self) -> Result<T, CollectionError> {
        self.elements
            .pop_back()
            .ok_or(CollectionError::empty("Stack", "pop"))
    }

    /// Iterates from the top of the stack down.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.elements.iter().rev()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_stack_is_last_in_first_out() {
        let mut stack: Stack<i32> = (1..=3).collect();
        assert_eq!(stack.pop(), Ok(3));
        stack.push(9);
        assert_eq!(stack.peek(), Ok(&9));
        assert_eq!(stack.pop(), Ok(9));
        assert_eq!(stack.pop(), Ok(2));
        assert_eq!(stack.len(), 1);
    }

    #[rstest]
    fn test_empty_stack_reports_error() {
        let mut stack: Stack<i32> = Stack::new();
        assert_eq!(stack.peek(), Err(CollectionError::empty("Stack", "peek")));
        assert_eq!(stack.pop(), Err(CollectionError::empty("Stack", "pop")));
    }

    #[rstest]
    fn test_iter_runs_top_down() {
        let stack: Stack<i32> = (1..=3).collect();
        assert_eq!(stack.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    }
}
