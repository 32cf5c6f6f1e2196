//! Linked sequences.
//!
//! - [`LinkedList`]: doubly-linked list with O(1) work at both ends
//! - [`Queue`]: FIFO facade (enqueue at the head, dequeue at the tail)
//! - [`Stack`]: LIFO facade (push and pop at the tail)
//!
//! # Examples
//!
//! ```rust
//! use ordkit::linked::{LinkedList, Queue, Stack};
//!
//! let list: LinkedList<i32> = (1..=3).collect();
//! assert_eq!(list.len(), 3);
//!
//! let mut queue: Queue<i32> = list.iter().copied().collect();
//! assert_eq!(queue.dequeue(), Ok(1));
//!
//! let mut stack: Stack<i32> = list.into_iter().collect();
//! assert_eq!(stack.pop(), Ok(3));
//! ```

mod list;
mod queue;
mod stack;

pub use list::LinkedList;
pub use list::LinkedListIntoIterator;
pub use list::LinkedListIterator;
pub use queue::Queue;
pub use stack::Stack;

static_assertions::assert_impl_all!(LinkedList<i32>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Queue<String>: Send, Sync);
static_assertions::assert_impl_all!(Stack<String>: Send, Sync);
