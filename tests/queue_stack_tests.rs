#![cfg(feature = "linked")]
//! Unit tests for the Queue and Stack facades.

use ordkit::error::CollectionError;
use ordkit::linked::{Queue, Stack};
use rstest::rstest;

// =============================================================================
// Queue Tests
// =============================================================================

#[rstest]
fn test_queue_is_first_in_first_out() {
    let mut queue = Queue::new();
    for job in ["p1", "p2", "p3"] {
        queue.enqueue(job);
    }
    assert_eq!(queue.len(), 3);
    assert_eq!(queue.dequeue(), Ok("p1"));
    assert_eq!(queue.dequeue(), Ok("p2"));
    queue.enqueue("p4");
    assert_eq!(queue.dequeue(), Ok("p3"));
    assert_eq!(queue.dequeue(), Ok("p4"));
    assert!(queue.is_empty());
}

#[rstest]
fn test_queue_front_does_not_remove() {
    let mut queue = Queue::new();
    queue.enqueue(1);
    queue.enqueue(2);
    assert_eq!(queue.front(), Ok(&1));
    assert_eq!(queue.len(), 2);
}

#[rstest]
fn test_queue_iter_runs_front_to_back() {
    let queue: Queue<i32> = (1..=4).collect();
    assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
}

#[rstest]
fn test_empty_queue_reports_error() {
    let mut queue: Queue<i32> = Queue::default();
    assert_eq!(
        queue.front(),
        Err(CollectionError::EmptyStructureAccess {
            structure: "Queue",
            operation: "front",
        })
    );
    assert_eq!(queue.dequeue(), Err(CollectionError::empty("Queue", "dequeue")));
}

// =============================================================================
// Stack Tests
// =============================================================================

#[rstest]
fn test_stack_is_last_in_first_out() {
    let mut stack = Stack::new();
    stack.push('a');
    stack.push('b');
    stack.push('c');
    assert_eq!(stack.peek(), Ok(&'c'));
    assert_eq!(stack.pop(), Ok('c'));
    assert_eq!(stack.pop(), Ok('b'));
    assert_eq!(stack.len(), 1);
}

#[rstest]
fn test_stack_iter_runs_top_down() {
    let stack: Stack<i32> = (1..=3).collect();
    assert_eq!(stack.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
}

#[rstest]
#[case::peek(true)]
#[case::pop(false)]
fn test_empty_stack_reports_error(#[case] peek: bool) {
    let mut stack: Stack<i32> = Stack::new();
    let error = if peek {
        stack.peek().copied().unwrap_err()
    } else {
        stack.pop().unwrap_err()
    };
    assert!(matches!(
        error,
        CollectionError::EmptyStructureAccess {
            structure: "Stack",
            ..
        }
    ));
    assert!(error.to_string().contains("empty Stack"));
}
