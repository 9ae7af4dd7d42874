//! Common traits for the priority queue
//!
//! This module provides a two-tier trait hierarchy:
//!
//! - [`Heap`]: Base trait for a max-heap of `(value, priority)` entries
//! - [`UpdatableHeap`]: Extended trait adding by-value lookup and in-place
//!   priority updates through handles
//!
//! The error type shared by every fallible operation, [`QueueError`], also
//! lives here.

use std::fmt;

use crate::entry::Entry;

/// Error type for queue operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// `dequeue` was called on a queue with no live entries
    EmptyQueue,
    /// The handle does not reference a live entry of this queue
    /// (it is `end()`, belongs to another queue, or predates a mutation)
    InvalidIterator,
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::EmptyQueue => {
                write!(f, "cannot dequeue from an empty priority queue")
            }
            QueueError::InvalidIterator => {
                write!(f, "iterator does not reference a live entry of this queue")
            }
        }
    }
}

impl std::error::Error for QueueError {}

/// A position handle into a queue, used for `update`
///
/// Handles are cheap to copy and compare. They do not keep the queue
/// borrowed, so they can be handed back to mutating calls.
pub trait Handle: Copy + PartialEq + Eq + fmt::Debug {}

/// Base trait for max-heap priority queues
///
/// Entries are `(value, priority)` pairs ordered solely by priority; the
/// entry with the greatest priority is removed first.
///
/// # Example
///
/// ```rust
/// use dynamic_priority_queue::{Heap, PriorityQueue};
///
/// let mut queue: PriorityQueue<&str> = Heap::new();
/// queue.enqueue("low", 1);
/// queue.enqueue("high", 9);
///
/// assert_eq!(queue.peek().map(|e| e.value), Some("high"));
/// assert_eq!(queue.dequeue().unwrap().priority, 9);
/// ```
pub trait Heap<V, P: PartialOrd>: Sized {
    /// Creates a new empty queue
    fn new() -> Self;

    /// Returns true if the queue holds no live entries
    fn is_empty(&self) -> bool;

    /// Returns the number of live entries
    fn len(&self) -> usize;

    /// Inserts a value with the given priority
    ///
    /// # Time Complexity
    /// O(log n), amortized over storage growth.
    fn enqueue(&mut self, value: V, priority: P);

    /// Returns the maximum entry without removing it
    ///
    /// # Time Complexity
    /// O(1)
    fn peek(&self) -> Option<&Entry<V, P>>;

    /// Removes and returns the maximum entry
    ///
    /// # Errors
    /// Returns [`QueueError::EmptyQueue`] if there is nothing to remove.
    ///
    /// # Time Complexity
    /// O(log n)
    fn dequeue(&mut self) -> Result<Entry<V, P>, QueueError>;

    /// Merges another queue into this one, consuming the other queue
    ///
    /// # Time Complexity
    /// O(n + m), the combined entries are re-heapified once.
    fn merge(&mut self, other: Self);
}

/// Extended heap trait with lookup and priority updates
///
/// `find` locates an entry by value and returns a handle to its current
/// position; `update` changes that entry's priority and restores heap order.
/// Any structural mutation invalidates outstanding handles.
///
/// # Example
///
/// ```rust
/// use dynamic_priority_queue::{Heap, PriorityQueue, UpdatableHeap};
///
/// let mut queue: PriorityQueue<&str> = Heap::new();
/// queue.enqueue("a", 1);
/// queue.enqueue("b", 5);
///
/// let handle = UpdatableHeap::find(&queue, &"a");
/// UpdatableHeap::update(&mut queue, &handle, 10).unwrap();
/// assert_eq!(queue.peek().map(|e| e.value), Some("a"));
/// ```
pub trait UpdatableHeap<V: PartialEq, P: PartialOrd>: Heap<V, P> {
    /// The handle type for this queue
    type Handle: Handle;

    /// Returns a handle to the first entry (in storage order) holding `value`,
    /// or the end handle if there is none
    ///
    /// # Time Complexity
    /// O(n)
    fn find(&self, value: &V) -> Self::Handle;

    /// Replaces the priority of the entry referenced by `handle`
    ///
    /// # Errors
    /// Returns [`QueueError::InvalidIterator`] if the handle does not refer to
    /// a live entry of this queue in its current state.
    ///
    /// # Time Complexity
    /// O(log n)
    fn update(&mut self, handle: &Self::Handle, priority: P) -> Result<(), QueueError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            QueueError::EmptyQueue.to_string(),
            "cannot dequeue from an empty priority queue"
        );
        assert_eq!(
            QueueError::InvalidIterator.to_string(),
            "iterator does not reference a live entry of this queue"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(QueueError::EmptyQueue);
        assert!(err.source().is_none());
    }
}
