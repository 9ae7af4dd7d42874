//! Dynamic Priority Queue for Rust
//!
//! This crate provides a binary max-heap priority queue over
//! `(value, priority)` entries that, unlike `std::collections::BinaryHeap`,
//! lets callers find an entry by value and change its priority in place.
//!
//! # Features
//!
//! - **Enqueue / dequeue**: O(log n); dequeue on an empty queue is a
//!   reported [`QueueError::EmptyQueue`], never a default value
//! - **Find + update**: O(n) lookup by value (or predicate) returning a
//!   [`Cursor`], then O(log n) priority change with heap repair
//! - **Checked cursors**: cursors from another queue, `end()`, or from before
//!   the last mutation are rejected with [`QueueError::InvalidIterator`]
//! - **Batch construction**: O(n) bottom-up heapify from any iterator
//! - **Heap-order traversal**: `iter`/`iter_mut` walk the heap array without
//!   consuming or sorting it
//! - **`serde` feature**: serialize a queue as its entry sequence
//!
//! # Example
//!
//! ```rust
//! use dynamic_priority_queue::PriorityQueue;
//!
//! let mut queue = PriorityQueue::new();
//! queue.enqueue("a", 1);
//! queue.enqueue("b", 2);
//! queue.enqueue("c", 3);
//! queue.enqueue("d", 1);
//! queue.enqueue("e", 4);
//! queue.enqueue("f", 2);
//! assert_eq!(queue.peek().map(|e| e.value), Some("e"));
//!
//! queue.update(queue.find("a"), 6).unwrap();
//! assert_eq!(queue.peek().map(|e| e.value), Some("a"));
//! ```

pub mod entry;
pub mod priority_queue;
pub mod storage;
pub mod traits;

pub use entry::Entry;
pub use priority_queue::{Cursor, PriorityQueue};
pub use storage::GrowthPolicy;
pub use traits::{Heap, QueueError, UpdatableHeap};
