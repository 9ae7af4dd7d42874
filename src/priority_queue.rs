//! Dynamic max-priority queue
//!
//! A binary max-heap over `(value, priority)` entries stored in a dense
//! array. On top of the usual enqueue/dequeue it supports looking entries up
//! by value and changing their priority in place, with the heap repaired
//! from the changed position.
//!
//! # Time Complexity
//!
//! | Operation         | Complexity         |
//! |-------------------|--------------------|
//! | `enqueue`         | O(log n) amortized |
//! | `dequeue`         | O(log n)           |
//! | `peek`            | O(1)               |
//! | `find`/`find_by`  | O(n)               |
//! | `update`          | O(log n)           |
//! | batch construction| O(n)               |
//!
//! # Cursors
//!
//! [`Cursor`] is a position handle: a heap-array index tagged with the
//! identity of the queue it came from and the queue's modification stamp.
//! It holds no borrow, so it can be passed back to [`PriorityQueue::update`].
//! Any structural change (`enqueue`, `dequeue`, `update`, `merge`, `extend`,
//! `clear`) makes every outstanding cursor stale; stale cursors are rejected
//! with [`QueueError::InvalidIterator`] rather than touching whatever entry
//! has since moved into their slot.
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
//!
//! assert_eq!(queue.peek().map(|e| e.value), Some("c"));
//!
//! let a = queue.find("a");
//! queue.update(a, 10).unwrap();
//! assert_eq!(queue.peek().map(|e| e.value), Some("a"));
//!
//! assert_eq!(queue.dequeue().unwrap().into_parts(), ("a", 10));
//! assert_eq!(queue.dequeue().unwrap().into_parts(), ("c", 3));
//! assert_eq!(queue.dequeue().unwrap().into_parts(), ("b", 2));
//! assert!(queue.dequeue().is_err());
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::iter::FusedIterator;
use std::slice;
use std::sync::atomic::{AtomicU64, Ordering};
use std::vec;

use crate::entry::Entry;
use crate::storage::{GrowthPolicy, HeapStorage};
use crate::traits::{Handle, Heap, QueueError, UpdatableHeap};

static NEXT_QUEUE_ID: AtomicU64 = AtomicU64::new(0);

fn next_queue_id() -> u64 {
    NEXT_QUEUE_ID.fetch_add(1, Ordering::Relaxed)
}

/// A position in a [`PriorityQueue`]'s heap array
///
/// Equality compares the owning queue and the index only, so `begin()`
/// taken before and after a mutation of the same queue still compare equal
/// even though the older one can no longer be used.
#[derive(Debug, Clone, Copy)]
pub struct Cursor {
    queue: u64,
    index: usize,
    stamp: u64,
}

impl Cursor {
    /// The heap-array index this cursor points at
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Moves to the next heap-array position
    #[inline]
    pub fn advance(&mut self) {
        self.index += 1;
    }

    /// Returns a cursor to the next heap-array position
    #[inline]
    pub fn next_position(self) -> Self {
        Self {
            index: self.index + 1,
            ..self
        }
    }
}

impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        self.queue == other.queue && self.index == other.index
    }
}

impl Eq for Cursor {}

impl Handle for Cursor {}

/// A max-heap priority queue with in-place priority updates
///
/// Entries with greater priority are dequeued first. Entries with equal
/// priority are not otherwise ordered.
pub struct PriorityQueue<V, P = u32> {
    storage: HeapStorage<Entry<V, P>>,
    id: u64,
    stamp: u64,
}

impl<V, P: PartialOrd> PriorityQueue<V, P> {
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::with_growth_policy(GrowthPolicy::default())
    }

    /// Creates an empty queue with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_storage(HeapStorage::with_capacity(capacity, GrowthPolicy::default()))
    }

    /// Creates an empty queue whose storage grows according to `policy`
    pub fn with_growth_policy(policy: GrowthPolicy) -> Self {
        Self::from_storage(HeapStorage::with_policy(policy))
    }

    fn from_storage(storage: HeapStorage<Entry<V, P>>) -> Self {
        Self {
            storage,
            id: next_queue_id(),
            stamp: 0,
        }
    }

    /// Returns the number of live entries
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns true if the queue has no live entries
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Returns the number of entries the queue can hold before growing
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Returns the growth policy of the backing storage
    pub fn growth_policy(&self) -> GrowthPolicy {
        self.storage.policy()
    }

    /// Inserts `value` with `priority`
    ///
    /// The entry is written at the end of the heap array and sifted up.
    pub fn enqueue(&mut self, value: V, priority: P) {
        self.touch();
        self.storage.push(Entry { value, priority });
        self.sift_up(self.storage.len() - 1);
    }

    /// Removes and returns the entry with the greatest priority
    ///
    /// # Errors
    /// Returns [`QueueError::EmptyQueue`] if the queue is empty.
    pub fn dequeue(&mut self) -> Result<Entry<V, P>, QueueError> {
        if self.storage.is_empty() {
            log::debug!("dequeue on empty priority queue");
            return Err(QueueError::EmptyQueue);
        }

        self.touch();
        let last = self.storage.len() - 1;
        self.storage.swap(0, last);
        let top = self.storage.pop().ok_or(QueueError::EmptyQueue)?;
        self.sift_down(0);

        Ok(top)
    }

    /// Returns the entry with the greatest priority without removing it
    #[inline]
    pub fn peek(&self) -> Option<&Entry<V, P>> {
        self.storage.get(0)
    }

    /// Returns a cursor to the first live entry (in heap-array order) whose
    /// value equals `value`, or [`end`](Self::end) if there is none
    pub fn find<Q>(&self, value: &Q) -> Cursor
    where
        V: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.find_by(|entry| <V as Borrow<Q>>::borrow(&entry.value) == value)
    }

    /// Returns a cursor to the first live entry (in heap-array order)
    /// matching `predicate`, or [`end`](Self::end) if there is none
    pub fn find_by<F>(&self, mut predicate: F) -> Cursor
    where
        F: FnMut(&Entry<V, P>) -> bool,
    {
        let index = self
            .storage
            .as_slice()
            .iter()
            .position(|entry| predicate(entry))
            .unwrap_or(self.storage.len());
        self.cursor_at(index)
    }

    /// Sets the priority of the entry under `cursor` and restores heap order
    ///
    /// Every other cursor into this queue becomes stale.
    ///
    /// # Errors
    /// Returns [`QueueError::InvalidIterator`] if `cursor` is `end()`, comes
    /// from another queue, or was obtained before the last mutation.
    pub fn update(&mut self, cursor: Cursor, priority: P) -> Result<(), QueueError> {
        let index = self.live_index(cursor)?;

        self.touch();
        self.storage[index].priority = priority;
        let index = self.sift_up(index);
        self.sift_down(index);

        Ok(())
    }

    /// Returns the entry under `cursor`, if the cursor is live and current
    pub fn get(&self, cursor: Cursor) -> Option<&Entry<V, P>> {
        self.live_index(cursor)
            .ok()
            .and_then(|index| self.storage.get(index))
    }

    /// Returns the payload under `cursor` for modification
    ///
    /// Only the value is writable; priorities change through
    /// [`update`](Self::update). Writing a value does not invalidate cursors.
    ///
    /// # Errors
    /// Returns [`QueueError::InvalidIterator`] under the same conditions as
    /// [`update`](Self::update).
    pub fn value_mut(&mut self, cursor: Cursor) -> Result<&mut V, QueueError> {
        let index = self.live_index(cursor)?;
        Ok(&mut self.storage[index].value)
    }

    /// Cursor at heap-array index 0
    #[inline]
    pub fn begin(&self) -> Cursor {
        self.cursor_at(0)
    }

    /// Cursor one past the last live entry
    #[inline]
    pub fn end(&self) -> Cursor {
        self.cursor_at(self.storage.len())
    }

    /// Iterates over live entries in heap-array order
    ///
    /// Only the first item is guaranteed to be a maximum; the rest follow the
    /// array layout, not sorted order.
    pub fn iter(&self) -> Iter<'_, V, P> {
        Iter {
            inner: self.storage.as_slice().iter(),
        }
    }

    /// Iterates over live entries in heap-array order, with mutable access to
    /// each value and read access to its priority
    pub fn iter_mut(&mut self) -> IterMut<'_, V, P> {
        IterMut {
            inner: self.storage.as_mut_slice().iter_mut(),
        }
    }

    /// Removes every entry
    pub fn clear(&mut self) {
        self.touch();
        self.storage.clear();
    }

    /// Moves every entry of `other` into this queue
    ///
    /// The combined array is re-heapified once.
    pub fn merge(&mut self, mut other: Self) {
        self.touch();
        self.storage.append(&mut other.storage);
        self.heapify();
    }

    /// Consumes the queue, returning its entries in heap-array order
    pub fn into_vec(self) -> Vec<Entry<V, P>> {
        self.storage.into_vec()
    }

    /// Consumes the queue, returning its entries in non-increasing priority
    /// order
    pub fn into_sorted_vec(mut self) -> Vec<Entry<V, P>> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Ok(entry) = self.dequeue() {
            sorted.push(entry);
        }
        sorted
    }

    fn cursor_at(&self, index: usize) -> Cursor {
        Cursor {
            queue: self.id,
            index,
            stamp: self.stamp,
        }
    }

    fn live_index(&self, cursor: Cursor) -> Result<usize, QueueError> {
        if cursor.queue != self.id || cursor.stamp != self.stamp || cursor.index >= self.len() {
            log::debug!(
                "rejected cursor at index {} (queue {}, stamp {}; expected queue {}, stamp {}, len {})",
                cursor.index,
                cursor.queue,
                cursor.stamp,
                self.id,
                self.stamp,
                self.len()
            );
            return Err(QueueError::InvalidIterator);
        }
        Ok(cursor.index)
    }

    #[inline]
    fn touch(&mut self) {
        self.stamp = self.stamp.wrapping_add(1);
    }

    #[inline]
    fn is_leaf(&self, index: usize) -> bool {
        index >= self.storage.len() / 2
    }

    /// Establishes heap order over the whole array, bottom-up
    fn heapify(&mut self) {
        log::trace!("heapifying {} entries", self.storage.len());
        for index in (0..self.storage.len() / 2).rev() {
            self.sift_down(index);
        }
    }

    /// Moves the entry at `index` toward the root while it outranks its
    /// parent; returns its final index
    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.storage[index].priority > self.storage[parent].priority {
                self.storage.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
        index
    }

    /// Moves the entry at `index` toward the leaves while a child outranks it
    fn sift_down(&mut self, mut index: usize) {
        let len = self.storage.len();
        while !self.is_leaf(index) {
            let mut child = 2 * index + 1;
            let right = child + 1;
            // right wins only when strictly greater
            if right < len && self.storage[right].priority > self.storage[child].priority {
                child = right;
            }

            if self.storage[index].priority >= self.storage[child].priority {
                return;
            }

            self.storage.swap(index, child);
            index = child;
        }
    }
}

impl<V, P: PartialOrd> Default for PriorityQueue<V, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone, P: Clone> Clone for PriorityQueue<V, P> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            id: next_queue_id(),
            stamp: 0,
        }
    }
}

impl<V: fmt::Debug, P: fmt::Debug> fmt::Debug for PriorityQueue<V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.storage.as_slice()).finish()
    }
}

/// Renders entries in heap-array order as `value(priority)`, space separated
impl<V: fmt::Display, P: fmt::Display> fmt::Display for PriorityQueue<V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.storage.as_slice().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}

impl<V, P: PartialOrd> From<Vec<Entry<V, P>>> for PriorityQueue<V, P> {
    /// Builds a queue from a batch of entries with a single bottom-up heapify
    fn from(entries: Vec<Entry<V, P>>) -> Self {
        let mut queue = Self::from_storage(HeapStorage::from_vec(entries, GrowthPolicy::default()));
        queue.heapify();
        queue
    }
}

impl<V, P: PartialOrd, const N: usize> From<[(V, P); N]> for PriorityQueue<V, P> {
    fn from(entries: [(V, P); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<V, P: PartialOrd> FromIterator<Entry<V, P>> for PriorityQueue<V, P> {
    fn from_iter<I: IntoIterator<Item = Entry<V, P>>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<V, P: PartialOrd> FromIterator<(V, P)> for PriorityQueue<V, P> {
    fn from_iter<I: IntoIterator<Item = (V, P)>>(iter: I) -> Self {
        iter.into_iter().map(Entry::from).collect()
    }
}

impl<V, P: PartialOrd> Extend<(V, P)> for PriorityQueue<V, P> {
    fn extend<I: IntoIterator<Item = (V, P)>>(&mut self, iter: I) {
        for (value, priority) in iter {
            self.enqueue(value, priority);
        }
    }
}

impl<V, P: PartialOrd> Extend<Entry<V, P>> for PriorityQueue<V, P> {
    fn extend<I: IntoIterator<Item = Entry<V, P>>>(&mut self, iter: I) {
        for entry in iter {
            self.enqueue(entry.value, entry.priority);
        }
    }
}

impl<V, P: PartialOrd> Heap<V, P> for PriorityQueue<V, P> {
    fn new() -> Self {
        PriorityQueue::new()
    }

    fn is_empty(&self) -> bool {
        PriorityQueue::is_empty(self)
    }

    fn len(&self) -> usize {
        PriorityQueue::len(self)
    }

    fn enqueue(&mut self, value: V, priority: P) {
        PriorityQueue::enqueue(self, value, priority)
    }

    fn peek(&self) -> Option<&Entry<V, P>> {
        PriorityQueue::peek(self)
    }

    fn dequeue(&mut self) -> Result<Entry<V, P>, QueueError> {
        PriorityQueue::dequeue(self)
    }

    fn merge(&mut self, other: Self) {
        PriorityQueue::merge(self, other)
    }
}

impl<V: PartialEq, P: PartialOrd> UpdatableHeap<V, P> for PriorityQueue<V, P> {
    type Handle = Cursor;

    fn find(&self, value: &V) -> Cursor {
        PriorityQueue::find(self, value)
    }

    fn update(&mut self, handle: &Cursor, priority: P) -> Result<(), QueueError> {
        PriorityQueue::update(self, *handle, priority)
    }
}

/// Borrowing iterator over entries in heap-array order
pub struct Iter<'a, V, P> {
    inner: slice::Iter<'a, Entry<V, P>>,
}

impl<'a, V, P> Iterator for Iter<'a, V, P> {
    type Item = &'a Entry<V, P>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V, P> ExactSizeIterator for Iter<'_, V, P> {}

impl<V, P> FusedIterator for Iter<'_, V, P> {}

impl<V, P> Clone for Iter<'_, V, P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Iterator over entries in heap-array order yielding `(&mut value, &priority)`
pub struct IterMut<'a, V, P> {
    inner: slice::IterMut<'a, Entry<V, P>>,
}

impl<'a, V, P> Iterator for IterMut<'a, V, P> {
    type Item = (&'a mut V, &'a P);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|entry| (&mut entry.value, &entry.priority))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V, P> ExactSizeIterator for IterMut<'_, V, P> {}

impl<V, P> FusedIterator for IterMut<'_, V, P> {}

/// Owning iterator over entries in heap-array order
pub struct IntoIter<V, P> {
    inner: vec::IntoIter<Entry<V, P>>,
}

impl<V, P> Iterator for IntoIter<V, P> {
    type Item = Entry<V, P>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V, P> ExactSizeIterator for IntoIter<V, P> {}

impl<V, P> FusedIterator for IntoIter<V, P> {}

impl<V, P: PartialOrd> IntoIterator for PriorityQueue<V, P> {
    type Item = Entry<V, P>;
    type IntoIter = IntoIter<V, P>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.into_vec().into_iter(),
        }
    }
}

impl<'a, V, P: PartialOrd> IntoIterator for &'a PriorityQueue<V, P> {
    type Item = &'a Entry<V, P>;
    type IntoIter = Iter<'a, V, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V, P: PartialOrd> IntoIterator for &'a mut PriorityQueue<V, P> {
    type Item = (&'a mut V, &'a P);
    type IntoIter = IterMut<'a, V, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::de::{Deserialize, Deserializer};
    use serde::ser::{Serialize, SerializeSeq, Serializer};

    use super::PriorityQueue;
    use crate::entry::Entry;

    impl<V: Serialize, P: Serialize + PartialOrd> Serialize for PriorityQueue<V, P> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for entry in self.iter() {
                seq.serialize_element(entry)?;
            }
            seq.end()
        }
    }

    impl<'de, V, P> Deserialize<'de> for PriorityQueue<V, P>
    where
        V: Deserialize<'de>,
        P: Deserialize<'de> + PartialOrd,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let entries = Vec::<Entry<V, P>>::deserialize(deserializer)?;
            Ok(PriorityQueue::from(entries))
        }
    }
}
