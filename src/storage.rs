//! Dense backing storage for the heap array
//!
//! [`HeapStorage`] keeps entries in one contiguous buffer. The buffer is
//! logically split into the live region `[0, len)` and spare slots
//! `[len, capacity)`. When the live region fills the buffer, capacity grows
//! according to a [`GrowthPolicy`]; the buffer never shrinks on its own.
//!
//! # Example
//!
//! ```rust
//! use dynamic_priority_queue::storage::{GrowthPolicy, HeapStorage};
//!
//! let mut storage = HeapStorage::with_policy(GrowthPolicy::default());
//! storage.push(1);
//! assert_eq!(storage.len(), 1);
//! assert!(storage.capacity() >= 1);
//! ```

use std::ops::{Index, IndexMut};

/// How the backing buffer grows when it is full
///
/// The next capacity is `floor(capacity * factor) + increment`, but never
/// less than `capacity + 1`, so degenerate settings still make progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthPolicy {
    /// Multiplicative growth factor
    pub factor: f64,
    /// Slots added on top of the scaled capacity
    pub increment: usize,
}

impl GrowthPolicy {
    /// Creates a policy with the given factor and increment
    pub fn new(factor: f64, increment: usize) -> Self {
        Self { factor, increment }
    }

    /// Returns the capacity to grow to from `capacity`
    pub fn next_capacity(&self, capacity: usize) -> usize {
        let scaled = if self.factor.is_finite() && self.factor > 0.0 {
            (capacity as f64 * self.factor) as usize
        } else {
            capacity
        };
        scaled.saturating_add(self.increment).max(capacity.saturating_add(1))
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            factor: 1.25,
            increment: 1,
        }
    }
}

/// Contiguous entry storage with policy-driven growth
#[derive(Debug, Clone)]
pub struct HeapStorage<E> {
    slots: Vec<E>,
    policy: GrowthPolicy,
}

impl<E> HeapStorage<E> {
    /// Creates empty storage using the default growth policy
    pub fn new() -> Self {
        Self::with_policy(GrowthPolicy::default())
    }

    /// Creates empty storage using `policy`
    pub fn with_policy(policy: GrowthPolicy) -> Self {
        Self {
            slots: Vec::new(),
            policy,
        }
    }

    /// Creates empty storage with room for at least `capacity` entries
    pub fn with_capacity(capacity: usize, policy: GrowthPolicy) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            policy,
        }
    }

    /// Wraps an existing buffer; every element becomes live
    pub fn from_vec(slots: Vec<E>, policy: GrowthPolicy) -> Self {
        Self { slots, policy }
    }

    /// Number of live entries
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if there are no live entries
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of entries the buffer holds before it must grow
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// The growth policy in effect
    pub fn policy(&self) -> GrowthPolicy {
        self.policy
    }

    /// Appends an entry at index `len`, growing the buffer first if it is full
    pub fn push(&mut self, entry: E) {
        if self.slots.len() == self.slots.capacity() {
            self.grow();
        }
        self.slots.push(entry);
    }

    /// Removes and returns the entry at index `len - 1`
    pub fn pop(&mut self) -> Option<E> {
        self.slots.pop()
    }

    /// Moves every entry of `other` to the end of this storage
    pub fn append(&mut self, other: &mut Self) {
        let needed = self.slots.len() + other.slots.len();
        while self.slots.capacity() < needed {
            self.grow_to(self.policy.next_capacity(self.slots.capacity()).max(needed));
        }
        self.slots.append(&mut other.slots);
    }

    /// Swaps the entries at `a` and `b`
    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }

    /// Drops every live entry, keeping the allocation
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Returns the entry at `index` if it is live
    #[inline]
    pub fn get(&self, index: usize) -> Option<&E> {
        self.slots.get(index)
    }

    /// Returns the entry at `index` mutably if it is live
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut E> {
        self.slots.get_mut(index)
    }

    /// The live region as a slice, in storage order
    #[inline]
    pub fn as_slice(&self) -> &[E] {
        &self.slots
    }

    /// The live region as a mutable slice, in storage order
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [E] {
        &mut self.slots
    }

    /// Consumes the storage, returning the live entries in storage order
    pub fn into_vec(self) -> Vec<E> {
        self.slots
    }

    fn grow(&mut self) {
        let target = self.policy.next_capacity(self.slots.capacity());
        self.grow_to(target);
    }

    fn grow_to(&mut self, target: usize) {
        let from = self.slots.capacity();
        self.slots.reserve_exact(target - self.slots.len());
        log::trace!(
            "heap storage grew from {} to {} slots",
            from,
            self.slots.capacity()
        );
    }
}

impl<E> Default for HeapStorage<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Index<usize> for HeapStorage<E> {
    type Output = E;

    #[inline]
    fn index(&self, index: usize) -> &E {
        &self.slots[index]
    }
}

impl<E> IndexMut<usize> for HeapStorage<E> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut E {
        &mut self.slots[index]
    }
}
