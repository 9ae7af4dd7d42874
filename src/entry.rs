//! Queue entries
//!
//! An [`Entry`] pairs a payload with the priority it is ordered by. Two
//! entries compare only through their priorities; the payload never takes
//! part in ordering.

use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A (value, priority) pair stored in the queue
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entry<V, P = u32> {
    /// The payload
    pub value: V,
    /// The ordering key; greater priorities are dequeued first
    pub priority: P,
}

impl<V, P> Entry<V, P> {
    /// Creates a new entry
    pub fn new(value: V, priority: P) -> Self {
        Self { value, priority }
    }

    /// Splits the entry into its `(value, priority)` parts
    pub fn into_parts(self) -> (V, P) {
        (self.value, self.priority)
    }
}

impl<V, P> From<(V, P)> for Entry<V, P> {
    fn from((value, priority): (V, P)) -> Self {
        Self { value, priority }
    }
}

impl<V, P: PartialEq> PartialEq for Entry<V, P> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl<V, P: PartialOrd> PartialOrd for Entry<V, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.priority.partial_cmp(&other.priority)
    }
}

impl<V: fmt::Display, P: fmt::Display> fmt::Display for Entry<V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.value, self.priority)
    }
}
