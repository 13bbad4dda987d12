// src/core/indexing/kdtree/bounded_queue.rs

//! A fixed-capacity priority queue that keeps the lowest-priority items.

use std::cmp::Ordering;
use std::collections::VecDeque;

/// An item held by the queue together with its priority.
#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    priority: f64,
}

/// Keeps the `capacity` items with the smallest priorities offered so far.
///
/// During a k-nearest search the priority is a distance, so the queue holds
/// the current best `k` candidates and `worst()` is the radius a subtree has
/// to beat to be worth visiting.
///
/// Entries are kept sorted by ascending priority. Equal priorities stay in
/// arrival order, so a later arrival never displaces an earlier one with the
/// same priority, and `extract_min` drains ties first-in first-out.
#[derive(Debug, Clone)]
pub struct BoundedPriorityQueue<T> {
    entries: VecDeque<Entry<T>>,
    capacity: usize,
}

impl<T> BoundedPriorityQueue<T> {
    /// Creates an empty queue that retains at most `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Offers `value` with the given `priority`.
    ///
    /// Below capacity the value is always kept. At capacity it replaces the
    /// current worst entry only when `priority` is strictly smaller;
    /// otherwise it is discarded. Returns whether the value was kept.
    pub fn offer(&mut self, value: T, priority: f64) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.is_full() {
            match self.worst() {
                Some(worst) if priority.total_cmp(&worst) == Ordering::Less => {
                    self.entries.pop_back();
                }
                _ => return false,
            }
        }
        let position = self
            .entries
            .partition_point(|entry| entry.priority.total_cmp(&priority) != Ordering::Greater);
        self.entries.insert(position, Entry { value, priority });
        true
    }

    /// The largest priority currently retained, or `None` when empty.
    #[must_use]
    pub fn worst(&self) -> Option<f64> {
        self.entries.back().map(|entry| entry.priority)
    }

    /// Removes and returns the value with the smallest priority.
    pub fn extract_min(&mut self) -> Option<T> {
        self.entries.pop_front().map(|entry| entry.value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the queue holds `capacity` items.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}
