//! Priority open list for search engines.
//!
//! Entries are stored in a min-heap keyed by `(key, insertion_order)`.
//! Lower keys are popped first; ties are broken by insertion order
//! (FIFO), which makes expansion order reproducible.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// An entry in the open queue.
#[derive(Debug, Clone)]
struct Entry<T> {
    item: T,
    key: i32,
    /// Monotonically increasing counter used to break ties.
    seq: u64,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Natural order; the heap wraps entries in Reverse.
        self.key.cmp(&other.key).then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A min-priority queue with FIFO tie-breaking.
#[derive(Debug, Clone)]
pub struct OpenQueue<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    seq: u64,
}

impl<T> OpenQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Push an item with the given key.
    pub fn push(&mut self, item: T, key: i32) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { item, key, seq }));
    }

    /// Pop the item with the lowest key (ties broken FIFO).
    pub fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|Reverse(entry)| entry.item)
    }

    /// Pop the item with the lowest key, also returning the key.
    pub fn pop_with_key(&mut self) -> Option<(T, i32)> {
        self.heap.pop().map(|Reverse(entry)| (entry.item, entry.key))
    }

    /// Lowest key currently queued.
    pub fn peek_key(&self) -> Option<i32> {
        self.heap.peek().map(|Reverse(entry)| entry.key)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Drop every entry and restart the insertion counter.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.seq = 0;
    }

    /// Release the heap's allocation as well as its entries.
    pub fn shrink(&mut self) {
        self.clear();
        self.heap.shrink_to_fit();
    }

    /// Iterate over queued items in arbitrary order.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.heap.iter().map(|Reverse(entry)| &entry.item)
    }
}

impl<T> Default for OpenQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
