//! Array-backed max-priority binary heap.

use std::cmp::Ordering;

#[derive(Debug, Clone)]
struct Entry<W, V> {
    weight: W,
    /// Insertion sequence number, used to order equal weights.
    seq: u64,
    value: V,
}

/// A max-priority binary heap keyed on a weight.
///
/// The heap is stored as a complete binary tree in a `Vec`: the children of
/// index `i` live at `2i + 1` and `2i + 2`. For every non-root node the
/// parent's weight is greater than or equal to the node's weight.
///
/// Equal weights pop in insertion order (first in, first out). Weights that
/// cannot be compared (NaN) are treated as equal to everything, so callers
/// should not insert them.
#[derive(Debug, Clone)]
pub struct MaxHeap<W, V> {
    data: Vec<Entry<W, V>>,
    next_seq: u64,
}

impl<W: PartialOrd, V> Default for MaxHeap<W, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: PartialOrd, V> MaxHeap<W, V> {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            next_seq: 0,
        }
    }

    /// Create an empty heap with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Insert a value with the given weight. O(log n).
    pub fn insert(&mut self, weight: W, value: V) {
        let seq = self.next_seq;
        self.next_seq += 1;

        self.data.push(Entry { weight, seq, value });
        self.sift_up(self.data.len() - 1);
    }

    /// Remove and return the entry with the greatest weight. O(log n).
    ///
    /// Returns `None` when the heap is empty.
    pub fn pop(&mut self) -> Option<(W, V)> {
        if self.data.is_empty() {
            return None;
        }

        // Moves the last element into the root slot.
        let top = self.data.swap_remove(0);
        if !self.data.is_empty() {
            self.sift_down(0);
        }

        Some((top.weight, top.value))
    }

    /// Return the entry with the greatest weight without removing it.
    pub fn peek(&self) -> Option<(&W, &V)> {
        self.data.first().map(|e| (&e.weight, &e.value))
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the entry at `a` should sit above the entry at `b`.
    fn outranks(&self, a: usize, b: usize) -> bool {
        let (a, b) = (&self.data[a], &self.data[b]);
        match a.weight.partial_cmp(&b.weight) {
            Some(Ordering::Greater) => true,
            Some(Ordering::Less) => false,
            _ => a.seq < b.seq,
        }
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if !self.outranks(idx, parent) {
                break;
            }
            self.data.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut largest = idx;

            if left < len && self.outranks(left, largest) {
                largest = left;
            }
            if right < len && self.outranks(right, largest) {
                largest = right;
            }
            if largest == idx {
                break;
            }

            self.data.swap(idx, largest);
            idx = largest;
        }
    }
}
