//! Payload-first priority queue on top of [`MaxHeap`].

use super::MaxHeap;

/// A priority queue that hands back payloads in descending priority order.
///
/// To pop the *smallest* score first, insert `-score` as the priority. The
/// generation pipeline relies on this to pop the closest track first.
#[derive(Debug, Clone)]
pub struct RankedQueue<T> {
    heap: MaxHeap<f64, T>,
}

impl<T> Default for RankedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RankedQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: MaxHeap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: MaxHeap::with_capacity(capacity),
        }
    }

    /// Queue `item` with the given priority. Higher priorities pop first.
    pub fn insert(&mut self, item: T, priority: f64) {
        debug_assert!(!priority.is_nan(), "priority must not be NaN");
        self.heap.insert(priority, item);
    }

    /// Remove and return the highest-priority item.
    pub fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|(_, item)| item)
    }

    /// Like [`pop`](Self::pop), but also returns the priority it was queued with.
    pub fn pop_with_priority(&mut self) -> Option<(f64, T)> {
        self.heap.pop()
    }

    /// The highest-priority item, without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.heap.peek().map(|(_, item)| item)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Pop up to `n` items, highest priority first.
    ///
    /// Stops early when the queue runs dry; never pads.
    pub fn take_top(&mut self, n: usize) -> Vec<(f64, T)> {
        let count = n.min(self.len());
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            match self.heap.pop() {
                Some(entry) => out.push(entry),
                None => break,
            }
        }
        out
    }
}
