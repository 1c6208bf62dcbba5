//! Sorted iteration by draining
//!
//! None of the queues can be walked in key order without destroying them,
//! so iteration is a drain: [`SortedIter`] owns a queue and pops its minimum
//! on every step. `iter()` on a queue drains a private clone and leaves the
//! original untouched; `into_iter()` drains the queue itself.
//!
//! Iterating costs the same as a full drain, O(n log n) (amortized for the
//! Fibonacci heaps), not O(n).

use std::iter::FusedIterator;

/// Queues that can hand out their minimum entry by value
pub trait DrainMin {
    /// What one step of the drain yields
    type Entry;

    /// Removes and returns the minimum entry, `None` once empty
    fn drain_min(&mut self) -> Option<Self::Entry>;

    /// Number of entries left to drain
    fn remaining(&self) -> usize;
}

/// Iterator over a queue's entries in ascending key order
///
/// # Example
///
/// ```rust
/// use rust_indexed_heaps::index_binomial::IndexBinomialHeap;
/// use rust_indexed_heaps::IndexedMinPriorityQueue;
///
/// let mut pq = IndexBinomialHeap::new(4);
/// pq.insert(0, 'c').unwrap();
/// pq.insert(1, 'a').unwrap();
/// pq.insert(2, 'b').unwrap();
///
/// let drained: Vec<_> = pq.iter().collect();
/// assert_eq!(drained, vec![(1, 'a'), (2, 'b'), (0, 'c')]);
/// assert_eq!(pq.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct SortedIter<Q> {
    queue: Q,
}

impl<Q> SortedIter<Q> {
    pub(crate) fn new(queue: Q) -> Self {
        SortedIter { queue }
    }
}

impl<Q: DrainMin> Iterator for SortedIter<Q> {
    type Item = Q::Entry;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.drain_min()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.queue.remaining();
        (n, Some(n))
    }
}

impl<Q: DrainMin> ExactSizeIterator for SortedIter<Q> {}

impl<Q: DrainMin> FusedIterator for SortedIter<Q> {}
