//! Multiway (d-ary) heap
//!
//! A generalization of the binary heap to a branching factor `d >= 2`.
//! Keys are stored directly in a growable vector using a 0-based layout:
//! the children of slot `k` are `d*k + 1 ..= d*k + d`, and the parent of
//! slot `i` is `(i - 1) / d`.
//!
//! A wider heap is shallower, so `insert` (which only swims) gets cheaper as
//! `d` grows while `del_min` (which compares up to `d` children per level)
//! gets more expensive.
//!
//! # Time Complexity
//!
//! | Operation | Complexity      |
//! |-----------|-----------------|
//! | `insert`  | O(log_d n)      |
//! | `min_key` | O(1)            |
//! | `del_min` | O(d log_d n)    |
//! | `union`   | O(n + m)        |

use crate::iter::{DrainMin, SortedIter};
use crate::order::{Compare, NaturalOrder};
use crate::traits::{HeapError, MinPriorityQueue, Result};

/// Position of the parent of slot `i > 0`
#[inline]
pub(crate) fn parent(i: usize, d: usize) -> usize {
    (i - 1) / d
}

/// Range of the child slots of slot `k`
#[inline]
pub(crate) fn children(k: usize, d: usize) -> std::ops::RangeInclusive<usize> {
    d * k + 1..=d * k + d
}

/// Checks a branching factor
pub(crate) fn validate_arity(d: usize) -> Result<usize> {
    if d >= 2 {
        Ok(d)
    } else {
        Err(HeapError::InvalidArity(d))
    }
}

/// Plain d-ary min-heap
///
/// # Example
///
/// ```rust
/// use rust_indexed_heaps::multiway::MultiwayHeap;
/// use rust_indexed_heaps::MinPriorityQueue;
///
/// let mut heap = MultiwayHeap::with_arity(4).unwrap();
/// heap.insert(3);
/// heap.insert(1);
/// heap.insert(2);
///
/// assert_eq!(heap.del_min(), Ok(1));
/// assert_eq!(heap.min_key(), Ok(&2));
/// ```
#[derive(Debug, Clone)]
pub struct MultiwayHeap<K, C = NaturalOrder> {
    d: usize,
    keys: Vec<K>,
    cmp: C,
}

impl<K: Ord> MultiwayHeap<K> {
    /// Creates an empty heap with branching factor `d`, ordered naturally
    ///
    /// # Errors
    /// [`HeapError::InvalidArity`] if `d < 2`.
    pub fn with_arity(d: usize) -> Result<Self> {
        Self::with_comparator(d, NaturalOrder)
    }

    /// Builds a heap with branching factor `d` from `keys`, in O(n)
    pub fn from_keys<I: IntoIterator<Item = K>>(d: usize, keys: I) -> Result<Self> {
        let mut heap = Self::with_arity(d)?;
        heap.keys = keys.into_iter().collect();
        heap.heapify();
        log::debug!("built {}-ary heap from {} keys", d, heap.keys.len());
        Ok(heap)
    }
}

impl<K, C: Compare<K>> MultiwayHeap<K, C> {
    /// Creates an empty heap with branching factor `d`, ordered by `cmp`
    pub fn with_comparator(d: usize, cmp: C) -> Result<Self> {
        Ok(MultiwayHeap {
            d: validate_arity(d)?,
            keys: Vec::new(),
            cmp,
        })
    }

    /// Branching factor
    pub fn arity(&self) -> usize {
        self.d
    }

    /// The comparator ordering this queue
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Iterates the keys in ascending order, draining a private copy
    pub fn iter(&self) -> SortedIter<Self>
    where
        K: Clone,
        C: Clone,
    {
        SortedIter::new(self.clone())
    }

    /// Checks that no key is less than its parent's
    pub fn is_min_heap_ordered(&self) -> bool {
        (1..self.keys.len()).all(|i| !self.greater(parent(i, self.d), i))
    }

    fn greater(&self, a: usize, b: usize) -> bool {
        self.cmp.compares_gt(&self.keys[a], &self.keys[b])
    }

    fn swim(&mut self, mut i: usize) {
        while i > 0 {
            let p = parent(i, self.d);
            if !self.greater(p, i) {
                break;
            }
            self.keys.swap(i, p);
            i = p;
        }
    }

    fn sink(&mut self, mut k: usize) {
        let n = self.keys.len();
        loop {
            let mut least = k;
            for c in children(k, self.d) {
                if c >= n {
                    break;
                }
                if self.greater(least, c) {
                    least = c;
                }
            }
            if least == k {
                break;
            }
            self.keys.swap(k, least);
            k = least;
        }
    }

    fn heapify(&mut self) {
        let n = self.keys.len();
        if n < 2 {
            return;
        }
        for k in (0..=parent(n - 1, self.d)).rev() {
            self.sink(k);
        }
    }
}

impl<K, C: Compare<K>> MinPriorityQueue<K> for MultiwayHeap<K, C> {
    fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn insert(&mut self, key: K) {
        self.keys.push(key);
        self.swim(self.keys.len() - 1);
    }

    fn min_key(&self) -> Result<&K> {
        self.keys.first().ok_or(HeapError::EmptyQueue)
    }

    fn del_min(&mut self) -> Result<K> {
        if self.keys.is_empty() {
            return Err(HeapError::EmptyQueue);
        }
        let min = self.keys.swap_remove(0);
        self.sink(0);
        Ok(min)
    }

    fn union(&mut self, other: Self) {
        if other.keys.is_empty() {
            return;
        }
        self.keys.extend(other.keys);
        self.heapify();
    }
}

impl<K, C: Compare<K>> DrainMin for MultiwayHeap<K, C> {
    type Entry = K;

    fn drain_min(&mut self) -> Option<K> {
        self.del_min().ok()
    }

    fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl<K, C: Compare<K>> IntoIterator for MultiwayHeap<K, C> {
    type Item = K;
    type IntoIter = SortedIter<Self>;

    fn into_iter(self) -> Self::IntoIter {
        SortedIter::new(self)
    }
}

impl<K, C: Compare<K>> Extend<K> for MultiwayHeap<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}
