//! Indexed binary heap
//!
//! An array-backed min-heap whose entries are addressed by an external index
//! in `0..max_n`. The capacity is fixed at construction.
//!
//! # Layout
//!
//! - `keys[i]`: the key associated with external index `i`
//! - `heap[1..=n]`: external indices in heap order (1-based, children of
//!   slot `k` are `2k` and `2k + 1`)
//! - `position[i]`: the heap slot holding index `i`, the inverse of `heap`
//!
//! # Time Complexity
//!
//! | Operation      | Complexity |
//! |----------------|------------|
//! | `insert`       | O(log n)   |
//! | `min_key`      | O(1)       |
//! | `del_min`      | O(log n)   |
//! | `decrease_key` | O(log n)   |
//! | `delete`       | O(log n)   |
//! | `union`        | O(n + m)   |
//!
//! # Example
//!
//! ```rust
//! use rust_indexed_heaps::binary::IndexBinaryHeap;
//! use rust_indexed_heaps::IndexedMinPriorityQueue;
//!
//! let mut pq = IndexBinaryHeap::new(4);
//! for (i, key) in [5, 3, 8, 1].into_iter().enumerate() {
//!     pq.insert(i, key).unwrap();
//! }
//!
//! let order: Vec<usize> = std::iter::from_fn(|| pq.del_min().ok()).collect();
//! assert_eq!(order, vec![3, 1, 0, 2]);
//! ```

use crate::iter::{DrainMin, SortedIter};
use crate::order::{Compare, NaturalOrder};
use crate::traits::{validate_index, HeapError, IndexedMinPriorityQueue, KeyChange, Result};

/// Indexed binary min-heap with a fixed number of index slots
#[derive(Debug, Clone)]
pub struct IndexBinaryHeap<K, C = NaturalOrder> {
    max_n: usize,
    n: usize,
    heap: Vec<usize>,
    position: Vec<Option<usize>>,
    keys: Vec<Option<K>>,
    cmp: C,
}

impl<K: Ord> IndexBinaryHeap<K> {
    /// Creates an empty queue for indices `0..max_n`, ordered naturally
    pub fn new(max_n: usize) -> Self {
        Self::with_comparator(max_n, NaturalOrder)
    }

    /// Builds a queue holding `keys[i]` at index `i`, in O(n)
    pub fn from_keys<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let keys: Vec<Option<K>> = keys.into_iter().map(Some).collect();
        let n = keys.len();
        let mut pq = IndexBinaryHeap {
            max_n: n,
            n,
            heap: (0..=n).map(|slot| slot.saturating_sub(1)).collect(),
            position: (0..n).map(|i| Some(i + 1)).collect(),
            keys,
            cmp: NaturalOrder,
        };
        pq.heapify();
        log::debug!("built indexed binary heap from {} keys", n);
        pq
    }
}

impl<K, C: Compare<K>> IndexBinaryHeap<K, C> {
    /// Creates an empty queue for indices `0..max_n`, ordered by `cmp`
    pub fn with_comparator(max_n: usize, cmp: C) -> Self {
        IndexBinaryHeap {
            max_n,
            n: 0,
            heap: vec![0; max_n + 1],
            position: vec![None; max_n],
            keys: (0..max_n).map(|_| None).collect(),
            cmp,
        }
    }

    /// The comparator ordering this queue
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Iterates `(index, key)` pairs in ascending key order
    ///
    /// Drains a private copy; `self` is left untouched.
    pub fn iter(&self) -> SortedIter<Self>
    where
        K: Clone,
        C: Clone,
    {
        SortedIter::new(self.clone())
    }

    /// Checks heap order and that `position` is the inverse of `heap`
    pub fn is_min_heap_ordered(&self) -> bool {
        let ordered = (2..=self.n).all(|k| !self.greater(k / 2, k));
        let inverse = (1..=self.n).all(|k| {
            let i = self.heap[k];
            self.position[i] == Some(k) && self.keys[i].is_some()
        });
        let occupied = self.position.iter().filter(|p| p.is_some()).count();
        ordered && inverse && occupied == self.n
    }

    /// Heap slot of index `i`, validating range and membership
    fn slot_of(&self, i: usize) -> Result<usize> {
        validate_index(i, self.max_n)?;
        self.position[i].ok_or(HeapError::NotInQueue(i))
    }

    /// Is the key in slot `a` greater than the key in slot `b`?
    fn greater(&self, a: usize, b: usize) -> bool {
        match (&self.keys[self.heap[a]], &self.keys[self.heap[b]]) {
            (Some(x), Some(y)) => self.cmp.compares_gt(x, y),
            _ => false,
        }
    }

    fn exch(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a]] = Some(a);
        self.position[self.heap[b]] = Some(b);
    }

    fn swim(&mut self, mut k: usize) {
        while k > 1 && self.greater(k / 2, k) {
            self.exch(k, k / 2);
            k /= 2;
        }
    }

    fn sink(&mut self, mut k: usize) {
        while 2 * k <= self.n {
            let mut j = 2 * k;
            if j < self.n && self.greater(j, j + 1) {
                j += 1;
            }
            if !self.greater(k, j) {
                break;
            }
            self.exch(k, j);
            k = j;
        }
    }

    fn heapify(&mut self) {
        for k in (1..=self.n / 2).rev() {
            self.sink(k);
        }
    }

    /// Removes the minimum entry, returning its index and key
    fn take_min(&mut self) -> Option<(usize, K)> {
        if self.n == 0 {
            return None;
        }
        let min = self.heap[1];
        self.exch(1, self.n);
        self.n -= 1;
        self.sink(1);
        self.position[min] = None;
        self.keys[min].take().map(|key| (min, key))
    }
}

impl<K, C: Compare<K>> IndexedMinPriorityQueue<K> for IndexBinaryHeap<K, C> {
    fn capacity(&self) -> usize {
        self.max_n
    }

    fn is_empty(&self) -> bool {
        self.n == 0
    }

    fn len(&self) -> usize {
        self.n
    }

    fn contains(&self, i: usize) -> Result<bool> {
        validate_index(i, self.max_n)?;
        Ok(self.position[i].is_some())
    }

    fn insert(&mut self, i: usize, key: K) -> Result<()> {
        if self.contains(i)? {
            return Err(HeapError::DuplicateIndex(i));
        }
        self.n += 1;
        self.position[i] = Some(self.n);
        self.heap[self.n] = i;
        self.keys[i] = Some(key);
        self.swim(self.n);
        Ok(())
    }

    fn min_index(&self) -> Result<usize> {
        if self.n == 0 {
            return Err(HeapError::EmptyQueue);
        }
        Ok(self.heap[1])
    }

    fn min_key(&self) -> Result<&K> {
        let min = self.min_index()?;
        self.keys[min].as_ref().ok_or(HeapError::EmptyQueue)
    }

    fn del_min(&mut self) -> Result<usize> {
        self.take_min()
            .map(|(i, _)| i)
            .ok_or(HeapError::EmptyQueue)
    }

    fn key_of(&self, i: usize) -> Result<&K> {
        self.slot_of(i)?;
        self.keys[i].as_ref().ok_or(HeapError::NotInQueue(i))
    }

    fn change_key(&mut self, i: usize, key: K) -> Result<()> {
        let slot = self.slot_of(i)?;
        self.keys[i] = Some(key);
        self.swim(slot);
        if let Some(slot) = self.position[i] {
            self.sink(slot);
        }
        Ok(())
    }

    fn decrease_key(&mut self, i: usize, key: K) -> Result<()> {
        let slot = self.slot_of(i)?;
        if !self.cmp.compares_lt(&key, self.key_of(i)?) {
            return Err(HeapError::KeyOrderViolation(KeyChange::Decrease));
        }
        self.keys[i] = Some(key);
        self.swim(slot);
        Ok(())
    }

    fn increase_key(&mut self, i: usize, key: K) -> Result<()> {
        let slot = self.slot_of(i)?;
        if !self.cmp.compares_gt(&key, self.key_of(i)?) {
            return Err(HeapError::KeyOrderViolation(KeyChange::Increase));
        }
        self.keys[i] = Some(key);
        self.sink(slot);
        Ok(())
    }

    fn delete(&mut self, i: usize) -> Result<K> {
        let slot = self.slot_of(i)?;
        self.exch(slot, self.n);
        self.n -= 1;
        if slot <= self.n {
            self.swim(slot);
            self.sink(slot);
        }
        self.position[i] = None;
        self.keys[i].take().ok_or(HeapError::NotInQueue(i))
    }

    fn union(&mut self, mut other: Self) -> Result<()> {
        for &i in &other.heap[1..=other.n] {
            validate_index(i, self.max_n)?;
            if self.position[i].is_some() {
                return Err(HeapError::DuplicateIndex(i));
            }
        }
        for slot in 1..=other.n {
            let i = other.heap[slot];
            self.n += 1;
            self.heap[self.n] = i;
            self.position[i] = Some(self.n);
            self.keys[i] = other.keys[i].take();
        }
        log::debug!(
            "merged {} entries into indexed binary heap of {}",
            other.n,
            self.n
        );
        self.heapify();
        Ok(())
    }
}

impl<K, C: Compare<K>> DrainMin for IndexBinaryHeap<K, C> {
    type Entry = (usize, K);

    fn drain_min(&mut self) -> Option<(usize, K)> {
        self.take_min()
    }

    fn remaining(&self) -> usize {
        self.n
    }
}

impl<K, C: Compare<K>> IntoIterator for IndexBinaryHeap<K, C> {
    type Item = (usize, K);
    type IntoIter = SortedIter<Self>;

    fn into_iter(self) -> Self::IntoIter {
        SortedIter::new(self)
    }
}
