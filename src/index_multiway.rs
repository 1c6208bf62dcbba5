//! Indexed multiway (d-ary) heap
//!
//! The indexed counterpart of [`MultiwayHeap`](crate::multiway::MultiwayHeap):
//! entries are addressed by an external index in `0..max_n`, and the heap
//! array holds indices rather than keys. The layout is 0-based: children of
//! slot `k` live at `d*k + 1 ..= d*k + d`.
//!
//! `decrease_key` swims, `increase_key` sinks, `change_key` does whichever is
//! needed.

use crate::iter::{DrainMin, SortedIter};
use crate::multiway::{children, parent, validate_arity};
use crate::order::{Compare, NaturalOrder};
use crate::traits::{validate_index, HeapError, IndexedMinPriorityQueue, KeyChange, Result};

/// Indexed d-ary min-heap with a fixed number of index slots
///
/// # Example
///
/// ```rust
/// use rust_indexed_heaps::index_multiway::IndexMultiwayHeap;
/// use rust_indexed_heaps::IndexedMinPriorityQueue;
///
/// let mut pq = IndexMultiwayHeap::new(8, 3).unwrap();
/// pq.insert(4, "delta").unwrap();
/// pq.insert(7, "alpha").unwrap();
/// pq.decrease_key(4, "a").unwrap();
/// assert_eq!(pq.del_min(), Ok(4));
/// ```
#[derive(Debug, Clone)]
pub struct IndexMultiwayHeap<K, C = NaturalOrder> {
    d: usize,
    max_n: usize,
    n: usize,
    heap: Vec<usize>,
    position: Vec<Option<usize>>,
    keys: Vec<Option<K>>,
    cmp: C,
}

impl<K: Ord> IndexMultiwayHeap<K> {
    /// Creates an empty queue for indices `0..max_n` with branching factor `d`
    ///
    /// # Errors
    /// [`HeapError::InvalidArity`] if `d < 2`.
    pub fn new(max_n: usize, d: usize) -> Result<Self> {
        Self::with_comparator(max_n, d, NaturalOrder)
    }

    /// Builds a queue holding `keys[i]` at index `i`, in O(n)
    pub fn from_keys<I: IntoIterator<Item = K>>(d: usize, keys: I) -> Result<Self> {
        let d = validate_arity(d)?;
        let keys: Vec<Option<K>> = keys.into_iter().map(Some).collect();
        let n = keys.len();
        let mut pq = IndexMultiwayHeap {
            d,
            max_n: n,
            n,
            heap: (0..n).collect(),
            position: (0..n).map(Some).collect(),
            keys,
            cmp: NaturalOrder,
        };
        pq.heapify();
        Ok(pq)
    }
}

impl<K, C: Compare<K>> IndexMultiwayHeap<K, C> {
    /// Creates an empty queue for indices `0..max_n`, ordered by `cmp`
    pub fn with_comparator(max_n: usize, d: usize, cmp: C) -> Result<Self> {
        Ok(IndexMultiwayHeap {
            d: validate_arity(d)?,
            max_n,
            n: 0,
            heap: vec![0; max_n],
            position: vec![None; max_n],
            keys: (0..max_n).map(|_| None).collect(),
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

    /// Iterates `(index, key)` pairs in ascending key order, draining a
    /// private copy
    pub fn iter(&self) -> SortedIter<Self>
    where
        K: Clone,
        C: Clone,
    {
        SortedIter::new(self.clone())
    }

    /// Checks heap order and that `position` is the inverse of `heap`
    pub fn is_min_heap_ordered(&self) -> bool {
        let ordered = (1..self.n).all(|i| !self.greater(parent(i, self.d), i));
        let inverse = (0..self.n).all(|k| {
            let i = self.heap[k];
            self.position[i] == Some(k) && self.keys[i].is_some()
        });
        let occupied = self.position.iter().filter(|p| p.is_some()).count();
        ordered && inverse && occupied == self.n
    }

    fn slot_of(&self, i: usize) -> Result<usize> {
        validate_index(i, self.max_n)?;
        self.position[i].ok_or(HeapError::NotInQueue(i))
    }

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

    fn swim(&mut self, mut i: usize) {
        while i > 0 {
            let p = parent(i, self.d);
            if !self.greater(p, i) {
                break;
            }
            self.exch(i, p);
            i = p;
        }
    }

    fn sink(&mut self, mut k: usize) {
        loop {
            let mut least = k;
            for c in children(k, self.d) {
                if c >= self.n {
                    break;
                }
                if self.greater(least, c) {
                    least = c;
                }
            }
            if least == k {
                break;
            }
            self.exch(k, least);
            k = least;
        }
    }

    fn heapify(&mut self) {
        if self.n < 2 {
            return;
        }
        for k in (0..=parent(self.n - 1, self.d)).rev() {
            self.sink(k);
        }
    }

    /// Removes the entry in heap slot `slot`, returning its index and key
    fn remove_slot(&mut self, slot: usize) -> Option<(usize, K)> {
        let i = self.heap[slot];
        let last = self.n - 1;
        self.exch(slot, last);
        self.n -= 1;
        if slot < self.n {
            self.swim(slot);
            self.sink(slot);
        }
        self.position[i] = None;
        self.keys[i].take().map(|key| (i, key))
    }

    fn take_min(&mut self) -> Option<(usize, K)> {
        if self.n == 0 {
            return None;
        }
        self.remove_slot(0)
    }
}

impl<K, C: Compare<K>> IndexedMinPriorityQueue<K> for IndexMultiwayHeap<K, C> {
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
        let slot = self.n;
        self.n += 1;
        self.heap[slot] = i;
        self.position[i] = Some(slot);
        self.keys[i] = Some(key);
        self.swim(slot);
        Ok(())
    }

    fn min_index(&self) -> Result<usize> {
        if self.n == 0 {
            return Err(HeapError::EmptyQueue);
        }
        Ok(self.heap[0])
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
        self.remove_slot(slot)
            .map(|(_, key)| key)
            .ok_or(HeapError::NotInQueue(i))
    }

    fn union(&mut self, mut other: Self) -> Result<()> {
        for &i in &other.heap[..other.n] {
            validate_index(i, self.max_n)?;
            if self.position[i].is_some() {
                return Err(HeapError::DuplicateIndex(i));
            }
        }
        for slot in 0..other.n {
            let i = other.heap[slot];
            self.heap[self.n] = i;
            self.position[i] = Some(self.n);
            self.keys[i] = other.keys[i].take();
            self.n += 1;
        }
        self.heapify();
        Ok(())
    }
}

impl<K, C: Compare<K>> DrainMin for IndexMultiwayHeap<K, C> {
    type Entry = (usize, K);

    fn drain_min(&mut self) -> Option<(usize, K)> {
        self.take_min()
    }

    fn remaining(&self) -> usize {
        self.n
    }
}

impl<K, C: Compare<K>> IntoIterator for IndexMultiwayHeap<K, C> {
    type Item = (usize, K);
    type IntoIter = SortedIter<Self>;

    fn into_iter(self) -> Self::IntoIter {
        SortedIter::new(self)
    }
}
