//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a lazily consolidated forest of heap-ordered trees:
//! - O(1) insert and ring splicing: new roots join the root ring directly
//! - O(log n) amortized delete-min: the only place trees are linked
//!
//! Roots are kept in a circular doubly linked ring, and so are the children
//! of every node. The heap keeps a handle to the minimum root.
//!
//! This plain variant has no decrease-key, so nodes never get cut and need
//! neither parent links nor marks. See [`crate::index_fibonacci`] for the
//! indexed variant.
//!
//! # Time Complexity
//!
//! | Operation | Complexity                         |
//! |-----------|------------------------------------|
//! | `insert`  | O(1)                               |
//! | `min_key` | O(1)                               |
//! | `del_min` | O(log n) amortized                 |
//! | `union`   | O(min(n, m)) node moves, then O(1) |
//!
//! Each heap owns its node arena, so `union` moves the nodes of the smaller
//! heap into the larger arena before splicing the rings. Over any sequence
//! of unions a node moves O(log n) times.

use crate::iter::{DrainMin, SortedIter};
use crate::order::{Compare, NaturalOrder};
use crate::ring::{RingLink, Ringed};
use crate::storage::{moved_opt, Arena, NodeId, Relink, Relocation};
use crate::traits::{HeapError, MinPriorityQueue, Result};
use smallvec::SmallVec;
use std::mem;

#[derive(Debug, Clone)]
struct Node<K> {
    key: K,
    order: usize,
    ring: RingLink,
    child: Option<NodeId>,
}

impl<K> Ringed for Node<K> {
    fn ring(&self) -> &RingLink {
        &self.ring
    }
    fn ring_mut(&mut self) -> &mut RingLink {
        &mut self.ring
    }
}

impl<K> Relink for Node<K> {
    fn relink(&mut self, map: &Relocation) {
        self.ring.relink(map);
        self.child = moved_opt(map, self.child);
    }
}

/// Slots of the consolidation table, indexed by tree order
///
/// Orders stay below log_phi(n) + 1, so the inline capacity is never
/// exceeded in practice.
pub(crate) type OrderTable = SmallVec<[Option<NodeId>; 64]>;

/// Fibonacci min-heap
///
/// # Example
///
/// ```rust
/// use rust_indexed_heaps::fibonacci::FibonacciHeap;
/// use rust_indexed_heaps::MinPriorityQueue;
///
/// let mut heap = FibonacciHeap::new();
/// heap.insert(5);
/// heap.insert(1);
/// heap.insert(3);
///
/// let mut other = FibonacciHeap::new();
/// other.insert(0);
/// heap.union(other);
///
/// assert_eq!(heap.del_min(), Ok(0));
/// assert_eq!(heap.min_key(), Ok(&1));
/// ```
#[derive(Debug, Clone)]
pub struct FibonacciHeap<K, C = NaturalOrder> {
    arena: Arena<Node<K>>,
    min: Option<NodeId>,
    cmp: C,
}

impl<K: Ord> FibonacciHeap<K> {
    /// Creates an empty heap ordered naturally
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Builds a heap holding `keys`
    pub fn from_keys<I: IntoIterator<Item = K>>(keys: I) -> Self {
        keys.into_iter().collect()
    }
}

impl<K: Ord> Default for FibonacciHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C: Compare<K>> FibonacciHeap<K, C> {
    /// Creates an empty heap ordered by `cmp`
    pub fn with_comparator(cmp: C) -> Self {
        FibonacciHeap {
            arena: Arena::new(),
            min: None,
            cmp,
        }
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

    /// Orders of the roots, walking the root ring from the minimum
    pub fn root_orders(&self) -> Vec<usize> {
        self.arena
            .ring_members(self.min)
            .into_iter()
            .map(|r| self.arena[r].order)
            .collect()
    }

    /// Checks heap order, ring consistency and that `min` is a least root
    pub fn is_min_heap_ordered(&self) -> bool {
        let roots = self.arena.ring_members(self.min);
        if let Some(min) = self.min {
            if roots.iter().any(|&r| self.less(r, min)) {
                return false;
            }
        }

        let mut stack = roots;
        let mut seen = 0;
        while let Some(id) = stack.pop() {
            seen += 1;
            if self.arena[self.arena.next(id)].ring.prev != id {
                return false;
            }
            let children = self.arena.ring_members(self.arena[id].child);
            if children.len() != self.arena[id].order
                || children.iter().any(|&c| self.less(c, id))
            {
                return false;
            }
            stack.extend(children);
        }
        seen == self.arena.len()
    }

    fn less(&self, a: NodeId, b: NodeId) -> bool {
        self.cmp.compares_lt(&self.arena[a].key, &self.arena[b].key)
    }

    /// Of two candidate minima, the lesser (the first on ties)
    fn lesser(&self, a: Option<NodeId>, b: Option<NodeId>) -> Option<NodeId> {
        match (a, b) {
            (Some(a), Some(b)) if self.less(b, a) => Some(b),
            (None, b) => b,
            (a, _) => a,
        }
    }

    /// Makes the root `child` a child of the root `parent`
    ///
    /// `child` must already be out of the root ring.
    fn link(&mut self, child: NodeId, parent: NodeId) {
        match self.arena[parent].child {
            Some(first) => self.arena.ring_insert_after(first, child),
            None => self.arena[parent].child = Some(child),
        }
        self.arena[parent].order += 1;
        log::trace!("linked root of order {}", self.arena[parent].order - 1);
    }

    /// Links roots of equal order until all orders differ, then rebuilds the
    /// root ring and recomputes `min`
    ///
    /// Kept in step with `IndexFibonacciHeap::consolidate`.
    fn consolidate(&mut self, start: NodeId) {
        let roots = self.arena.ring_members(Some(start));
        let mut table = OrderTable::new();

        for root in roots {
            self.arena.make_solo(root);
            let mut x = root;
            let mut order = self.arena[x].order;
            loop {
                if order >= table.len() {
                    table.resize(order + 1, None);
                }
                let Some(mut y) = table[order].take() else { break };
                if self.less(y, x) {
                    mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                order += 1;
            }
            table[order] = Some(x);
        }

        self.min = None;
        for root in table.into_iter().flatten() {
            match self.min {
                None => self.min = Some(root),
                Some(min) => {
                    self.arena.ring_insert_after(min, root);
                    if self.less(root, min) {
                        self.min = Some(root);
                    }
                }
            }
        }
    }

    fn take_min(&mut self) -> Option<K> {
        let min = self.min?;
        let children = self.arena[min].child.take();
        let rest = self.arena.ring_remove(min);
        let roots = self.arena.ring_splice(rest, children);
        let node = self.arena.free(min);

        match roots {
            Some(start) => self.consolidate(start),
            None => self.min = None,
        }
        Some(node.key)
    }
}

impl<K, C: Compare<K>> MinPriorityQueue<K> for FibonacciHeap<K, C> {
    fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    fn len(&self) -> usize {
        self.arena.len()
    }

    fn insert(&mut self, key: K) {
        let node = self.arena.alloc_with(|id| Node {
            key,
            order: 0,
            ring: RingLink::solo(id),
            child: None,
        });
        self.arena.ring_splice(self.min, Some(node));
        self.min = self.lesser(self.min, Some(node));
    }

    fn min_key(&self) -> Result<&K> {
        self.min
            .map(|m| &self.arena[m].key)
            .ok_or(HeapError::EmptyQueue)
    }

    fn del_min(&mut self) -> Result<K> {
        self.take_min().ok_or(HeapError::EmptyQueue)
    }

    fn union(&mut self, mut other: Self) {
        if other.arena.is_empty() {
            return;
        }
        if self.arena.len() < other.arena.len() {
            mem::swap(&mut self.arena, &mut other.arena);
            mem::swap(&mut self.min, &mut other.min);
        }
        let map = self.arena.absorb(other.arena);
        let theirs = moved_opt(&map, other.min);
        self.arena.ring_splice(self.min, theirs);
        self.min = self.lesser(self.min, theirs);
    }
}

impl<K, C: Compare<K>> DrainMin for FibonacciHeap<K, C> {
    type Entry = K;

    fn drain_min(&mut self) -> Option<K> {
        self.take_min()
    }

    fn remaining(&self) -> usize {
        self.arena.len()
    }
}

impl<K, C: Compare<K>> IntoIterator for FibonacciHeap<K, C> {
    type Item = K;
    type IntoIter = SortedIter<Self>;

    fn into_iter(self) -> Self::IntoIter {
        SortedIter::new(self)
    }
}

impl<K, C: Compare<K>> Extend<K> for FibonacciHeap<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for FibonacciHeap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}
