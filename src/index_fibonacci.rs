//! Indexed Fibonacci Heap implementation
//!
//! The Fibonacci heap of [`crate::fibonacci`] plus the machinery decrease-key
//! needs:
//! - every node keeps a `parent` link and a `mark`
//! - `nodes[i]` resolves external index `i` to its arena node
//!
//! # Cuts
//!
//! When a decreased key breaks heap order against its parent, the node is
//! cut and becomes a root. The parent then loses a child:
//! - if it was unmarked, it gets marked and the walk stops
//! - if it was already marked, it is cut too and the walk continues upward
//!
//! Roots are never marked. A node's mark is cleared whenever it is cut or
//! linked under a new parent, which keeps tree sizes exponential in order
//! and bounds orders by O(log n).
//!
//! # Time Complexity
//!
//! | Operation      | Complexity         |
//! |----------------|--------------------|
//! | `insert`       | O(1)               |
//! | `min_key`      | O(1)               |
//! | `del_min`      | O(log n) amortized |
//! | `decrease_key` | O(1) amortized     |
//! | `delete`       | O(log n) amortized |
//! | `union`        | O(m) node moves    |
//!
//! Each queue owns its node arena, so `union` first moves the `m` nodes of
//! `other` into this arena (the index checks visit them anyway); the ring
//! splice itself is O(1).

use crate::fibonacci::OrderTable;
use crate::iter::{DrainMin, SortedIter};
use crate::order::{Compare, NaturalOrder};
use crate::ring::{RingLink, Ringed};
use crate::storage::{moved_opt, Arena, NodeId, Relink, Relocation};
use crate::traits::{validate_index, HeapError, IndexedMinPriorityQueue, KeyChange, Result};
use std::cmp::Ordering;
use std::mem;

#[derive(Debug, Clone)]
struct Node<K> {
    key: K,
    index: usize,
    order: usize,
    mark: bool,
    ring: RingLink,
    parent: Option<NodeId>,
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
        self.parent = moved_opt(map, self.parent);
        self.child = moved_opt(map, self.child);
    }
}

/// Indexed Fibonacci min-heap
///
/// # Example
///
/// ```rust
/// use rust_indexed_heaps::index_fibonacci::IndexFibonacciHeap;
/// use rust_indexed_heaps::IndexedMinPriorityQueue;
///
/// let mut pq = IndexFibonacciHeap::new(3);
/// pq.insert(0, 10).unwrap();
/// pq.insert(1, 20).unwrap();
/// pq.insert(2, 5).unwrap();
///
/// pq.decrease_key(1, 2).unwrap();
/// assert_eq!(pq.del_min(), Ok(1));
/// assert_eq!(pq.min_key(), Ok(&5));
/// ```
#[derive(Debug, Clone)]
pub struct IndexFibonacciHeap<K, C = NaturalOrder> {
    max_n: usize,
    arena: Arena<Node<K>>,
    min: Option<NodeId>,
    nodes: Vec<Option<NodeId>>,
    cmp: C,
}

impl<K: Ord> IndexFibonacciHeap<K> {
    /// Creates an empty queue for indices `0..max_n`, ordered naturally
    pub fn new(max_n: usize) -> Self {
        Self::with_comparator(max_n, NaturalOrder)
    }

    /// Builds a queue holding `keys[i]` at index `i`
    pub fn from_keys<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let keys: Vec<K> = keys.into_iter().collect();
        let mut pq = Self::new(keys.len());
        for (i, key) in keys.into_iter().enumerate() {
            pq.push_unchecked(i, key);
        }
        log::debug!("built indexed fibonacci heap from {} keys", pq.len());
        pq
    }
}

impl<K, C: Compare<K>> IndexFibonacciHeap<K, C> {
    /// Creates an empty queue for indices `0..max_n`, ordered by `cmp`
    pub fn with_comparator(max_n: usize, cmp: C) -> Self {
        IndexFibonacciHeap {
            max_n,
            arena: Arena::new(),
            min: None,
            nodes: vec![None; max_n],
            cmp,
        }
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

    /// Orders of the roots, walking the root ring from the minimum
    pub fn root_orders(&self) -> Vec<usize> {
        self.arena
            .ring_members(self.min)
            .into_iter()
            .map(|r| self.arena[r].order)
            .collect()
    }

    /// Number of marked nodes, all of which are non-roots
    pub fn marked_count(&self) -> usize {
        self.arena.iter().filter(|(_, node)| node.mark).count()
    }

    /// Checks heap order, parent links, ring consistency, unmarked roots and
    /// the index table
    pub fn is_min_heap_ordered(&self) -> bool {
        let roots = self.arena.ring_members(self.min);
        for &r in &roots {
            let node = &self.arena[r];
            if node.parent.is_some() || node.mark {
                return false;
            }
            if let Some(min) = self.min {
                if self.less(r, min) {
                    return false;
                }
            }
        }

        let mut stack = roots;
        let mut seen = 0;
        while let Some(id) = stack.pop() {
            seen += 1;
            let node = &self.arena[id];
            if self.arena[node.ring.next].ring.prev != id
                || self.nodes.get(node.index).copied().flatten() != Some(id)
            {
                return false;
            }
            let children = self.arena.ring_members(node.child);
            if children.len() != node.order {
                return false;
            }
            for &c in &children {
                if self.arena[c].parent != Some(id) || self.less(c, id) {
                    return false;
                }
            }
            stack.extend(children);
        }

        let indexed = self.nodes.iter().flatten();
        let live = indexed.clone().all(|&id| self.arena.get(id).is_some());
        live && seen == self.arena.len() && indexed.count() == seen
    }

    fn node_of(&self, i: usize) -> Result<NodeId> {
        validate_index(i, self.max_n)?;
        self.nodes[i].ok_or(HeapError::NotInQueue(i))
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

    /// Adds the ring of one `id` to the root ring
    fn add_root(&mut self, id: NodeId) {
        self.arena.ring_splice(self.min, Some(id));
        self.min = self.lesser(self.min, Some(id));
    }

    fn push_unchecked(&mut self, i: usize, key: K) {
        let node = self.arena.alloc_with(|id| Node {
            key,
            index: i,
            order: 0,
            mark: false,
            ring: RingLink::solo(id),
            parent: None,
            child: None,
        });
        self.nodes[i] = Some(node);
        self.add_root(node);
    }

    /// Makes the root `child` a child of the root `parent`
    fn link(&mut self, child: NodeId, parent: NodeId) {
        let node = &mut self.arena[child];
        node.parent = Some(parent);
        node.mark = false;
        match self.arena[parent].child {
            Some(first) => self.arena.ring_insert_after(first, child),
            None => self.arena[parent].child = Some(child),
        }
        self.arena[parent].order += 1;
        log::trace!("linked root of order {}", self.arena[parent].order - 1);
    }

    // Same pass as `FibonacciHeap::consolidate`; `link` here also sets the
    // parent and clears the mark.
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

    /// Detaches non-root `id` from its parent and moves it to the root ring
    fn cut(&mut self, id: NodeId, parent: NodeId) {
        let rest = self.arena.ring_remove(id);
        let p = &mut self.arena[parent];
        if p.child == Some(id) {
            p.child = rest;
        }
        p.order -= 1;

        let node = &mut self.arena[id];
        node.parent = None;
        node.mark = false;
        self.arena.ring_splice(self.min, Some(id));
    }

    /// Walks up from `id`, the parent of a node just cut
    fn cascading_cut(&mut self, mut id: NodeId) {
        while let Some(parent) = self.arena[id].parent {
            if !self.arena[id].mark {
                self.arena[id].mark = true;
                return;
            }
            log::trace!("cascading cut of index {}", self.arena[id].index);
            self.cut(id, parent);
            id = parent;
        }
    }

    /// Cuts `id` to the root ring if it has a parent, cascading upward
    fn cut_to_root(&mut self, id: NodeId) {
        if let Some(parent) = self.arena[id].parent {
            self.cut(id, parent);
            self.cascading_cut(parent);
        }
    }

    /// Removes root `root`, moves its children to the root ring and
    /// consolidates
    fn remove_root(&mut self, root: NodeId) -> (usize, K) {
        let children = self.arena[root].child.take();
        for c in self.arena.ring_members(children) {
            let node = &mut self.arena[c];
            node.parent = None;
            node.mark = false;
        }
        let rest = self.arena.ring_remove(root);
        let roots = self.arena.ring_splice(rest, children);

        let node = self.arena.free(root);
        self.nodes[node.index] = None;
        match roots {
            Some(start) => self.consolidate(start),
            None => self.min = None,
        }
        (node.index, node.key)
    }

    fn take_min(&mut self) -> Option<(usize, K)> {
        let min = self.min?;
        Some(self.remove_root(min))
    }
}

impl<K, C: Compare<K>> IndexedMinPriorityQueue<K> for IndexFibonacciHeap<K, C> {
    fn capacity(&self) -> usize {
        self.max_n
    }

    fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    fn len(&self) -> usize {
        self.arena.len()
    }

    fn contains(&self, i: usize) -> Result<bool> {
        validate_index(i, self.max_n)?;
        Ok(self.nodes[i].is_some())
    }

    fn insert(&mut self, i: usize, key: K) -> Result<()> {
        if self.contains(i)? {
            return Err(HeapError::DuplicateIndex(i));
        }
        self.push_unchecked(i, key);
        Ok(())
    }

    fn min_index(&self) -> Result<usize> {
        self.min
            .map(|m| self.arena[m].index)
            .ok_or(HeapError::EmptyQueue)
    }

    fn min_key(&self) -> Result<&K> {
        self.min
            .map(|m| &self.arena[m].key)
            .ok_or(HeapError::EmptyQueue)
    }

    fn del_min(&mut self) -> Result<usize> {
        self.take_min()
            .map(|(i, _)| i)
            .ok_or(HeapError::EmptyQueue)
    }

    fn key_of(&self, i: usize) -> Result<&K> {
        let id = self.node_of(i)?;
        Ok(&self.arena[id].key)
    }

    fn change_key(&mut self, i: usize, key: K) -> Result<()> {
        let id = self.node_of(i)?;
        match self.cmp.compare(&key, &self.arena[id].key) {
            Ordering::Less => self.decrease_key(i, key),
            Ordering::Greater => self.increase_key(i, key),
            Ordering::Equal => {
                self.arena[id].key = key;
                Ok(())
            }
        }
    }

    fn decrease_key(&mut self, i: usize, key: K) -> Result<()> {
        let id = self.node_of(i)?;
        if !self.cmp.compares_lt(&key, &self.arena[id].key) {
            return Err(HeapError::KeyOrderViolation(KeyChange::Decrease));
        }
        self.arena[id].key = key;
        if let Some(parent) = self.arena[id].parent {
            if self.less(id, parent) {
                self.cut(id, parent);
                self.cascading_cut(parent);
            }
        }
        self.min = self.lesser(self.min, Some(id));
        Ok(())
    }

    fn increase_key(&mut self, i: usize, key: K) -> Result<()> {
        let id = self.node_of(i)?;
        if !self.cmp.compares_gt(&key, &self.arena[id].key) {
            return Err(HeapError::KeyOrderViolation(KeyChange::Increase));
        }
        self.delete(i)?;
        self.push_unchecked(i, key);
        Ok(())
    }

    fn delete(&mut self, i: usize) -> Result<K> {
        let id = self.node_of(i)?;
        self.cut_to_root(id);
        let (_, key) = self.remove_root(id);
        Ok(key)
    }

    fn union(&mut self, other: Self) -> Result<()> {
        for (_, node) in other.arena.iter() {
            validate_index(node.index, self.max_n)?;
            if self.nodes[node.index].is_some() {
                return Err(HeapError::DuplicateIndex(node.index));
            }
        }
        if other.arena.is_empty() {
            return Ok(());
        }
        let map = self.arena.absorb(other.arena);
        for &id in map.values() {
            self.nodes[self.arena[id].index] = Some(id);
        }
        let theirs = moved_opt(&map, other.min);
        self.arena.ring_splice(self.min, theirs);
        self.min = self.lesser(self.min, theirs);
        Ok(())
    }
}

impl<K, C: Compare<K>> DrainMin for IndexFibonacciHeap<K, C> {
    type Entry = (usize, K);

    fn drain_min(&mut self) -> Option<(usize, K)> {
        self.take_min()
    }

    fn remaining(&self) -> usize {
        self.arena.len()
    }
}

impl<K, C: Compare<K>> IntoIterator for IndexFibonacciHeap<K, C> {
    type Item = (usize, K);
    type IntoIter = SortedIter<Self>;

    fn into_iter(self) -> Self::IntoIter {
        SortedIter::new(self)
    }
}
