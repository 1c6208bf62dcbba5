//! Indexed Binomial Heap implementation
//!
//! The binomial heap of [`crate::binomial`], extended with parent links and
//! an index table so entries can be addressed by an external index in
//! `0..max_n`:
//! - `nodes[i]` resolves index `i` to the arena node holding its key
//! - every node records its own `index`, so the table can be repaired when
//!   keys move between nodes
//!
//! **Decrease-key** bubbles up by swapping key and index fields with the
//! parent (the tree shape never changes), updating `nodes[]` for both
//! indices after each swap.
//!
//! **Delete** swaps the target all the way up to its root unconditionally,
//! then removes that root exactly like delete-min.
//!
//! **Increase-key** is delete followed by insert.
//!
//! # Time Complexity
//!
//! | Operation      | Complexity |
//! |----------------|------------|
//! | `insert`       | O(log n)   |
//! | `min_key`      | O(log n)   |
//! | `del_min`      | O(log n)   |
//! | `decrease_key` | O(log n)   |
//! | `delete`       | O(log n)   |
//! | `union`        | O(m + log n) |
//!
//! `union` moves the `m` nodes of `other` into this queue's arena before the
//! O(log n) root-list merge.

use crate::iter::{DrainMin, SortedIter};
use crate::order::{Compare, NaturalOrder};
use crate::storage::{moved_opt, Arena, NodeId, Relink, Relocation};
use crate::traits::{validate_index, HeapError, IndexedMinPriorityQueue, KeyChange, Result};
use std::cmp::Ordering;
use std::mem;

#[derive(Debug, Clone)]
struct Node<K> {
    key: K,
    index: usize,
    order: usize,
    parent: Option<NodeId>,
    child: Option<NodeId>,
    sibling: Option<NodeId>,
}

impl<K> Relink for Node<K> {
    fn relink(&mut self, map: &Relocation) {
        self.parent = moved_opt(map, self.parent);
        self.child = moved_opt(map, self.child);
        self.sibling = moved_opt(map, self.sibling);
    }
}

/// Indexed binomial min-heap
///
/// # Example
///
/// ```rust
/// use rust_indexed_heaps::index_binomial::IndexBinomialHeap;
/// use rust_indexed_heaps::IndexedMinPriorityQueue;
///
/// let mut pq = IndexBinomialHeap::new(16);
/// for i in 0..8 {
///     pq.insert(i, 100 - i as i32).unwrap();
/// }
/// pq.decrease_key(0, 1).unwrap();
/// assert_eq!(pq.min_index(), Ok(0));
/// assert_eq!(pq.delete(7), Ok(93));
/// assert_eq!(pq.len(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct IndexBinomialHeap<K, C = NaturalOrder> {
    max_n: usize,
    arena: Arena<Node<K>>,
    head: Option<NodeId>,
    nodes: Vec<Option<NodeId>>,
    cmp: C,
}

impl<K: Ord> IndexBinomialHeap<K> {
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
        pq
    }
}

impl<K, C: Compare<K>> IndexBinomialHeap<K, C> {
    /// Creates an empty queue for indices `0..max_n`, ordered by `cmp`
    pub fn with_comparator(max_n: usize, cmp: C) -> Self {
        IndexBinomialHeap {
            max_n,
            arena: Arena::new(),
            head: None,
            nodes: vec![None; max_n],
            cmp,
        }
    }

    /// The comparator ordering this queue
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Iterates `(index, key)` pairs in ascending key order, draining a
    /// private copy of the whole structure
    pub fn iter(&self) -> SortedIter<Self>
    where
        K: Clone,
        C: Clone,
    {
        SortedIter::new(self.clone())
    }

    /// Orders of the roots, in root-list order (strictly increasing)
    pub fn root_orders(&self) -> Vec<usize> {
        self.roots().map(|r| self.arena[r].order).collect()
    }

    /// Checks heap order, binomial shape, parent links and the index table
    pub fn is_min_heap_ordered(&self) -> bool {
        let mut stack: Vec<NodeId> = Vec::new();
        for root in self.roots() {
            if self.arena[root].parent.is_some() {
                return false;
            }
            stack.push(root);
        }

        let mut seen = 0;
        while let Some(id) = stack.pop() {
            seen += 1;
            let node = &self.arena[id];
            if self.nodes.get(node.index).copied().flatten() != Some(id) {
                return false;
            }
            let mut expected = node.order;
            let mut child = node.child;
            while let Some(c) = child {
                let cn = &self.arena[c];
                if expected == 0
                    || cn.order != expected - 1
                    || cn.parent != Some(id)
                    || self.cmp.compares_lt(&cn.key, &node.key)
                {
                    return false;
                }
                expected -= 1;
                stack.push(c);
                child = cn.sibling;
            }
            if expected != 0 {
                return false;
            }
        }

        let indexed = self.nodes.iter().flatten();
        let live = indexed.clone().all(|&id| self.arena.get(id).is_some());
        live && seen == self.arena.len() && indexed.count() == seen
    }

    fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.head, move |&r| self.arena[r].sibling)
    }

    fn node_of(&self, i: usize) -> Result<NodeId> {
        validate_index(i, self.max_n)?;
        self.nodes[i].ok_or(HeapError::NotInQueue(i))
    }

    fn min_root(&self) -> Option<NodeId> {
        self.roots().reduce(|best, r| {
            if self.cmp.compares_lt(&self.arena[r].key, &self.arena[best].key) {
                r
            } else {
                best
            }
        })
    }

    /// Inserts without validating `i`
    fn push_unchecked(&mut self, i: usize, key: K) {
        let node = self.arena.alloc(Node {
            key,
            index: i,
            order: 0,
            parent: None,
            child: None,
            sibling: None,
        });
        self.nodes[i] = Some(node);
        self.union_roots(Some(node));
    }

    fn link(&mut self, child: NodeId, parent: NodeId) {
        self.arena[child].parent = Some(parent);
        self.arena[child].sibling = self.arena[parent].child;
        let root = &mut self.arena[parent];
        root.child = Some(child);
        root.order += 1;
    }

    // `merge_by_order`, `union_roots` and `unlink_root` mirror `BinomialHeap`;
    // change both together.
    fn merge_by_order(&mut self, mut x: Option<NodeId>, mut y: Option<NodeId>) -> Option<NodeId> {
        let mut head = None;
        let mut tail: Option<NodeId> = None;
        loop {
            let next = match (x, y) {
                (None, None) => break,
                (Some(a), None) => {
                    x = self.arena[a].sibling;
                    a
                }
                (None, Some(b)) => {
                    y = self.arena[b].sibling;
                    b
                }
                (Some(a), Some(b)) => {
                    if self.arena[a].order <= self.arena[b].order {
                        x = self.arena[a].sibling;
                        a
                    } else {
                        y = self.arena[b].sibling;
                        b
                    }
                }
            };
            match tail {
                None => head = Some(next),
                Some(t) => self.arena[t].sibling = Some(next),
            }
            tail = Some(next);
        }
        if let Some(t) = tail {
            self.arena[t].sibling = None;
        }
        head
    }

    fn union_roots(&mut self, other: Option<NodeId>) {
        self.head = self.merge_by_order(self.head, other);

        let Some(mut x) = self.head else { return };
        let mut prev: Option<NodeId> = None;
        while let Some(next) = self.arena[x].sibling {
            let order = self.arena[x].order;
            let three_alike = self.arena[next]
                .sibling
                .is_some_and(|after| self.arena[after].order == order);

            if order < self.arena[next].order || three_alike {
                prev = Some(x);
                x = next;
            } else if self.cmp.compares_gt(&self.arena[next].key, &self.arena[x].key) {
                self.arena[x].sibling = self.arena[next].sibling;
                self.link(next, x);
            } else {
                match prev {
                    None => self.head = Some(next),
                    Some(p) => self.arena[p].sibling = Some(next),
                }
                self.link(x, next);
                x = next;
            }
        }
    }

    /// Swaps the entries (key and index) held by nodes `a` and `b`
    fn exchange(&mut self, a: NodeId, b: NodeId) {
        if let Some([x, y]) = self.arena.pair_mut(a, b) {
            mem::swap(&mut x.key, &mut y.key);
            mem::swap(&mut x.index, &mut y.index);
            self.nodes[x.index] = Some(a);
            self.nodes[y.index] = Some(b);
        }
    }

    /// Bubbles the entry held by `id` up while it is less than its parent
    fn swim(&mut self, mut id: NodeId) {
        while let Some(parent) = self.arena[id].parent {
            if !self.cmp.compares_gt(&self.arena[parent].key, &self.arena[id].key) {
                break;
            }
            self.exchange(id, parent);
            id = parent;
        }
    }

    /// Moves the entry held by `id` to the root of its tree
    fn to_the_root(&mut self, mut id: NodeId) -> NodeId {
        while let Some(parent) = self.arena[id].parent {
            self.exchange(id, parent);
            id = parent;
        }
        id
    }

    fn unlink_root(&mut self, target: NodeId) {
        let after = self.arena[target].sibling.take();
        if self.head == Some(target) {
            self.head = after;
            return;
        }
        let mut current = self.head;
        while let Some(r) = current {
            if self.arena[r].sibling == Some(target) {
                self.arena[r].sibling = after;
                return;
            }
            current = self.arena[r].sibling;
        }
    }

    /// Removes root `root`, unions its children back, and frees it
    fn remove_root(&mut self, root: NodeId) -> (usize, K) {
        self.unlink_root(root);

        let mut reversed = None;
        let mut current = self.arena[root].child.take();
        while let Some(c) = current {
            let node = &mut self.arena[c];
            node.parent = None;
            current = mem::replace(&mut node.sibling, reversed);
            reversed = Some(c);
        }
        self.union_roots(reversed);

        let node = self.arena.free(root);
        self.nodes[node.index] = None;
        (node.index, node.key)
    }

    fn take_min(&mut self) -> Option<(usize, K)> {
        let min = self.min_root()?;
        Some(self.remove_root(min))
    }
}

impl<K, C: Compare<K>> IndexedMinPriorityQueue<K> for IndexBinomialHeap<K, C> {
    fn capacity(&self) -> usize {
        self.max_n
    }

    fn is_empty(&self) -> bool {
        self.head.is_none()
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
        self.min_root()
            .map(|r| self.arena[r].index)
            .ok_or(HeapError::EmptyQueue)
    }

    fn min_key(&self) -> Result<&K> {
        self.min_root()
            .map(|r| &self.arena[r].key)
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
        self.swim(id);
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
        let root = self.to_the_root(id);
        let (_, key) = self.remove_root(root);
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
        self.union_roots(moved_opt(&map, other.head));
        Ok(())
    }
}

impl<K, C: Compare<K>> DrainMin for IndexBinomialHeap<K, C> {
    type Entry = (usize, K);

    fn drain_min(&mut self) -> Option<(usize, K)> {
        self.take_min()
    }

    fn remaining(&self) -> usize {
        self.arena.len()
    }
}

impl<K, C: Compare<K>> IntoIterator for IndexBinomialHeap<K, C> {
    type Item = (usize, K);
    type IntoIter = SortedIter<Self>;

    fn into_iter(self) -> Self::IntoIter {
        SortedIter::new(self)
    }
}
