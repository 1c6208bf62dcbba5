//! Binomial Heap implementation
//!
//! A binomial heap is a forest of binomial trees with:
//! - O(log n) insert, min_key and del_min
//! - O(log n) union of the root lists, after moving the smaller heap's
//!   nodes into the larger arena (O(min(n, m)))
//!
//! # Algorithm Overview
//!
//! **Binomial Tree Bₖ**: Recursively defined:
//! - B₀ is a single node
//! - Bₖ is formed by linking two B_{k-1} trees
//! - Bₖ has exactly 2ᵏ nodes and height k, and its root has k children
//!
//! The roots form a singly-linked list (through `sibling`) in strictly
//! increasing order. This is the binary representation of `n`: a tree of
//! order k is present exactly when bit k of `n` is set.
//!
//! **Union** is binary addition:
//! 1. Merge the two root lists by order, like merging sorted linked lists.
//!    The result is sorted but may hold two (never more) roots per order.
//! 2. Walk the list linking adjacent roots of equal order. Linking two Bₖ
//!    produces a B_{k+1} "carry"; when three roots share an order, the walk
//!    steps past the first one so the carry meets the right partner.
//!
//! **Delete-min** removes the minimum root; its children are B_{k-1} .. B₀
//! (stored in descending order), so reversing them yields a valid root list
//! that is unioned back in.
//!
//! Nodes live in an arena and link to each other through [`NodeId`]
//! handles.
//!
//! # Time Complexity
//!
//! | Operation | Complexity                              |
//! |-----------|-----------------------------------------|
//! | `insert`  | O(log n)                                |
//! | `min_key` | O(log n)                                |
//! | `del_min` | O(log n)                                |
//! | `union`   | O(min(n, m)) node moves, then O(log n)  |

use crate::iter::{DrainMin, SortedIter};
use crate::order::{Compare, NaturalOrder};
use crate::storage::{moved_opt, Arena, NodeId, Relink, Relocation};
use crate::traits::{HeapError, MinPriorityQueue, Result};
use std::mem;

/// Internal node structure for the binomial heap
///
/// - `child`: leftmost child, which is the child of highest order
/// - `sibling`: next root in the root list, or next (lower order) child
/// - `order`: number of children
#[derive(Debug, Clone)]
struct Node<K> {
    key: K,
    order: usize,
    child: Option<NodeId>,
    sibling: Option<NodeId>,
}

impl<K> Relink for Node<K> {
    fn relink(&mut self, map: &Relocation) {
        self.child = moved_opt(map, self.child);
        self.sibling = moved_opt(map, self.sibling);
    }
}

/// Binomial Heap
///
/// # Example
///
/// ```rust
/// use rust_indexed_heaps::binomial::BinomialHeap;
/// use rust_indexed_heaps::MinPriorityQueue;
///
/// let mut a: BinomialHeap<i32> = [4, 1, 7].into_iter().collect();
/// let b: BinomialHeap<i32> = [3, 2].into_iter().collect();
/// a.union(b);
///
/// assert_eq!(a.len(), 5);
/// assert_eq!(a.root_orders(), vec![0, 2]);
/// assert_eq!(a.del_min(), Ok(1));
/// ```
#[derive(Debug, Clone)]
pub struct BinomialHeap<K, C = NaturalOrder> {
    arena: Arena<Node<K>>,
    head: Option<NodeId>,
    cmp: C,
}

impl<K: Ord> BinomialHeap<K> {
    /// Creates an empty heap ordered naturally
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Builds a heap holding every key of `keys`
    pub fn from_keys<I: IntoIterator<Item = K>>(keys: I) -> Self {
        keys.into_iter().collect()
    }
}

impl<K: Ord> Default for BinomialHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C: Compare<K>> BinomialHeap<K, C> {
    /// Creates an empty heap ordered by `cmp`
    pub fn with_comparator(cmp: C) -> Self {
        BinomialHeap {
            arena: Arena::new(),
            head: None,
            cmp,
        }
    }

    /// The comparator ordering this queue
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Iterates the keys in ascending order
    ///
    /// The whole structure, subtrees included, is copied first and the copy
    /// is drained; `self` is never touched.
    pub fn iter(&self) -> SortedIter<Self>
    where
        K: Clone,
        C: Clone,
    {
        SortedIter::new(self.clone())
    }

    /// Orders of the roots, in root-list order
    ///
    /// After every public operation this is strictly increasing.
    pub fn root_orders(&self) -> Vec<usize> {
        self.roots().map(|r| self.arena[r].order).collect()
    }

    /// Checks heap order and binomial shape of every tree
    ///
    /// Every node of order k must have exactly k children of orders
    /// k-1, ..., 0 (leftmost first), and no child may be less than its
    /// parent. Uses an explicit stack, so tree depth is irrelevant.
    pub fn is_min_heap_ordered(&self) -> bool {
        let mut stack: Vec<NodeId> = self.roots().collect();
        let mut seen = 0;
        while let Some(id) = stack.pop() {
            seen += 1;
            let node = &self.arena[id];
            let mut expected = node.order;
            let mut child = node.child;
            while let Some(c) = child {
                if expected == 0
                    || self.arena[c].order != expected - 1
                    || self.cmp.compares_lt(&self.arena[c].key, &node.key)
                {
                    return false;
                }
                expected -= 1;
                stack.push(c);
                child = self.arena[c].sibling;
            }
            if expected != 0 {
                return false;
            }
        }
        seen == self.arena.len()
    }

    fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.head, move |&r| self.arena[r].sibling)
    }

    /// Root holding the minimum key; the first one wins ties
    fn min_root(&self) -> Option<NodeId> {
        self.roots().reduce(|best, r| {
            if self.cmp.compares_lt(&self.arena[r].key, &self.arena[best].key) {
                r
            } else {
                best
            }
        })
    }

    /// Makes `child` the leftmost child of `parent`
    ///
    /// Both must be roots of the same order; `parent` must not be greater.
    fn link(&mut self, child: NodeId, parent: NodeId) {
        self.arena[child].sibling = self.arena[parent].child;
        self.arena[parent].child = Some(child);
        self.arena[parent].order += 1;
    }

    /// Merges two order-sorted root lists into one order-sorted list
    ///
    /// `merge_by_order`, `union_roots` and `unlink_root` have twins in
    /// `IndexBinomialHeap`; change both together.
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

    /// Unions the root list starting at `other` into this heap's root list
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

    /// Detaches root `target` from the root list
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

    /// Reverses a child list (descending order) into a root list (ascending)
    fn reverse_children(&mut self, first: Option<NodeId>) -> Option<NodeId> {
        let mut reversed = None;
        let mut current = first;
        while let Some(c) = current {
            current = mem::replace(&mut self.arena[c].sibling, reversed);
            reversed = Some(c);
        }
        reversed
    }
}

impl<K, C: Compare<K>> MinPriorityQueue<K> for BinomialHeap<K, C> {
    fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    fn len(&self) -> usize {
        self.arena.len()
    }

    /// Unions an order-0 singleton into the heap
    ///
    /// **Time Complexity**: O(log n) worst-case, like incrementing a binary
    /// counter.
    fn insert(&mut self, key: K) {
        let node = self.arena.alloc(Node {
            key,
            order: 0,
            child: None,
            sibling: None,
        });
        self.union_roots(Some(node));
    }

    /// **Time Complexity**: O(log n), a scan of the root list
    fn min_key(&self) -> Result<&K> {
        self.min_root()
            .map(|r| &self.arena[r].key)
            .ok_or(HeapError::EmptyQueue)
    }

    /// Removes and returns the minimum key
    ///
    /// **Time Complexity**: O(log n) worst-case
    ///
    /// **Algorithm**:
    /// 1. Scan the roots for the minimum and detach it
    /// 2. Reverse its children into an ascending root list
    /// 3. Union that list back into the heap
    fn del_min(&mut self) -> Result<K> {
        let min = self.min_root().ok_or(HeapError::EmptyQueue)?;
        self.unlink_root(min);
        let children = self.arena[min].child.take();
        let orphans = self.reverse_children(children);
        self.union_roots(orphans);
        Ok(self.arena.free(min).key)
    }

    /// Merges another heap into this one
    ///
    /// **Time Complexity**: O(log n) structural work. Nodes of the smaller
    /// heap are first moved into the larger heap's arena.
    fn union(&mut self, mut other: Self) {
        if other.is_empty() {
            return;
        }
        if self.arena.len() < other.arena.len() {
            mem::swap(&mut self.arena, &mut other.arena);
            mem::swap(&mut self.head, &mut other.head);
        }
        let map = self.arena.absorb(other.arena);
        let other_head = moved_opt(&map, other.head);
        self.union_roots(other_head);
    }
}

impl<K, C: Compare<K>> DrainMin for BinomialHeap<K, C> {
    type Entry = K;

    fn drain_min(&mut self) -> Option<K> {
        self.del_min().ok()
    }

    fn remaining(&self) -> usize {
        self.arena.len()
    }
}

impl<K, C: Compare<K>> IntoIterator for BinomialHeap<K, C> {
    type Item = K;
    type IntoIter = SortedIter<Self>;

    fn into_iter(self) -> Self::IntoIter {
        SortedIter::new(self)
    }
}

impl<K, C: Compare<K>> Extend<K> for BinomialHeap<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for BinomialHeap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut heap = BinomialHeap::new();
        heap.extend(iter);
        heap
    }
}
