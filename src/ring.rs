//! Circular doubly-linked rings over arena nodes
//!
//! Fibonacci heaps keep their roots, and every node's children, in circular
//! doubly-linked lists. In a circular list:
//! - A single node points to itself (both `next` and `prev`)
//! - There is no head or tail; any node can be the entry point
//! - Splicing two rings together is O(1)
//!
//! A ring is referred to by any one of its members (an "entry"). An empty
//! ring is `None`.

use crate::storage::{moved, Arena, NodeId, Relocation};

/// The `prev`/`next` pair every ring member carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RingLink {
    pub(crate) prev: NodeId,
    pub(crate) next: NodeId,
}

impl RingLink {
    /// Link of a node that forms a ring of one
    #[inline]
    pub(crate) fn solo(id: NodeId) -> Self {
        RingLink { prev: id, next: id }
    }

    pub(crate) fn relink(&mut self, map: &Relocation) {
        self.prev = moved(map, self.prev);
        self.next = moved(map, self.next);
    }
}

/// Nodes that can be members of a ring
pub(crate) trait Ringed {
    fn ring(&self) -> &RingLink;
    fn ring_mut(&mut self) -> &mut RingLink;
}

impl<N: Ringed> Arena<N> {
    #[inline]
    pub(crate) fn next(&self, id: NodeId) -> NodeId {
        self[id].ring().next
    }

    /// Turns `id` into a ring of one, without touching former neighbours
    #[inline]
    pub(crate) fn make_solo(&mut self, id: NodeId) {
        *self[id].ring_mut() = RingLink::solo(id);
    }

    /// Unlinks `id` from its ring and leaves it as a ring of one
    ///
    /// Returns another member of the remaining ring, or `None` if `id` was
    /// alone.
    pub(crate) fn ring_remove(&mut self, id: NodeId) -> Option<NodeId> {
        let RingLink { prev, next } = *self[id].ring();
        if next == id {
            return None;
        }
        self[prev].ring_mut().next = next;
        self[next].ring_mut().prev = prev;
        self.make_solo(id);
        Some(next)
    }

    /// Inserts the ring of one `new` right after `at`
    pub(crate) fn ring_insert_after(&mut self, at: NodeId, new: NodeId) {
        let next = self[at].ring().next;
        *self[new].ring_mut() = RingLink { prev: at, next };
        self[at].ring_mut().next = new;
        self[next].ring_mut().prev = new;
    }

    /// Splices two rings into one in O(1)
    ///
    /// Returns an entry into the merged ring, or `None` if both were empty.
    pub(crate) fn ring_splice(&mut self, a: Option<NodeId>, b: Option<NodeId>) -> Option<NodeId> {
        match (a, b) {
            (None, other) | (other, None) => other,
            (Some(a), Some(b)) => {
                let a_prev = self[a].ring().prev;
                let b_prev = self[b].ring().prev;
                self[a_prev].ring_mut().next = b;
                self[b].ring_mut().prev = a_prev;
                self[b_prev].ring_mut().next = a;
                self[a].ring_mut().prev = b_prev;
                Some(a)
            }
        }
    }

    /// Collects the members of the ring entered at `start`, in `next` order
    pub(crate) fn ring_members(&self, start: Option<NodeId>) -> Vec<NodeId> {
        let mut members = Vec::new();
        if let Some(start) = start {
            let mut current = start;
            loop {
                members.push(current);
                current = self.next(current);
                if current == start {
                    break;
                }
            }
        }
        members
    }
}
