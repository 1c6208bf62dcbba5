//! Arena storage for linked heap nodes
//!
//! Binomial and Fibonacci heaps are pointer graphs: parents, children,
//! siblings and circular rings. Instead of raw pointers or `Rc<RefCell<_>>`,
//! every node lives in an [`Arena`] owned by exactly one heap, and links are
//! [`NodeId`] handles into that arena.
//!
//! # Design
//!
//! - `NodeId` is a generational `slotmap` key: a handle to a removed node can
//!   never resolve to a node that later reuses the same slot.
//! - A handle is a non-owning lookup key; only the arena keeps nodes alive.
//! - Moving nodes between heaps (union) goes through [`Arena::absorb`], which
//!   re-keys the moved nodes and lets each node rewrite its own links via
//!   [`Relink`].

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use std::ops::{Index, IndexMut};

new_key_type! {
    /// Handle to a node stored in an [`Arena`]
    pub(crate) struct NodeId;
}

/// Mapping from a node's old handle to its handle after relocation
pub(crate) type Relocation = FxHashMap<NodeId, NodeId>;

/// Nodes that hold links to other nodes of the same arena
pub(crate) trait Relink {
    /// Rewrites every stored link through `map`
    fn relink(&mut self, map: &Relocation);
}

/// Translates a link after relocation
///
/// Panics if `id` was not part of the relocated arena, which would mean a
/// node linked outside of its own heap.
#[inline]
pub(crate) fn moved(map: &Relocation, id: NodeId) -> NodeId {
    map[&id]
}

/// Translates an optional link after relocation
#[inline]
pub(crate) fn moved_opt(map: &Relocation, id: Option<NodeId>) -> Option<NodeId> {
    id.map(|id| moved(map, id))
}

/// Growable node storage addressed by [`NodeId`]
#[derive(Debug, Clone)]
pub(crate) struct Arena<N> {
    nodes: SlotMap<NodeId, N>,
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }
}

impl<N> Arena<N> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Stores a node and returns its handle
    pub(crate) fn alloc(&mut self, node: N) -> NodeId {
        self.nodes.insert(node)
    }

    /// Stores a node built from its own handle (for self-referencing rings)
    pub(crate) fn alloc_with(&mut self, build: impl FnOnce(NodeId) -> N) -> NodeId {
        self.nodes.insert_with_key(build)
    }

    /// Removes a node and returns it
    ///
    /// Panics if the handle is stale; heaps only free nodes they still link.
    pub(crate) fn free(&mut self, id: NodeId) -> N {
        self.nodes
            .remove(id)
            .expect("freed node must be live in its arena")
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> Option<&N> {
        self.nodes.get(id)
    }

    /// Mutable access to two distinct nodes at once
    pub(crate) fn pair_mut(&mut self, a: NodeId, b: NodeId) -> Option<[&mut N; 2]> {
        self.nodes.get_disjoint_mut([a, b])
    }

    /// Iterates over all live nodes in storage order
    pub(crate) fn iter(&self) -> impl Iterator<Item = (NodeId, &N)> {
        self.nodes.iter()
    }
}

impl<N: Relink> Arena<N> {
    /// Moves every node of `other` into this arena
    ///
    /// Returns the old-to-new handle mapping so the caller can translate the
    /// entry points it holds into `other` (root list, minimum, index table).
    /// Links stored inside the moved nodes are already translated.
    pub(crate) fn absorb(&mut self, other: Arena<N>) -> Relocation {
        let mut map =
            Relocation::with_capacity_and_hasher(other.len(), Default::default());
        let mut moved_ids = Vec::with_capacity(other.len());

        for (old, node) in other.nodes {
            let new = self.nodes.insert(node);
            map.insert(old, new);
            moved_ids.push(new);
        }

        for id in moved_ids {
            self.nodes[id].relink(&map);
        }

        log::debug!("relocated {} heap nodes between arenas", map.len());
        map
    }
}

impl<N> Index<NodeId> for Arena<N> {
    type Output = N;

    #[inline]
    fn index(&self, id: NodeId) -> &N {
        &self.nodes[id]
    }
}

impl<N> IndexMut<NodeId> for Arena<N> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut N {
        &mut self.nodes[id]
    }
}
