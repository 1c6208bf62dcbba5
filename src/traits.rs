//! Common traits for the priority-queue family
//!
//! This module provides the two contracts every queue in the crate implements:
//!
//! - [`MinPriorityQueue`]: plain queues addressed only through their minimum
//! - [`IndexedMinPriorityQueue`]: queues whose entries are addressed by a
//!   caller-owned external index in `0..capacity`
//!
//! Graph algorithms such as Dijkstra or Prim only need `insert`, `contains`,
//! `decrease_key`, `del_min` and `is_empty` from the indexed contract, so any
//! indexed queue can be swapped in for another.

use std::fmt;
use thiserror::Error;

/// Which direction a key update was required to move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyChange {
    /// The new key had to compare strictly less than the current one
    Decrease,
    /// The new key had to compare strictly greater than the current one
    Increase,
}

impl fmt::Display for KeyChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyChange::Decrease => write!(f, "less"),
            KeyChange::Increase => write!(f, "greater"),
        }
    }
}

/// Error type for priority-queue operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The index is outside `0..capacity`
    #[error("index {index} is out of range for a queue of capacity {capacity}")]
    InvalidIndex { index: usize, capacity: usize },
    /// The index is already associated with a key
    #[error("index {0} is already in the priority queue")]
    DuplicateIndex(usize),
    /// The index is not associated with any key
    #[error("index {0} is not in the priority queue")]
    NotInQueue(usize),
    /// The new key did not move in the required direction
    #[error("new key is not strictly {0} than the current key")]
    KeyOrderViolation(KeyChange),
    /// The queue has no elements
    #[error("priority queue is empty")]
    EmptyQueue,
    /// A multiway heap needs a branching factor of at least two
    #[error("branching factor {0} is invalid, must be at least 2")]
    InvalidArity(usize),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, HeapError>;

/// Plain min-priority queue
///
/// Keys are ordered by the queue's comparator; the queue hands back keys,
/// never handles, so there is no way to address an entry other than the
/// minimum.
///
/// # Example
///
/// ```rust
/// use rust_indexed_heaps::MinPriorityQueue;
/// use rust_indexed_heaps::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// heap.insert(3);
/// heap.insert(1);
/// heap.insert(2);
///
/// assert_eq!(heap.min_key(), Ok(&1));
/// assert_eq!(heap.del_min(), Ok(1));
/// assert_eq!(heap.len(), 2);
/// ```
pub trait MinPriorityQueue<K> {
    /// Returns true if the queue is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of keys in the queue
    fn len(&self) -> usize;

    /// Adds a key to the queue
    fn insert(&mut self, key: K);

    /// Returns the minimum key without removing it
    ///
    /// # Errors
    /// [`HeapError::EmptyQueue`] if the queue is empty.
    fn min_key(&self) -> Result<&K>;

    /// Removes and returns the minimum key
    ///
    /// # Errors
    /// [`HeapError::EmptyQueue`] if the queue is empty.
    fn del_min(&mut self) -> Result<K>;

    /// Moves every key of `other` into this queue
    ///
    /// `other` is consumed; the receiver's comparator is kept.
    fn union(&mut self, other: Self)
    where
        Self: Sized;
}

/// Min-priority queue whose entries are addressed by an external index
///
/// Every key is associated with an index in `0..capacity()` chosen by the
/// caller. The index is a weak back-reference: it is resolved to a live entry
/// only through the queue, and becomes free again as soon as the entry is
/// removed.
///
/// All fallible operations validate in the order range, membership, key
/// direction, and leave the queue untouched when they fail.
///
/// # Example
///
/// ```rust
/// use rust_indexed_heaps::{HeapError, IndexedMinPriorityQueue};
/// use rust_indexed_heaps::index_fibonacci::IndexFibonacciHeap;
///
/// let mut pq = IndexFibonacciHeap::new(8);
/// pq.insert(0, 10).unwrap();
/// pq.insert(1, 20).unwrap();
/// pq.decrease_key(1, 5).unwrap();
///
/// assert_eq!(pq.min_index(), Ok(1));
/// assert_eq!(pq.insert(1, 7), Err(HeapError::DuplicateIndex(1)));
/// ```
pub trait IndexedMinPriorityQueue<K> {
    /// Returns the fixed number of index slots (`max_n`)
    fn capacity(&self) -> usize;

    /// Returns true if the queue is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of keys in the queue
    fn len(&self) -> usize;

    /// Returns true if index `i` is associated with a key
    ///
    /// # Errors
    /// [`HeapError::InvalidIndex`] if `i >= capacity()`.
    fn contains(&self, i: usize) -> Result<bool>;

    /// Associates `key` with index `i`
    ///
    /// # Errors
    /// [`HeapError::InvalidIndex`] or [`HeapError::DuplicateIndex`].
    fn insert(&mut self, i: usize, key: K) -> Result<()>;

    /// Returns the index associated with the minimum key
    fn min_index(&self) -> Result<usize>;

    /// Returns the minimum key
    fn min_key(&self) -> Result<&K>;

    /// Removes the minimum key and returns its index
    fn del_min(&mut self) -> Result<usize>;

    /// Returns the key associated with index `i`
    fn key_of(&self, i: usize) -> Result<&K>;

    /// Replaces the key associated with index `i`, in either direction
    fn change_key(&mut self, i: usize, key: K) -> Result<()>;

    /// Lowers the key associated with index `i`
    ///
    /// # Errors
    /// [`HeapError::KeyOrderViolation`] unless `key` compares strictly less
    /// than the current key.
    fn decrease_key(&mut self, i: usize, key: K) -> Result<()>;

    /// Raises the key associated with index `i`
    ///
    /// # Errors
    /// [`HeapError::KeyOrderViolation`] unless `key` compares strictly greater
    /// than the current key.
    fn increase_key(&mut self, i: usize, key: K) -> Result<()>;

    /// Removes the entry at index `i` and returns its key
    fn delete(&mut self, i: usize) -> Result<K>;

    /// Moves every entry of `other` into this queue, keeping their indices
    ///
    /// # Errors
    /// [`HeapError::InvalidIndex`] if `other` holds an index this queue cannot
    /// address, [`HeapError::DuplicateIndex`] if both queues hold the same
    /// index. Nothing is moved when an error is returned.
    fn union(&mut self, other: Self) -> Result<()>
    where
        Self: Sized;
}

/// Checks that `i` addresses a slot of a queue with `capacity` slots
#[inline]
pub(crate) fn validate_index(i: usize, capacity: usize) -> Result<()> {
    if i < capacity {
        Ok(())
    } else {
        Err(HeapError::InvalidIndex { index: i, capacity })
    }
}
