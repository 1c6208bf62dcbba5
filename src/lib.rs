//! Indexed Heap Data Structures for Rust
//!
//! This crate provides min-priority queues in two flavours:
//!
//! - **Plain** queues ([`MinPriorityQueue`]) hold bare keys.
//! - **Indexed** queues ([`IndexedMinPriorityQueue`]) associate each key with
//!   an external integer index in `0..max_n`, so a caller can look up,
//!   decrease, increase or delete the key of a known index. This is the
//!   shape graph algorithms like Dijkstra and Prim want.
//!
//! # Features
//!
//! - **Indexed Binary Heap**: O(log n) insert, delete-min and decrease_key
//! - **Multiway (d-ary) Heap**: shallower trees for a configurable branching
//!   factor, plain and indexed
//! - **Binomial Heap**: O(log n) insert, delete-min and root-list merge,
//!   plain and indexed
//! - **Fibonacci Heap**: O(1) insert and ring splice; O(1) amortized
//!   decrease_key; O(log n) amortized delete-min, plain and indexed
//!
//! Each queue owns an arena of nodes, so `union` on the linked heaps also
//! moves nodes between arenas: the smaller heap's nodes for plain queues,
//! all of `other`'s nodes for indexed ones. Module docs list the costs.
//!
//! Every queue orders keys with a [`Compare`] comparator, [`NaturalOrder`]
//! by default. Errors are reported as [`HeapError`] values.
//!
//! # Example
//!
//! ```rust
//! use rust_indexed_heaps::index_fibonacci::IndexFibonacciHeap;
//! use rust_indexed_heaps::IndexedMinPriorityQueue;
//!
//! let mut pq = IndexFibonacciHeap::new(4);
//! pq.insert(0, 5).unwrap();
//! pq.insert(1, 3).unwrap();
//! pq.decrease_key(0, 1).unwrap();
//! assert_eq!(pq.min_index(), Ok(0));
//! assert_eq!(pq.min_key(), Ok(&1));
//! ```

pub mod binary;
pub mod binomial;
pub mod fibonacci;
pub mod index_binomial;
pub mod index_fibonacci;
pub mod index_multiway;
pub mod iter;
pub mod multiway;
pub mod order;
mod ring;
mod storage;
pub mod traits;

// Re-export the main traits for convenience
pub use iter::{DrainMin, SortedIter};
pub use order::{Compare, NaturalOrder};
pub use traits::{HeapError, IndexedMinPriorityQueue, KeyChange, MinPriorityQueue, Result};
