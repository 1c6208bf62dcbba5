//! Comparator contract shared by every queue in the crate
//!
//! All queues are min-queues with respect to a comparator `C: Compare<K>`.
//! The comparator is injected at construction and defaults to
//! [`NaturalOrder`], which uses the key's own [`Ord`] implementation.
//!
//! Any closure of the form `Fn(&K, &K) -> Ordering` is also a comparator,
//! through the blanket implementation provided by the `compare` crate:
//!
//! ```rust
//! use rust_indexed_heaps::binomial::BinomialHeap;
//! use rust_indexed_heaps::MinPriorityQueue;
//!
//! // A max-queue is a min-queue under the reversed order
//! let mut heap = BinomialHeap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
//! heap.insert(1);
//! heap.insert(7);
//! heap.insert(3);
//! assert_eq!(heap.del_min(), Ok(7));
//! ```

use std::cmp::Ordering;

pub use compare::Compare;

/// Orders keys by their natural [`Ord`] implementation
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct NaturalOrder;

impl<K: Ord> Compare<K> for NaturalOrder {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}
