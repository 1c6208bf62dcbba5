//! Generic tests for every queue implementation
//!
//! The helpers only use the `MinPriorityQueue` / `IndexedMinPriorityQueue`
//! traits, and receive a factory for the queue under test. The macros at the
//! bottom instantiate every helper for every variant.

use ctor::ctor;
use rust_indexed_heaps::binary::IndexBinaryHeap;
use rust_indexed_heaps::binomial::BinomialHeap;
use rust_indexed_heaps::fibonacci::FibonacciHeap;
use rust_indexed_heaps::index_binomial::IndexBinomialHeap;
use rust_indexed_heaps::index_fibonacci::IndexFibonacciHeap;
use rust_indexed_heaps::index_multiway::IndexMultiwayHeap;
use rust_indexed_heaps::multiway::MultiwayHeap;
use rust_indexed_heaps::{HeapError, IndexedMinPriorityQueue, KeyChange, MinPriorityQueue};

#[ctor]
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// Indexed queue helpers
// ============================================================================

/// Drains the queue, returning the indices in removal order
fn drain_indices<Q: IndexedMinPriorityQueue<i32>>(pq: &mut Q) -> Vec<usize> {
    let mut order = Vec::new();
    while let Ok(i) = pq.del_min() {
        order.push(i);
    }
    order
}

/// Empty queue reports errors instead of values
fn test_empty_indexed<Q: IndexedMinPriorityQueue<i32>>(make: impl Fn(usize) -> Q) {
    let mut pq = make(4);
    assert!(pq.is_empty());
    assert_eq!(pq.len(), 0);
    assert_eq!(pq.capacity(), 4);
    assert_eq!(pq.min_key(), Err(HeapError::EmptyQueue));
    assert_eq!(pq.min_index(), Err(HeapError::EmptyQueue));
    assert_eq!(pq.del_min(), Err(HeapError::EmptyQueue));
}

/// Keys [5,3,8,1] at indices 0..4 come out as indices 3,1,0,2
fn test_del_min_order<Q: IndexedMinPriorityQueue<i32>>(make: impl Fn(usize) -> Q) {
    let mut pq = make(4);
    for (i, key) in [5, 3, 8, 1].into_iter().enumerate() {
        pq.insert(i, key).unwrap();
    }
    assert_eq!(pq.len(), 4);
    assert_eq!(pq.min_key(), Ok(&1));
    assert_eq!(drain_indices(&mut pq), vec![3, 1, 0, 2]);
    assert!(pq.is_empty());
}

/// Keys [10,20,5]; decreasing 20 to 2 makes its index the next minimum
fn test_decrease_key_becomes_min<Q: IndexedMinPriorityQueue<i32>>(make: impl Fn(usize) -> Q) {
    let mut pq = make(3);
    pq.insert(0, 10).unwrap();
    pq.insert(1, 20).unwrap();
    pq.insert(2, 5).unwrap();
    pq.decrease_key(1, 2).unwrap();
    assert_eq!(pq.min_key(), Ok(&2));
    assert_eq!(pq.del_min(), Ok(1));
    assert_eq!(pq.del_min(), Ok(2));
    assert_eq!(pq.del_min(), Ok(0));
}

/// Inserting an index twice is rejected and leaves the queue unchanged
fn test_duplicate_index<Q: IndexedMinPriorityQueue<i32>>(make: impl Fn(usize) -> Q) {
    let mut pq = make(5);
    pq.insert(2, 7).unwrap();
    assert_eq!(pq.insert(2, 1), Err(HeapError::DuplicateIndex(2)));
    assert_eq!(pq.len(), 1);
    assert_eq!(pq.key_of(2), Ok(&7));
}

/// Range is checked before membership, membership before key order
fn test_validation_order<Q: IndexedMinPriorityQueue<i32>>(make: impl Fn(usize) -> Q) {
    let mut pq = make(3);
    pq.insert(0, 10).unwrap();

    let out_of_range = Err(HeapError::InvalidIndex {
        index: 3,
        capacity: 3,
    });
    assert_eq!(pq.insert(3, 0), out_of_range);
    assert_eq!(pq.contains(3), out_of_range.map(|()| false));
    assert_eq!(pq.decrease_key(3, 0), out_of_range);
    assert_eq!(pq.increase_key(3, 0), out_of_range);
    assert_eq!(pq.change_key(3, 0), out_of_range);
    assert_eq!(pq.key_of(3), Err(HeapError::InvalidIndex { index: 3, capacity: 3 }));
    assert_eq!(pq.delete(3), Err(HeapError::InvalidIndex { index: 3, capacity: 3 }));

    assert_eq!(pq.decrease_key(1, 100), Err(HeapError::NotInQueue(1)));
    assert_eq!(pq.increase_key(1, -100), Err(HeapError::NotInQueue(1)));
    assert_eq!(pq.change_key(1, 0), Err(HeapError::NotInQueue(1)));
    assert_eq!(pq.key_of(1), Err(HeapError::NotInQueue(1)));
    assert_eq!(pq.delete(1), Err(HeapError::NotInQueue(1)));

    assert_eq!(
        pq.decrease_key(0, 10),
        Err(HeapError::KeyOrderViolation(KeyChange::Decrease))
    );
    assert_eq!(
        pq.increase_key(0, 9),
        Err(HeapError::KeyOrderViolation(KeyChange::Increase))
    );
    assert_eq!(pq.key_of(0), Ok(&10));
    assert_eq!(pq.len(), 1);
}

/// Deleting the minimum by index matches del_min
fn test_delete_min_matches_del_min<Q: IndexedMinPriorityQueue<i32>>(make: impl Fn(usize) -> Q) {
    let keys = [12, 7, 30, 1, 18, 4, 25, 9, 15, 3];
    let fill = |pq: &mut Q| {
        for (i, &k) in keys.iter().enumerate() {
            pq.insert(i, k).unwrap();
        }
    };

    let mut a = make(keys.len());
    fill(&mut a);
    // Trigger some restructuring first
    a.del_min().unwrap();
    a.decrease_key(6, 2).unwrap();
    let mut b = make(keys.len());
    fill(&mut b);
    b.del_min().unwrap();
    b.decrease_key(6, 2).unwrap();

    let min = a.min_index().unwrap();
    assert_eq!(a.delete(min), Ok(2));
    assert_eq!(b.del_min(), Ok(min));
    assert_eq!(drain_indices(&mut a), drain_indices(&mut b));
}

/// delete removes an arbitrary entry and returns its key
fn test_delete_arbitrary<Q: IndexedMinPriorityQueue<i32>>(make: impl Fn(usize) -> Q) {
    let mut pq = make(10);
    for i in 0..10 {
        pq.insert(i, (i as i32) * 10).unwrap();
    }
    assert_eq!(pq.delete(4), Ok(40));
    assert_eq!(pq.delete(9), Ok(90));
    assert_eq!(pq.delete(0), Ok(0));
    assert_eq!(pq.contains(4), Ok(false));
    assert_eq!(pq.len(), 7);
    pq.insert(4, 5).unwrap();
    assert_eq!(drain_indices(&mut pq), vec![4, 1, 2, 3, 5, 6, 7, 8]);
}

/// increase_key and change_key move entries both ways
fn test_increase_and_change_key<Q: IndexedMinPriorityQueue<i32>>(make: impl Fn(usize) -> Q) {
    let mut pq = make(6);
    for i in 0..6 {
        pq.insert(i, i as i32).unwrap();
    }
    pq.increase_key(0, 100).unwrap();
    assert_eq!(pq.min_index(), Ok(1));
    pq.change_key(5, -1).unwrap();
    assert_eq!(pq.min_index(), Ok(5));
    pq.change_key(5, 50).unwrap();
    pq.change_key(3, 3).unwrap();
    assert_eq!(pq.key_of(0), Ok(&100));
    assert_eq!(pq.key_of(5), Ok(&50));
    assert_eq!(pq.len(), 6);
    assert_eq!(drain_indices(&mut pq), vec![1, 2, 3, 4, 5, 0]);
}

/// An index can be reused after its entry is removed
fn test_reinsert_after_removal<Q: IndexedMinPriorityQueue<i32>>(make: impl Fn(usize) -> Q) {
    let mut pq = make(2);
    pq.insert(0, 1).unwrap();
    pq.insert(1, 2).unwrap();
    assert_eq!(pq.del_min(), Ok(0));
    assert_eq!(pq.contains(0), Ok(false));
    pq.insert(0, 3).unwrap();
    assert_eq!(pq.contains(0), Ok(true));
    assert_eq!(drain_indices(&mut pq), vec![1, 0]);
}

/// Union moves every entry and rejects index clashes
fn test_indexed_union<Q: IndexedMinPriorityQueue<i32>>(make: impl Fn(usize) -> Q) {
    let mut a = make(8);
    let mut b = make(8);
    for i in 0..4 {
        a.insert(i, (i as i32) * 2).unwrap();
        b.insert(i + 4, (i as i32) * 2 + 1).unwrap();
    }
    a.union(b).unwrap();
    assert_eq!(a.len(), 8);
    assert_eq!(a.contains(5), Ok(true));
    a.decrease_key(7, -1).unwrap();
    assert_eq!(drain_indices(&mut a), vec![7, 0, 4, 1, 5, 2, 6, 3]);

    let mut c = make(8);
    c.insert(1, 1).unwrap();
    let mut d = make(8);
    d.insert(1, 2).unwrap();
    assert_eq!(c.union(d), Err(HeapError::DuplicateIndex(1)));
    assert_eq!(c.len(), 1);

    let mut e = make(8);
    e.insert(3, 3).unwrap();
    e.union(make(8)).unwrap();
    assert_eq!(e.len(), 1);
}

/// Equal keys all come out, one per del_min
fn test_indexed_duplicate_keys<Q: IndexedMinPriorityQueue<i32>>(make: impl Fn(usize) -> Q) {
    let mut pq = make(20);
    for i in 0..20 {
        pq.insert(i, (i % 3) as i32).unwrap();
    }
    let mut keys = Vec::new();
    while !pq.is_empty() {
        keys.push(*pq.min_key().unwrap());
        pq.del_min().unwrap();
    }
    let mut expected: Vec<i32> = (0..20).map(|i| i % 3).collect();
    expected.sort();
    assert_eq!(keys, expected);
}

// ============================================================================
// Plain queue helpers
// ============================================================================

fn drain_keys<Q: MinPriorityQueue<i32>>(heap: &mut Q) -> Vec<i32> {
    let mut keys = Vec::new();
    while let Ok(k) = heap.del_min() {
        keys.push(k);
    }
    keys
}

fn test_empty_plain<Q: MinPriorityQueue<i32>>(make: impl Fn() -> Q) {
    let mut heap = make();
    assert!(heap.is_empty());
    assert_eq!(heap.len(), 0);
    assert_eq!(heap.min_key(), Err(HeapError::EmptyQueue));
    assert_eq!(heap.del_min(), Err(HeapError::EmptyQueue));
}

fn test_plain_basic<Q: MinPriorityQueue<i32>>(make: impl Fn() -> Q) {
    let mut heap = make();
    for k in [5, 1, 10, 3, 3, -4] {
        heap.insert(k);
    }
    assert_eq!(heap.len(), 6);
    assert_eq!(heap.min_key(), Ok(&-4));
    assert_eq!(drain_keys(&mut heap), vec![-4, 1, 3, 3, 5, 10]);
}

fn test_plain_interleaved<Q: MinPriorityQueue<i32>>(make: impl Fn() -> Q) {
    let mut heap = make();
    let mut popped = Vec::new();
    for round in 0..50 {
        heap.insert(round * 7 % 23);
        heap.insert(round * 11 % 19);
        popped.push(heap.del_min().unwrap());
    }
    assert_eq!(heap.len(), 50);
    let rest = drain_keys(&mut heap);
    assert!(rest.windows(2).all(|w| w[0] <= w[1]));
}

fn test_plain_union<Q: MinPriorityQueue<i32>>(make: impl Fn() -> Q) {
    let mut a = make();
    let mut b = make();
    for k in 0..10 {
        if k % 2 == 0 {
            a.insert(k);
        } else {
            b.insert(k);
        }
    }
    a.union(b);
    assert_eq!(a.len(), 10);
    a.union(make());
    assert_eq!(a.len(), 10);

    let mut empty = make();
    empty.union(a);
    assert_eq!(drain_keys(&mut empty), (0..10).collect::<Vec<_>>());
}

// ============================================================================
// Test generation
// ============================================================================

macro_rules! define_indexed_tests {
    ($module:ident, $make:expr) => {
        mod $module {
            use super::*;

            #[test]
            fn empty() {
                test_empty_indexed($make);
            }

            #[test]
            fn del_min_order() {
                test_del_min_order($make);
            }

            #[test]
            fn decrease_key_becomes_min() {
                test_decrease_key_becomes_min($make);
            }

            #[test]
            fn duplicate_index() {
                test_duplicate_index($make);
            }

            #[test]
            fn validation_order() {
                test_validation_order($make);
            }

            #[test]
            fn delete_min_matches_del_min() {
                test_delete_min_matches_del_min($make);
            }

            #[test]
            fn delete_arbitrary() {
                test_delete_arbitrary($make);
            }

            #[test]
            fn increase_and_change_key() {
                test_increase_and_change_key($make);
            }

            #[test]
            fn reinsert_after_removal() {
                test_reinsert_after_removal($make);
            }

            #[test]
            fn union() {
                test_indexed_union($make);
            }

            #[test]
            fn duplicate_keys() {
                test_indexed_duplicate_keys($make);
            }
        }
    };
}

macro_rules! define_plain_tests {
    ($module:ident, $make:expr) => {
        mod $module {
            use super::*;

            #[test]
            fn empty() {
                test_empty_plain($make);
            }

            #[test]
            fn basic() {
                test_plain_basic($make);
            }

            #[test]
            fn interleaved() {
                test_plain_interleaved($make);
            }

            #[test]
            fn union() {
                test_plain_union($make);
            }
        }
    };
}

define_indexed_tests!(index_binary, IndexBinaryHeap::<i32>::new);
define_indexed_tests!(index_multiway_2, |n| IndexMultiwayHeap::<i32>::new(n, 2).unwrap());
define_indexed_tests!(index_multiway_5, |n| IndexMultiwayHeap::<i32>::new(n, 5).unwrap());
define_indexed_tests!(index_binomial, IndexBinomialHeap::<i32>::new);
define_indexed_tests!(index_fibonacci, IndexFibonacciHeap::<i32>::new);

define_plain_tests!(binomial, BinomialHeap::<i32>::new);
define_plain_tests!(fibonacci, FibonacciHeap::<i32>::new);
define_plain_tests!(multiway_3, || MultiwayHeap::<i32>::with_arity(3).unwrap());

// ============================================================================
// Variant-specific structure
// ============================================================================

#[test]
fn test_binomial_union_of_two_fours() {
    let mut a = BinomialHeap::from_keys([4, 8, 2, 6]);
    let b = BinomialHeap::from_keys([3, 7, 1, 5]);
    a.union(b);
    assert_eq!(a.len(), 8);
    let orders = a.root_orders();
    let mut unique = orders.clone();
    unique.dedup();
    assert_eq!(orders, unique);
    assert!(a.is_min_heap_ordered());
}

#[test]
fn test_index_binomial_root_orders_track_len() {
    let mut pq = IndexBinomialHeap::new(32);
    for i in 0..32 {
        pq.insert(i, 100 - i as i32).unwrap();
        let n = pq.len();
        let expected: Vec<usize> = (0..usize::BITS as usize)
            .filter(|&bit| n & (1 << bit) != 0)
            .collect();
        assert_eq!(pq.root_orders(), expected);
    }
}

#[test]
fn test_fibonacci_delete_min_then_drain() {
    let keys = [10, 20, 5, 15, 25, 0, 30];
    let mut by_delete = IndexFibonacciHeap::from_keys(keys);
    let mut by_del_min = IndexFibonacciHeap::from_keys(keys);

    let min = by_delete.min_index().unwrap();
    by_delete.delete(min).unwrap();
    by_del_min.del_min().unwrap();

    let a: Vec<_> = by_delete.into_iter().collect();
    let b: Vec<_> = by_del_min.into_iter().collect();
    assert_eq!(a, b);
}
