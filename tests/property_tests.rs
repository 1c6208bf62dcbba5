//! Property-based tests using proptest
//!
//! These tests generate random sequences of operations, run them against a
//! queue and against a simple model, and check that the two always agree.

use proptest::prelude::*;
use rust_indexed_heaps::binary::IndexBinaryHeap;
use rust_indexed_heaps::binomial::BinomialHeap;
use rust_indexed_heaps::fibonacci::FibonacciHeap;
use rust_indexed_heaps::index_binomial::IndexBinomialHeap;
use rust_indexed_heaps::index_fibonacci::IndexFibonacciHeap;
use rust_indexed_heaps::index_multiway::IndexMultiwayHeap;
use rust_indexed_heaps::multiway::MultiwayHeap;
use rust_indexed_heaps::{IndexedMinPriorityQueue, MinPriorityQueue};

const CAPACITY: usize = 32;

/// One step against an indexed queue
#[derive(Debug, Clone)]
enum Op {
    Insert(usize, i32),
    DelMin,
    Decrease(usize, i32),
    Increase(usize, i32),
    Change(usize, i32),
    Delete(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let index = 0..CAPACITY;
    let key = -1000i32..1000;
    prop_oneof![
        3 => (index.clone(), key.clone()).prop_map(|(i, k)| Op::Insert(i, k)),
        2 => Just(Op::DelMin),
        2 => (index.clone(), 0i32..500).prop_map(|(i, d)| Op::Decrease(i, d)),
        1 => (index.clone(), 0i32..500).prop_map(|(i, d)| Op::Increase(i, d)),
        1 => (index.clone(), key).prop_map(|(i, k)| Op::Change(i, k)),
        1 => index.prop_map(Op::Delete),
    ]
}

/// Model: `model[i]` is the key of index `i`, if present
type Model = Vec<Option<i32>>;

fn model_min(model: &Model) -> Option<i32> {
    model.iter().flatten().copied().min()
}

/// Runs `ops` against the queue and the model, checking the minimum and the
/// size after every step
fn test_ops_match_model<Q: IndexedMinPriorityQueue<i32>>(
    mut pq: Q,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: Model = vec![None; CAPACITY];

    for op in ops {
        match op {
            Op::Insert(i, k) => {
                let result = pq.insert(i, k);
                prop_assert_eq!(result.is_ok(), model[i].is_none());
                model[i].get_or_insert(k);
            }
            Op::DelMin => match pq.del_min() {
                Ok(i) => {
                    prop_assert_eq!(model[i], model_min(&model));
                    model[i] = None;
                }
                Err(_) => prop_assert!(model_min(&model).is_none()),
            },
            Op::Decrease(i, delta) => {
                let result = pq.decrease_key(i, model[i].unwrap_or(0) - delta);
                match model[i] {
                    Some(k) if delta > 0 => {
                        prop_assert!(result.is_ok());
                        model[i] = Some(k - delta);
                    }
                    _ => prop_assert!(result.is_err()),
                }
            }
            Op::Increase(i, delta) => {
                let result = pq.increase_key(i, model[i].unwrap_or(0) + delta);
                match model[i] {
                    Some(k) if delta > 0 => {
                        prop_assert!(result.is_ok());
                        model[i] = Some(k + delta);
                    }
                    _ => prop_assert!(result.is_err()),
                }
            }
            Op::Change(i, k) => {
                let result = pq.change_key(i, k);
                prop_assert_eq!(result.is_ok(), model[i].is_some());
                if model[i].is_some() {
                    model[i] = Some(k);
                }
            }
            Op::Delete(i) => {
                let result = pq.delete(i);
                prop_assert_eq!(result.ok(), model[i].take());
            }
        }

        let present = model.iter().flatten().count();
        prop_assert_eq!(pq.len(), present);
        prop_assert_eq!(pq.is_empty(), present == 0);
        prop_assert_eq!(pq.min_key().ok().copied(), model_min(&model));
        if let Ok(i) = pq.min_index() {
            prop_assert_eq!(model[i], model_min(&model));
        }
    }

    // Drain: keys ascend and each comes back with its index
    let mut last = i32::MIN;
    while let Ok(k) = pq.min_key().copied() {
        let i = pq.del_min().unwrap();
        prop_assert!(k >= last);
        prop_assert_eq!(model[i].take(), Some(k));
        last = k;
    }
    prop_assert!(model.iter().all(Option::is_none));
    Ok(())
}

/// Union of two plain queues drains to the sorted concatenation
fn test_plain_union_sorted<Q: MinPriorityQueue<i32> + Extend<i32> + IntoIterator<Item = i32>>(
    mut a: Q,
    mut b: Q,
    left: Vec<i32>,
    right: Vec<i32>,
) -> Result<(), TestCaseError> {
    a.extend(left.iter().copied());
    b.extend(right.iter().copied());
    a.union(b);
    prop_assert_eq!(a.len(), left.len() + right.len());

    let mut expected = left;
    expected.extend(right);
    expected.sort();
    let drained: Vec<i32> = a.into_iter().collect();
    prop_assert_eq!(drained, expected);
    Ok(())
}

/// Interleaved inserts and del_mins always remove the model's minimum
fn test_plain_push_pop<Q: MinPriorityQueue<i32>>(
    mut heap: Q,
    ops: Vec<(bool, i32)>,
) -> Result<(), TestCaseError> {
    let mut model: Vec<i32> = Vec::new();
    for (pop, key) in ops {
        if pop {
            let expected = model.iter().copied().min();
            prop_assert_eq!(heap.del_min().ok(), expected);
            if let Some(pos) = expected.and_then(|m| model.iter().position(|&k| k == m)) {
                model.swap_remove(pos);
            }
        } else {
            heap.insert(key);
            model.push(key);
        }
        prop_assert_eq!(heap.len(), model.len());
    }
    Ok(())
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 0..200)
}

fn keys() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-100i32..100, 0..60)
}

proptest! {
    #[test]
    fn test_index_binary_matches_model(ops in ops()) {
        test_ops_match_model(IndexBinaryHeap::new(CAPACITY), ops)?;
    }

    #[test]
    fn test_index_multiway_matches_model(ops in ops(), d in 2usize..7) {
        test_ops_match_model(IndexMultiwayHeap::new(CAPACITY, d).unwrap(), ops)?;
    }

    #[test]
    fn test_index_binomial_matches_model(ops in ops()) {
        test_ops_match_model(IndexBinomialHeap::new(CAPACITY), ops)?;
    }

    #[test]
    fn test_index_fibonacci_matches_model(ops in ops()) {
        test_ops_match_model(IndexFibonacciHeap::new(CAPACITY), ops)?;
    }

    #[test]
    fn test_binomial_union_sorted(left in keys(), right in keys()) {
        test_plain_union_sorted(BinomialHeap::new(), BinomialHeap::new(), left, right)?;
    }

    #[test]
    fn test_fibonacci_union_sorted(left in keys(), right in keys()) {
        test_plain_union_sorted(FibonacciHeap::new(), FibonacciHeap::new(), left, right)?;
    }

    #[test]
    fn test_multiway_union_sorted(left in keys(), right in keys(), d in 2usize..7) {
        test_plain_union_sorted(
            MultiwayHeap::with_arity(d).unwrap(),
            MultiwayHeap::with_arity(d).unwrap(),
            left,
            right,
        )?;
    }

    #[test]
    fn test_binomial_push_pop(ops in prop::collection::vec((prop::bool::ANY, -100i32..100), 0..150)) {
        test_plain_push_pop(BinomialHeap::new(), ops)?;
    }

    #[test]
    fn test_fibonacci_push_pop(ops in prop::collection::vec((prop::bool::ANY, -100i32..100), 0..150)) {
        test_plain_push_pop(FibonacciHeap::new(), ops)?;
    }

    #[test]
    fn test_binomial_structure_after_drains(values in keys(), pops in 0usize..60) {
        let mut heap = BinomialHeap::from_keys(values.iter().copied());
        for _ in 0..pops.min(values.len()) {
            heap.del_min().unwrap();
        }
        prop_assert!(heap.is_min_heap_ordered());
        let orders = heap.root_orders();
        prop_assert!(orders.windows(2).all(|w| w[0] < w[1]));
        let total: usize = orders.iter().map(|&o| 1usize << o).sum();
        prop_assert_eq!(total, heap.len());
    }

    #[test]
    fn test_index_fibonacci_structure_after_decreases(
        values in prop::collection::vec(0i32..1000, 1..CAPACITY),
        decreases in prop::collection::vec((0usize..CAPACITY, 1i32..2000), 0..40),
    ) {
        let mut pq = IndexFibonacciHeap::from_keys(values.iter().copied());
        pq.del_min().unwrap();
        for (i, delta) in decreases {
            if let Ok(&k) = pq.key_of(i) {
                pq.decrease_key(i, k - delta).unwrap();
                prop_assert!(pq.is_min_heap_ordered());
            }
        }
        let orders = pq.root_orders();
        prop_assert_eq!(orders.len() > 0, !pq.is_empty());
    }

    #[test]
    fn test_iter_leaves_queue_untouched(values in keys()) {
        let pq = IndexBinomialHeap::from_keys(values.iter().copied());
        let first: Vec<_> = pq.iter().collect();
        let second: Vec<_> = pq.iter().collect();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(pq.len(), values.len());
        prop_assert_eq!(pq.iter().len(), values.len());
        prop_assert!(first.windows(2).all(|w| w[0].1 <= w[1].1));
    }
}
