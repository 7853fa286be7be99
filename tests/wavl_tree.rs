use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use wavl_tree::{Error, WavlNode, WavlTree};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Keys in a range small enough to produce plenty of collisions.
fn key_strategy() -> impl Strategy<Value = i32> {
    -1_000i32..1_000i32
}

#[derive(Debug, Clone)]
enum TreeOp {
    Insert(i32, String),
    Delete(i32),
    Search(i32),
    Select(usize),
    IndexOf(i32),
    Extremes,
}

fn tree_op_strategy() -> impl Strategy<Value = TreeOp> {
    prop_oneof![
        5 => (key_strategy(), "[a-z]{0,8}").prop_map(|(k, v)| TreeOp::Insert(k, v)),
        3 => key_strategy().prop_map(TreeOp::Delete),
        2 => key_strategy().prop_map(TreeOp::Search),
        1 => (0usize..1_200).prop_map(TreeOp::Select),
        1 => key_strategy().prop_map(TreeOp::IndexOf),
        1 => Just(TreeOp::Extremes),
    ]
}

/// Checks the rank rule and the cached sizes of every node below `node`.
/// Returns the subtree size.
fn check_subtree<N: WavlNode>(node: &N) -> usize {
    if !node.is_real() {
        return 0;
    }

    let (left, right) = (node.left(), node.right());
    let left_diff = node.rank() - left.rank();
    let right_diff = node.rank() - right.rank();
    assert!((1..=2).contains(&left_diff), "left rank difference {left_diff} at {:?}", node.key());
    assert!((1..=2).contains(&right_diff), "right rank difference {right_diff} at {:?}", node.key());
    if !left.is_real() && !right.is_real() {
        assert_eq!(node.rank(), 0, "leaf {:?} must have rank 0", node.key());
    }

    let size = check_subtree(&left) + check_subtree(&right) + 1;
    assert_eq!(node.subtree_size(), size, "size cache at {:?}", node.key());
    size
}

fn check_tree(tree: &WavlTree) {
    assert_eq!(check_subtree(&tree.root()), tree.size());

    let keys = tree.keys_to_array();
    assert!(keys.windows(2).all(|w| w[0] < w[1]), "keys out of order: {keys:?}");
    assert_eq!(tree.min_key(), keys.first().copied());
    assert_eq!(tree.max_key(), keys.last().copied());
}

fn tree_of(keys: &[i32]) -> WavlTree {
    let mut tree = WavlTree::new();
    for &key in keys {
        tree.insert(key, format!("v{key}")).unwrap();
    }
    tree
}

// ─── Concrete scenarios ──────────────────────────────────────────────────────

#[test]
fn single_insert_is_min_and_max() {
    let mut tree = WavlTree::new();
    assert_eq!(tree.insert(5, "five"), Ok(0));

    assert_eq!(tree.size(), 1);
    assert_eq!(tree.min(), Some("five"));
    assert_eq!(tree.max(), Some("five"));
    assert_eq!(tree.keys_to_array(), vec![5]);
    check_tree(&tree);
}

#[test]
fn delete_root_of_full_tree() {
    let mut tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
    check_tree(&tree);

    tree.delete(5).unwrap();
    assert_eq!(tree.keys_to_array(), vec![1, 3, 4, 7, 8, 9]);
    assert_eq!(tree.search(5), None);
    check_tree(&tree);
}

#[test]
fn duplicate_insert_is_rejected() {
    let mut tree = WavlTree::new();
    tree.insert(10, "a").unwrap();

    assert_eq!(tree.insert(10, "b"), Err(Error::DuplicateKey(10)));
    assert_eq!(tree.size(), 1);
    assert_eq!(tree.search(10), Some("a"));
}

#[test]
fn missing_delete_is_rejected() {
    let mut tree = tree_of(&[1, 2, 3]);

    assert_eq!(tree.delete(99), Err(Error::KeyNotFound(99)));
    assert_eq!(tree.keys_to_array(), vec![1, 2, 3]);
    assert_eq!(tree.size(), 3);
    check_tree(&tree);
}

#[test]
fn empty_tree_queries_are_absent() {
    let tree = WavlTree::new();

    assert_eq!(tree.search(1), None);
    assert_eq!(tree.min(), None);
    assert_eq!(tree.max(), None);
    assert_eq!(tree.select(1), None);
    assert_eq!(tree.height(), None);
    assert!(tree.empty());
    assert_eq!(tree.size(), 0);
    assert!(tree.keys_to_array().is_empty());
    assert!(tree.values_to_array().is_empty());
}

#[test]
fn ascending_inserts_rebalance() {
    let keys: Vec<i32> = (1..=15).collect();
    let mut tree = WavlTree::new();
    let mut total = 0;
    for &key in &keys {
        total += tree.insert(key, key.to_string()).unwrap();
    }

    // An unbalanced tree would have height 14.
    let height = tree.height().unwrap();
    assert!(height <= 2 * 4, "height {height}");
    assert!(total > 0);
    assert_eq!(tree.keys_to_array(), keys);
    check_tree(&tree);
}

// ─── Properties ──────────────────────────────────────────────────────────────

#[test]
fn select_matches_values_to_array() {
    let tree = tree_of(&[42, -7, 13, 0, 99, 5, -100, 64]);
    let values = tree.values_to_array();

    for (position, value) in values.iter().enumerate() {
        assert_eq!(tree.select(position + 1), Some(value.as_str()));
    }
    assert_eq!(tree.select(0), None);
    assert_eq!(tree.select(values.len() + 1), None);
}

#[test]
fn round_trip_returns_to_empty() {
    let keys: Vec<i32> = (0..1_000).map(|i| (i * 613) % 1_000).collect();
    let mut tree = tree_of(&keys);
    assert_eq!(tree.size(), 1_000);

    for &key in keys.iter().rev() {
        tree.delete(key).unwrap();
    }
    assert!(tree.empty());
    assert_eq!(tree.size(), 0);
    assert!(!tree.root().is_real());

    // The tree is fully usable afterwards.
    tree.insert(7, "seven").unwrap();
    assert_eq!(tree.min(), Some("seven"));
}

#[test]
fn failures_do_not_change_the_tree() {
    let mut tree = tree_of(&[8, 4, 12, 2, 6]);
    let keys = tree.keys_to_array();
    let values = tree.values_to_array();

    for key in keys.clone() {
        assert_eq!(tree.insert(key, "other"), Err(Error::DuplicateKey(key)));
    }
    for key in [1, 3, 5, 100] {
        assert_eq!(tree.delete(key), Err(Error::KeyNotFound(key)));
    }

    assert_eq!(tree.keys_to_array(), keys);
    assert_eq!(tree.values_to_array(), values);
    check_tree(&tree);
}

#[test]
fn rebalancing_is_amortized_constant() {
    let mut tree = WavlTree::new();
    let mut total = 0;
    for key in 0..4_096 {
        total += tree.insert(key, "").unwrap();
    }
    for key in (0..4_096).step_by(2) {
        total += tree.delete(key).unwrap();
    }
    for key in (0..4_096).step_by(2) {
        total += tree.insert(key, "").unwrap();
    }
    for key in 0..4_096 {
        total += tree.delete(key).unwrap();
    }
    assert!(total <= 10 * 4 * 4_096, "total rebalancing operations {total}");
}

#[test]
fn clear_keeps_capacity() {
    let mut tree = WavlTree::with_capacity(64);
    tree.extend((0..64).map(|k| (k, "")));
    let capacity = tree.capacity();

    tree.clear();
    assert!(tree.empty());
    assert_eq!(tree.capacity(), capacity);
    tree.insert(1, "one").unwrap();
    check_tree(&tree);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Replays a random sequence of operations on both `WavlTree` and
    /// `BTreeMap` and asserts identical results at every step.
    #[test]
    fn ops_match_btreemap(ops in proptest::collection::vec(tree_op_strategy(), TEST_SIZE)) {
        let mut tree = WavlTree::new();
        let mut model: BTreeMap<i32, String> = BTreeMap::new();

        for op in ops {
            match op {
                TreeOp::Insert(key, value) => {
                    let result = tree.insert(key, value.clone());
                    if model.contains_key(&key) {
                        prop_assert_eq!(result, Err(Error::DuplicateKey(key)));
                    } else {
                        prop_assert!(result.is_ok());
                        model.insert(key, value);
                    }
                }
                TreeOp::Delete(key) => {
                    let result = tree.delete(key);
                    if model.remove(&key).is_some() {
                        prop_assert!(result.is_ok());
                    } else {
                        prop_assert_eq!(result, Err(Error::KeyNotFound(key)));
                    }
                }
                TreeOp::Search(key) => {
                    prop_assert_eq!(tree.search(key), model.get(&key).map(String::as_str));
                }
                TreeOp::Select(index) => {
                    let expected = index.checked_sub(1).and_then(|i| model.values().nth(i));
                    prop_assert_eq!(tree.select(index), expected.map(String::as_str));
                }
                TreeOp::IndexOf(key) => {
                    let expected = model.contains_key(&key).then(|| model.range(..key).count() + 1);
                    prop_assert_eq!(tree.index_of(key), expected);
                }
                TreeOp::Extremes => {
                    prop_assert_eq!(tree.min(), model.values().next().map(String::as_str));
                    prop_assert_eq!(tree.max(), model.values().next_back().map(String::as_str));
                }
            }
            prop_assert_eq!(tree.size(), model.len());
        }

        check_tree(&tree);
        prop_assert!(tree.iter().map(|(k, v)| (k, v.to_owned())).eq(model.clone()));
        if let Some(height) = tree.height() {
            // WAVL height bound: h <= 2 log2(n).
            let bound = 2 * (usize::BITS - model.len().leading_zeros()) as usize;
            prop_assert!(height <= bound, "height {} for {} keys", height, model.len());
        }
    }

    #[test]
    fn collected_tree_is_sorted(keys in proptest::collection::vec(key_strategy(), 0..300)) {
        let tree: WavlTree = keys.iter().map(|&k| (k, k.to_string())).collect();
        let mut expected = keys.clone();
        expected.sort_unstable();
        expected.dedup();

        check_tree(&tree);
        prop_assert_eq!(tree.keys_to_array(), expected);
    }
}
