use std::{format, ops::Range, prelude::v1::*, vec};

use proptest::prelude::*;

use crate::{model, Avl, AvlTree, Node, Observer, Rotation, SearchTree, TreeError, Unbalanced};

// Renders a subtree as `key(left right)`, with leaves as `key` and missing children as `-`.
fn shape(node: Option<&Node<u32>>) -> String {
    match node {
        None => "-".into(),
        Some(n) if n.left().is_none() && n.right().is_none() => format!("{}", n.key()),
        Some(n) => format!("{}({} {})", n.key(), shape(n.left()), shape(n.right())),
    }
}

fn tree_of(keys: &[u32]) -> AvlTree<u32> {
    let mut tree = AvlTree::new();

    for &key in keys {
        assert!(tree.insert(key));
        tree.assert_invariants();
    }

    tree
}

#[derive(Default)]
struct Recorder(Vec<Rotation>);

impl Observer for Recorder {
    fn rotated(&mut self, rotation: Rotation) {
        self.0.push(rotation);
    }
}

fn recorded(keys: &[u32]) -> (AvlTree<u32, Recorder>, Vec<Rotation>) {
    let mut tree: AvlTree<u32, Recorder> =
        SearchTree::with_balancer(Avl::with_observer(Recorder::default()));
    tree.extend(keys.iter().copied());
    tree.assert_invariants();

    let rotations = tree.balancer_mut().observer_mut().0.drain(..).collect();
    (tree, rotations)
}

#[test]
fn ascending_insert_rotates_left() {
    let (tree, rotations) = recorded(&[1, 2, 3]);

    assert_eq!(rotations, vec![Rotation::Left]);
    assert_eq!(shape(tree.root()), "2(1 3)");

    let root = tree.root().unwrap();
    assert_eq!(root.height(), 1);
    assert_eq!(root.left().unwrap().height(), 0);
    assert_eq!(root.right().unwrap().height(), 0);
}

#[test]
fn zigzag_insert_rotates_left_right() {
    let (tree, rotations) = recorded(&[3, 1, 2]);

    assert_eq!(rotations, vec![Rotation::LeftRight]);
    assert_eq!(shape(tree.root()), "2(1 3)");
    assert_eq!(tree.height(), 1);
}

#[test]
fn mirrored_inserts() {
    let (tree, rotations) = recorded(&[3, 2, 1]);
    assert_eq!(rotations, vec![Rotation::Right]);
    assert_eq!(shape(tree.root()), "2(1 3)");

    let (tree, rotations) = recorded(&[1, 3, 2]);
    assert_eq!(rotations, vec![Rotation::RightLeft]);
    assert_eq!(shape(tree.root()), "2(1 3)");
}

#[test]
fn mixed_insert_sequence() {
    let (tree, rotations) = recorded(&[10, 20, 30, 40, 50, 25]);

    assert_eq!(
        rotations,
        vec![Rotation::Left, Rotation::Left, Rotation::RightLeft]
    );
    assert_eq!(shape(tree.root()), "30(20(10 25) 40(- 50))");
    assert_eq!(
        tree.iter().copied().collect::<Vec<_>>(),
        vec![10, 20, 25, 30, 40, 50]
    );
}

#[test]
fn remove_root_with_two_children() {
    let mut tree = tree_of(&[1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(shape(tree.root()), "4(2(1 3) 6(5 7))");

    assert_eq!(tree.remove(&4), Some(4));
    tree.assert_invariants();

    assert_eq!(shape(tree.root()), "5(2(1 3) 6(- 7))");
    assert_eq!(
        tree.iter().copied().collect::<Vec<_>>(),
        vec![1, 2, 3, 5, 6, 7]
    );
    assert_eq!(tree.len(), 6);
}

#[test]
fn remove_only_element() {
    let mut tree = tree_of(&[42]);

    assert_eq!(tree.remove(&42), Some(42));
    tree.assert_invariants();

    assert!(tree.is_empty());
    assert!(tree.root().is_none());
    assert_eq!(tree.height(), -1);
    for key in [0, 41, 42, 43] {
        assert!(!tree.contains(&key));
    }
}

#[test]
fn removal_tie_rotates_once() {
    // After removing 5, the left child 2 has equally tall children.
    let mut tree = tree_of(&[4, 2, 5, 1, 3]);
    assert_eq!(shape(tree.root()), "4(2(1 3) 5)");

    tree.remove(&5);
    tree.assert_invariants();
    assert_eq!(shape(tree.root()), "2(1 4(3 -))");
    assert_eq!(tree.height(), 2);

    let mut tree = tree_of(&[2, 1, 4, 3, 5]);
    tree.remove(&1);
    tree.assert_invariants();
    assert_eq!(shape(tree.root()), "4(2(- 3) 5)");
}

#[test]
fn remove_rebalances_successor_path() {
    // Removing 5 pulls 6 up from the right subtree, leaving 8 right-heavy.
    let mut tree = tree_of(&[5, 3, 8, 2, 6, 9, 10]);
    assert_eq!(shape(tree.root()), "5(3(2 -) 8(6 9(- 10)))");

    tree.remove(&5);
    tree.assert_invariants();
    assert_eq!(shape(tree.root()), "6(3(2 -) 9(8 10))");
}

#[test]
fn remove_missing_key() {
    let mut tree = tree_of(&[1, 2, 3]);

    assert_eq!(tree.remove(&7), None);
    assert_eq!(tree.len(), 3);
    assert_eq!(shape(tree.root()), "2(1 3)");

    let mut empty: AvlTree<u32> = AvlTree::new();
    assert_eq!(empty.remove(&7), None);
}

#[test]
fn duplicate_insert_is_rejected() {
    let mut tree = tree_of(&[1, 2, 3]);

    assert!(!tree.insert(2));
    assert_eq!(tree.len(), 3);
    assert_eq!(shape(tree.root()), "2(1 3)");
}

#[test]
fn min_max() {
    let mut tree: AvlTree<u32> = AvlTree::new();
    assert_eq!(tree.min(), Err(TreeError::Empty));
    assert_eq!(tree.max(), Err(TreeError::Empty));

    tree.extend([8, 3, 12, 1, 9]);
    assert_eq!(tree.min(), Ok(&1));
    assert_eq!(tree.max(), Ok(&12));

    tree.clear();
    assert_eq!(tree.min(), Err(TreeError::Empty));
}

#[test]
fn get_by_borrowed_key() {
    let mut tree: AvlTree<String> = AvlTree::new();
    tree.extend(["pear", "apple", "fig"].map(String::from));

    assert_eq!(tree.get("fig").map(String::as_str), Some("fig"));
    assert!(!tree.contains("plum"));
    assert_eq!(tree.remove("apple").as_deref(), Some("apple"));
    tree.assert_invariants();
}

#[test]
fn clear_and_reuse() {
    let mut tree = tree_of(&[5, 1, 9]);
    tree.clear();
    tree.assert_invariants();
    assert!(tree.is_empty());

    tree.insert(3);
    tree.assert_invariants();
    assert_eq!(shape(tree.root()), "3");
}

#[test]
fn clone_is_independent() {
    let mut tree = tree_of(&[1, 2, 3, 4]);
    let copy = tree.clone();

    tree.remove(&3);
    assert_eq!(shape(copy.root()), "2(1 3(- 4))");
    assert_eq!(copy.len(), 4);
    copy.assert_invariants();
}

#[test]
fn debug_lists_keys_in_order() {
    let tree = tree_of(&[3, 1, 2]);
    assert_eq!(format!("{tree:?}"), "{1, 2, 3}");
}

#[test]
fn sorted_inserts_stay_logarithmic() {
    let tree: AvlTree<u32> = (0..1023).collect();
    tree.assert_invariants();
    assert_eq!(tree.height(), 9);
}

#[test]
fn unbalanced_tree_degenerates() {
    let mut tree: SearchTree<u32, Unbalanced> = (0..64).collect();
    tree.assert_invariants();
    assert_eq!(tree.height(), 63);

    assert_eq!(tree.remove(&0), Some(0));
    tree.assert_invariants();
    assert_eq!(tree.height(), 62);
}

fn permutations(keys: &[u32]) -> Vec<Vec<u32>> {
    if keys.len() <= 1 {
        return vec![keys.to_vec()];
    }

    let mut out = Vec::new();
    for (i, &first) in keys.iter().enumerate() {
        let mut rest = keys.to_vec();
        rest.remove(i);

        for mut tail in permutations(&rest) {
            tail.insert(0, first);
            out.push(tail);
        }
    }

    out
}

fn insert_remove_all(keys: &[u32]) {
    let mut tree = tree_of(keys);

    for key in keys {
        assert_eq!(tree.remove(key), Some(*key));
        tree.assert_invariants();
    }

    tree.extend(keys.iter().copied());
    tree.assert_invariants();

    for key in keys.iter().rev() {
        assert_eq!(tree.remove(key), Some(*key));
        tree.assert_invariants();
    }

    assert!(tree.is_empty());
}

#[test]
fn every_order_of_five() {
    for keys in permutations(&[0, 1, 2, 3, 4]) {
        insert_remove_all(&keys);
    }
}

#[test]
fn shapes_are_deterministic() {
    let keys = [50, 20, 80, 10, 30, 70, 90, 25, 27, 26, 85, 84];

    let a = tree_of(&keys);
    let b = tree_of(&keys);
    assert_eq!(shape(a.root()), shape(b.root()));
}

#[test]
fn btree_equivalence_from_raw_bytes() {
    use arbitrary::{Arbitrary, Unstructured};

    // Decodes operations the way the fuzz target does.
    let bytes: Vec<u8> = (0..4096u32).map(|i| (i.wrapping_mul(2654435761) >> 13) as u8).collect();
    let mut input = Unstructured::new(&bytes);

    let mut ops = Vec::new();
    while !input.is_empty() {
        ops.push(model::Op::arbitrary(&mut input).unwrap());
    }

    assert!(!ops.is_empty());
    model::run_btree_equivalence(ops);
}

#[cfg(miri)]
const FUZZ_RANGE: Range<usize> = 0..10;

#[cfg(not(miri))]
const FUZZ_RANGE: Range<usize> = 0..1000;

proptest::proptest! {
    #![proptest_config(ProptestConfig {
        max_shrink_iters: 65536,
        .. ProptestConfig::default()
    })]

    #[test]
    fn btree_equivalence(ops in proptest::collection::vec(model::op_strategy(), FUZZ_RANGE)) {
        model::run_btree_equivalence(ops);
    }

    #[test]
    fn unbalanced_btree_equivalence(ops in proptest::collection::vec(model::op_strategy(), FUZZ_RANGE)) {
        model::run_btree_equivalence_with(SearchTree::<u32, Unbalanced>::default(), ops);
    }

    #[test]
    fn identical_inserts_identical_shapes(keys in proptest::collection::vec(0u32..500, 0..200)) {
        let mut a = AvlTree::new();
        let mut b = AvlTree::new();
        a.extend(keys.iter().copied());
        b.extend(keys.iter().copied());

        prop_assert_eq!(shape(a.root()), shape(b.root()));
    }
}
