use alloc::{boxed::Box, vec::Vec};
use core::{borrow::Borrow, cmp::Ordering, fmt, mem};

use log::trace;

use crate::{
    balance::{check_balance, Avl, Balance, Balancer},
    error::TreeError,
    iter::Iter,
    node::{height, Link, Node},
};

/// A binary search tree of unique keys, kept balanced by `B`.
///
/// The tree performs plain binary search tree insertions and removals, then passes every subtree
/// on the path back up to the root through the balancer. With the default [`Avl`] balancer this
/// is an AVL tree; see [`AvlTree`].
#[derive(Clone)]
pub struct SearchTree<K, B = Avl> {
    root: Link<K>,
    len: usize,
    balancer: B,
}

/// An AVL tree, optionally reporting rebalancing decisions to an [`Observer`](crate::Observer).
pub type AvlTree<K, O = ()> = SearchTree<K, Avl<O>>;

impl<K> SearchTree<K, Avl> {
    /// Returns a new empty AVL tree.
    pub const fn new() -> SearchTree<K, Avl> {
        SearchTree::with_balancer(Avl::new())
    }
}

impl<K, B> SearchTree<K, B> {
    /// Returns a new empty tree using `balancer`.
    pub const fn with_balancer(balancer: B) -> SearchTree<K, B> {
        SearchTree {
            root: None,
            len: 0,
            balancer,
        }
    }

    pub fn balancer(&self) -> &B {
        &self.balancer
    }

    pub fn balancer_mut(&mut self) -> &mut B {
        &mut self.balancer
    }

    /// Returns the root node, or `None` if the tree is empty.
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    /// Returns `true` if the tree contains no elements.
    pub fn is_empty(&self) -> bool {
        let empty = self.len() == 0;
        debug_assert_eq!(empty, self.root.is_none());
        empty
    }

    /// Returns the number of elements in the tree.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the height of the tree: -1 if empty, 0 for a single element.
    pub fn height(&self) -> i32 {
        height(&self.root)
    }

    /// Returns an in-order iterator over the keys.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self.root(), self.len)
    }

    /// Returns the minimum key of the tree.
    pub fn min(&self) -> Result<&K, TreeError> {
        let mut cur = self.root().ok_or(TreeError::Empty)?;

        while let Some(left) = cur.left() {
            cur = left;
        }

        Ok(&cur.key)
    }

    /// Returns the maximum key of the tree.
    pub fn max(&self) -> Result<&K, TreeError> {
        let mut cur = self.root().ok_or(TreeError::Empty)?;

        while let Some(right) = cur.right() {
            cur = right;
        }

        Ok(&cur.key)
    }

    /// Clears the tree, removing all elements.
    pub fn clear(&mut self) {
        // Unlinks nodes one at a time so that dropping a degenerate tree does not recurse once per
        // level.
        let mut pending: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();

        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());

            debug_assert!(node.is_leaf());
            drop(node);
        }

        self.len = 0;
    }
}

impl<K: Ord, B: Balancer<K>> SearchTree<K, B> {
    /// Returns a reference to the stored key equal to `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut opt_cur = self.root();

        loop {
            let cur = opt_cur?;

            match key.cmp(cur.key.borrow()) {
                Ordering::Less => opt_cur = cur.left(),
                Ordering::Equal => return Some(&cur.key),
                Ordering::Greater => opt_cur = cur.right(),
            }
        }
    }

    /// Returns `true` if the tree contains `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Inserts `key` into the tree.
    ///
    /// Returns `false`, leaving the tree unchanged, if an equal key is already present.
    ///
    /// This operation completes in _O(log(n))_ time for an AVL tree.
    pub fn insert(&mut self, key: K) -> bool {
        let inserted = insert_at(&mut self.balancer, &mut self.root, key);

        if inserted {
            self.len += 1;
        }

        trace!(
            "insert: inserted={inserted}, len={}, height={}",
            self.len,
            self.height()
        );

        inserted
    }

    /// Removes the key equal to `key` from the tree and returns it.
    ///
    /// A node with two children takes its in-order successor's key, and the successor's node is
    /// removed from the right subtree instead.
    ///
    /// This operation completes in _O(log(n))_ time for an AVL tree.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let removed = remove_at(&mut self.balancer, &mut self.root, key);

        if removed.is_some() {
            self.len -= 1;
        }

        trace!(
            "remove: removed={}, len={}, height={}",
            removed.is_some(),
            self.len,
            self.height()
        );

        removed
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self)
    where
        K: fmt::Debug,
    {
        let mut count = 0;
        let mut prev: Option<&K> = None;

        for key in self.iter() {
            if let Some(prev) = prev {
                assert!(prev < key, "keys out of order: {prev:?} precedes {key:?}");
            }

            prev = Some(key);
            count += 1;
        }

        assert_eq!(count, self.len, "tree length does not match its node count");
        assert_eq!(self.len == 0, self.root.is_none());

        assert_heights_at(&self.root);

        if <B as Balancer<K>>::HEIGHT_BALANCED {
            assert_ne!(
                check_balance(&self.root),
                Balance::Violation,
                "tree is not height-balanced"
            );
        }
    }
}

// Inserts `key` into the subtree at `slot`, rebalancing the subtree if it changed.
fn insert_at<K, B>(balancer: &mut B, slot: &mut Link<K>, key: K) -> bool
where
    K: Ord,
    B: Balancer<K>,
{
    let inserted = match slot {
        None => {
            *slot = Some(Node::leaf(key));
            true
        }

        Some(node) => match key.cmp(&node.key) {
            Ordering::Less => insert_at(balancer, &mut node.left, key),
            Ordering::Equal => false,
            Ordering::Greater => insert_at(balancer, &mut node.right, key),
        },
    };

    if inserted {
        *slot = balancer.balance(slot.take());
    }

    inserted
}

// Removes `key` from the subtree at `slot`, rebalancing the subtree if it changed.
fn remove_at<K, Q, B>(balancer: &mut B, slot: &mut Link<K>, key: &Q) -> Option<K>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
    B: Balancer<K>,
{
    let node = slot.as_mut()?;

    let removed = match key.cmp(node.key.borrow()) {
        Ordering::Less => remove_at(balancer, &mut node.left, key),
        Ordering::Equal => Some(unlink(balancer, slot)),
        Ordering::Greater => remove_at(balancer, &mut node.right, key),
    };

    if removed.is_some() {
        *slot = balancer.balance(slot.take());
    }

    removed
}

// Removes the node at `slot` and returns its key. The caller rebalances `slot`.
fn unlink<K, B: Balancer<K>>(balancer: &mut B, slot: &mut Link<K>) -> K {
    let mut node = slot.take().expect("unlinked slot must hold a node");

    if node.left.is_some() && node.right.is_some() {
        // The successor assumes this node's place; only its key moves.
        let successor =
            remove_min(balancer, &mut node.right).expect("right subtree must be non-empty");
        let key = mem::replace(&mut node.key, successor);
        *slot = Some(node);
        return key;
    }

    // At most one child: elevate it.
    let Node { key, left, right, .. } = *node;
    *slot = left.or(right);

    key
}

// Removes the minimum node of the subtree at `slot` and returns its key, rebalancing every
// subtree on the way back up.
fn remove_min<K, B: Balancer<K>>(balancer: &mut B, slot: &mut Link<K>) -> Option<K> {
    let node = slot.as_mut()?;

    let min = if node.left.is_some() {
        remove_min(balancer, &mut node.left)
    } else {
        let Node { key, right, .. } = *slot.take()?;
        *slot = right;

        Some(key)
    };

    *slot = balancer.balance(slot.take());

    min
}

// Verifies every cached height by descent and returns the subtree height.
fn assert_heights_at<K>(link: &Link<K>) -> i32 {
    let Some(node) = link else {
        return -1;
    };

    let left = assert_heights_at(&node.left);
    let right = assert_heights_at(&node.right);

    assert_eq!(
        node.height,
        left.max(right) + 1,
        "cached height does not match subtree height"
    );

    node.height
}

impl<K, B> Drop for SearchTree<K, B> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K, B: Default> Default for SearchTree<K, B> {
    fn default() -> Self {
        SearchTree::with_balancer(B::default())
    }
}

impl<K: fmt::Debug, B> fmt::Debug for SearchTree<K, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Ord, B: Balancer<K>> Extend<K> for SearchTree<K, B> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord, B: Balancer<K> + Default> FromIterator<K> for SearchTree<K, B> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = SearchTree::default();
        tree.extend(iter);
        tree
    }
}

impl<'tree, K, B> IntoIterator for &'tree SearchTree<K, B> {
    type Item = &'tree K;
    type IntoIter = Iter<'tree, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
