// Conventions used in comments:
// - The height of a subtree `x` is denoted `h(x)`. An empty subtree has height -1; a leaf has
//   height 0.
// - The balance factor of a node `x` is `h(x.left) - h(x.right)`.
// - `k` is the node being rebalanced. `L` and `R` are its left and right children.
//
// The invariants of an AVL tree are:
// 1. Every balance factor is -1, 0 or 1.
// 2. Every cached height equals `1 + max(h(left), h(right))`.
//
// A single insertion or removal changes the height of any subtree by at most one, and the tree
// rebalances bottom-up as the mutation unwinds. Thus when `k` is handed to the balancer, both of
// its children already satisfy (1) and (2), and its balance factor is in -2..=2. Exactly one of the
// following then holds:
//
// - Left-left:   bf(k) = 2 and h(L.left) >= h(L.right). Single right rotation.
// - Left-right:  bf(k) = 2 and h(L.left) < h(L.right). Double left-right rotation.
// - Right-right: bf(k) = -2 and h(R.right) >= h(R.left). Single left rotation.
// - Right-left:  bf(k) = -2 and h(R.right) < h(R.left). Double right-left rotation.
// - Otherwise `k` is balanced and only its height is recomputed.
//
// The grandchild heights can only tie after a removal. The tie must select the single rotation:
// a double rotation would leave the new root with a balance factor of 2.

use alloc::boxed::Box;

use log::trace;

use crate::{
    node::{height, Link, Node},
    observe::{Observer, Rotation},
};

/// A post-mutation hook applied to every ancestor of a structural change, bottom-up.
///
/// [`SearchTree`](crate::SearchTree) performs the plain binary search tree insertion or removal,
/// then hands each subtree on the path back to the root to [`balance`](Balancer::balance) and
/// stores the returned subtree in the parent's link.
pub trait Balancer<K> {
    /// Whether the subtrees returned by this balancer satisfy the AVL balance invariant.
    const HEIGHT_BALANCED: bool;

    /// Restores the balancer's invariants at the root of `subtree` and returns the new root.
    ///
    /// The children of `subtree` have already been balanced and their cached heights are correct.
    fn balance(&mut self, subtree: Link<K>) -> Link<K>;
}

/// A balancer which only maintains cached heights, yielding a plain binary search tree.
#[derive(Copy, Clone, Debug, Default)]
pub struct Unbalanced;

impl<K> Balancer<K> for Unbalanced {
    const HEIGHT_BALANCED: bool = false;

    fn balance(&mut self, mut subtree: Link<K>) -> Link<K> {
        if let Some(node) = subtree.as_mut() {
            node.update_height();
        }

        subtree
    }
}

/// The AVL balancer.
///
/// Applies at most one single or double rotation per call, reporting its decisions to an
/// [`Observer`].
#[derive(Clone, Debug, Default)]
pub struct Avl<O = ()> {
    observer: O,
}

impl Avl {
    /// Returns an AVL balancer with no observer.
    pub const fn new() -> Avl {
        Avl { observer: () }
    }
}

impl<O: Observer> Avl<O> {
    /// Returns an AVL balancer which reports to `observer`.
    pub const fn with_observer(observer: O) -> Avl<O> {
        Avl { observer }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    // Reads both heights of `a` and `b` and returns `h(a) >= h(b)`.
    #[inline]
    fn taller_or_equal<K>(&mut self, a: &Link<K>, b: &Link<K>) -> bool {
        self.observer.heights_read(2);
        self.observer.compared();
        height(a) >= height(b)
    }

    fn rotate<K>(&mut self, k: Box<Node<K>>, rotation: Rotation) -> Box<Node<K>> {
        let root = match rotation {
            Rotation::Right => rotate_right(k),
            Rotation::Left => rotate_left(k),
            Rotation::LeftRight => rotate_left_right(k),
            Rotation::RightLeft => rotate_right_left(k),
        };

        trace!("{rotation:?} rotation, new subtree height {}", root.height);
        self.observer.rotated(rotation);

        root
    }
}

impl<K, O: Observer> Balancer<K> for Avl<O> {
    const HEIGHT_BALANCED: bool = true;

    fn balance(&mut self, subtree: Link<K>) -> Link<K> {
        let mut k = subtree?;

        self.observer.rebalance_started();

        let left_height = height(&k.left);
        let right_height = height(&k.right);
        self.observer.heights_read(2);

        self.observer.compared();
        if left_height - right_height > 1 {
            let l = k.left.as_ref().expect("left-heavy node has a left child");

            let rotation = if self.taller_or_equal(&l.left, &l.right) {
                Rotation::Right
            } else {
                Rotation::LeftRight
            };

            k = self.rotate(k, rotation);
        } else {
            self.observer.compared();
            if right_height - left_height > 1 {
                let r = k.right.as_ref().expect("right-heavy node has a right child");

                let rotation = if self.taller_or_equal(&r.right, &r.left) {
                    Rotation::Left
                } else {
                    Rotation::RightLeft
                };

                k = self.rotate(k, rotation);
            }
        }

        k.update_height();
        self.observer.heights_read(2);

        self.observer.rebalance_finished();

        Some(k)
    }
}

/// Single right rotation about `k`. Returns the new subtree root, `k`'s former left child.
///
/// ```text
///       k            L
///      / \          / \
///     L   c   =>   a   k
///    / \              / \
///   a   b            b   c
/// ```
///
/// Heights of `k` and then `L` are recomputed.
pub(crate) fn rotate_right<K>(mut k: Box<Node<K>>) -> Box<Node<K>> {
    let mut l = k.left.take().expect("right rotation requires a left child");

    k.left = l.right.take();
    k.update_height();

    l.right = Some(k);
    l.update_height();

    l
}

/// Single left rotation about `k`, the mirror of [`rotate_right`].
pub(crate) fn rotate_left<K>(mut k: Box<Node<K>>) -> Box<Node<K>> {
    let mut r = k.right.take().expect("left rotation requires a right child");

    k.right = r.left.take();
    k.update_height();

    r.left = Some(k);
    r.update_height();

    r
}

/// Double left-right rotation about `k`.
///
/// `k`'s left child is rotated left, promoting its right child; `k`'s height is fixed up and then
/// `k` itself is rotated right.
pub(crate) fn rotate_left_right<K>(mut k: Box<Node<K>>) -> Box<Node<K>> {
    let l = k.left.take().expect("left-right rotation requires a left child");

    k.left = Some(rotate_left(l));
    k.update_height();

    rotate_right(k)
}

/// Double right-left rotation about `k`, the mirror of [`rotate_left_right`].
pub(crate) fn rotate_right_left<K>(mut k: Box<Node<K>>) -> Box<Node<K>> {
    let r = k.right.take().expect("right-left rotation requires a right child");

    k.right = Some(rotate_right(r));
    k.update_height();

    rotate_left(k)
}

/// The result of [`check_balance`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Balance {
    /// The subtree is empty.
    Absent,
    /// The subtree is balanced and every cached height is correct. Holds the subtree's height.
    Balanced(i32),
    /// Some node in the subtree is unbalanced or caches a wrong height.
    Violation,
}

impl Balance {
    /// Returns the verified height of the subtree, or `None` on a violation.
    pub fn height(self) -> Option<i32> {
        match self {
            Balance::Absent => Some(-1),
            Balance::Balanced(h) => Some(h),
            Balance::Violation => None,
        }
    }
}

/// Verifies the AVL invariants of `link` from scratch.
///
/// Every subtree height is recomputed by descent and compared against the cached heights. This
/// takes _O(n)_ time and is intended for tests and assertions only.
pub fn check_balance<K>(link: &Link<K>) -> Balance {
    let Some(node) = link else {
        return Balance::Absent;
    };

    let (Some(left), Some(right)) = (
        check_balance(&node.left).height(),
        check_balance(&node.right).height(),
    ) else {
        return Balance::Violation;
    };

    if (left - right).abs() > 1 || node.height != left.max(right) + 1 {
        return Balance::Violation;
    }

    Balance::Balanced(node.height)
}
