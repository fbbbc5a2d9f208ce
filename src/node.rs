use alloc::boxed::Box;
use core::cmp;

/// An owning link to a subtree. `None` is the empty subtree.
pub type Link<K> = Option<Box<Node<K>>>;

/// A single tree node.
///
/// Each node is exclusively owned by its parent's child link (or by the tree, for the root). There
/// is no back-reference to the parent.
#[derive(Clone, Debug)]
pub struct Node<K> {
    pub(crate) key: K,
    pub(crate) height: i32,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
}

impl<K> Node<K> {
    /// Returns a new leaf node holding `key`.
    pub(crate) fn leaf(key: K) -> Box<Node<K>> {
        Box::new(Node {
            key,
            height: 0,
            left: None,
            right: None,
        })
    }

    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the cached height of the subtree rooted at this node. A leaf has height 0.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn left(&self) -> Option<&Node<K>> {
        self.left.as_deref()
    }

    #[inline]
    pub fn right(&self) -> Option<&Node<K>> {
        self.right.as_deref()
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    // Recomputes the cached height from the children's cached heights.
    #[inline]
    pub(crate) fn update_height(&mut self) {
        self.height = cmp::max(height(&self.left), height(&self.right)) + 1;
    }
}

/// Returns the cached height of `link`, or -1 if the subtree is empty.
///
/// This never descends; the children's heights must already be correct.
#[inline]
pub fn height<K>(link: &Link<K>) -> i32 {
    link.as_ref().map(|node| node.height).unwrap_or(-1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_height() {
        let link: Link<u32> = None;
        assert_eq!(height(&link), -1);
    }

    #[test]
    fn leaf_height() {
        let leaf = Node::leaf(7u32);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.height(), 0);
        assert_eq!(height(&Some(leaf)), 0);
    }

    #[test]
    fn update_height_uses_cached_children() {
        let mut node = Node::leaf(2u32);
        let mut left = Node::leaf(1);
        // A stale cache is trusted, not recomputed.
        left.height = 5;
        node.left = Some(left);
        node.right = Some(Node::leaf(3));

        node.update_height();
        assert_eq!(node.height(), 6);
        assert!(!node.is_leaf());
    }
}
