use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::node::Node;

/// An in-order iterator over the keys of a [`SearchTree`](crate::SearchTree).
pub struct Iter<'tree, K> {
    // Nodes whose left subtree has been exhausted but which have not yet been yielded. The next
    // element is on top.
    stack: Vec<&'tree Node<K>>,

    len: usize,
}

impl<'tree, K> Iter<'tree, K> {
    pub(crate) fn new(root: Option<&'tree Node<K>>, len: usize) -> Self {
        let mut iter = Iter {
            stack: Vec::new(),
            len,
        };

        iter.descend_left(root);
        iter
    }

    // Upon entering a new subtree, push the path down to its minimum element.
    fn descend_left(&mut self, mut opt_cur: Option<&'tree Node<K>>) {
        while let Some(cur) = opt_cur {
            self.stack.push(cur);
            opt_cur = cur.left();
        }
    }
}

impl<'tree, K> Iterator for Iter<'tree, K> {
    type Item = &'tree K;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.stack.pop()?;

        // The left subtree and `cur` are done; the successor is the minimum of the right subtree,
        // or else the nearest ancestor still on the stack.
        self.descend_left(cur.right());
        self.len -= 1;

        Some(cur.key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::{prelude::v1::*, vec};

    use crate::AvlTree;

    #[test]
    fn empty() {
        let tree: AvlTree<u32> = AvlTree::new();
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn sorted_with_exact_len() {
        let tree: AvlTree<u32> = [5, 3, 9, 1, 4, 7, 8, 2, 6].into_iter().collect();
        let mut iter = tree.iter();

        assert_eq!(iter.len(), 9);
        iter.next();
        assert_eq!(iter.len(), 8);

        let keys: Vec<u32> = (&tree).into_iter().copied().collect();
        assert_eq!(keys, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }
}
