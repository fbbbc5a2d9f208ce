//! An AVL tree of unique keys with owned, parent-pointer-free nodes.
//!
//! [`SearchTree`] implements the plain binary search tree operations. After every structural
//! change it hands each subtree on the path back to the root, deepest first, to a [`Balancer`].
//! The [`Avl`] balancer restores the AVL height-balance invariant with single and double
//! rotations, so that [`AvlTree`] operations complete in _O(log(n))_ time.
//!
//! ```
//! use boxed_avl::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for key in [1, 2, 3] {
//!     tree.insert(key);
//! }
//!
//! let root = tree.root().unwrap();
//! assert_eq!(*root.key(), 2);
//! assert_eq!(tree.height(), 1);
//!
//! assert_eq!(tree.remove(&2), Some(2));
//! assert!(!tree.contains(&2));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3]);
//! ```
#![no_std]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod balance;
mod debug;
mod error;
mod iter;
mod node;
mod observe;
mod tree;

#[cfg(feature = "std")]
mod stats;

#[cfg(any(test, feature = "model"))]
pub mod model;

#[cfg(test)]
mod tests;

pub use crate::{
    balance::{check_balance, Avl, Balance, Balancer, Unbalanced},
    error::TreeError,
    iter::Iter,
    node::{height, Link, Node},
    observe::{Observer, Rotation},
    tree::{AvlTree, SearchTree},
};

#[cfg(feature = "std")]
pub use crate::stats::Stats;
