//! A Binary Search Tree (BST) over unique keys that is balanced by reconstruction rather than by
//! rotations.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)`. A [`Tree`] built with [`Tree::new`] splits its sorted keys at the
//! midpoint recursively, which keeps the height at `O(lg N)`. Inserts and deletes don't rotate
//! anything so the height can grow; [`Tree::is_balanced`] tells whether it has and
//! [`Tree::rebalance`] rebuilds the tree from its in-order keys.
//!
//! ```
//! use balanced_bst::{render, Tree};
//!
//! let mut tree = Tree::new([1, 7, 4, 23, 8, 9, 4, 3, 5, 7, 9, 67, 6345, 324]);
//! tree.extend([6346, 6347, 6348]);
//! assert!(!tree.is_balanced());
//!
//! tree.rebalance();
//! assert!(tree.is_balanced());
//! assert_eq!(render(&tree), "1 3 4 5 7 8 9 23 67 324 6345 6346 6347 6348");
//! ```

#![deny(missing_docs)]

pub mod error;
mod metrics;
mod pretty;
pub mod traversal;
pub mod tree;


pub use error::TreeError;
pub use traversal::render;
pub use tree::{Node, Search, Side, Tree};
