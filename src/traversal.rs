//! Iterators over the keys of a [`Tree`] in the four classic visiting orders.
//!
//! None of these recurse: each keeps an explicit stack (or queue) of the nodes still to be
//! visited, so walking a badly skewed tree costs heap, not call stack.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::{render, Tree};
//!
//! let tree = Tree::new(1..=7);
//!
//! assert_eq!(render(tree.level_order()), "4 2 6 1 3 5 7");
//! assert_eq!(render(tree.preorder()), "4 2 1 3 6 5 7");
//! assert_eq!(render(tree.inorder()), "1 2 3 4 5 6 7");
//! assert_eq!(render(tree.postorder()), "1 3 2 5 7 6 4");
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;

use crate::tree::{Link, Node, Tree};

/// Joins the keys with single spaces. An empty sequence renders as an empty string.
pub fn render<'a, K, I>(keys: I) -> String
where
    I: IntoIterator<Item = &'a K>,
    K: fmt::Display + 'a,
{
    keys.into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl<K> Tree<K> {
    /// Visits the keys breadth first, top to bottom and left to right within a level.
    pub fn level_order(&self) -> LevelOrder<'_, K> {
        LevelOrder {
            queue: self.root().into_iter().collect(),
        }
    }

    /// Visits each node before its left subtree and then its right subtree.
    pub fn preorder(&self) -> PreOrder<'_, K> {
        PreOrder {
            stack: self.root().into_iter().collect(),
        }
    }

    /// Visits the keys in ascending order.
    pub fn inorder(&self) -> InOrder<'_, K> {
        let mut iter = InOrder { stack: Vec::new() };
        iter.push_left_spine(self.root());
        iter
    }

    /// Visits each node after both of its subtrees.
    pub fn postorder(&self) -> PostOrder<'_, K> {
        PostOrder {
            stack: self.root().map(|root| (root, false)).into_iter().collect(),
        }
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = InOrder<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.inorder()
    }
}

impl<K> IntoIterator for Tree<K> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    /// Consumes the tree, yielding its keys in ascending order.
    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter::new(self.root.take(), self.len)
    }
}

/// Breadth first iterator. See [`Tree::level_order`].
pub struct LevelOrder<'a, K> {
    queue: VecDeque<&'a Node<K>>,
}

impl<'a, K> Iterator for LevelOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.left());
        self.queue.extend(node.right());
        Some(node.key())
    }
}

impl<K> FusedIterator for LevelOrder<'_, K> {}

/// Node, left, right. See [`Tree::preorder`].
pub struct PreOrder<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> Iterator for PreOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right first so the left subtree comes off the stack first.
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(node.key())
    }
}

impl<K> FusedIterator for PreOrder<'_, K> {}

/// Left, node, right. See [`Tree::inorder`].
pub struct InOrder<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> InOrder<'a, K> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, K> Iterator for InOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(node.key())
    }
}

impl<K> FusedIterator for InOrder<'_, K> {}

/// Left, right, node. See [`Tree::postorder`].
pub struct PostOrder<'a, K> {
    stack: Vec<(&'a Node<K>, bool)>, // (node, children_visited)
}

impl<'a, K> Iterator for PostOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, children_visited)) = self.stack.pop() {
            if children_visited || node.is_leaf() {
                return Some(node.key());
            }

            self.stack.push((node, true));
            self.stack.extend(node.right().map(|n| (n, false)));
            self.stack.extend(node.left().map(|n| (n, false)));
        }
        None
    }
}

impl<K> FusedIterator for PostOrder<'_, K> {}

/// Owning in-order iterator. Nodes are freed as their keys are handed out.
pub struct IntoIter<K> {
    stack: Vec<Box<Node<K>>>,
    remaining: usize,
}

impl<K> IntoIter<K> {
    pub(crate) fn new(root: Link<K>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Link<K>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left_spine(node.right.take());
        self.remaining = self.remaining.saturating_sub(1);
        Some(node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {}

impl<K> FusedIterator for IntoIter<K> {}

impl<K> Drop for IntoIter<K> {
    fn drop(&mut self) {
        // `next` detaches both children before a node is dropped so this never recurses.
        for _ in &mut *self {}
    }
}
