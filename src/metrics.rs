//! Height, depth and balance of a [`Tree`], and rebuilding it when it has drifted out of balance.

use std::mem;
use std::ptr;

use crate::error::TreeError;
use crate::tree::{Node, Tree};

/// Height and balance of a subtree.
struct Measure {
    /// -1 for an empty subtree, 0 for a single node.
    height: isize,
    balanced: bool,
}

enum Frame<'a, K> {
    /// Measure this subtree.
    Enter(Option<&'a Node<K>>),
    /// Both subtrees of a node have been measured; combine their heights.
    Exit,
}

/// Measures a subtree bottom up with an explicit stack. With `stop_early`, returns as soon as one
/// unbalanced node is found; the height is meaningless in that case.
fn measure<K>(root: Option<&Node<K>>, stop_early: bool) -> Measure {
    let mut frames = vec![Frame::Enter(root)];
    let mut heights: Vec<isize> = Vec::new();
    let mut balanced = true;

    while let Some(frame) = frames.pop() {
        match frame {
            Frame::Enter(None) => heights.push(-1),
            Frame::Enter(Some(node)) => {
                frames.push(Frame::Exit);
                frames.push(Frame::Enter(node.right()));
                frames.push(Frame::Enter(node.left()));
            }
            Frame::Exit => {
                let right = heights.pop().unwrap_or(-1);
                let left = heights.pop().unwrap_or(-1);
                let height = 1 + left.max(right);
                if left.abs_diff(right) > 1 {
                    balanced = false;
                    if stop_early {
                        return Measure { height, balanced };
                    }
                }
                heights.push(height);
            }
        }
    }

    Measure {
        height: heights.pop().unwrap_or(-1),
        balanced,
    }
}

impl<K> Node<K> {
    /// The number of edges on the longest path from this node down to a leaf. A leaf has height 0.
    pub fn height(&self) -> usize {
        measure(Some(self), false).height.unsigned_abs()
    }
}

impl<K> Tree<K> {
    /// The height of the node holding `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::Tree;
    ///
    /// let tree = Tree::new([1, 7, 4, 23, 8, 9, 4, 3, 5, 7, 9, 67, 6345, 324]);
    ///
    /// assert_eq!(tree.height(&8), Ok(3));
    /// assert_eq!(tree.height(&6345), Ok(0));
    /// ```
    pub fn height(&self, key: &K) -> Result<usize, TreeError>
    where
        K: Ord,
    {
        Ok(self.get(key)?.height())
    }

    /// The number of edges between the root and the node holding `key`.
    ///
    /// There are no parent pointers so this climbs by looking up each ancestor from the root in
    /// turn, which costs `O(height^2)`.
    pub fn depth(&self, key: &K) -> Result<usize, TreeError>
    where
        K: Ord,
    {
        let mut node = self.get(key)?;
        let mut depth = 0;
        loop {
            let parent = self.parent(node.key())?;
            // Only the root is its own parent.
            if ptr::eq(parent, node) {
                return Ok(depth);
            }
            node = parent;
            depth += 1;
        }
    }

    /// Whether, for every node, the heights of its two subtrees differ by at most one. An empty
    /// tree is balanced.
    pub fn is_balanced(&self) -> bool {
        measure(self.root(), true).balanced
    }

    /// Rebuilds the whole tree from its sorted keys so that it is balanced again. Keys are moved
    /// into the new tree, not cloned.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::Tree;
    ///
    /// let mut tree = Tree::new([1]);
    /// tree.extend(2..10);
    /// assert!(!tree.is_balanced());
    ///
    /// tree.rebalance();
    /// assert!(tree.is_balanced());
    /// assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), (1..10).collect::<Vec<_>>());
    /// ```
    pub fn rebalance(&mut self)
    where
        K: Ord,
    {
        let keys: Vec<K> = mem::take(self).into_iter().collect();
        log::debug!("rebalancing tree of {} nodes", keys.len());
        *self = Self::from_sorted(keys);
    }
}
