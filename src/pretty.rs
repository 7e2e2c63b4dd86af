//! Sideways drawing of a [`Tree`]: the right subtree above each node, the left one below.
//!
//! ```text
//! │   ┌── 3
//! └── 2
//!     └── 1
//! ```

use std::fmt;

use crate::tree::{Node, Tree};

impl<K> Tree<K>
where
    K: fmt::Display,
{
    /// Draws the tree, one node per line. An empty tree draws as an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::Tree;
    ///
    /// let tree = Tree::new([1, 2, 3]);
    ///
    /// assert_eq!(tree.pretty_print(), "│   ┌── 3\n└── 2\n    └── 1\n");
    /// ```
    pub fn pretty_print(&self) -> String {
        self.to_string()
    }
}

impl<K> fmt::Display for Tree<K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => draw(f, root),
            None => Ok(()),
        }
    }
}

enum Step<'a, K> {
    /// Draw the whole subtree: right side, then the node, then left side.
    Subtree(&'a Node<K>, String, bool),
    /// Draw the node's own line.
    Line(&'a Node<K>, String, bool),
}

/// Draws `root` and everything below it. Uses an explicit stack so a skewed tree can't overflow
/// the call stack.
fn draw<K>(f: &mut fmt::Formatter<'_>, root: &Node<K>) -> fmt::Result
where
    K: fmt::Display,
{
    // The root is drawn as if it were a left child.
    let mut steps = vec![Step::Subtree(root, String::new(), true)];

    while let Some(step) = steps.pop() {
        match step {
            Step::Subtree(node, prefix, is_left) => {
                // Pushed in reverse: the right subtree comes off the stack first.
                if let Some(left) = node.left() {
                    let branch = if is_left { "    " } else { "│   " };
                    steps.push(Step::Subtree(left, format!("{prefix}{branch}"), true));
                }
                let right = node.right().map(|right| {
                    let branch = if is_left { "│   " } else { "    " };
                    Step::Subtree(right, format!("{prefix}{branch}"), false)
                });
                steps.push(Step::Line(node, prefix, is_left));
                steps.extend(right);
            }
            Step::Line(node, prefix, is_left) => {
                let connector = if is_left { "└── " } else { "┌── " };
                writeln!(f, "{prefix}{connector}{}", node.key())?;
            }
        }
    }
    Ok(())
}
