//! A Binary Search Tree that is balanced when it is built and can be rebuilt on demand. Inserts
//! and deletes never rotate nodes so a long run of skewed inserts produces a skewed tree. Call
//! [`Tree::rebalance`] to rebuild it from its sorted keys.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::{Tree, TreeError};
//!
//! let mut tree = Tree::new([5, 1, 3, 3, 9]);
//!
//! // Construction sorts and removes duplicates.
//! assert_eq!(tree.len(), 4);
//! assert!(tree.contains(&3));
//!
//! // Keys are unique so inserting one twice is rejected.
//! assert_eq!(tree.insert(7), Ok(()));
//! assert_eq!(tree.insert(7), Err(TreeError::DuplicateKey));
//!
//! tree.delete(&1).unwrap();
//! assert!(!tree.contains(&1));
//! assert_eq!(tree.delete(&1), Err(TreeError::KeyNotFound));
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::error::TreeError;
use crate::traversal::IntoIter;

/// An owned, possibly empty, subtree.
pub(crate) type Link<K> = Option<Box<Node<K>>>;

/// A Binary Search Tree over unique keys. Every node exclusively owns its children so detaching
/// a subtree frees all of it.
pub struct Tree<K> {
    pub(crate) root: Link<K>,
    pub(crate) len: usize,
}

/// A single key and the (up to) two subtrees hanging off of it. Every key in `left` is smaller
/// than `key` and every key in `right` is larger.
pub struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
}

/// Names one of the two child slots of a [`Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// The slot holding smaller keys.
    Left,
    /// The slot holding larger keys.
    Right,
}

/// The outcome of [`Tree::find`].
#[derive(Debug)]
pub enum Search<'a, K> {
    /// The node holding the key.
    Found(&'a Node<K>),
    /// The key isn't stored. `parent` is the node it would be attached to and `side` is the
    /// empty slot it would take.
    Vacant {
        /// The attachment point.
        parent: &'a Node<K>,
        /// The free slot of `parent` the key belongs in.
        side: Side,
    },
}

impl<'a, K> Search<'a, K> {
    /// The node the search stopped at: the match or the attachment point.
    pub fn node(&self) -> &'a Node<K> {
        match *self {
            Self::Found(node) | Self::Vacant { parent: node, .. } => node,
        }
    }
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<K> Drop for Tree<K> {
    fn drop(&mut self) {
        // Draining walks the nodes with a stack so a skewed tree can't blow the call stack.
        drop(IntoIter::new(self.root.take(), self.len));
    }
}

impl<K> Clone for Tree<K>
where
    K: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: clone_subtree(self.root()),
            len: self.len,
        }
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("level_order", &self.level_order().collect::<Vec<_>>())
            .finish()
    }
}

impl<K> fmt::Debug for Node<K>
where
    K: fmt::Debug,
{
    /// Only the keys of the children are shown, not the whole subtree.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("left", &self.left().map(Node::key))
            .field("right", &self.right().map(Node::key))
            .finish()
    }
}

impl<K> FromIterator<K> for Tree<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<K> Extend<K> for Tree<K>
where
    K: Ord,
{
    /// Inserts every key in turn. Keys already in the tree are skipped.
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            let _ = self.insert(key);
        }
    }
}

impl<K> Tree<K> {
    /// Builds a balanced tree out of the given keys. The keys don't need to be sorted and may
    /// contain duplicates; only one copy of each is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::Tree;
    ///
    /// let tree = Tree::new([1, 7, 4, 23, 8, 9, 4, 3, 5, 7, 9, 67, 6345, 324]);
    ///
    /// assert!(tree.is_balanced());
    /// assert_eq!(
    ///     tree.inorder().copied().collect::<Vec<_>>(),
    ///     [1, 3, 4, 5, 7, 8, 9, 23, 67, 324, 6345],
    /// );
    /// ```
    pub fn new<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Ord,
    {
        let mut keys: Vec<K> = keys.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();
        Self::from_sorted(keys)
    }

    /// Builds a tree out of keys that are already strictly ascending.
    pub(crate) fn from_sorted(keys: Vec<K>) -> Self
    where
        K: Ord,
    {
        debug_assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));

        let len = keys.len();
        let mut slots: Vec<Option<K>> = keys.into_iter().map(Some).collect();
        let root = build(&mut slots);
        log::debug!("built tree with {len} nodes");

        Self { root, len }
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The topmost node, if there is one.
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    /// Whether some node holds `key`.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.get(key).is_ok()
    }

    /// Walks down from the root towards `key`. The walk stops at the node holding `key` or, if
    /// there is none, at the node whose empty child slot `key` would be inserted into.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{Search, Side, Tree};
    ///
    /// let tree = Tree::new([1, 2, 3]);
    ///
    /// assert!(matches!(tree.find(&2), Ok(Search::Found(node)) if *node.key() == 2));
    /// match tree.find(&4).unwrap() {
    ///     Search::Vacant { parent, side } => {
    ///         assert_eq!(*parent.key(), 3);
    ///         assert_eq!(side, Side::Right);
    ///     }
    ///     Search::Found(_) => unreachable!(),
    /// }
    /// ```
    pub fn find(&self, key: &K) -> Result<Search<'_, K>, TreeError>
    where
        K: Ord,
    {
        let mut node = self.root().ok_or(TreeError::EmptyTree)?;
        loop {
            let side = match key.cmp(&node.key) {
                Ordering::Less => Side::Left,
                Ordering::Equal => return Ok(Search::Found(node)),
                Ordering::Greater => Side::Right,
            };
            match node.child(side) {
                Some(child) => node = child,
                None => return Ok(Search::Vacant { parent: node, side }),
            }
        }
    }

    /// Returns the node holding `key`.
    pub fn get(&self, key: &K) -> Result<&Node<K>, TreeError>
    where
        K: Ord,
    {
        match self.find(key)? {
            Search::Found(node) => Ok(node),
            Search::Vacant { .. } => Err(TreeError::KeyNotFound),
        }
    }

    /// Returns the parent of the node holding `key`. The root has no parent so asking for the
    /// root's key returns the root itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::Tree;
    ///
    /// let tree = Tree::new([1, 2, 3]);
    ///
    /// assert_eq!(tree.parent(&1).map(|n| *n.key()), Ok(2));
    /// assert_eq!(tree.parent(&2).map(|n| *n.key()), Ok(2));
    /// ```
    pub fn parent(&self, key: &K) -> Result<&Node<K>, TreeError>
    where
        K: Ord,
    {
        let mut node = self.root().ok_or(TreeError::EmptyTree)?;
        loop {
            let side = match key.cmp(&node.key) {
                Ordering::Less => Side::Left,
                // Only reachable for the root: below it we stop one level above the match.
                Ordering::Equal => return Ok(node),
                Ordering::Greater => Side::Right,
            };
            let child = node.child(side).ok_or(TreeError::KeyNotFound)?;
            if child.key == *key {
                return Ok(node);
            }
            node = child;
        }
    }

    /// Attaches `key` as a new leaf. Nothing is rebalanced. If the key is already present the
    /// tree is left alone and [`TreeError::DuplicateKey`] is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{Tree, TreeError};
    ///
    /// let mut tree = Tree::default();
    ///
    /// assert_eq!(tree.insert(1), Ok(()));
    /// assert_eq!(tree.insert(1), Err(TreeError::DuplicateKey));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> Result<(), TreeError>
    where
        K: Ord,
    {
        let slot = slot_mut(&mut self.root, &key);
        if slot.is_some() {
            log::warn!("rejected insert: key is already present in the tree");
            return Err(TreeError::DuplicateKey);
        }

        *slot = Some(Node::new_boxed(key));
        self.len += 1;
        Ok(())
    }

    /// Removes the node holding `key`.
    ///
    /// A node with two children isn't unlinked itself. It takes the key of its in-order
    /// successor (the smallest key of its right subtree) and the successor node is removed
    /// instead, which always has at most one child.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{Tree, TreeError};
    ///
    /// let mut tree = Tree::new([1, 2, 3]);
    ///
    /// tree.delete(&2).unwrap();
    /// assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [1, 3]);
    /// assert_eq!(tree.delete(&2), Err(TreeError::KeyNotFound));
    /// ```
    pub fn delete(&mut self, key: &K) -> Result<(), TreeError>
    where
        K: Ord,
    {
        if self.root.is_none() {
            return Err(TreeError::EmptyTree);
        }

        let slot = slot_mut(&mut self.root, key);
        let mut node = slot.take().ok_or(TreeError::KeyNotFound)?;
        *slot = match (node.left.take(), node.right.take()) {
            (None, None) => {
                log::trace!("deleting a leaf");
                None
            }
            (Some(child), None) | (None, Some(child)) => {
                log::trace!("deleting a node with one child");
                Some(child)
            }
            (Some(left), Some(right)) => {
                log::trace!("deleting a node with two children");
                let mut right = Some(right);
                if let Some(successor) = take_smallest(&mut right) {
                    node.key = successor;
                }
                node.left = Some(left);
                node.right = right;
                Some(node)
            }
        };

        self.len -= 1;
        Ok(())
    }
}

impl<K> Node<K> {
    fn new_boxed(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
        })
    }

    /// The key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The root of the subtree of smaller keys.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the subtree of larger keys.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// The child in the given slot.
    pub fn child(&self, side: Side) -> Option<&Self> {
        match side {
            Side::Left => self.left(),
            Side::Right => self.right(),
        }
    }

    /// How many children (0, 1 or 2) this node has.
    pub fn children(&self) -> usize {
        usize::from(self.left.is_some()) + usize::from(self.right.is_some())
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children() == 0
    }
}

/// Builds a subtree out of ascending keys, taking each key out of its slot.
///
/// The key at the midpoint `(start + end) / 2` of the inclusive range becomes the root and the
/// halves on either side become its subtrees.
fn build<K>(keys: &mut [Option<K>]) -> Link<K> {
    if keys.is_empty() {
        return None;
    }

    let mid = (keys.len() - 1) / 2;
    let (left, rest) = keys.split_at_mut(mid);
    let (middle, right) = rest.split_first_mut()?;
    let key = middle.take()?;

    Some(Box::new(Node {
        key,
        left: build(left),
        right: build(right),
    }))
}

enum CloneFrame<'a, K> {
    /// Copy this subtree.
    Enter(Option<&'a Node<K>>),
    /// Both subtrees of the node have been copied; join them under a copy of it.
    Exit(&'a Node<K>),
}

/// Deep copies a subtree bottom up with an explicit stack.
fn clone_subtree<K>(root: Option<&Node<K>>) -> Link<K>
where
    K: Clone,
{
    let mut frames = vec![CloneFrame::Enter(root)];
    let mut copies: Vec<Link<K>> = Vec::new();

    while let Some(frame) = frames.pop() {
        match frame {
            CloneFrame::Enter(None) => copies.push(None),
            CloneFrame::Enter(Some(node)) => {
                frames.push(CloneFrame::Exit(node));
                frames.push(CloneFrame::Enter(node.right()));
                frames.push(CloneFrame::Enter(node.left()));
            }
            CloneFrame::Exit(node) => {
                let right = copies.pop().flatten();
                let left = copies.pop().flatten();
                copies.push(Some(Box::new(Node {
                    key: node.key.clone(),
                    left,
                    right,
                })));
            }
        }
    }

    copies.pop().flatten()
}

/// Returns the slot that holds `key`, or the empty slot it would be inserted into.
fn slot_mut<'a, K>(mut link: &'a mut Link<K>, key: &K) -> &'a mut Link<K>
where
    K: Ord,
{
    loop {
        let ordering = link.as_deref().map(|node| key.cmp(&node.key));
        link = match (ordering, link) {
            (Some(Ordering::Less), Some(node)) => &mut node.left,
            (Some(Ordering::Greater), Some(node)) => &mut node.right,
            (_, link) => return link,
        };
    }
}

/// Unlinks the leftmost node of the subtree, putting its right subtree in its place, and returns
/// its key. Returns `None` for an empty subtree.
fn take_smallest<K>(mut link: &mut Link<K>) -> Option<K> {
    loop {
        let has_left = link.as_deref().map(|node| node.left.is_some());
        link = match (has_left, link) {
            (Some(true), Some(node)) => &mut node.left,
            (_, link) => {
                let Node { key, right, .. } = *link.take()?;
                *link = right;
                return Some(key);
            }
        };
    }
}

#[cfg(feature = "serde")]
impl<K> serde::Serialize for Tree<K>
where
    K: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.inorder())
    }
}

#[cfg(feature = "serde")]
impl<'de, K> serde::Deserialize<'de> for Tree<K>
where
    K: serde::Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let keys = <Vec<K> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Self::new(keys))
    }
}
