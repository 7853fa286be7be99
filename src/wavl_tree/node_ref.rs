use core::fmt;

use super::WavlTree;
use crate::raw::{Handle, RawWavlTree};

/// Read-only view of a node in a rank-balanced tree.
///
/// Absent children are reported as *virtual* nodes: `is_real()` is `false`,
/// their rank is `-1` and their subtree is empty. Navigating away from a
/// virtual node yields another virtual node.
pub trait WavlNode: Sized {
    /// Returns `true` for a node that holds an entry.
    fn is_real(&self) -> bool;

    /// The key stored here, `None` for a virtual node.
    fn key(&self) -> Option<i32>;

    /// The value stored here, `None` for a virtual node.
    fn value(&self) -> Option<&str>;

    /// The left child, virtual when absent.
    fn left(&self) -> Self;

    /// The right child, virtual when absent.
    fn right(&self) -> Self;

    /// The parent, virtual for the root.
    fn parent(&self) -> Self;

    /// Number of real nodes in the subtree rooted here.
    fn subtree_size(&self) -> usize;

    /// Rank of the node: `0` for a leaf, `-1` for a virtual node.
    fn rank(&self) -> i32;

    /// The node holding the next smaller key.
    fn predecessor(&self) -> Self;

    /// The node holding the next larger key.
    fn successor(&self) -> Self;
}

/// A borrowed node of a [`WavlTree`].
///
/// # Examples
///
/// ```
/// use wavl_tree::{WavlNode, WavlTree};
///
/// let tree: WavlTree = [(1, "a"), (2, "b"), (3, "c")].into_iter().collect();
/// let root = tree.root();
/// assert_eq!(root.key(), Some(2));
/// assert_eq!(root.rank(), 1);
/// assert_eq!(root.subtree_size(), 3);
/// assert_eq!(root.left().value(), Some("a"));
///
/// let leaf = root.right();
/// assert!(!leaf.right().is_real());
/// assert_eq!(leaf.right().rank(), -1);
/// assert_eq!(leaf.predecessor().key(), Some(2));
/// ```
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a RawWavlTree,
    handle: Option<Handle>,
}

impl<'a> NodeRef<'a> {
    const fn new(tree: &'a RawWavlTree, handle: Option<Handle>) -> Self {
        NodeRef { tree, handle }
    }

    fn at(self, handle: Option<Handle>) -> Self {
        NodeRef::new(self.tree, handle)
    }
}

impl WavlNode for NodeRef<'_> {
    fn is_real(&self) -> bool {
        self.handle.is_some()
    }

    fn key(&self) -> Option<i32> {
        self.handle.map(|h| self.tree.node(h).key())
    }

    fn value(&self) -> Option<&str> {
        self.handle.map(|h| self.tree.value(h))
    }

    fn left(&self) -> Self {
        self.at(self.handle.and_then(|h| self.tree.node(h).left()))
    }

    fn right(&self) -> Self {
        self.at(self.handle.and_then(|h| self.tree.node(h).right()))
    }

    fn parent(&self) -> Self {
        self.at(self.handle.and_then(|h| self.tree.node(h).parent()))
    }

    fn subtree_size(&self) -> usize {
        self.tree.subtree_size(self.handle)
    }

    fn rank(&self) -> i32 {
        self.tree.rank(self.handle)
    }

    fn predecessor(&self) -> Self {
        self.at(self.handle.and_then(|h| self.tree.predecessor(h)))
    }

    fn successor(&self) -> Self {
        self.at(self.handle.and_then(|h| self.tree.successor(h)))
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.handle {
            Some(handle) => f
                .debug_struct("NodeRef")
                .field("key", &self.tree.node(handle).key())
                .field("value", &self.tree.value(handle))
                .field("rank", &self.rank())
                .field("size", &self.subtree_size())
                .finish(),
            None => f.write_str("NodeRef(virtual)"),
        }
    }
}

impl WavlTree {
    /// Returns the root node, virtual when the tree is empty.
    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::new(&self.raw, self.raw.root())
    }

    /// Returns the node holding the smallest key.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn first(&self) -> NodeRef<'_> {
        NodeRef::new(&self.raw, self.raw.min())
    }

    /// Returns the node holding the largest key.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn last(&self) -> NodeRef<'_> {
        NodeRef::new(&self.raw, self.raw.max())
    }

    /// Returns the node holding `key`, virtual when the key is absent.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn node(&self, key: i32) -> NodeRef<'_> {
        NodeRef::new(&self.raw, self.raw.find(key))
    }
}
