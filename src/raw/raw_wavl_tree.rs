use alloc::string::String;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side, VIRTUAL_RANK};
use super::size::Size;

mod insert;
mod remove;
mod rotate;

/// The arena-backed WAVL tree behind `WavlTree`.
#[derive(Clone)]
pub(crate) struct RawWavlTree {
    /// Arena storing all tree nodes.
    nodes: Arena<Node>,
    /// Arena storing all values (separate from nodes so entry swaps move handles only).
    values: Arena<String>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Node holding the smallest key, maintained incrementally.
    min: Option<Handle>,
    /// Node holding the largest key, maintained incrementally.
    max: Option<Handle>,
    /// Total number of real nodes in the tree.
    len: usize,
}

impl RawWavlTree {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            values: Arena::new(),
            root: None,
            min: None,
            max: None,
            len: 0,
        }
    }

    /// Creates a new tree with room for `capacity` entries.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            values: Arena::with_capacity(capacity),
            root: None,
            min: None,
            max: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Removes every entry, keeping the arenas' storage.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.values.clear();
        self.root = None;
        self.min = None;
        self.max = None;
        self.len = 0;
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) const fn min(&self) -> Option<Handle> {
        self.min
    }

    pub(crate) const fn max(&self) -> Option<Handle> {
        self.max
    }

    /// Returns a reference to a node by handle.
    pub(crate) fn node(&self, handle: Handle) -> &Node {
        self.nodes.get(handle)
    }

    /// Returns the payload stored at the node `handle`.
    pub(crate) fn value(&self, handle: Handle) -> &str {
        self.values.get(self.nodes.get(handle).value())
    }

    /// Rank of a possibly virtual node.
    pub(crate) fn rank(&self, handle: Option<Handle>) -> i32 {
        handle.map_or(VIRTUAL_RANK, |h| i32::from(self.nodes.get(h).rank()))
    }

    /// Own rank minus the rank of the child on `side`.
    ///
    /// A virtual child counts as rank `-1`, so a fresh leaf has difference 1
    /// on both sides.
    pub(crate) fn rank_diff(&self, handle: Handle, side: Side) -> i32 {
        let node = self.nodes.get(handle);
        i32::from(node.rank()) - self.rank(node.child(side))
    }

    /// `(left, right)` rank differences of `handle`.
    pub(crate) fn rank_diffs(&self, handle: Handle) -> (i32, i32) {
        (self.rank_diff(handle, Side::Left), self.rank_diff(handle, Side::Right))
    }

    /// Number of real nodes under a possibly virtual node.
    pub(crate) fn subtree_size(&self, handle: Option<Handle>) -> usize {
        handle.map_or(0, |h| self.nodes.get(h).size().to_usize())
    }

    /// Which child slot of its parent `handle` occupies, or `None` for the root.
    pub(crate) fn relation_to_parent(&self, handle: Handle) -> Option<Side> {
        let parent = self.nodes.get(handle).parent()?;
        if self.nodes.get(parent).left() == Some(handle) {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// Recomputes the cached size of `handle` from its children.
    fn update_size(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let size = self.subtree_size(node.left()) + self.subtree_size(node.right()) + 1;
        self.nodes.get_mut(handle).set_size(Size::from_usize(size));
    }

    /// Points the slot that used to hold a node at `child` instead: the
    /// parent's child slot on `relation`, or the root when there is no parent.
    fn replace_in_parent(&mut self, parent: Option<Handle>, relation: Option<Side>, child: Option<Handle>) {
        match (parent, relation) {
            (Some(parent), Some(side)) => self.nodes.get_mut(parent).set_child(side, child),
            _ => self.root = child,
        }
        if let Some(child) = child {
            self.nodes.get_mut(child).set_parent(parent);
        }
    }

    /// Locates the node holding `key`.
    pub(crate) fn find(&self, key: i32) -> Option<Handle> {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match key.cmp(&node.key()) {
                core::cmp::Ordering::Less => node.left(),
                core::cmp::Ordering::Greater => node.right(),
                core::cmp::Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    /// Returns the payload stored under `key`.
    pub(crate) fn search(&self, key: i32) -> Option<&str> {
        self.find(key).map(|h| self.value(h))
    }

    /// In-order neighbour of `handle` towards `side`: the successor for
    /// `Side::Right`, the predecessor for `Side::Left`.
    pub(crate) fn step(&self, handle: Handle, side: Side) -> Option<Handle> {
        if let Some(child) = self.nodes.get(handle).child(side) {
            return Some(self.extreme(child, side.opposite()));
        }

        let mut current = handle;
        while self.relation_to_parent(current) == Some(side) {
            current = self.nodes.get(current).parent()?;
        }
        self.nodes.get(current).parent()
    }

    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Right)
    }

    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Left)
    }

    /// Follows `side` links from `handle` to the end of the subtree.
    fn extreme(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(child) = self.nodes.get(handle).child(side) {
            handle = child;
        }
        handle
    }

    /// Node holding the `index`-th smallest key, 1-indexed.
    pub(crate) fn select(&self, index: usize) -> Option<Handle> {
        if index == 0 || index > self.len {
            return None;
        }

        let mut current = self.root?;
        let mut index = index;
        loop {
            let node = self.nodes.get(current);
            let left_size = self.subtree_size(node.left());
            current = match (index - 1).cmp(&left_size) {
                core::cmp::Ordering::Less => node.left()?,
                core::cmp::Ordering::Equal => return Some(current),
                core::cmp::Ordering::Greater => {
                    index -= left_size + 1;
                    node.right()?
                }
            };
        }
    }

    /// 1-indexed position of `key` in sorted order.
    pub(crate) fn index_of(&self, key: i32) -> Option<usize> {
        let mut preceding = 0;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match key.cmp(&node.key()) {
                core::cmp::Ordering::Less => node.left(),
                core::cmp::Ordering::Greater => {
                    preceding += self.subtree_size(node.left()) + 1;
                    node.right()
                }
                core::cmp::Ordering::Equal => return Some(preceding + self.subtree_size(node.left()) + 1),
            };
        }
        None
    }

    /// Number of edges on the longest root-to-leaf path.
    pub(crate) fn height(&self) -> Option<usize> {
        let root = self.root?;
        let mut stack = alloc::vec![(root, 0usize)];
        let mut height = 0;
        while let Some((handle, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.nodes.get(handle);
            stack.extend(node.left().map(|h| (h, depth + 1)));
            stack.extend(node.right().map(|h| (h, depth + 1)));
        }
        Some(height)
    }
}
