use super::handle::Handle;
use super::size::Size;

/// Rank assigned to a virtual (absent) child.
pub(crate) const VIRTUAL_RANK: i32 = -1;

/// Which child slot of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A real tree node.
///
/// Absent children are `None` and behave as virtual nodes of rank `-1`;
/// no sentinel is ever materialized. `parent` is a back-reference only, the
/// arena owns the node.
#[derive(Clone)]
pub(crate) struct Node {
    key: i32,
    // Handle into the values arena.
    value: Handle,
    rank: u8,
    // Number of real nodes in the subtree rooted here, this node included.
    size: Size,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl Node {
    /// Creates a detached leaf: rank 0, size 1, two virtual children.
    pub(crate) const fn new_leaf(key: i32, value: Handle) -> Self {
        Self {
            key,
            value,
            rank: 0,
            size: Size::ONE,
            parent: None,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> i32 {
        self.key
    }

    #[inline]
    pub(crate) const fn value(&self) -> Handle {
        self.value
    }

    #[inline]
    pub(crate) const fn rank(&self) -> u8 {
        self.rank
    }

    pub(crate) fn promote(&mut self) {
        self.rank += 1;
    }

    pub(crate) fn demote(&mut self) {
        assert!(self.rank > 0, "`Node::demote()` - rank of a real node would drop below zero!");
        self.rank -= 1;
    }

    #[inline]
    pub(crate) const fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    #[inline]
    pub(crate) const fn has_child(&self, side: Side) -> bool {
        self.child(side).is_some()
    }

    /// True iff both children are virtual.
    #[inline]
    pub(crate) const fn is_leaf(&self) -> bool {
        !self.has_child(Side::Left) && !self.has_child(Side::Right)
    }

    /// Replaces key and payload, leaving links, rank and size in place.
    /// Returns the previous entry.
    pub(crate) fn replace_entry(&mut self, key: i32, value: Handle) -> (i32, Handle) {
        let old = (self.key, self.value);
        self.key = key;
        self.value = value;
        old
    }
}
