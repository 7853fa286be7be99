use alloc::string::String;

use super::RawWavlTree;
use crate::error::Error;
use crate::raw::handle::Handle;
use crate::raw::node::{Node, Side};

/// Local correction chosen for one node on the way up after an insertion.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum InsertCase {
    /// No rank difference is 0.
    Balanced,
    /// `(0, 1)` or `(1, 0)`: promote and move to the parent.
    Promote,
    /// `(0, 2)` / `(2, 0)` with the heavy child leaning outward: single
    /// rotation lifting the child on this side.
    Rotate(Side),
    /// `(0, 2)` / `(2, 0)` with the heavy child leaning inward: double
    /// rotation through the child on this side.
    DoubleRotate(Side),
}

impl InsertCase {
    /// Elementary operations the correction performs: promotions and
    /// demotions count one each, as does every rotation.
    const fn cost(self) -> usize {
        match self {
            InsertCase::Balanced => 0,
            InsertCase::Promote => 1,
            // rotation + demotion
            InsertCase::Rotate(_) => 2,
            // 2 rotations + 2 demotions + 1 promotion
            InsertCase::DoubleRotate(_) => 5,
        }
    }
}

impl RawWavlTree {
    /// Inserts `key` with `value`, rebalancing on the way back up.
    ///
    /// Returns the number of elementary rebalancing operations performed, or
    /// [`Error::DuplicateKey`] without touching the tree if `key` is present.
    pub(crate) fn insert(&mut self, key: i32, value: String) -> Result<usize, Error> {
        let Some(root) = self.root else {
            let value = self.values.alloc(value);
            let handle = self.nodes.alloc(Node::new_leaf(key, value));
            self.root = Some(handle);
            self.min = Some(handle);
            self.max = Some(handle);
            self.len = 1;
            tracing::debug!(key, "inserted into empty tree");
            return Ok(0);
        };

        let (parent, side) = self.insert_position(root, key)?;

        let value = self.values.alloc(value);
        let handle = self.nodes.alloc(Node::new_leaf(key, value));
        self.nodes.get_mut(handle).set_parent(Some(parent));
        self.nodes.get_mut(parent).set_child(side, Some(handle));

        if self.min.is_none_or(|min| key < self.nodes.get(min).key()) {
            self.min = Some(handle);
        }
        if self.max.is_none_or(|max| key > self.nodes.get(max).key()) {
            self.max = Some(handle);
        }

        self.increment_sizes_from(parent);
        self.len += 1;

        let operations = self.rebalance_after_insert(parent);
        debug_assert_eq!(self.nodes.len(), self.len);
        tracing::debug!(key, operations, "inserted");
        Ok(operations)
    }

    /// Descends from `root` to the virtual slot where `key` belongs.
    /// Returns the would-be parent and the side of the empty slot.
    fn insert_position(&self, root: Handle, key: i32) -> Result<(Handle, Side), Error> {
        let mut current = root;
        loop {
            let node = self.nodes.get(current);
            let side = match key.cmp(&node.key()) {
                core::cmp::Ordering::Less => Side::Left,
                core::cmp::Ordering::Greater => Side::Right,
                core::cmp::Ordering::Equal => return Err(Error::DuplicateKey(key)),
            };
            match node.child(side) {
                Some(child) => current = child,
                None => return Ok((current, side)),
            }
        }
    }

    /// Adds one to the size of `handle` and every ancestor up to the root.
    fn increment_sizes_from(&mut self, handle: Handle) {
        let mut current = Some(handle);
        while let Some(handle) = current {
            let node = self.nodes.get_mut(handle);
            node.set_size(node.size().increment());
            current = node.parent();
        }
    }

    fn insert_case(&self, handle: Handle) -> InsertCase {
        let node = self.nodes.get(handle);
        match self.rank_diffs(handle) {
            (left, right) if left != 0 && right != 0 => InsertCase::Balanced,
            (0, 1) | (1, 0) => InsertCase::Promote,
            (0, 2) => {
                // A zero difference means the child has this node's rank, so it is real.
                let left = node.left().expect("`RawWavlTree::insert_case()` - 0-child is virtual!");
                if self.rank_diff(left, Side::Left) == 1 {
                    InsertCase::Rotate(Side::Left)
                } else {
                    InsertCase::DoubleRotate(Side::Left)
                }
            }
            (2, 0) => {
                let right = node.right().expect("`RawWavlTree::insert_case()` - 0-child is virtual!");
                if self.rank_diff(right, Side::Right) == 1 {
                    InsertCase::Rotate(Side::Right)
                } else {
                    InsertCase::DoubleRotate(Side::Right)
                }
            }
            (left, right) => unreachable!("rank differences ({left}, {right}) cannot follow an insertion"),
        }
    }

    /// Walks up from `start` applying one correction per level until a
    /// balanced node or the root is passed. Returns the total cost.
    fn rebalance_after_insert(&mut self, start: Handle) -> usize {
        let mut operations = 0;
        let mut current = Some(start);

        while let Some(handle) = current {
            let case = self.insert_case(handle);
            let node = self.nodes.get(handle);
            tracing::trace!(key = node.key(), rank = node.rank(), ?case, "insert rebalance");
            operations += case.cost();

            current = match case {
                InsertCase::Balanced => break,
                InsertCase::Promote => {
                    self.nodes.get_mut(handle).promote();
                    self.nodes.get(handle).parent()
                }
                InsertCase::Rotate(side) => {
                    let top = self.rotate(handle, side);
                    self.nodes.get(top).parent()
                }
                InsertCase::DoubleRotate(side) => {
                    let top = self.double_rotate(handle, side);
                    self.nodes.get(top).parent()
                }
            };
        }

        operations
    }
}
