use super::RawWavlTree;
use crate::error::Error;
use crate::raw::handle::Handle;
use crate::raw::node::Side;

/// Local correction chosen for one node on the way up after a deletion.
///
/// `Side` always names the sibling: the child opposite the 3-difference.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum DeleteCase {
    /// No difference is 3 and the node is not a `(2, 2)` leaf.
    Balanced,
    /// `(2, 2)` leaf, or `(3, 2)` / `(2, 3)`: demote and move to the parent.
    Demote,
    /// 3-difference with a `(2, 2)` sibling: demote both, move to the parent.
    DemoteWithSibling(Side),
    /// 3-difference with the sibling's outer difference 1: single rotation
    /// lifting the sibling, which is then promoted.
    Rotate(Side),
    /// 3-difference with the sibling leaning inward: double rotation lifting
    /// the sibling's inner child, promoted twice.
    DoubleRotate(Side),
}

impl DeleteCase {
    /// Elementary operations, accounted as for insertion.
    ///
    /// Both rotations demote the old pivot once. It is then examined again,
    /// and a further demotion it needs there is a separate `Demote` step, so
    /// a rotation event costs 3 or 4 and a double rotation 6 or 7.
    const fn cost(self) -> usize {
        match self {
            DeleteCase::Balanced => 0,
            DeleteCase::Demote => 1,
            DeleteCase::DemoteWithSibling(_) => 2,
            // rotation + demotion + promotion
            DeleteCase::Rotate(_) => 3,
            // 2 rotations + 2 demotions + 2 promotions
            DeleteCase::DoubleRotate(_) => 6,
        }
    }
}

impl RawWavlTree {
    /// Deletes `key`, rebalancing on the way back up.
    ///
    /// Returns the number of elementary rebalancing operations performed, or
    /// [`Error::KeyNotFound`] without touching the tree if `key` is absent.
    ///
    /// Only leaves and single-child nodes are ever unlinked. Deleting the
    /// root, or a node with two children, first moves the entry of an
    /// in-order neighbour into the doomed node and removes the neighbour
    /// instead.
    pub(crate) fn delete(&mut self, key: i32) -> Result<usize, Error> {
        let found = self.find(key).ok_or(Error::KeyNotFound(key))?;

        // The extremes must be stepped while the structure is still intact.
        if self.min == Some(found) {
            self.min = self.successor(found);
        }
        if self.max == Some(found) {
            self.max = self.predecessor(found);
        }

        if self.len == 1 {
            self.clear();
            tracing::debug!(key, "deleted last entry");
            return Ok(0);
        }

        let mut target = found;
        if self.nodes.get(target).parent().is_none() {
            // A non-empty root with len > 1 always has a child on some side.
            let side = if self.nodes.get(target).left().is_some() {
                Side::Left
            } else {
                Side::Right
            };
            target = self.pull_neighbor(target, side);
        }
        let node = self.nodes.get(target);
        if node.left().is_some() && node.right().is_some() {
            let side = match self.relation_to_parent(target) {
                Some(Side::Right) => Side::Left,
                _ => Side::Right,
            };
            target = self.pull_neighbor(target, side);
        }

        let parent = self.unlink(target);
        self.decrement_sizes_from(parent);
        self.len -= 1;

        let operations = self.rebalance_after_delete(parent);
        self.fix_root();
        debug_assert_eq!(self.nodes.len(), self.len);
        tracing::debug!(key, operations, "deleted");
        Ok(operations)
    }

    /// Moves the entry of the in-order neighbour of `handle` towards `side`
    /// into `handle`, parking the doomed entry in the neighbour. Returns the
    /// neighbour, which has at most one child.
    fn pull_neighbor(&mut self, handle: Handle, side: Side) -> Handle {
        let neighbor = self.step(handle, side).expect("`RawWavlTree::pull_neighbor()` - no neighbour on that side!");

        let (key, value) = {
            let node = self.nodes.get(neighbor);
            (node.key(), node.value())
        };
        let (old_key, old_value) = self.nodes.get_mut(handle).replace_entry(key, value);
        self.nodes.get_mut(neighbor).replace_entry(old_key, old_value);

        // The extreme caches follow their entry, not the slot.
        if self.min == Some(neighbor) {
            self.min = Some(handle);
        }
        if self.max == Some(neighbor) {
            self.max = Some(handle);
        }

        neighbor
    }

    /// Detaches a non-root node with at most one child, splicing the child
    /// (or a virtual node) into its slot, and frees it. Returns the former
    /// parent.
    fn unlink(&mut self, handle: Handle) -> Handle {
        let node = self.nodes.get(handle);
        debug_assert!(node.left().is_none() || node.right().is_none());
        let parent = node.parent().expect("`RawWavlTree::unlink()` - cannot unlink the root!");
        let child = node.left().or(node.right());
        let relation = self.relation_to_parent(handle);

        self.replace_in_parent(Some(parent), relation, child);

        let removed = self.nodes.take(handle);
        self.values.free(removed.value());
        parent
    }

    /// Subtracts one from the size of `handle` and every ancestor.
    ///
    /// Runs before any rebalancing so that rotations find correct child
    /// sizes and only need to recompute the nodes they move.
    fn decrement_sizes_from(&mut self, handle: Handle) {
        let mut current = Some(handle);
        while let Some(handle) = current {
            let node = self.nodes.get_mut(handle);
            node.set_size(node.size().decrement());
            current = node.parent();
        }
    }

    fn delete_case(&self, handle: Handle) -> DeleteCase {
        let node = self.nodes.get(handle);
        let (left, right) = self.rank_diffs(handle);

        if node.is_leaf() && (left, right) == (2, 2) {
            return DeleteCase::Demote;
        }
        if left != 3 && right != 3 {
            return DeleteCase::Balanced;
        }
        if left == 2 || right == 2 {
            return DeleteCase::Demote;
        }

        // The 3-side's sibling sits one rank below this node, so it is real.
        let sibling_side = if left == 3 { Side::Right } else { Side::Left };
        let sibling = node
            .child(sibling_side)
            .expect("`RawWavlTree::delete_case()` - sibling of a 3-child is virtual!");

        let outer = self.rank_diff(sibling, sibling_side);
        let inner = self.rank_diff(sibling, sibling_side.opposite());
        if (outer, inner) == (2, 2) {
            DeleteCase::DemoteWithSibling(sibling_side)
        } else if outer == 1 {
            DeleteCase::Rotate(sibling_side)
        } else {
            DeleteCase::DoubleRotate(sibling_side)
        }
    }

    /// Walks up from `start` applying one correction per level until a
    /// balanced node or the root is passed. Returns the total cost.
    fn rebalance_after_delete(&mut self, start: Handle) -> usize {
        let mut operations = 0;
        let mut current = Some(start);

        while let Some(handle) = current {
            let case = self.delete_case(handle);
            let node = self.nodes.get(handle);
            tracing::trace!(key = node.key(), rank = node.rank(), ?case, "delete rebalance");
            operations += case.cost();

            current = match case {
                DeleteCase::Balanced => break,
                DeleteCase::Demote => {
                    self.nodes.get_mut(handle).demote();
                    self.nodes.get(handle).parent()
                }
                DeleteCase::DemoteWithSibling(side) => {
                    let sibling = self.nodes.get(handle).child(side).expect("checked by `delete_case()`");
                    self.nodes.get_mut(handle).demote();
                    self.nodes.get_mut(sibling).demote();
                    self.nodes.get(handle).parent()
                }
                // After a rotation the demoted node may be left a (2, 2)
                // leaf, so it is examined once more before moving on.
                DeleteCase::Rotate(side) => {
                    let top = self.rotate(handle, side);
                    self.nodes.get_mut(top).promote();
                    Some(handle)
                }
                DeleteCase::DoubleRotate(side) => {
                    let top = self.double_rotate(handle, side);
                    self.nodes.get_mut(top).promote();
                    Some(handle)
                }
            };
        }

        operations
    }

    /// Re-points the root at the top of the parent chain.
    fn fix_root(&mut self) {
        if let Some(mut top) = self.root {
            while let Some(parent) = self.nodes.get(top).parent() {
                top = parent;
            }
            self.root = Some(top);
        }
    }
}
