//! Single and double rotations.
//!
//! A rotation only changes which nodes sit inside the two (or three) rotated
//! subtrees; the set of keys under the local root is unchanged. Provided the
//! children's size caches are correct going in, recomputing the rotated nodes
//! bottom-up is therefore enough and no ancestor needs touching.

use super::RawWavlTree;
use crate::raw::handle::Handle;
use crate::raw::node::Side;

impl RawWavlTree {
    /// Lifts the child of `pivot` on `side` into the pivot's position.
    ///
    /// The lifted child's inner subtree moves across to the pivot, the pivot
    /// becomes the lifted node's child on the opposite side and is demoted
    /// once. The lifted node inherits the pivot's parent slot, or the root.
    /// Returns the new local root.
    pub(crate) fn rotate(&mut self, pivot: Handle, side: Side) -> Handle {
        let lifted = self.nodes.get(pivot).child(side).expect("`RawWavlTree::rotate()` - no child to lift!");
        let inner = self.nodes.get(lifted).child(side.opposite());
        let parent = self.nodes.get(pivot).parent();
        let relation = self.relation_to_parent(pivot);

        self.nodes.get_mut(pivot).set_child(side, inner);
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).set_parent(Some(pivot));
        }

        self.nodes.get_mut(lifted).set_child(side.opposite(), Some(pivot));
        self.nodes.get_mut(pivot).set_parent(Some(lifted));
        self.replace_in_parent(parent, relation, Some(lifted));

        self.nodes.get_mut(pivot).demote();
        self.update_size(pivot);
        self.update_size(lifted);

        lifted
    }

    /// Lifts the inner grandchild of `pivot` (on `side`, then the opposite
    /// side) two levels: rotates the pivot's child the other way, promotes the
    /// grandchild, then rotates the pivot. Returns the new local root.
    pub(crate) fn double_rotate(&mut self, pivot: Handle, side: Side) -> Handle {
        let child = self.nodes.get(pivot).child(side).expect("`RawWavlTree::double_rotate()` - no child!");
        let middle = self.rotate(child, side.opposite());
        self.nodes.get_mut(middle).promote();
        self.rotate(pivot, side)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::String;

    fn tree_of(keys: &[i32]) -> RawWavlTree {
        let mut tree = RawWavlTree::new();
        for &key in keys {
            tree.insert(key, String::new()).unwrap();
        }
        tree.validate_invariants();
        tree
    }

    // 20 -> (10, 30) with 10 -> (5, 15).
    fn five_node_tree() -> RawWavlTree {
        tree_of(&[20, 10, 30, 5, 15])
    }

    #[test]
    fn rotate_lifts_child_and_keeps_sizes() {
        let mut tree = five_node_tree();
        let root = tree.root().unwrap();
        let left = tree.node(root).left().unwrap();

        let top = tree.rotate(root, Side::Left);

        assert_eq!(top, left);
        assert_eq!(tree.root(), Some(left));
        assert_eq!(tree.node(top).parent(), None);
        assert_eq!(tree.node(top).right(), Some(root));
        assert_eq!(tree.node(root).parent(), Some(top));
        assert_eq!(tree.node(tree.node(root).left().unwrap()).key(), 15);
        assert_eq!(tree.subtree_size(Some(top)), 5);
        assert_eq!(tree.subtree_size(Some(root)), 3);
        assert_eq!(tree.relation_to_parent(root), Some(Side::Right));
    }

    #[test]
    fn rotate_below_root_rewires_parent_slot() {
        let mut tree = tree_of(&[20, 10, 30, 5, 15, 25, 35, 1, 7]);
        let root = tree.root().unwrap();
        let ten = tree.find(10).unwrap();
        let five = tree.find(5).unwrap();
        assert_eq!(tree.node(root).left(), Some(ten));

        let top = tree.rotate(ten, Side::Left);

        assert_eq!(top, five);
        assert_eq!(tree.node(root).left(), Some(five));
        assert_eq!(tree.node(five).parent(), Some(root));
        assert_eq!(tree.subtree_size(Some(five)), 5);
        assert_eq!(tree.subtree_size(Some(ten)), 3);
        assert_eq!(tree.subtree_size(Some(root)), 9);
    }

    #[test]
    fn double_rotate_lifts_inner_grandchild() {
        let mut tree = five_node_tree();
        let root = tree.root().unwrap();
        let fifteen = tree.find(15).unwrap();
        let rank_before = tree.node(root).rank();

        let top = tree.double_rotate(root, Side::Left);

        assert_eq!(top, fifteen);
        assert_eq!(tree.root(), Some(fifteen));
        assert_eq!(tree.node(fifteen).rank(), 1);
        assert_eq!(tree.node(root).rank(), rank_before - 1);
        assert_eq!(tree.node(tree.node(top).left().unwrap()).key(), 10);
        assert_eq!(tree.node(tree.node(top).right().unwrap()).key(), 20);
        assert_eq!(tree.subtree_size(Some(top)), 5);
        assert_eq!(tree.keys(), alloc::vec![5, 10, 15, 20, 30]);
    }
}
