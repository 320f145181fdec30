use super::{NIL, RbTree, Side};
use crate::TreeError;

impl<T> RbTree<T> {
    /// Rotates `pivot` down towards `side`, promoting its child on the
    /// opposite side into its slot.
    ///
    /// `rotate(x, Side::Left)` is the classic left rotation. The in-order
    /// sequence is preserved, colors are left untouched and the subtree
    /// counts of both nodes involved are recomputed.
    pub(super) fn rotate(&mut self, pivot: usize, side: Side) -> Result<(), TreeError> {
        if pivot == NIL {
            return Err(TreeError::InvariantViolated("rotation at nil"));
        }

        let riser = self.child_of(pivot, side.opposite());
        if riser == NIL {
            return Err(TreeError::InvariantViolated(
                "rotation without a child to promote",
            ));
        }

        // The riser's inner subtree changes hands.
        let inner = self.child_of(riser, side);
        self.set_child(pivot, side.opposite(), inner);
        if inner != NIL {
            self.node_at_mut(inner).parent = pivot;
        }

        self.transplant(pivot, riser);
        self.set_child(riser, side, pivot);
        self.node_at_mut(pivot).parent = riser;

        self.recalculate_subtree_count(pivot);
        self.recalculate_subtree_count(riser);

        log::trace!("rb_tree: rotated slot {pivot} down to the {side:?}");
        Ok(())
    }

    /// Hangs the subtree rooted at `new_node` where `old_node` used to hang.
    ///
    /// `old_node` keeps its own links. When `new_node` is `NIL` nothing records
    /// the parent of the hole; callers carry it themselves.
    pub(super) fn transplant(&mut self, old_node: usize, new_node: usize) {
        let parent = self.node_at(old_node).parent;

        if parent == NIL {
            self.root = new_node;
        } else {
            let side = self.side_of(parent, old_node);
            self.set_child(parent, side, new_node);
        }

        if new_node != NIL {
            self.node_at_mut(new_node).parent = parent;
        }
    }
}
