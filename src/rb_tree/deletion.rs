use super::{Color, NIL, RbTree, Side};
use crate::TreeError;

impl<T: Ord> RbTree<T> {
    /// Removes one occurrence of `key`.
    ///
    /// The node itself is only unlinked once its last occurrence goes.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to remove, `None` is rejected
    ///
    /// # Returns
    ///
    /// * `Result<bool, TreeError>` - `true` if an occurrence was removed,
    ///   `false` if the key was not stored, `InvalidInput` for `None`
    pub fn remove<'a>(&mut self, key: impl Into<Option<&'a T>>) -> Result<bool, TreeError>
    where
        T: 'a,
    {
        let key = key.into().ok_or(TreeError::InvalidInput)?;

        let node_idx = self.find_node(key);
        if node_idx == NIL {
            return Ok(false);
        }

        if self.node_at(node_idx).count > 1 {
            self.decrement_count(node_idx);
            return Ok(true);
        }

        if self.number_of_nodes == 1 {
            self.release_last_node();
            return Ok(true);
        }

        self.unlink_node(node_idx)?;
        self.size -= 1;
        self.number_of_nodes -= 1;

        #[cfg(debug_assertions)]
        debug_assert!(
            self.verify_rb_invariants(),
            "RB tree invariants violated after removal"
        );

        Ok(true)
    }

    fn decrement_count(&mut self, node_idx: usize) {
        self.node_at_mut(node_idx).count -= 1;
        self.size -= 1;
        self.update_subtree_counts_to_root(node_idx);
    }
}

impl<T> RbTree<T> {
    /// Drops the only remaining node, leaving the arena allocation in place.
    fn release_last_node(&mut self) {
        log::trace!("rb_tree: released the last node");
        self.nodes.clear();
        self.root = NIL;
        self.size = 0;
        self.number_of_nodes = 0;
    }

    /// Takes `node` out of the tree, rebalances, then frees its arena slot.
    fn unlink_node(&mut self, node: usize) -> Result<(), TreeError> {
        let (removed_color, hole, hole_parent) = self.splice_out(node);

        if removed_color == Color::Black {
            self.rebalance_after_removal(hole, hole_parent)?;
        }

        // Every node whose subtree lost the element sits on this path, even
        // after the rebalancing rotations.
        match hole_parent {
            NIL => self.update_subtree_counts_to_root(self.root),
            parent => self.update_subtree_counts_to_root(parent),
        }

        log::trace!("rb_tree: spliced out slot {node}");
        self.release_node(node);
        Ok(())
    }

    /// Detaches `node` from its position.
    ///
    /// Returns the color that left the tree, the subtree now filling the
    /// vacated position (possibly `NIL`) and that position's parent.
    ///
    /// A node with two children is replaced by its successor, which inherits
    /// the node's color; the successor's own color is then the one that left,
    /// from the successor's old position.
    fn splice_out(&mut self, node: usize) -> (Color, usize, usize) {
        let left = self.node_at(node).left;
        let right = self.node_at(node).right;
        let node_color = self.color_of(node);

        if left == NIL || right == NIL {
            let child = if left == NIL { right } else { left };
            let parent = self.node_at(node).parent;
            self.transplant(node, child);
            return (node_color, child, parent);
        }

        let successor = self.outermost(right, Side::Left);
        let removed_color = self.color_of(successor);
        let hole = self.node_at(successor).right;

        let hole_parent = if successor == right {
            successor
        } else {
            let old_parent = self.node_at(successor).parent;
            self.transplant(successor, hole);
            self.adopt(successor, Side::Right, right);
            old_parent
        };

        self.transplant(node, successor);
        self.adopt(successor, Side::Left, left);
        self.node_at_mut(successor).color = node_color;

        (removed_color, hole, hole_parent)
    }

    /// Links `child` (not `NIL`) under `parent` on `side`, both directions.
    fn adopt(&mut self, parent: usize, side: Side, child: usize) {
        self.set_child(parent, side, child);
        self.node_at_mut(child).parent = parent;
    }

    /// Pays back the black that left the path through `hole`.
    ///
    /// `hole_parent` travels alongside because `hole` may be `NIL`. Each pass
    /// works on the side the hole hangs from, with `far` the opposite side:
    /// a red sibling is rotated above the parent first so the sibling is black.
    /// A sibling with two black children is painted red and the deficit moves
    /// up a level. Otherwise the sibling's far child is made red if needed (a
    /// rotation at the sibling), and one rotation at the parent settles it.
    fn rebalance_after_removal(
        &mut self,
        mut hole: usize,
        mut hole_parent: usize,
    ) -> Result<(), TreeError> {
        while hole != self.root && self.is_black(hole) {
            if hole != NIL {
                hole_parent = self.node_at(hole).parent;
            }
            if hole_parent == NIL {
                break;
            }

            let side = self.side_of(hole_parent, hole);
            let far = side.opposite();
            let mut sibling = self.child_of(hole_parent, far);

            if self.is_red(sibling) {
                self.set_color(sibling, Color::Black);
                self.set_color(hole_parent, Color::Red);
                self.rotate(hole_parent, side)?;
                sibling = self.child_of(hole_parent, far);
            }

            let near_nephew = self.child_of(sibling, side);
            let far_nephew = self.child_of(sibling, far);

            if self.is_black(near_nephew) && self.is_black(far_nephew) {
                self.set_color(sibling, Color::Red);
                hole = hole_parent;
                hole_parent = self.parent_of(hole);
                continue;
            }

            if self.is_black(far_nephew) {
                self.set_color(near_nephew, Color::Black);
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, far)?;
                sibling = self.child_of(hole_parent, far);
            }

            self.set_color(sibling, self.color_of(hole_parent));
            self.set_color(hole_parent, Color::Black);
            self.set_color(self.child_of(sibling, far), Color::Black);
            self.rotate(hole_parent, side)?;
            hole = self.root;
        }

        self.set_color(hole, Color::Black);
        self.set_color(self.root, Color::Black);
        Ok(())
    }
}
