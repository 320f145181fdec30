use core::cmp::Ordering;

use super::{Color, NIL, RbTree, Side};
use crate::TreeError;

impl<T: Ord> RbTree<T> {
    /// Inserts one occurrence of `key`.
    ///
    /// An equal key already in the tree only has its count bumped; otherwise a
    /// new red leaf is attached and the tree is rebalanced.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to insert, `None` is rejected
    ///
    /// # Returns
    ///
    /// * `Result<usize, TreeError>` - The number of key comparisons made while
    ///   descending, or `InvalidInput` for `None`
    pub fn insert(&mut self, key: impl Into<Option<T>>) -> Result<usize, TreeError> {
        let key = key.into().ok_or(TreeError::InvalidInput)?;

        let mut comparisons = 0;
        let mut parent = NIL;
        let mut current = self.root;
        let mut side = Side::Left;

        while current != NIL {
            comparisons += 1;
            parent = current;
            let node = self.node_at(current);
            side = match key.cmp(&node.key) {
                Ordering::Equal => {
                    self.increment_count(current);
                    return Ok(comparisons);
                }
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            current = self.child_of(current, side);
        }

        let new_idx = self.allocate_node(key, parent);
        if parent == NIL {
            self.root = new_idx;
        } else {
            self.set_child(parent, side, new_idx);
        }

        self.size += 1;
        self.number_of_nodes += 1;

        self.update_subtree_counts_to_root(parent);
        self.rebalance_after_insert(new_idx)?;

        log::trace!("rb_tree: attached slot {new_idx} after {comparisons} comparisons");

        #[cfg(debug_assertions)]
        debug_assert!(
            self.verify_rb_invariants(),
            "RB tree invariants violated after insertion"
        );

        Ok(comparisons)
    }

    fn increment_count(&mut self, node_idx: usize) {
        self.node_at_mut(node_idx).count += 1;
        self.size += 1;
        self.update_subtree_counts_to_root(node_idx);
    }

    /// Restores the red-black properties after `node` was attached red.
    ///
    /// Each pass looks at the side the red parent hangs from. A red uncle on
    /// the other side means recoloring and continuing two levels up. A black
    /// uncle means at most two rotations and the loop ends: an inner
    /// grandchild is first turned outward at the parent, then the grandparent
    /// is rotated away from the parent's side.
    fn rebalance_after_insert(&mut self, mut node: usize) -> Result<(), TreeError> {
        while self.is_red(self.parent_of(node)) {
            let parent = self.parent_of(node);
            let grandparent = self.parent_of(parent);
            let side = self.side_of(grandparent, parent);
            let uncle = self.child_of(grandparent, side.opposite());

            if self.is_red(uncle) {
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            let parent = if node == self.child_of(parent, side.opposite()) {
                self.rotate(parent, side)?;
                node
            } else {
                parent
            };

            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite())?;
            break;
        }

        self.set_color(self.root, Color::Black);
        Ok(())
    }
}
