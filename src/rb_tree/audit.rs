use super::{NIL, RbTree};

impl<T: Ord> RbTree<T> {
    pub(super) fn verify_rb_invariants(&self) -> bool {
        self.audit().is_ok()
    }

    /// Walks the whole tree and reports the first broken invariant.
    pub(super) fn audit(&self) -> Result<(), &'static str> {
        if self.nodes.len() != self.number_of_nodes {
            return Err("arena length differs from number_of_nodes");
        }

        if self.root == NIL {
            return if self.size == 0 && self.number_of_nodes == 0 {
                Ok(())
            } else {
                Err("empty tree with non-zero counters")
            };
        }

        if !self.is_black(self.root) {
            return Err("root is red");
        }
        if self.node_at(self.root).parent != NIL {
            return Err("root has a parent");
        }

        let mut stats = AuditStats::default();
        self.audit_subtree(self.root, None, None, &mut stats)?;

        if stats.nodes != self.number_of_nodes {
            return Err("reachable nodes differ from number_of_nodes");
        }
        if stats.elements != self.size {
            return Err("sum of counts differs from size");
        }
        Ok(())
    }

    /// Returns the black height of the subtree at `node`.
    fn audit_subtree(
        &self,
        node: usize,
        lower: Option<&T>,
        upper: Option<&T>,
        stats: &mut AuditStats,
    ) -> Result<usize, &'static str> {
        if node == NIL {
            return Ok(0);
        }

        let node_ref = self.node_at(node);
        stats.nodes += 1;
        stats.elements += node_ref.count;

        if node_ref.count == 0 {
            return Err("node with zero count");
        }
        if lower.is_some_and(|lower| node_ref.key <= *lower)
            || upper.is_some_and(|upper| node_ref.key >= *upper)
        {
            return Err("keys out of order");
        }
        if self.is_red(node) && (self.is_red(node_ref.left) || self.is_red(node_ref.right)) {
            return Err("red node with a red child");
        }
        for child in [node_ref.left, node_ref.right] {
            if child != NIL && self.node_at(child).parent != node {
                return Err("child does not point back to its parent");
            }
        }

        let expected_count = node_ref.count
            + self.subtree_count_of(node_ref.left)
            + self.subtree_count_of(node_ref.right);
        if node_ref.subtree_count != expected_count {
            return Err("stale subtree count");
        }

        let left_height = self.audit_subtree(node_ref.left, lower, Some(&node_ref.key), stats)?;
        let right_height = self.audit_subtree(node_ref.right, Some(&node_ref.key), upper, stats)?;
        if left_height != right_height {
            return Err("black heights of siblings differ");
        }

        Ok(left_height + usize::from(self.is_black(node)))
    }
}

#[derive(Default)]
struct AuditStats {
    nodes: usize,
    elements: usize,
}
