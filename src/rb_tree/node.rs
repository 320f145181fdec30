use super::RbTree;

/// Index standing in for every absent child and for the parent of the root.
///
/// It is never used to index the arena; the accessors below answer for it
/// instead (black, with `NIL` links).
pub(super) const NIL: usize = usize::MAX;

/// Red-Black tree node colors used to maintain tree balance properties.
///
/// Red-Black trees maintain balance by ensuring:
/// - Red nodes have black children
/// - All paths from a node to its nil descendants have equal black node counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Color {
    /// Red node - must have black children, cannot be adjacent to other red nodes
    Red,
    /// Black node - can have children of any color, contributes to black height
    Black,
}

/// Which child slot of a node a link hangs from.
///
/// Rotations and both rebalancing passes are written once against a `Side`;
/// the mirrored case is the same code run with [`Side::opposite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Side {
    /// The smaller-keys child
    Left,
    /// The larger-keys child
    Right,
}

impl Side {
    #[inline]
    pub(super) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A node in the Red-Black tree containing one distinct key and its links.
#[derive(Debug, Clone)]
pub(super) struct Node<T> {
    /// The stored key
    pub(super) key: T,

    /// Number of occurrences of `key` in the multiset, always at least 1
    pub(super) count: usize,

    /// Arena index of the parent node (`NIL` for the root)
    pub(super) parent: usize,

    /// Arena index of the left child (`NIL` if none)
    pub(super) left: usize,

    /// Arena index of the right child (`NIL` if none)
    pub(super) right: usize,

    /// Color of this node used for Red-Black tree balancing
    pub(super) color: Color,

    /// Total multiplicity of this node's subtree, used for order statistics
    pub(super) subtree_count: usize,
}

impl<T> RbTree<T> {
    /// Pushes a fresh red leaf for `key` under `parent` and returns its index.
    pub(super) fn allocate_node(&mut self, key: T, parent: usize) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            key,
            count: 1,
            parent,
            left: NIL,
            right: NIL,
            color: Color::Red,
            subtree_count: 1,
        });
        idx
    }

    /// Drops the node at `idx`, which must already be unlinked from the tree.
    ///
    /// The arena stays dense: the last node is moved into the freed slot and
    /// every link pointing at it is rewritten.
    pub(super) fn release_node(&mut self, idx: usize) {
        let last = self.nodes.len() - 1;
        self.nodes.swap_remove(idx);
        if idx == last {
            return;
        }

        log::trace!("rb_tree: node moved from slot {last} to slot {idx}");

        let (parent, left, right) = {
            let moved = self.node_at(idx);
            (moved.parent, moved.left, moved.right)
        };

        if parent == NIL {
            self.root = idx;
        } else {
            let side = self.side_of(parent, last);
            self.set_child(parent, side, idx);
        }

        if left != NIL {
            self.node_at_mut(left).parent = idx;
        }
        if right != NIL {
            self.node_at_mut(right).parent = idx;
        }
    }

    #[inline]
    pub(super) fn node_at(&self, idx: usize) -> &Node<T> {
        debug_assert!(idx != NIL, "the nil sentinel has no node");
        &self.nodes[idx]
    }

    #[inline]
    pub(super) fn node_at_mut(&mut self, idx: usize) -> &mut Node<T> {
        debug_assert!(idx != NIL, "the nil sentinel has no node");
        &mut self.nodes[idx]
    }

    #[inline]
    pub(super) fn color_of(&self, idx: usize) -> Color {
        if idx == NIL {
            Color::Black
        } else {
            self.node_at(idx).color
        }
    }

    #[inline]
    pub(super) fn set_color(&mut self, idx: usize, color: Color) {
        if idx != NIL {
            self.node_at_mut(idx).color = color;
        }
    }

    #[inline]
    pub(super) fn is_red(&self, idx: usize) -> bool {
        self.color_of(idx) == Color::Red
    }

    #[inline]
    pub(super) fn is_black(&self, idx: usize) -> bool {
        self.color_of(idx) == Color::Black
    }

    #[inline]
    pub(super) fn parent_of(&self, idx: usize) -> usize {
        if idx == NIL {
            NIL
        } else {
            self.node_at(idx).parent
        }
    }

    /// Child of `idx` on `side`; `NIL` has only `NIL` children.
    #[inline]
    pub(super) fn child_of(&self, idx: usize, side: Side) -> usize {
        if idx == NIL {
            return NIL;
        }
        let node = self.node_at(idx);
        match side {
            Side::Left => node.left,
            Side::Right => node.right,
        }
    }

    /// Points the `side` link of `idx` at `child`. The child's parent link is
    /// left to the caller.
    #[inline]
    pub(super) fn set_child(&mut self, idx: usize, side: Side, child: usize) {
        let node = self.node_at_mut(idx);
        match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
    }

    /// The side of `parent` that `child` hangs from.
    ///
    /// `child` may be `NIL`, in which case the first empty slot of `parent`
    /// is reported. Only one slot can be empty where this is asked.
    #[inline]
    pub(super) fn side_of(&self, parent: usize, child: usize) -> Side {
        if self.node_at(parent).left == child {
            Side::Left
        } else {
            Side::Right
        }
    }

    #[inline]
    pub(super) fn subtree_count_of(&self, idx: usize) -> usize {
        if idx == NIL {
            0
        } else {
            self.node_at(idx).subtree_count
        }
    }

    pub(super) fn recalculate_subtree_count(&mut self, idx: usize) {
        if idx == NIL {
            return;
        }

        let node = self.node_at(idx);
        let total = node
            .count
            .saturating_add(self.subtree_count_of(node.left))
            .saturating_add(self.subtree_count_of(node.right));

        self.node_at_mut(idx).subtree_count = total;
    }

    pub(super) fn update_subtree_counts_to_root(&mut self, mut idx: usize) {
        while idx != NIL {
            self.recalculate_subtree_count(idx);
            idx = self.node_at(idx).parent;
        }
    }
}
