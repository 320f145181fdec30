use core::cmp::Ordering;

use super::{NIL, RbTree, Side};
use crate::TreeError;

impl<T> RbTree<T> {
    /// Returns the smallest stored key, or `None` if the tree is empty.
    pub fn minimum(&self) -> Option<&T> {
        if self.root == NIL {
            return None;
        }
        Some(&self.node_at(self.outermost(self.root, Side::Left)).key)
    }

    /// Returns the largest stored key, or `None` if the tree is empty.
    pub fn maximum(&self) -> Option<&T> {
        if self.root == NIL {
            return None;
        }
        Some(&self.node_at(self.outermost(self.root, Side::Right)).key)
    }

    /// Black height of the tree.
    ///
    /// Counts the black nodes on a path from the root down to a nil leaf, the
    /// root included and the nil leaf excluded.
    ///
    /// # Returns
    ///
    /// * `isize` - The black height, or `-1` if the tree is empty or two
    ///   paths disagree
    pub fn black_height(&self) -> isize {
        if self.root == NIL {
            return -1;
        }
        self.subtree_black_height(self.root)
    }

    /// Returns the element at position `k` (0-based) of the in-order
    /// sequence, duplicates included.
    ///
    /// # Arguments
    ///
    /// * `k` - The rank to look up
    ///
    /// # Returns
    ///
    /// * `Option<&T>` - The element, or `None` if `k >= size()`
    pub fn select(&self, k: usize) -> Option<&T> {
        if k >= self.size {
            return None;
        }

        let mut current = self.root;
        let mut remaining_rank = k;

        while current != NIL {
            let node = self.node_at(current);
            let left_count = self.subtree_count_of(node.left);

            if remaining_rank < left_count {
                current = node.left;
            } else if remaining_rank < left_count + node.count {
                return Some(&node.key);
            } else {
                remaining_rank -= left_count + node.count;
                current = node.right;
            }
        }
        None
    }

    /// Nearest-rank quantile, rounding down between ranks.
    ///
    /// # Arguments
    ///
    /// * `q` - The quantile, clamped to `[0, 1]` (NaN reads as 0)
    ///
    /// # Returns
    ///
    /// * `Option<&T>` - The element, or `None` if the tree is empty
    pub fn quantile(&self, q: f64) -> Option<&T> {
        self.select(self.quantile_rank(q)?)
    }

    /// Lower median of the stored elements.
    pub fn median(&self) -> Option<&T> {
        self.quantile(0.5)
    }

    fn quantile_rank(&self, q: f64) -> Option<usize> {
        if self.size == 0 {
            return None;
        }

        let rank = if q >= 1.0 {
            self.size - 1
        } else if q > 0.0 {
            let exact_position = q * (self.size - 1) as f64;
            exact_position as usize
        } else {
            0
        };
        Some(rank)
    }

    /// Last node reached from `node` by following `side` links: the subtree
    /// minimum for `Side::Left`, the maximum for `Side::Right`.
    pub(super) fn outermost(&self, mut node: usize, side: Side) -> usize {
        loop {
            let next = self.child_of(node, side);
            if next == NIL {
                return node;
            }
            node = next;
        }
    }

    /// In-order neighbour of `node` towards `side`: the successor for
    /// `Side::Right`, the predecessor for `Side::Left`. `NIL` past either end.
    pub(super) fn neighbour_of(&self, node: usize, side: Side) -> usize {
        let child = self.child_of(node, side);
        if child != NIL {
            return self.outermost(child, side.opposite());
        }

        let mut current = node;
        let mut parent = self.parent_of(node);
        while parent != NIL && current == self.child_of(parent, side) {
            current = parent;
            parent = self.parent_of(parent);
        }
        parent
    }

    fn subtree_black_height(&self, node: usize) -> isize {
        if node == NIL {
            return 0;
        }

        let node_ref = self.node_at(node);
        let left_height = self.subtree_black_height(node_ref.left);
        let right_height = self.subtree_black_height(node_ref.right);

        if left_height < 0 || left_height != right_height {
            return -1;
        }

        if self.is_black(node) {
            left_height + 1
        } else {
            left_height
        }
    }

    fn key_at(&self, node: usize) -> Option<&T> {
        if node == NIL {
            None
        } else {
            Some(&self.node_at(node).key)
        }
    }
}

impl<T: Ord> RbTree<T> {
    /// Returns `true` if at least one occurrence of `key` is stored.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to look up, `None` is rejected
    pub fn contains<'a>(&self, key: impl Into<Option<&'a T>>) -> Result<bool, TreeError>
    where
        T: 'a,
    {
        let key = key.into().ok_or(TreeError::InvalidInput)?;
        Ok(self.find_node(key) != NIL)
    }

    /// Returns the multiplicity of `key`, 0 when it is not stored.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to look up, `None` is rejected
    pub fn count<'a>(&self, key: impl Into<Option<&'a T>>) -> Result<usize, TreeError>
    where
        T: 'a,
    {
        let key = key.into().ok_or(TreeError::InvalidInput)?;
        let node = self.find_node(key);
        Ok(if node == NIL {
            0
        } else {
            self.node_at(node).count
        })
    }

    /// Returns the largest stored key strictly smaller than `key`.
    ///
    /// # Arguments
    ///
    /// * `key` - A key stored in the tree
    ///
    /// # Returns
    ///
    /// * `Result<Option<&T>, TreeError>` - `None` when `key` is the minimum,
    ///   `InvalidInput` for `None`, `NotFound` if `key` is not stored
    pub fn predecessor<'a>(
        &self,
        key: impl Into<Option<&'a T>>,
    ) -> Result<Option<&T>, TreeError>
    where
        T: 'a,
    {
        let node = self.find_existing(key.into())?;
        Ok(self.key_at(self.neighbour_of(node, Side::Left)))
    }

    /// Returns the smallest stored key strictly greater than `key`.
    ///
    /// # Arguments
    ///
    /// * `key` - A key stored in the tree
    ///
    /// # Returns
    ///
    /// * `Result<Option<&T>, TreeError>` - `None` when `key` is the maximum,
    ///   `InvalidInput` for `None`, `NotFound` if `key` is not stored
    pub fn successor<'a>(&self, key: impl Into<Option<&'a T>>) -> Result<Option<&T>, TreeError>
    where
        T: 'a,
    {
        let node = self.find_existing(key.into())?;
        Ok(self.key_at(self.neighbour_of(node, Side::Right)))
    }

    /// Number of stored elements strictly smaller than `key`, duplicates
    /// included. `key` itself does not need to be stored.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to rank, `None` is rejected
    pub fn rank<'a>(&self, key: impl Into<Option<&'a T>>) -> Result<usize, TreeError>
    where
        T: 'a,
    {
        let key = key.into().ok_or(TreeError::InvalidInput)?;
        let mut current = self.root;
        let mut smaller = 0;

        while current != NIL {
            let node = self.node_at(current);
            match key.cmp(&node.key) {
                Ordering::Less => current = node.left,
                Ordering::Equal => return Ok(smaller + self.subtree_count_of(node.left)),
                Ordering::Greater => {
                    smaller += self.subtree_count_of(node.left) + node.count;
                    current = node.right;
                }
            }
        }
        Ok(smaller)
    }

    /// Arena index of the node holding `key`, `NIL` if there is none.
    pub(super) fn find_node(&self, key: &T) -> usize {
        let mut current = self.root;

        while current != NIL {
            let node = self.node_at(current);
            match key.cmp(&node.key) {
                Ordering::Equal => return current,
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
            }
        }
        NIL
    }

    fn find_existing(&self, key: Option<&T>) -> Result<usize, TreeError> {
        let key = key.ok_or(TreeError::InvalidInput)?;
        match self.find_node(key) {
            NIL => Err(TreeError::NotFound),
            node => Ok(node),
        }
    }
}
