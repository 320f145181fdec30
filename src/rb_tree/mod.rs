use alloc::vec::Vec;

use crate::TreeError;

mod node;
use node::{Color, NIL, Node, Side};

#[cfg(any(test, debug_assertions))]
mod audit;
mod deletion;
mod display;
mod insertion;
mod iter;
mod queries;
mod rotation;

pub use iter::Iter;

#[cfg(test)]
mod tests;

/// An ordered multiset stored in a Red-Black tree.
///
/// Every distinct key occupies one node; repeated insertions of an equal key
/// only bump that node's count. Lookups, insertions and removals take
/// O(log n) in the number of distinct keys.
///
/// Nodes live in a dense arena and refer to each other by index. A single
/// `NIL` index plays the part of every missing child and of the root's
/// parent, and always reads as black.
///
/// Keyed operations accept either a plain key or an `Option`; passing `None`
/// (an absent key) fails with [`TreeError::InvalidInput`] before anything is
/// touched.
///
/// ```
/// use rb_multiset::RbTree;
///
/// let mut tree: RbTree<i32> = RbTree::new();
/// for key in [10, 5, 15, 5] {
///     tree.insert(key)?;
/// }
///
/// assert_eq!(tree.size(), 4);
/// assert_eq!(tree.number_of_nodes(), 3);
/// assert_eq!(tree.count(&5)?, 2);
/// assert_eq!(tree.successor(&10)?, Some(&15));
/// assert_eq!(tree.in_order_visit(), vec![5, 5, 10, 15]);
/// # Ok::<(), rb_multiset::TreeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RbTree<T> {
    /// Dense arena of live nodes, one per distinct key
    nodes: Vec<Node<T>>,

    /// Index of the root node in the arena
    /// Equal to `NIL` when the tree is empty
    root: usize,

    /// Total number of elements including all duplicates
    size: usize,

    /// Number of distinct keys currently stored in the tree
    number_of_nodes: usize,
}

impl<T> Default for RbTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RbTree<T> {
    /// Creates an empty tree.
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: NIL,
            size: 0,
            number_of_nodes: 0,
        }
    }

    /// Creates an empty tree with room for `capacity` distinct keys before
    /// the arena reallocates.
    ///
    /// # Arguments
    ///
    /// * `capacity` - The number of distinct keys to pre-allocate for
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: NIL,
            size: 0,
            number_of_nodes: 0,
        }
    }

    /// Total number of stored elements, counting every duplicate.
    #[inline]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Number of distinct keys stored.
    #[inline]
    pub const fn number_of_nodes(&self) -> usize {
        self.number_of_nodes
    }

    /// Returns `true` if the tree stores no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.root == NIL
    }

    /// Number of distinct keys the arena can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Releases spare arena capacity.
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
    }

    /// Removes every element, keeping the allocated arena.
    pub fn clear(&mut self) {
        log::debug!(
            "rb_tree: clearing {} nodes ({} elements)",
            self.number_of_nodes,
            self.size
        );
        self.nodes.clear();
        self.root = NIL;
        self.size = 0;
        self.number_of_nodes = 0;
    }
}

impl<T: Ord> RbTree<T> {
    /// Creates a tree holding a single occurrence of `key`.
    ///
    /// # Arguments
    ///
    /// * `key` - The first key, `None` is rejected
    ///
    /// # Returns
    ///
    /// * `Result<Self, TreeError>` - The tree, or `InvalidInput` for `None`
    pub fn singleton(key: impl Into<Option<T>>) -> Result<Self, TreeError> {
        let key = key.into().ok_or(TreeError::InvalidInput)?;
        let mut tree = Self::with_capacity(1);
        let idx = tree.allocate_node(key, NIL);
        tree.node_at_mut(idx).color = Color::Black;
        tree.root = idx;
        tree.size = 1;
        tree.number_of_nodes = 1;
        Ok(tree)
    }
}

impl<T: Ord> PartialEq for RbTree<T> {
    /// Two trees are equal when they hold the same multiset, whatever their shape.
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<T: Ord> Eq for RbTree<T> {}

impl<'a, T> IntoIterator for &'a RbTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
