use alloc::vec::Vec;
use core::iter::FusedIterator;

use super::{NIL, RbTree, Side};

/// In-order iterator over the elements of an [`RbTree`].
///
/// Each key is yielded once per stored occurrence, so the iterator produces
/// exactly [`RbTree::size`] items in non-decreasing order.
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    tree: &'a RbTree<T>,
    /// Node whose key is being yielded, `NIL` once exhausted
    node: usize,
    /// Occurrences of the current key already yielded
    yielded: usize,
    /// Elements left in the whole traversal
    remaining: usize,
}

impl<T> RbTree<T> {
    /// Iterates over all elements in ascending order, repeating each key as
    /// many times as it was inserted.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            tree: self,
            node: self.outermost(self.root, Side::Left),
            yielded: 0,
            remaining: self.size,
        }
    }

    /// Collects the in-order sequence of all elements, duplicates included.
    ///
    /// # Returns
    ///
    /// * `Vec<T>` - A non-decreasing vector of length `size()`
    pub fn in_order_visit(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut visited = Vec::with_capacity(self.size);
        self.collect_in_order(self.root, &mut visited);
        visited
    }

    fn collect_in_order(&self, node_idx: usize, visited: &mut Vec<T>)
    where
        T: Clone,
    {
        if node_idx == NIL {
            return;
        }

        let node = self.node_at(node_idx);
        self.collect_in_order(node.left, visited);
        for _ in 0..node.count {
            visited.push(node.key.clone());
        }
        self.collect_in_order(node.right, visited);
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.node == NIL {
            return None;
        }

        let tree = self.tree;
        let node = tree.node_at(self.node);
        self.yielded += 1;
        self.remaining -= 1;
        if self.yielded == node.count {
            self.yielded = 0;
            self.node = tree.neighbour_of(self.node, Side::Right);
        }
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
