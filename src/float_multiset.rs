use num_traits::NumCast;
use ordered_float::{FloatCore, OrderedFloat};

use crate::{RbTree, TreeError};

/// # Floating-Point Multiset
///
/// A thin front-end over [`RbTree`] for primitive floats. Values are stored
/// as [`OrderedFloat`] so they get a total order, and NaN takes the role of
/// the absent key: it is rejected with [`TreeError::InvalidInput`] by every
/// keyed operation instead of being stored.
///
/// On top of the tree queries it offers interpolated quantiles, which only
/// make sense for numeric keys.
#[derive(Debug, Clone)]
pub struct FloatMultiset<F>(RbTree<OrderedFloat<F>>);

impl<F: FloatCore> Default for FloatMultiset<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FloatCore> FloatMultiset<F> {
    /// Creates an empty multiset
    pub fn new() -> Self {
        Self(RbTree::new())
    }

    /// Creates an empty multiset with room for `capacity` distinct values
    ///
    /// # Arguments
    ///
    /// * `capacity` - The number of distinct values to pre-allocate for
    pub fn with_capacity(capacity: usize) -> Self {
        Self(RbTree::with_capacity(capacity))
    }

    /// Inserts one occurrence of `value`
    ///
    /// # Arguments
    ///
    /// * `value` - The value to insert
    ///
    /// # Returns
    ///
    /// * `Result<usize, TreeError>` - Comparisons made during the descent,
    ///   or `InvalidInput` if `value` is NaN
    pub fn insert(&mut self, value: F) -> Result<usize, TreeError> {
        self.0.insert(Self::key(value))
    }

    /// Removes one occurrence of `value`
    ///
    /// # Returns
    ///
    /// * `Result<bool, TreeError>` - `true` if an occurrence was removed,
    ///   `InvalidInput` if `value` is NaN
    pub fn remove(&mut self, value: F) -> Result<bool, TreeError> {
        self.0.remove(Self::key(value).as_ref())
    }

    /// Returns `true` if `value` is stored at least once
    pub fn contains(&self, value: F) -> Result<bool, TreeError> {
        self.0.contains(Self::key(value).as_ref())
    }

    /// Returns the multiplicity of `value`
    pub fn count(&self, value: F) -> Result<usize, TreeError> {
        self.0.count(Self::key(value).as_ref())
    }

    /// Total number of stored values, duplicates included
    #[inline]
    pub const fn size(&self) -> usize {
        self.0.size()
    }

    /// Number of distinct stored values
    #[inline]
    pub const fn number_of_nodes(&self) -> usize {
        self.0.number_of_nodes()
    }

    /// Returns `true` if nothing is stored
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Smallest stored value
    pub fn min(&self) -> Option<F> {
        self.0.minimum().map(|value| value.into_inner())
    }

    /// Largest stored value
    pub fn max(&self) -> Option<F> {
        self.0.maximum().map(|value| value.into_inner())
    }

    /// Median of the stored values, averaging the two middle values when the
    /// size is even
    pub fn median(&self) -> Option<F> {
        let size = self.0.size();
        if size == 0 {
            return None;
        }

        let mid = size / 2;
        let upper = self.select(mid)?;
        if size % 2 == 1 {
            return Some(upper);
        }

        let lower = self.select(mid - 1)?;
        let _2 = F::one() + F::one();
        Some((lower + upper) / _2)
    }

    /// Quantile with linear interpolation between adjacent ranks
    ///
    /// # Arguments
    ///
    /// * `q` - The quantile, clamped to `[0, 1]` (NaN reads as 0)
    ///
    /// # Returns
    ///
    /// * `Option<F>` - The quantile, or `None` if the multiset is empty
    pub fn quantile(&self, q: f64) -> Option<F> {
        let size = self.0.size();
        if size == 0 {
            return None;
        }

        let q = if q.is_nan() { 0.0 } else { q.clamp(0.0, 1.0) };
        let pos = q * (size - 1) as f64;
        let lower_index = pos as usize;
        let lower_value = self.select(lower_index)?;

        let fraction = pos - lower_index as f64;
        if fraction <= 0.0 {
            return Some(lower_value);
        }

        let upper_value = self.select(lower_index + 1)?;
        let weight = <F as NumCast>::from(fraction)?;
        Some(lower_value + weight * (upper_value - lower_value))
    }

    /// Removes every stored value
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// The underlying tree, for ordered traversal and neighbour queries
    pub fn as_tree(&self) -> &RbTree<OrderedFloat<F>> {
        &self.0
    }

    #[inline]
    fn select(&self, k: usize) -> Option<F> {
        self.0.select(k).map(|value| value.into_inner())
    }

    #[inline]
    fn key(value: F) -> Option<OrderedFloat<F>> {
        if value.is_nan() {
            None
        } else {
            Some(OrderedFloat(value))
        }
    }
}
