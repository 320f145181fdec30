/// Errors returned by the fallible operations of [`RbTree`](crate::RbTree) and
/// [`FloatMultiset`](crate::FloatMultiset).
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// An absent key (`None`, or NaN in the float front-end) was passed where a
    /// present key is required.
    #[error("Absent keys cannot be stored or looked up.")]
    InvalidInput,

    /// The key passed to a neighbour query is not stored in the tree.
    #[error("The key is not stored in this tree.")]
    NotFound,

    /// A structural primitive was called on a node that cannot support it.
    /// Only a defect in the balancing code can produce this.
    #[error("Red-black structure violated: {0}")]
    InvariantViolated(&'static str),
}
