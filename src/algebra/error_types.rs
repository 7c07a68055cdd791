use thiserror::Error;

/// Error type for malformed or incompatible sparse matrix data
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparseFormatError {
    /// Dimension fields and array lengths disagree, or blocks to be
    /// stacked have different widths
    #[error("incompatible matrix dimensions")]
    IncompatibleDimension,
    /// A row index is out of bounds or rows are unsorted within a column
    #[error("bad row index data")]
    BadRowval,
    #[error("column pointers are not monotone")]
    BadColptr,
    #[error("no blocks to stack")]
    EmptyStack,
}
