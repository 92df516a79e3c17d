use thiserror::Error;

/// Error returned when a [`Matrix`][crate::Matrix] would be created with, or accessed outside of,
/// an invalid shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimensionError {
    /// A matrix must have at least one row and one column.
    #[error("matrix dimensions must be positive, got {rows}x{cols}")]
    Empty { rows: usize, cols: usize },

    /// The data does not contain the declared number of rows.
    #[error("matrix declared with {expected} rows, but data has {found}")]
    RowCount { expected: usize, found: usize },

    /// A row does not contain the declared number of columns.
    #[error("row {row} of the matrix has {found} elements, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// An element access was outside of the matrix.
    #[error("element ({row}, {col}) is out of bounds for a {rows}x{cols} matrix")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}
