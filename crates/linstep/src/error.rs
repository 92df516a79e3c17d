//! Errors raised by the operation services.

use linstep_linalg::DimensionError;
use thiserror::Error;

/// Result type of fallible operations.
pub type Result<T> = std::result::Result<T, MathError>;

/// An operation could not be carried out on the given inputs.
///
/// Every variant describes a caller-correctable condition that is detected before any partial
/// result is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MathError {
    /// A matrix could not be constructed or accessed with the requested shape.
    #[error(transparent)]
    Dimension(#[from] DimensionError),

    /// The operand shapes are incompatible for `operation`.
    #[error("cannot {operation} a {}x{} matrix and a {}x{} matrix", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        operation: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// The operation is only defined for square matrices.
    #[error("operation requires a square matrix, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// The operation needs at least one input element.
    #[error("{operation} requires at least one vector")]
    EmptyInput { operation: &'static str },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A division by a zero (or numerically negligible) magnitude would be required.
    #[error("division by zero in {operation}")]
    DivisionByZero { operation: &'static str },

    /// An intermediate value of `operation` overflowed or was not a number, so no meaningful result
    /// can be reported.
    #[error("{operation} produced a non-finite intermediate value")]
    NonFinite { operation: &'static str },

    /// The input vectors are linearly dependent; `index` (0-based) is the first vector that lies
    /// in the span of the ones before it.
    #[error("vectors are linearly dependent: vector {} lies in the span of the previous ones", .index + 1)]
    LinearDependence { index: usize },

    /// The matrix has no inverse.
    #[error("matrix is singular and cannot be inverted")]
    Singular,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = MathError::DimensionMismatch {
            operation: "add",
            left: (2, 3),
            right: (3, 2),
        };
        assert_eq!(err.to_string(), "cannot add a 2x3 matrix and a 3x2 matrix");
        assert_eq!(
            MathError::LinearDependence { index: 1 }.to_string(),
            "vectors are linearly dependent: vector 2 lies in the span of the previous ones"
        );
        assert_eq!(
            MathError::NonFinite { operation: "angle" }.to_string(),
            "angle produced a non-finite intermediate value"
        );
        assert_eq!(
            MathError::from(DimensionError::Empty { rows: 0, cols: 2 }).to_string(),
            "matrix dimensions must be positive, got 0x2"
        );
    }
}
