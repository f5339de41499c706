use thiserror::Error;

/// Failure modes of the matrix engine.
///
/// All of these are fatal: the training loop never catches them, and the
/// operator sugar in `math::matrix` panics with the same messages because
/// `std::ops` traits cannot return `Result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// Two operands with incompatible shapes: unequal shapes for an
    /// elementwise operation, or a left `ncol` that does not match the
    /// right `nrow` for a dot product.
    #[error("shape mismatch: {left_rows}x{left_cols} against {right_rows}x{right_cols}")]
    ShapeMismatch {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    /// Scalar division by zero, or an elementwise division whose divisor
    /// contains a zero element.
    #[error("division by zero")]
    DivisionByZero,

    /// A reduction (`max_element`, `max_index`) over a matrix with zero
    /// elements.
    #[error("reduction over an empty matrix")]
    EmptyOperand,
}
