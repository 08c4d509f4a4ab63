//! Error types for parmul operations

use thiserror::Error;

/// Result type for parmul operations
pub type Result<T> = std::result::Result<T, ParmulError>;

/// Errors that can occur during parmul operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParmulError {
    /// Inner dimensions of a multiplication do not match
    #[error("Dimension mismatch: {left_rows}x{left_cols} x {right_rows}x{right_cols} (inner dimensions {left_cols} and {right_rows} must match)")]
    DimensionMismatch {
        /// Rows of the left operand
        left_rows: usize,
        /// Columns of the left operand
        left_cols: usize,
        /// Rows of the right operand
        right_rows: usize,
        /// Columns of the right operand
        right_cols: usize,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_error() {
        let err = ParmulError::DimensionMismatch {
            left_rows: 2,
            left_cols: 3,
            right_rows: 4,
            right_cols: 2,
        };
        assert_eq!(
            err.to_string(),
            "Dimension mismatch: 2x3 x 4x2 (inner dimensions 3 and 4 must match)"
        );
    }

    #[test]
    fn test_invalid_input_error() {
        let err = ParmulError::InvalidInput("Empty matrix".to_string());
        assert_eq!(err.to_string(), "Invalid input: Empty matrix");
    }

    #[test]
    fn test_error_equality() {
        let err1 = ParmulError::InvalidInput("x".to_string());
        let err2 = ParmulError::InvalidInput("x".to_string());
        assert_eq!(err1, err2);
    }
}
