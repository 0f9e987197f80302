//! Error types for kernel evaluation and approximation

use linfa_linalg::LinalgError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KernelError {
    #[error("Invalid parameter {name}: expected {constraint}, got {value}")]
    InvalidParameter {
        name: &'static str,
        constraint: &'static str,
        value: String,
    },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Index {index} out of bounds for {len} observations")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Kernel matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Invalid sample size {size} for {n_obs} observations: {reason}")]
    InvalidSampleSize {
        size: usize,
        n_obs: usize,
        reason: &'static str,
    },

    #[error("Invalid sample index {index} for {n_obs} observations")]
    InvalidSampleIndex { index: usize, n_obs: usize },

    #[error("Sample index {0} selected more than once")]
    DuplicateSampleIndex(usize),

    #[error("Degenerate sample: no eigenvalue above tolerance {tolerance}")]
    DegenerateSample { tolerance: String },

    #[error("Linear algebra error: {0}")]
    Linalg(#[from] LinalgError),

    #[error("Empty dataset")]
    EmptyDataset,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl KernelError {
    /// Build an `InvalidParameter` error for a scalar that left its domain
    pub fn invalid<T: std::fmt::Display>(
        name: &'static str,
        constraint: &'static str,
        value: T,
    ) -> Self {
        Self::InvalidParameter {
            name,
            constraint,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, KernelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = KernelError::invalid("alpha", "alpha > 0", -1.0);
        assert_eq!(
            err.to_string(),
            "Invalid parameter alpha: expected alpha > 0, got -1"
        );
    }

    #[test]
    fn test_shape_mismatch_message() {
        let err = KernelError::ShapeMismatch {
            expected: (3, 3),
            actual: (3, 2),
        };
        assert_eq!(
            err.to_string(),
            "Shape mismatch: expected (3, 3), got (3, 2)"
        );
    }
}
