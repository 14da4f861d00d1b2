//! Error types for StratumDB.

use thiserror::Error;

/// Result type alias using StratumError.
pub type Result<T> = std::result::Result<T, StratumError>;

/// Errors that can occur in StratumDB operations.
#[derive(Debug, Error)]
pub enum StratumError {
    // Load errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid row at line {line}: {reason}")]
    InvalidRow { line: usize, reason: String },

    #[error("Row {row} has {actual} bytes, expected {expected}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    // Field access errors
    #[error("Field out of range: row {row}, col {col}")]
    FieldOutOfRange { row: usize, col: usize },

    // Region errors
    #[error("Offset {offset} out of bounds for region of {size} bytes")]
    OffsetOutOfBounds { offset: usize, size: usize },

    #[error("Offset {offset} is not aligned to the field width")]
    OffsetMisaligned { offset: usize },
}
