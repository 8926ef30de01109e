//! # Store Error Types
//!
//! Error types for catalog file operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / csv::Error / CoreError                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds row context                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in terminal app) ← Shown to the operator                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use cantina_core::{CoreError, ValidationError};
use thiserror::Error;

/// Catalog file errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing or renaming the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The delimited text could not be read or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row has the wrong shape or an unparseable field.
    ///
    /// ## When This Occurs
    /// - Fewer than 6 or more than 7 fields
    /// - A price that is not a decimal amount
    #[error("Invalid row {line}: {reason}")]
    InvalidRow { line: u64, reason: String },

    /// The row parsed but the item it describes is not valid.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(err.into())
    }
}

impl StoreError {
    pub fn invalid_row(line: u64, reason: impl Into<String>) -> Self {
        StoreError::InvalidRow {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
