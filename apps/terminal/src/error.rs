//! # API Error Type
//!
//! Unified error type for terminal commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Cantina POS                            │
//! │                                                                         │
//! │  Operator types: close 4                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function → Result<T, ApiError>                          │  │
//! │  │         │                                                        │  │
//! │  │  Parse error?  ─── BAD_COMMAND ─────────────────────┐            │  │
//! │  │  Core error?   ─── CoreError::category() ───────── ApiError ────►│  │
//! │  │  File error?   ─── StoreError ──────────────────────┘            │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stdout: {"code":"STATE_CONFLICT","message":"Table 4 is not occupied"}  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here ends the session; every error is printed and the loop
//! continues with the next line.

use cantina_core::{CoreError, ErrorCategory};
use cantina_store::StoreError;
use serde::Serialize;

/// Error printed when a command fails.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Item not found: WINE"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown table, item or modifier
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Operation does not fit the current table or catalog state
    StateConflict,

    /// Business rule prevents the operation (item in use)
    BusinessRule,

    /// Catalog file could not be read or written
    StorageError,

    /// The command line could not be parsed
    BadCommand,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn bad_command(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadCommand, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Renders the error as a single JSON line.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.to_string())
    }
}

impl From<ErrorCategory> for ErrorCode {
    fn from(category: ErrorCategory) -> Self {
        match category {
            ErrorCategory::Validation => ErrorCode::ValidationError,
            ErrorCategory::StateConflict => ErrorCode::StateConflict,
            ErrorCategory::NotFound => ErrorCode::NotFound,
            ErrorCategory::BusinessRule => ErrorCode::BusinessRule,
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::new(err.category().into(), err.to_string())
    }
}

/// Converts catalog file errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(e) => e.into(),
            StoreError::InvalidRow { reason, .. } => ApiError::validation(reason),
            StoreError::Csv(e) => ApiError::validation(e.to_string()),
            StoreError::Io(e) => {
                tracing::error!("Catalog file error: {}", e);
                ApiError::new(ErrorCode::StorageError, "Catalog file operation failed")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
