//! # Error Types
//!
//! Domain-specific error types for cantina-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cantina-core errors (this file)                                       │
//! │  ├── CoreError        - Business rule and state failures               │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  cantina-store errors (separate crate)                                 │
//! │  └── StoreError       - Catalog file failures                          │
//! │                                                                         │
//! │  Terminal errors (in app)                                              │
//! │  └── ApiError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → stdout                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure is a value. Nothing in the core panics on bad input or on
//! an operation that does not fit the current table state.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Error Category
// =============================================================================

/// Coarse grouping of failures, used by front ends to decide how to react.
///
/// | Category       | Caller recovers by                         |
/// |----------------|--------------------------------------------|
/// | `Validation`   | supplying corrected input                  |
/// | `StateConflict`| re-reading table state                     |
/// | `NotFound`     | re-listing valid table numbers / item codes|
/// | `BusinessRule` | removing the offending consumption first   |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    StateConflict,
    NotFound,
    BusinessRule,
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An item with this code is already in the catalog.
    #[error("Item code already exists: {0}")]
    DuplicateCode(String),

    /// No catalog item has this code.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// The item is still referenced by an open table.
    ///
    /// ## User Workflow
    /// ```text
    /// remove-item BURGER
    ///      │
    ///      ▼
    /// Table 2 is occupied and holds a BURGER consumption
    ///      │
    ///      ▼
    /// ItemInUse { code: "BURGER", table: 2 }
    ///      │
    ///      ▼
    /// Operator closes table 2 (or removes the line), then retries
    /// ```
    #[error("Item {code} is in use at table {table}")]
    ItemInUse { code: String, table: u32 },

    /// The table number is not one of the venue's fixed tables.
    #[error("Unknown table: {0}")]
    UnknownTable(u32),

    /// The item has no modifier with this name.
    #[error("Item {item} has no modifier named '{modifier}'")]
    UnknownModifier { item: String, modifier: String },

    /// Opening a table that is already occupied.
    #[error("Table {0} is already occupied")]
    AlreadyOccupied(u32),

    /// Ordering on, removing from, or closing a free table.
    #[error("Table {0} is not occupied")]
    NotOccupied(u32),

    /// Removing a consumption at a position that does not exist.
    #[error("Table {table} has no consumption at position {index} (it has {len})")]
    IndexOutOfRange { table: u32, index: usize, len: usize },

    /// Hour outside 0-23.
    #[error("Invalid hour {0}: must be between 0 and 23")]
    InvalidHour(u32),

    /// Quantity of a consumption is zero or negative.
    #[error("Invalid quantity {0}: must be positive")]
    InvalidQuantity(i64),

    /// Quantity exceeds the per-line maximum.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// A unit price, line total or table total above `MAX_AMOUNT_CENTS`.
    #[error("{what} exceeds maximum allowed ({max})")]
    AmountTooLarge { what: String, max: Money },

    /// Negative modifier quantity, or a boolean modifier chosen more than once.
    #[error("Invalid quantity {quantity} for modifier '{modifier}'")]
    InvalidModifierQuantity { modifier: String, quantity: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Groups the error into the categories front ends react to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            CoreError::InvalidHour(_)
            | CoreError::InvalidQuantity(_)
            | CoreError::QuantityTooLarge { .. }
            | CoreError::InvalidModifierQuantity { .. }
            | CoreError::AmountTooLarge { .. }
            | CoreError::Validation(_) => ErrorCategory::Validation,
            CoreError::AlreadyOccupied(_)
            | CoreError::NotOccupied(_)
            | CoreError::IndexOutOfRange { .. }
            | CoreError::DuplicateCode(_) => ErrorCategory::StateConflict,
            CoreError::ItemNotFound(_)
            | CoreError::UnknownTable(_)
            | CoreError::UnknownModifier { .. } => ErrorCategory::NotFound,
            CoreError::ItemInUse { .. } => ErrorCategory::BusinessRule,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input doesn't meet requirements.
/// Used at construction of Item/Modifier and when parsing text.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Amount above the allowed ceiling.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: Money },

    /// Invalid format (e.g., unparseable price, bad modifier kind).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., two modifiers with the same name).
    #[error("{field} '{value}' appears more than once")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::IndexOutOfRange {
            table: 3,
            index: 4,
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "Table 3 has no consumption at position 4 (it has 2)"
        );

        let err = CoreError::ItemInUse {
            code: "BURGER".to_string(),
            table: 2,
        };
        assert_eq!(err.to_string(), "Item BURGER is in use at table 2");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "code".to_string(),
        };
        assert_eq!(err.to_string(), "code is required");

        let err = ValidationError::Negative {
            field: "day price".to_string(),
        };
        assert_eq!(err.to_string(), "day price must not be negative");

        let err = ValidationError::TooLarge {
            field: "day price".to_string(),
            max: Money::from_cents(9_999_999),
        };
        assert_eq!(err.to_string(), "day price must be at most $99999.99");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            CoreError::AlreadyOccupied(1).category(),
            ErrorCategory::StateConflict
        );
        assert_eq!(CoreError::UnknownTable(9).category(), ErrorCategory::NotFound);
        assert_eq!(
            CoreError::ItemNotFound("X".into()).category(),
            ErrorCategory::NotFound
        );
        assert_eq!(
            CoreError::ItemInUse {
                code: "X".into(),
                table: 1
            }
            .category(),
            ErrorCategory::BusinessRule
        );
        assert_eq!(CoreError::InvalidHour(24).category(), ErrorCategory::Validation);
    }
}
