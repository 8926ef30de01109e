//! # Validation Module
//!
//! Input validation for catalog entries, orders and the venue clock.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end / catalog file                                     │
//! │  ├── Tokenizing, field counts                                          │
//! │  └── Immediate operator feedback                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Item::new / Modifier::new reject bad codes, names, prices         │
//! │  └── Venue operations reject bad hours and quantities                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Types                                                        │
//! │  └── Constructed values are immutable, so they stay valid              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::{MAX_ITEM_QUANTITY, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Characters the catalog file format reserves as separators.
const RESERVED_CHARS: [char; 3] = [',', ';', ':'];

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item code (the catalog primary key).
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only letters, digits, hyphens, underscores
///
/// ## Example
/// ```rust
/// use cantina_core::validation::validate_item_code;
///
/// assert!(validate_item_code("BEER-PINT").is_ok());
/// assert!(validate_item_code("").is_err());
/// assert!(validate_item_code("has space").is_err());
/// ```
pub fn validate_item_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.chars().count() > 50 {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: 50,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates an item display name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
/// - No commas (the catalog file is comma-delimited)
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    if name.contains(',') {
        return Err(ValidationError::InvalidFormat {
            field: "name".to_string(),
            reason: "must not contain commas".to_string(),
        });
    }

    Ok(())
}

/// Validates a modifier name.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - None of `,` `;` `:` (separators of the modifier string)
pub fn validate_modifier_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "modifier name".to_string(),
        });
    }

    if name.chars().count() > 50 {
        return Err(ValidationError::TooLong {
            field: "modifier name".to_string(),
            max: 50,
        });
    }

    if name.contains(&RESERVED_CHARS[..]) {
        return Err(ValidationError::InvalidFormat {
            field: "modifier name".to_string(),
            reason: "must not contain ',', ';' or ':'".to_string(),
        });
    }

    Ok(())
}

/// Validates the opaque image reference (only the file-format separators matter).
pub fn validate_image_ref(image_ref: &str) -> ValidationResult<()> {
    if image_ref.contains(',') {
        return Err(ValidationError::InvalidFormat {
            field: "image".to_string(),
            reason: "must not contain commas".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items, free extras)
/// - Must not exceed MAX_PRICE_CENTS (99,999.99)
///
/// ## Example
/// ```rust
/// use cantina_core::money::Money;
/// use cantina_core::validation::validate_price;
///
/// assert!(validate_price("day price", Money::from_cents(1099)).is_ok());
/// assert!(validate_price("day price", Money::zero()).is_ok());
/// assert!(validate_price("day price", Money::from_cents(-100)).is_err());
/// assert!(validate_price("day price", Money::from_cents(10_000_000)).is_err());
/// ```
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    if price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::TooLarge {
            field: field.to_string(),
            max: Money::from_cents(MAX_PRICE_CENTS),
        });
    }

    Ok(())
}

/// Validates the quantity of a consumption line.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// order 2 BEER 0
///       │
///       ▼
/// validate_quantity(0) ← THIS FUNCTION
///       │
///       ├── qty <= 0?  → InvalidQuantity
///       ├── qty > 999? → QuantityTooLarge
///       └── OK → price and append the consumption
/// ```
pub fn validate_quantity(qty: i64) -> CoreResult<()> {
    if qty <= 0 {
        return Err(CoreError::InvalidQuantity(qty));
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(CoreError::QuantityTooLarge {
            requested: qty,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates an hour of the day (0-23).
///
/// ## Example
/// ```rust
/// use cantina_core::validation::validate_hour;
///
/// assert!(validate_hour(0).is_ok());
/// assert!(validate_hour(23).is_ok());
/// assert!(validate_hour(24).is_err());
/// ```
pub fn validate_hour(hour: u32) -> CoreResult<()> {
    if hour > 23 {
        return Err(CoreError::InvalidHour(hour));
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
