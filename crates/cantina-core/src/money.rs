//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A tab of 3 beers at 3.10 plus an extra at 0.20 must total 9.50,       │
//! │  not 9.499999999.                                                       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    310 × 3 + 20 = 950 cents, exactly                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cantina_core::money::Money;
//!
//! let price = Money::from_cents(1150); // 11.50
//! let line = price * 2;                // 23.00
//! assert_eq!(line.amount(), "23.00");
//!
//! // Text from the catalog file is parsed without floats
//! assert_eq!(Money::parse("1.5").unwrap().cents(), 150);
//! ```

use serde::Serialize;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

use crate::error::ValidationError;
use crate::MAX_PRICE_CENTS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// Item.prices ──► pricing::base_price ──► Consumption.base_price
///                                              │
/// Modifier.price_per_unit × qty ───────────────┤
///                                              ▼
///                         Consumption.unit_price × quantity
///                                              │
///                                              ▼
///                         Consumption.line_total ──► Ticket.total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use cantina_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -5.50, not -4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Parses a decimal amount such as `"10"`, `"10.5"` or `"10.50"`.
    ///
    /// At most two fraction digits are accepted; no float conversion
    /// happens at any point. Amounts beyond `MAX_PRICE_CENTS` either way
    /// are rejected.
    ///
    /// ## Example
    /// ```rust
    /// use cantina_core::money::Money;
    ///
    /// assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
    /// assert_eq!(Money::parse(" 3 ").unwrap().cents(), 300);
    /// assert!(Money::parse("1.234").is_err());
    /// assert!(Money::parse("abc").is_err());
    /// assert!(Money::parse("100000").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Money, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: format!("'{}' {}", text.trim(), reason),
        };

        let trimmed = text.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (major_str, minor_str) = match digits.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (digits, ""),
        };

        if major_str.is_empty() || !major_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("is not a decimal amount"));
        }
        if minor_str.len() > 2 || !minor_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("must have at most two decimals"));
        }
        if digits.ends_with('.') {
            return Err(invalid("is not a decimal amount"));
        }

        let major: i64 = major_str
            .parse()
            .map_err(|_| invalid("is out of range"))?;
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().map_err(|_| invalid("is out of range"))? * 10,
            _ => minor_str.parse().map_err(|_| invalid("is out of range"))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .filter(|c| *c <= MAX_PRICE_CENTS)
            .ok_or_else(|| invalid("is out of range"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use cantina_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1150);
    /// assert_eq!(unit_price.checked_mul(2).unwrap().cents(), 2300);
    /// assert!(Money::from_cents(i64::MAX).checked_mul(2).is_none());
    /// ```
    #[inline]
    pub const fn checked_mul(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Renders the bare amount with two decimals (`23.00`), as printed in
    /// receipt columns and in the catalog file.
    pub fn amount(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money with a currency sign, for logs and status lines.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display_and_amount() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(Money::from_cents(2300).amount(), "23.00");
        assert_eq!(Money::from_cents(5).amount(), "0.05");
        assert_eq!(Money::zero().amount(), "0.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10.05").unwrap().cents(), 1005);
        assert_eq!(Money::parse("0.99").unwrap().cents(), 99);
        assert_eq!(Money::parse("-2.50").unwrap().cents(), -250);

        assert!(Money::parse("").is_err());
        assert!(Money::parse("10.").is_err());
        assert!(Money::parse(".5").is_err());
        assert!(Money::parse("1.234").is_err());
        assert!(Money::parse("1,50").is_err());
        assert!(Money::parse("ten").is_err());
        assert!(Money::parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_parse_ceiling() {
        assert_eq!(Money::parse("99999.99").unwrap().cents(), MAX_PRICE_CENTS);
        assert!(Money::parse("100000").is_err());
        assert!(Money::parse("-100000").is_err());
        assert!(Money::parse("90000000000000000").is_err());
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Money::from_cents(1150);
        assert_eq!(a.checked_mul(3), Some(Money::from_cents(3450)));
        assert_eq!(a.checked_add(a), Some(Money::from_cents(2300)));

        let big = Money::from_cents(i64::MAX / 2 + 1);
        assert_eq!(big.checked_mul(2), None);
        assert_eq!(big.checked_add(big), None);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(150);

        assert_eq!((a + b).cents(), 1150);
        assert_eq!((a - b).cents(), 850);
        assert_eq!((a * 3).cents(), 3000);

        let mut c = a;
        c += b;
        assert_eq!(c.cents(), 1150);
    }

    #[test]
    fn test_sum() {
        let lines = [Money::from_cents(2300), Money::from_cents(450)];
        let total: Money = lines.iter().sum();
        assert_eq!(total.cents(), 2750);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }
}
