//! # Pricing Engine
//!
//! Pure functions that turn an item, a clock hour, the happy-hour flag and
//! a set of chosen modifiers into a frozen unit price and line total.
//!
//! ## Price Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  happy hour on? ──yes──► item.happy_hour ─────────┐                    │
//! │       │ no                                         │                    │
//! │       ▼                                            ▼                    │
//! │  DayPart::for_hour(h)                         base_price                │
//! │   ├── Day   (06:00-19:59) ► item.day ─────────────►│                    │
//! │   └── Night (20:00-05:59) ► item.night ───────────►│                    │
//! │                                                    ▼                    │
//! │  Σ modifier.price_per_unit × qty ──────────► + unit_price               │
//! │                                                    │ × quantity         │
//! │                                                    ▼                    │
//! │                                               line_total                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Item, Modifier, ModifierKind};
use crate::validation::{validate_hour, validate_quantity};
use crate::{MAX_AMOUNT_CENTS, MAX_ITEM_QUANTITY};

/// First hour (inclusive) priced at the day rate.
pub const DAY_STARTS_AT_HOUR: u32 = 6;

/// First hour (inclusive) priced at the night rate.
pub const NIGHT_STARTS_AT_HOUR: u32 = 20;

// =============================================================================
// Day Part
// =============================================================================

/// Which regular price band an hour falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayPart {
    Day,
    Night,
}

impl DayPart {
    /// Classifies an hour of the day.
    ///
    /// ## Example
    /// ```rust
    /// use cantina_core::DayPart;
    ///
    /// assert_eq!(DayPart::for_hour(12), DayPart::Day);
    /// assert_eq!(DayPart::for_hour(20), DayPart::Night);
    /// assert_eq!(DayPart::for_hour(5), DayPart::Night);
    /// ```
    pub fn for_hour(hour: u32) -> DayPart {
        if (DAY_STARTS_AT_HOUR..NIGHT_STARTS_AT_HOUR).contains(&hour) {
            DayPart::Day
        } else {
            DayPart::Night
        }
    }
}

// =============================================================================
// Price Functions
// =============================================================================

/// Base unit price of an item for the given hour and happy-hour flag.
///
/// Happy hour overrides the time of day. The hour is still checked so a
/// bad clock reading never slips through.
pub fn base_price(item: &Item, hour: u32, happy_hour: bool) -> CoreResult<Money> {
    validate_hour(hour)?;

    if happy_hour {
        return Ok(item.happy_hour_price());
    }

    Ok(match DayPart::for_hour(hour) {
        DayPart::Day => item.day_price(),
        DayPart::Night => item.night_price(),
    })
}

/// Checks a chosen modifier quantity.
///
/// Quantities are never negative; boolean modifiers are 0 or 1.
pub fn check_modifier_quantity(modifier: &Modifier, quantity: i64) -> CoreResult<()> {
    let out_of_range = quantity < 0
        || (modifier.kind() == ModifierKind::Boolean && quantity > 1);

    if out_of_range {
        return Err(CoreError::InvalidModifierQuantity {
            modifier: modifier.name().to_string(),
            quantity,
        });
    }

    if quantity > MAX_ITEM_QUANTITY {
        return Err(CoreError::QuantityTooLarge {
            requested: quantity,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Sum of `price_per_unit × quantity` over the chosen modifiers.
pub fn modifiers_cost<'a, I>(selections: I) -> CoreResult<Money>
where
    I: IntoIterator<Item = (&'a Modifier, i64)>,
{
    let mut cost = Money::zero();
    for (modifier, quantity) in selections {
        check_modifier_quantity(modifier, quantity)?;
        let extra = modifier.price_per_unit().checked_mul(quantity);
        cost = within_ceiling("Modifier cost", extra.and_then(|e| cost.checked_add(e)))?;
    }
    Ok(cost)
}

/// `base_price + modifiers_cost(selections)`.
///
/// ## Example
/// ```rust
/// use cantina_core::pricing::unit_price;
/// use cantina_core::{Modifier, ModifierKind, Money};
///
/// let cheese = Modifier::new("Cheese", ModifierKind::Quantity, Money::from_cents(150)).unwrap();
/// let unit = unit_price(Money::from_cents(1000), [(&cheese, 1)]).unwrap();
/// assert_eq!(unit.cents(), 1150);
/// ```
pub fn unit_price<'a, I>(base_price: Money, selections: I) -> CoreResult<Money>
where
    I: IntoIterator<Item = (&'a Modifier, i64)>,
{
    let cost = modifiers_cost(selections)?;
    within_ceiling("Unit price", base_price.checked_add(cost))
}

/// `unit_price × quantity`; the quantity must be in `1..=999`.
pub fn line_total(unit_price: Money, quantity: i64) -> CoreResult<Money> {
    validate_quantity(quantity)?;
    within_ceiling("Line total", unit_price.checked_mul(quantity))
}

/// Adds a line total to a running table total.
pub fn add_to_total(total: Money, line_total: Money) -> CoreResult<Money> {
    within_ceiling("Table total", total.checked_add(line_total))
}

/// Rejects overflowed (`None`) amounts and amounts above `MAX_AMOUNT_CENTS`.
fn within_ceiling(what: &str, amount: Option<Money>) -> CoreResult<Money> {
    match amount {
        Some(amount) if amount.cents() <= MAX_AMOUNT_CENTS => Ok(amount),
        _ => Err(CoreError::AmountTooLarge {
            what: what.to_string(),
            max: Money::from_cents(MAX_AMOUNT_CENTS),
        }),
    }
}

// =============================================================================
// Price Quote
// =============================================================================

/// The base price a new order for an item would get right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    pub day_part: DayPart,
    pub happy_hour: bool,
    pub base_price: Money,
}

pub fn price_quote(item: &Item, hour: u32, happy_hour: bool) -> CoreResult<PriceQuote> {
    Ok(PriceQuote {
        day_part: DayPart::for_hour(hour),
        happy_hour,
        base_price: base_price(item, hour, happy_hour)?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tests::{burger, cheese, no_ketchup};
    use proptest::prelude::*;

    #[test]
    fn test_day_part_boundaries() {
        assert_eq!(DayPart::for_hour(0), DayPart::Night);
        assert_eq!(DayPart::for_hour(5), DayPart::Night);
        assert_eq!(DayPart::for_hour(6), DayPart::Day);
        assert_eq!(DayPart::for_hour(19), DayPart::Day);
        assert_eq!(DayPart::for_hour(20), DayPart::Night);
        assert_eq!(DayPart::for_hour(23), DayPart::Night);
    }

    #[test]
    fn test_base_price_every_hour() {
        let item = burger();
        for hour in 0..24 {
            let expected = if (6..20).contains(&hour) {
                item.day_price()
            } else {
                item.night_price()
            };
            assert_eq!(base_price(&item, hour, false).unwrap(), expected);
            assert_eq!(base_price(&item, hour, true).unwrap(), item.happy_hour_price());
        }
    }

    #[test]
    fn test_base_price_rejects_bad_hour() {
        let item = burger();
        assert!(matches!(base_price(&item, 24, false), Err(CoreError::InvalidHour(24))));
        assert!(matches!(base_price(&item, 99, true), Err(CoreError::InvalidHour(99))));
    }

    #[test]
    fn test_modifiers_cost() {
        let cheese = cheese();
        let no_ketchup = no_ketchup();

        let cost = modifiers_cost([(&cheese, 2), (&no_ketchup, 1)]).unwrap();
        assert_eq!(cost.cents(), 300);

        assert!(modifiers_cost(std::iter::empty()).unwrap().is_zero());
        assert!(modifiers_cost([(&no_ketchup, 2)]).is_err());
        assert!(modifiers_cost([(&cheese, -1)]).is_err());
        assert!(matches!(
            modifiers_cost([(&cheese, 1000)]),
            Err(CoreError::QuantityTooLarge { requested: 1000, .. })
        ));
    }

    #[test]
    fn test_burger_with_cheese_totals_23() {
        let cheese = cheese();
        let unit = unit_price(Money::from_cents(1000), [(&cheese, 1)]).unwrap();
        let total = line_total(unit, 2).unwrap();
        assert_eq!(total.amount(), "23.00");
    }

    #[test]
    fn test_line_total_rejects_non_positive() {
        assert!(matches!(
            line_total(Money::from_cents(100), 0),
            Err(CoreError::InvalidQuantity(0))
        ));
        assert!(matches!(
            line_total(Money::from_cents(100), -1),
            Err(CoreError::InvalidQuantity(-1))
        ));
    }

    #[test]
    fn test_amounts_above_ceiling_are_errors() {
        let top = Money::from_cents(crate::MAX_PRICE_CENTS);
        let extra = Modifier::new("Extra", ModifierKind::Quantity, top).unwrap();

        let cost = modifiers_cost([(&extra, 99)]).unwrap();
        assert_eq!(cost.cents(), crate::MAX_PRICE_CENTS * 99);
        assert!(matches!(
            modifiers_cost([(&extra, 999)]),
            Err(CoreError::AmountTooLarge { .. })
        ));

        let unit = unit_price(top, [(&extra, 10)]).unwrap();
        assert!(matches!(line_total(unit, 999), Err(CoreError::AmountTooLarge { .. })));
        assert!(matches!(
            line_total(Money::from_cents(i64::MAX), 2),
            Err(CoreError::AmountTooLarge { .. })
        ));

        let full = Money::from_cents(MAX_AMOUNT_CENTS);
        assert_eq!(add_to_total(Money::zero(), full).unwrap(), full);
        assert!(matches!(
            add_to_total(full, Money::from_cents(1)),
            Err(CoreError::AmountTooLarge { .. })
        ));
    }

    #[test]
    fn test_price_quote() {
        let item = burger();
        let quote = price_quote(&item, 21, false).unwrap();
        assert_eq!(quote.day_part, DayPart::Night);
        assert_eq!(quote.base_price, item.night_price());

        let quote = price_quote(&item, 21, true).unwrap();
        assert!(quote.happy_hour);
        assert_eq!(quote.base_price, item.happy_hour_price());
    }

    proptest! {
        #[test]
        fn prop_unit_price_never_below_base(
            base in 0i64..100_000,
            price in 0i64..10_000,
            qty in 0i64..=999,
        ) {
            let modifier = Modifier::new("Extra", ModifierKind::Quantity, Money::from_cents(price)).unwrap();
            let base = Money::from_cents(base);
            let unit = unit_price(base, [(&modifier, qty)]).unwrap();

            prop_assert!(unit >= base);
            if qty == 0 {
                prop_assert_eq!(unit, base);
            }
        }

        #[test]
        fn prop_unit_equals_base_iff_no_priced_selection(
            base in 0i64..100_000,
            qty in 1i64..=999,
        ) {
            let modifier = Modifier::new("Extra", ModifierKind::Quantity, Money::from_cents(1)).unwrap();
            let base = Money::from_cents(base);
            let unit = unit_price(base, [(&modifier, qty)]).unwrap();
            prop_assert!(unit > base);
        }

        #[test]
        fn prop_line_total_is_unit_times_qty(unit in 0i64..1_000_000, qty in 1i64..=999) {
            let total = line_total(Money::from_cents(unit), qty).unwrap();
            prop_assert_eq!(total.cents(), unit * qty);
        }

        #[test]
        fn prop_happy_hour_overrides_every_hour(hour in 0u32..24) {
            let item = burger();
            prop_assert_eq!(base_price(&item, hour, true).unwrap(), item.happy_hour_price());
        }
    }
}
