//! # Domain Types
//!
//! Core value objects used throughout Cantina POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                        │
//! │  │      Item       │ 0..n   │    Modifier     │                        │
//! │  │  ─────────────  │───────►│  ─────────────  │                        │
//! │  │  code (key)     │        │  name           │                        │
//! │  │  name           │        │  kind           │                        │
//! │  │  prices (3)     │        │  price_per_unit │                        │
//! │  │  image_ref      │        └─────────────────┘                        │
//! │  └────────▲────────┘                 ▲ copied                          │
//! │           │ Arc                      │                                  │
//! │  ┌────────┴────────────────────────┐ │                                  │
//! │  │          Consumption            │ │  ┌──────────────────────┐       │
//! │  │  ─────────────────────────────  │ └──│  ModifierSelection   │       │
//! │  │  item, quantity                 │───►│  modifier, quantity  │       │
//! │  │  base_price (frozen)            │    └──────────────────────┘       │
//! │  │  unit_price, line_total (frozen)│                                    │
//! │  │  registered_at                  │                                    │
//! │  └─────────────────────────────────┘                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Immutability
//! Every type here is constructed once through a validating constructor and
//! never mutated. Editing a catalog item means building a new `Item` and
//! replacing the old one wholesale; consumptions already registered keep the
//! `Arc<Item>` and prices they were created with.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveTime;
use serde::Serialize;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::pricing;
use crate::validation::{
    validate_image_ref, validate_item_code, validate_item_name, validate_modifier_name,
    validate_price, validate_quantity, ValidationResult,
};

// =============================================================================
// Modifier Kind
// =============================================================================

/// How a modifier is chosen on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModifierKind {
    /// An integer count, e.g. "extra cheese slices".
    Quantity,
    /// Present or absent, e.g. "no ketchup". Chosen quantity is 0 or 1.
    Boolean,
}

impl ModifierKind {
    /// Token used in the catalog modifier string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ModifierKind::Quantity => "QUANTITY",
            ModifierKind::Boolean => "BOOLEAN",
        }
    }
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModifierKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "QUANTITY" => Ok(ModifierKind::Quantity),
            "BOOLEAN" => Ok(ModifierKind::Boolean),
            other => Err(ValidationError::InvalidFormat {
                field: "modifier kind".to_string(),
                reason: format!("'{}' is not QUANTITY or BOOLEAN", other),
            }),
        }
    }
}

// =============================================================================
// Modifier
// =============================================================================

/// An optional per-item add-on with its own per-unit price.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Modifier {
    name: String,
    kind: ModifierKind,
    price_per_unit: Money,
}

impl Modifier {
    /// Creates a validated modifier.
    ///
    /// ## Example
    /// ```rust
    /// use cantina_core::{Modifier, ModifierKind, Money};
    ///
    /// let cheese = Modifier::new("Cheese", ModifierKind::Quantity, Money::from_cents(150)).unwrap();
    /// assert_eq!(cheese.name(), "Cheese");
    ///
    /// assert!(Modifier::new("Cheese", ModifierKind::Quantity, Money::from_cents(-1)).is_err());
    /// ```
    pub fn new(
        name: impl Into<String>,
        kind: ModifierKind,
        price_per_unit: Money,
    ) -> ValidationResult<Self> {
        let name = name.into().trim().to_string();
        validate_modifier_name(&name)?;
        validate_price("modifier price", price_per_unit)?;

        Ok(Modifier {
            name,
            kind,
            price_per_unit,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ModifierKind {
        self.kind
    }

    pub fn price_per_unit(&self) -> Money {
        self.price_per_unit
    }
}

// =============================================================================
// Item
// =============================================================================

/// The three base prices of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemPrices {
    pub day: Money,
    pub night: Money,
    pub happy_hour: Money,
}

/// A catalog entry purchasable at a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    code: String,
    name: String,
    prices: ItemPrices,
    image_ref: String,
    modifiers: Vec<Modifier>,
}

impl Item {
    /// Creates a validated item.
    ///
    /// ## Rules
    /// - Code and name pass [`validate_item_code`] / [`validate_item_name`]
    /// - All three prices are non-negative
    /// - Modifier names are unique within the item
    /// - Zero modifiers is fine
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        prices: ItemPrices,
        image_ref: impl Into<String>,
        modifiers: Vec<Modifier>,
    ) -> ValidationResult<Self> {
        let code = code.into().trim().to_string();
        let name = name.into().trim().to_string();
        let image_ref = image_ref.into().trim().to_string();

        validate_item_code(&code)?;
        validate_item_name(&name)?;
        validate_image_ref(&image_ref)?;
        validate_price("day price", prices.day)?;
        validate_price("night price", prices.night)?;
        validate_price("happy hour price", prices.happy_hour)?;

        for (i, modifier) in modifiers.iter().enumerate() {
            if modifiers[..i].iter().any(|m| m.name == modifier.name) {
                return Err(ValidationError::Duplicate {
                    field: "modifier".to_string(),
                    value: modifier.name.clone(),
                });
            }
        }

        Ok(Item {
            code,
            name,
            prices,
            image_ref,
            modifiers,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prices(&self) -> ItemPrices {
        self.prices
    }

    pub fn day_price(&self) -> Money {
        self.prices.day
    }

    pub fn night_price(&self) -> Money {
        self.prices.night
    }

    pub fn happy_hour_price(&self) -> Money {
        self.prices.happy_hour
    }

    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    /// Modifiers in the order they were defined.
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    /// Looks up a modifier by name.
    pub fn modifier(&self, name: &str) -> Option<&Modifier> {
        self.modifiers.iter().find(|m| m.name == name)
    }
}

// =============================================================================
// Modifier Selection
// =============================================================================

/// A modifier together with the quantity chosen on one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModifierSelection {
    modifier: Modifier,
    quantity: i64,
}

impl ModifierSelection {
    /// Creates a selection, rejecting negative quantities and boolean
    /// modifiers chosen more than once.
    pub fn new(modifier: Modifier, quantity: i64) -> CoreResult<Self> {
        pricing::check_modifier_quantity(&modifier, quantity)?;
        Ok(ModifierSelection { modifier, quantity })
    }

    pub fn modifier(&self) -> &Modifier {
        &self.modifier
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// `price_per_unit × quantity`. Both are bounded at construction, so
    /// the product fits.
    pub fn cost(&self) -> Money {
        self.modifier.price_per_unit * self.quantity
    }
}

// =============================================================================
// Consumption
// =============================================================================

/// One line-item order placed against an occupied table.
///
/// ## Snapshot Pattern
/// Base price, unit price and line total are computed once, at
/// registration, and never recomputed. Toggling happy hour, moving the
/// clock or editing the catalog item afterwards does not change them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Consumption {
    item: Arc<Item>,
    quantity: i64,
    base_price: Money,
    selections: Vec<ModifierSelection>,
    unit_price: Money,
    line_total: Money,
    #[serde(with = "hh_mm_ss")]
    registered_at: NaiveTime,
}

impl Consumption {
    /// Freezes a new consumption record.
    ///
    /// Zero-quantity selections are dropped; the remaining ones are kept in
    /// the order given.
    pub fn new(
        item: Arc<Item>,
        quantity: i64,
        base_price: Money,
        selections: Vec<ModifierSelection>,
        registered_at: NaiveTime,
    ) -> CoreResult<Self> {
        validate_quantity(quantity)?;
        validate_price("base price", base_price)?;

        let selections: Vec<ModifierSelection> =
            selections.into_iter().filter(|s| s.quantity > 0).collect();

        let unit_price = pricing::unit_price(
            base_price,
            selections.iter().map(|s| (&s.modifier, s.quantity)),
        )?;
        let line_total = pricing::line_total(unit_price, quantity)?;

        Ok(Consumption {
            item,
            quantity,
            base_price,
            selections,
            unit_price,
            line_total,
            registered_at,
        })
    }

    pub fn item(&self) -> &Arc<Item> {
        &self.item
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Base unit price frozen at registration (no modifiers).
    pub fn base_price(&self) -> Money {
        self.base_price
    }

    /// Non-zero modifier selections.
    pub fn selections(&self) -> &[ModifierSelection] {
        &self.selections
    }

    /// Base price plus the cost of all selected modifiers.
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.line_total
    }

    pub fn registered_at(&self) -> NaiveTime {
        self.registered_at
    }

    /// Summary of the chosen modifiers, e.g. `(Cheese: 2, No ketchup)`.
    ///
    /// Boolean modifiers show only their name; quantity modifiers show
    /// `name: N`. Empty when nothing was chosen.
    pub fn detail(&self) -> String {
        if self.selections.is_empty() {
            return String::new();
        }

        let parts: Vec<String> = self
            .selections
            .iter()
            .map(|s| match s.modifier.kind {
                ModifierKind::Boolean => s.modifier.name.clone(),
                ModifierKind::Quantity => format!("{}: {}", s.modifier.name, s.quantity),
            })
            .collect();

        format!("({})", parts.join(", "))
    }
}

/// Serializes a time of day as `HH:MM:SS`.
pub(crate) mod hh_mm_ss {
    use chrono::NaiveTime;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M:%S"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::CoreError;

    pub(crate) fn prices(day: i64, night: i64, happy_hour: i64) -> ItemPrices {
        ItemPrices {
            day: Money::from_cents(day),
            night: Money::from_cents(night),
            happy_hour: Money::from_cents(happy_hour),
        }
    }

    pub(crate) fn cheese() -> Modifier {
        Modifier::new("Cheese", ModifierKind::Quantity, Money::from_cents(150)).unwrap()
    }

    pub(crate) fn no_ketchup() -> Modifier {
        Modifier::new("No ketchup", ModifierKind::Boolean, Money::zero()).unwrap()
    }

    pub(crate) fn burger() -> Item {
        Item::new(
            "BURGER",
            "Burger",
            prices(1000, 1200, 800),
            "images/burger.png",
            vec![cheese(), no_ketchup()],
        )
        .unwrap()
    }

    pub(crate) fn beer() -> Item {
        Item::new("BEER", "Beer", prices(300, 400, 200), "", Vec::new()).unwrap()
    }

    pub(crate) fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_modifier_kind_parse() {
        assert_eq!("QUANTITY".parse::<ModifierKind>().unwrap(), ModifierKind::Quantity);
        assert_eq!(" boolean ".parse::<ModifierKind>().unwrap(), ModifierKind::Boolean);
        assert!("SI_NO".parse::<ModifierKind>().is_err());
    }

    #[test]
    fn test_item_validation() {
        assert!(Item::new("", "Burger", prices(1, 1, 1), "", vec![]).is_err());
        assert!(Item::new("B", "", prices(1, 1, 1), "", vec![]).is_err());
        assert!(Item::new("B", "Burger", prices(-1, 1, 1), "", vec![]).is_err());
        assert!(Item::new("B", "Burger", prices(1, -1, 1), "", vec![]).is_err());
        assert!(Item::new("B", "Burger", prices(1, 1, -1), "", vec![]).is_err());

        let dup = Item::new("B", "Burger", prices(1, 1, 1), "", vec![cheese(), cheese()]);
        assert!(matches!(dup, Err(ValidationError::Duplicate { .. })));
    }

    #[test]
    fn test_item_accessors() {
        let item = burger();
        assert_eq!(item.code(), "BURGER");
        assert_eq!(item.day_price().cents(), 1000);
        assert_eq!(item.night_price().cents(), 1200);
        assert_eq!(item.happy_hour_price().cents(), 800);
        assert_eq!(item.modifiers().len(), 2);
        assert!(item.modifier("Cheese").is_some());
        assert!(item.modifier("Bacon").is_none());
    }

    #[test]
    fn test_selection_rules() {
        assert!(ModifierSelection::new(cheese(), 3).is_ok());
        assert!(ModifierSelection::new(no_ketchup(), 1).is_ok());
        assert!(matches!(
            ModifierSelection::new(no_ketchup(), 2),
            Err(CoreError::InvalidModifierQuantity { quantity: 2, .. })
        ));
        assert!(matches!(
            ModifierSelection::new(cheese(), -1),
            Err(CoreError::InvalidModifierQuantity { quantity: -1, .. })
        ));
    }

    #[test]
    fn test_consumption_burger_with_cheese() {
        let selections = vec![ModifierSelection::new(cheese(), 1).unwrap()];
        let c = Consumption::new(
            Arc::new(burger()),
            2,
            Money::from_cents(1000),
            selections,
            at(12, 30),
        )
        .unwrap();

        assert_eq!(c.unit_price().cents(), 1150);
        assert_eq!(c.line_total().cents(), 2300);
        assert_eq!(c.detail(), "(Cheese: 1)");
    }

    #[test]
    fn test_consumption_drops_zero_selections() {
        let selections = vec![
            ModifierSelection::new(cheese(), 0).unwrap(),
            ModifierSelection::new(no_ketchup(), 1).unwrap(),
        ];
        let c = Consumption::new(
            Arc::new(burger()),
            1,
            Money::from_cents(1000),
            selections,
            at(12, 0),
        )
        .unwrap();

        assert_eq!(c.selections().len(), 1);
        assert_eq!(c.detail(), "(No ketchup)");
        assert_eq!(c.unit_price(), c.base_price());
    }

    #[test]
    fn test_consumption_rejects_bad_quantity() {
        let item = Arc::new(beer());
        assert!(matches!(
            Consumption::new(item.clone(), 0, Money::from_cents(300), vec![], at(1, 0)),
            Err(CoreError::InvalidQuantity(0))
        ));
        assert!(matches!(
            Consumption::new(item, -2, Money::from_cents(300), vec![], at(1, 0)),
            Err(CoreError::InvalidQuantity(-2))
        ));
    }

    #[test]
    fn test_consumption_serializes_time() {
        let c = Consumption::new(Arc::new(beer()), 1, Money::from_cents(300), vec![], at(21, 5))
            .unwrap();
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["registered_at"], "21:05:00");
        assert_eq!(json["item"]["code"], "BEER");
        assert_eq!(json["line_total"], 300);
    }
}
