//! # Catalog
//!
//! The set of purchasable items, keyed by code, plus the text codec for
//! the `name:KIND:price;...` modifier string used by the catalog file.
//!
//! Items are stored as `Arc<Item>`. Replacing an item swaps the pointer;
//! consumptions that already hold the old `Arc` are unaffected.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Item, Modifier, ModifierKind};

// =============================================================================
// Catalog
// =============================================================================

/// Items by code. Iteration order is by code, so listings are stable.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: BTreeMap<String, Arc<Item>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog, rejecting duplicate codes.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> CoreResult<Self> {
        let mut catalog = Catalog::new();
        for item in items {
            catalog.add_item(item)?;
        }
        Ok(catalog)
    }

    /// Inserts a new item. Fails with `DuplicateCode` if the code is taken.
    pub fn add_item(&mut self, item: Item) -> CoreResult<()> {
        if self.items.contains_key(item.code()) {
            return Err(CoreError::DuplicateCode(item.code().to_string()));
        }
        self.items.insert(item.code().to_string(), Arc::new(item));
        Ok(())
    }

    /// Replaces an existing item wholesale and returns the previous value.
    pub fn replace_item(&mut self, item: Item) -> CoreResult<Arc<Item>> {
        match self.items.get_mut(item.code()) {
            Some(slot) => Ok(std::mem::replace(slot, Arc::new(item))),
            None => Err(CoreError::ItemNotFound(item.code().to_string())),
        }
    }

    /// Removes an item by code. In-use checks belong to the venue.
    pub fn remove_item(&mut self, code: &str) -> CoreResult<Arc<Item>> {
        self.items
            .remove(code)
            .ok_or_else(|| CoreError::ItemNotFound(code.to_string()))
    }

    pub fn get_item(&self, code: &str) -> Option<&Arc<Item>> {
        self.items.get(code)
    }

    /// All items, ordered by code.
    pub fn all_items(&self) -> impl Iterator<Item = &Arc<Item>> {
        self.items.values()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.items.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Persistence Hook
// =============================================================================

/// Called by the venue after every successful catalog mutation.
///
/// Implementations write the catalog somewhere durable. They cannot fail
/// the mutation; report problems through your own channel.
pub trait CatalogPersister: Send {
    fn persist(&self, catalog: &Catalog);
}

/// Persister that does nothing. Used by tests and in-memory venues.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPersister;

impl CatalogPersister for NoopPersister {
    fn persist(&self, _catalog: &Catalog) {}
}

// =============================================================================
// Modifier String Codec
// =============================================================================

/// A modifier entry that could not be parsed, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedModifier {
    pub entry: String,
    pub reason: String,
}

/// Outcome of parsing a modifier string: what loaded and what was skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedModifiers {
    pub modifiers: Vec<Modifier>,
    pub rejected: Vec<RejectedModifier>,
}

/// Parses `name:KIND:price;name:KIND:price`.
///
/// Malformed entries (wrong part count, unknown kind, bad price, duplicate
/// name) are skipped and reported in `rejected`; the rest still load.
/// Empty segments are ignored.
///
/// ## Example
/// ```rust
/// use cantina_core::parse_modifiers;
///
/// let parsed = parse_modifiers("Cheese:QUANTITY:1.50;No ketchup:boolean:0;Bacon:XL:2");
/// assert_eq!(parsed.modifiers.len(), 2);
/// assert_eq!(parsed.rejected.len(), 1);
/// assert_eq!(parsed.rejected[0].entry, "Bacon:XL:2");
/// ```
pub fn parse_modifiers(text: &str) -> ParsedModifiers {
    let mut parsed = ParsedModifiers::default();

    for entry in text.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        match parse_modifier_entry(entry) {
            Ok(modifier) if parsed.modifiers.iter().any(|m| m.name() == modifier.name()) => {
                parsed.rejected.push(RejectedModifier {
                    entry: entry.to_string(),
                    reason: format!("duplicate modifier '{}'", modifier.name()),
                });
            }
            Ok(modifier) => parsed.modifiers.push(modifier),
            Err(reason) => parsed.rejected.push(RejectedModifier {
                entry: entry.to_string(),
                reason,
            }),
        }
    }

    parsed
}

fn parse_modifier_entry(entry: &str) -> Result<Modifier, String> {
    let parts: Vec<&str> = entry.split(':').map(str::trim).collect();
    let [name, kind, price] = parts.as_slice() else {
        return Err(format!(
            "expected name:KIND:price, found {} part(s)",
            parts.len()
        ));
    };

    let kind: ModifierKind = kind.parse().map_err(|e| format!("{}", e))?;
    let price = Money::parse(price).map_err(|e| e.to_string())?;

    Modifier::new(*name, kind, price).map_err(|e| e.to_string())
}

/// Renders modifiers back into the `name:KIND:price;...` form.
///
/// ## Example
/// ```rust
/// use cantina_core::{format_modifiers, Modifier, ModifierKind, Money};
///
/// let cheese = Modifier::new("Cheese", ModifierKind::Quantity, Money::from_cents(150)).unwrap();
/// assert_eq!(format_modifiers(&[cheese]), "Cheese:QUANTITY:1.50");
/// ```
pub fn format_modifiers(modifiers: &[Modifier]) -> String {
    modifiers
        .iter()
        .map(|m| format!("{}:{}:{}", m.name(), m.kind(), m.price_per_unit().amount()))
        .collect::<Vec<_>>()
        .join(";")
}

// =============================================================================
// Unit Tests
// =============================================================================
