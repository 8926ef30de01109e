//! # cantina-core: Pure Business Logic for Cantina POS
//!
//! This crate is the **heart** of Cantina POS, the order engine of a single
//! bar. It tracks which tables are open, what was consumed at each one,
//! prices every order by time of day (or happy hour), and renders the
//! closing ticket. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cantina POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Terminal front end (apps/terminal)              │   │
//! │  │    open ──► order ──► remove ──► close ──► ticket text          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ cantina-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌─────────┐           │   │
//! │  │   │ catalog │  │ pricing │  │  table  │  │ ticket  │           │   │
//! │  │   │  Item   │  │day/night│  │Free/Occ.│  │ receipt │           │   │
//! │  │   │Modifier │  │happy hr │  │ records │  │  text   │           │   │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └─────────┘           │   │
//! │  │                 ▲  venue (owns tables, catalog, clock)          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO WALL CLOCK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │ CatalogPersister hook                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              cantina-store (catalog CSV file)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Item, Modifier, ModifierSelection, Consumption
//! - [`catalog`] - The set of purchasable items and the modifier codec
//! - [`pricing`] - Day/night/happy-hour base prices and modifier costs
//! - [`table`] - The Free/Occupied table state machine
//! - [`ticket`] - Closing ticket data and its fixed-width rendering
//! - [`venue`] - The manager owning tables, catalog, clock and happy hour
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use cantina_core::{Catalog, Item, ItemPrices, Money, Venue, VenueConfig};
//! use chrono::NaiveTime;
//!
//! let burger = Item::new(
//!     "BURGER",
//!     "Burger",
//!     ItemPrices {
//!         day: Money::from_cents(1000),
//!         night: Money::from_cents(1200),
//!         happy_hour: Money::from_cents(800),
//!     },
//!     "images/burger.png",
//!     Vec::new(),
//! )
//! .unwrap();
//!
//! let catalog = Catalog::from_items(vec![burger]).unwrap();
//! let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
//! let mut venue = Venue::new(VenueConfig::default(), catalog, noon);
//!
//! venue.open_table(1, noon).unwrap();
//! venue.register_order(1, "BURGER", 2, &[]).unwrap();
//! let ticket = venue.close_table(1).unwrap();
//! assert!(ticket.contains("20.00"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod pricing;
pub mod table;
pub mod ticket;
pub mod types;
pub mod validation;
pub mod venue;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{
    format_modifiers, parse_modifiers, Catalog, CatalogPersister, NoopPersister, ParsedModifiers,
    RejectedModifier,
};
pub use error::{CoreError, CoreResult, ErrorCategory, ValidationError};
pub use money::Money;
pub use pricing::{DayPart, PriceQuote};
pub use table::{Table, TableStatus};
pub use ticket::{Ticket, TicketFormatter};
pub use types::*;
pub use venue::{Venue, VenueConfig, VenueStatus};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of tables a venue gets when nothing else is configured.
pub const DEFAULT_TABLE_COUNT: u32 = 5;

/// Maximum quantity on a single consumption line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// The same cap applies to quantity modifiers.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest price a catalog item or modifier may carry, in cents (99,999.99).
pub const MAX_PRICE_CENTS: i64 = 9_999_999;

/// Highest unit price, line total or table total, in cents (9,999,999.99).
///
/// The widest amount that fits the ticket's subtotal column.
pub const MAX_AMOUNT_CENTS: i64 = 999_999_999;

/// Most tables a venue can be configured with.
pub const MAX_TABLE_COUNT: u32 = 999;

/// Default receipt width in characters.
pub const DEFAULT_TICKET_WIDTH: usize = 40;

/// Narrowest receipt the formatter accepts.
pub const MIN_TICKET_WIDTH: usize = 30;
