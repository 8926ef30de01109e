//! # Venue Manager
//!
//! Owns the fixed set of tables, the catalog, the happy-hour flag and the
//! venue clock. Every mutation of order state goes through here.
//!
//! ## Order Registration
//! ```text
//! register_order(table, code, qty, [(modifier, n)])
//!      │
//!      ├── table exists?         → UnknownTable
//!      ├── table occupied?       → NotOccupied
//!      ├── item in catalog?      → ItemNotFound
//!      ├── modifiers known?      → UnknownModifier / Duplicate
//!      │
//!      ▼
//! base_price(item, clock hour, happy hour)   ← one consistent snapshot
//!      │
//!      ▼
//! Table::register_consumption → frozen Consumption
//! ```
//!
//! ## Concurrency
//! A `Venue` is a plain value with `&mut self` mutators. Front ends that
//! share it between a clock ticker and a command loop wrap it in a mutex,
//! so each operation sees one consistent (clock, happy hour) pair.

use chrono::{Duration, NaiveTime, Timelike};
use serde::Serialize;

use crate::catalog::{Catalog, CatalogPersister, NoopPersister};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::pricing::{self, DayPart, PriceQuote};
use crate::table::Table;
use crate::ticket::{Ticket, TicketFormatter};
use crate::types::{Consumption, Item, ModifierSelection};
use crate::validation::validate_hour;
use crate::{DEFAULT_TABLE_COUNT, DEFAULT_TICKET_WIDTH, MAX_TABLE_COUNT};

use std::sync::Arc;

// =============================================================================
// Configuration
// =============================================================================

/// Fixed-at-startup venue settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VenueConfig {
    /// Tables are numbered `1..=table_count`.
    pub table_count: u32,
    /// Receipt width in characters.
    pub ticket_width: usize,
}

impl Default for VenueConfig {
    fn default() -> Self {
        VenueConfig {
            table_count: DEFAULT_TABLE_COUNT,
            ticket_width: DEFAULT_TICKET_WIDTH,
        }
    }
}

/// Clock and pricing mode, for display refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VenueStatus {
    #[serde(with = "crate::types::hh_mm_ss")]
    pub clock: NaiveTime,
    pub hour: u32,
    pub day_part: DayPart,
    pub happy_hour: bool,
}

// =============================================================================
// Venue
// =============================================================================

pub struct Venue {
    config: VenueConfig,
    tables: Vec<Table>,
    catalog: Catalog,
    happy_hour: bool,
    clock: NaiveTime,
    formatter: TicketFormatter,
    persister: Box<dyn CatalogPersister>,
}

impl Venue {
    /// Creates a venue with all tables free and happy hour off.
    ///
    /// The table count is capped at `MAX_TABLE_COUNT`.
    pub fn new(config: VenueConfig, catalog: Catalog, clock: NaiveTime) -> Self {
        let config = VenueConfig {
            table_count: config.table_count.min(MAX_TABLE_COUNT),
            ..config
        };

        Venue {
            config,
            tables: (1..=config.table_count).map(Table::new).collect(),
            catalog,
            happy_hour: false,
            clock,
            formatter: TicketFormatter::new(config.ticket_width),
            persister: Box::new(NoopPersister),
        }
    }

    /// Sets the hook called after each successful catalog change.
    pub fn with_persister(mut self, persister: Box<dyn CatalogPersister>) -> Self {
        self.persister = persister;
        self
    }

    pub fn config(&self) -> VenueConfig {
        self.config
    }

    // =========================================================================
    // Table Queries
    // =========================================================================

    /// All tables, ordered by number.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table(&self, number: u32) -> CoreResult<&Table> {
        self.tables
            .iter()
            .find(|t| t.number() == number)
            .ok_or(CoreError::UnknownTable(number))
    }

    fn table_mut(&mut self, number: u32) -> CoreResult<&mut Table> {
        self.tables
            .iter_mut()
            .find(|t| t.number() == number)
            .ok_or(CoreError::UnknownTable(number))
    }

    pub fn free_tables(&self) -> Vec<u32> {
        self.tables
            .iter()
            .filter(|t| !t.is_occupied())
            .map(Table::number)
            .collect()
    }

    pub fn occupied_tables(&self) -> Vec<u32> {
        self.tables
            .iter()
            .filter(|t| t.is_occupied())
            .map(Table::number)
            .collect()
    }

    // =========================================================================
    // Table Lifecycle
    // =========================================================================

    pub fn open_table(&mut self, number: u32, at: NaiveTime) -> CoreResult<()> {
        self.table_mut(number)?.open(at)
    }

    /// Registers an order priced at the current clock and happy-hour flag.
    ///
    /// `selections` are `(modifier name, quantity)` pairs. Zero quantities
    /// are dropped; the rest are kept in the item's modifier order.
    pub fn register_order(
        &mut self,
        number: u32,
        code: &str,
        quantity: i64,
        selections: &[(&str, i64)],
    ) -> CoreResult<&Consumption> {
        if !self.table(number)?.is_occupied() {
            return Err(CoreError::NotOccupied(number));
        }

        let item = self
            .catalog
            .get_item(code)
            .cloned()
            .ok_or_else(|| CoreError::ItemNotFound(code.to_string()))?;

        let selections = resolve_selections(&item, selections)?;
        let base_price = pricing::base_price(&item, self.current_hour(), self.happy_hour)?;
        let at = self.clock;

        self.table_mut(number)?
            .register_consumption(item, quantity, base_price, selections, at)
    }

    /// Removes the consumption at `index` (0-based) from an occupied table.
    pub fn remove_consumption(&mut self, number: u32, index: usize) -> CoreResult<Consumption> {
        self.table_mut(number)?.remove_consumption(index)
    }

    /// Closes a table and returns the rendered ticket text.
    pub fn close_table(&mut self, number: u32) -> CoreResult<String> {
        let ticket = self.close_table_ticket(number)?;
        Ok(self.formatter.render(&ticket))
    }

    /// Closes a table and returns the structured ticket.
    pub fn close_table_ticket(&mut self, number: u32) -> CoreResult<Ticket> {
        self.table_mut(number)?.close()
    }

    pub fn formatter(&self) -> TicketFormatter {
        self.formatter
    }

    // =========================================================================
    // Happy Hour & Clock
    // =========================================================================

    /// Flips happy hour and returns the new value. Only future orders see it.
    pub fn toggle_happy_hour(&mut self) -> bool {
        self.happy_hour = !self.happy_hour;
        self.happy_hour
    }

    pub fn is_happy_hour_active(&self) -> bool {
        self.happy_hour
    }

    /// Moves the clock one second forward, wrapping past midnight.
    pub fn advance_clock(&mut self) {
        self.clock = self.clock + Duration::seconds(1);
    }

    /// Sets the clock to `hour:00:00`.
    pub fn set_clock(&mut self, hour: u32) -> CoreResult<()> {
        validate_hour(hour)?;
        self.clock = NaiveTime::from_hms_opt(hour, 0, 0).ok_or(CoreError::InvalidHour(hour))?;
        Ok(())
    }

    pub fn clock(&self) -> NaiveTime {
        self.clock
    }

    pub fn current_hour(&self) -> u32 {
        self.clock.hour()
    }

    pub fn status(&self) -> VenueStatus {
        let hour = self.current_hour();
        VenueStatus {
            clock: self.clock,
            hour,
            day_part: DayPart::for_hour(hour),
            happy_hour: self.happy_hour,
        }
    }

    /// The base price a new order for `code` would get right now.
    pub fn current_price(&self, code: &str) -> CoreResult<PriceQuote> {
        let item = self
            .catalog
            .get_item(code)
            .ok_or_else(|| CoreError::ItemNotFound(code.to_string()))?;
        pricing::price_quote(item, self.current_hour(), self.happy_hour)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn get_item(&self, code: &str) -> Option<&Arc<Item>> {
        self.catalog.get_item(code)
    }

    pub fn all_items(&self) -> impl Iterator<Item = &Arc<Item>> {
        self.catalog.all_items()
    }

    pub fn add_item(&mut self, item: Item) -> CoreResult<()> {
        self.catalog.add_item(item)?;
        self.persister.persist(&self.catalog);
        Ok(())
    }

    /// Replaces an item wholesale. Consumptions already registered keep
    /// the previous version.
    pub fn replace_item(&mut self, item: Item) -> CoreResult<()> {
        self.catalog.replace_item(item)?;
        self.persister.persist(&self.catalog);
        Ok(())
    }

    /// Removes an item unless an occupied table still holds a consumption of it.
    pub fn remove_item(&mut self, code: &str) -> CoreResult<()> {
        if !self.catalog.contains(code) {
            return Err(CoreError::ItemNotFound(code.to_string()));
        }

        if let Some(table) = self
            .tables
            .iter()
            .find(|t| t.is_occupied() && t.references_item(code))
        {
            return Err(CoreError::ItemInUse {
                code: code.to_string(),
                table: table.number(),
            });
        }

        self.catalog.remove_item(code)?;
        self.persister.persist(&self.catalog);
        Ok(())
    }
}

/// Turns `(name, qty)` pairs into validated selections in the item's
/// modifier order.
fn resolve_selections(item: &Item, chosen: &[(&str, i64)]) -> CoreResult<Vec<ModifierSelection>> {
    for (i, (name, _)) in chosen.iter().enumerate() {
        if item.modifier(name).is_none() {
            return Err(CoreError::UnknownModifier {
                item: item.code().to_string(),
                modifier: name.to_string(),
            });
        }
        if chosen[..i].iter().any(|(other, _)| other == name) {
            return Err(ValidationError::Duplicate {
                field: "modifier".to_string(),
                value: name.to_string(),
            }
            .into());
        }
    }

    let mut selections = Vec::new();
    for modifier in item.modifiers() {
        let Some((_, quantity)) = chosen.iter().find(|(name, _)| *name == modifier.name()) else {
            continue;
        };
        let selection = ModifierSelection::new(modifier.clone(), *quantity)?;
        if selection.quantity() > 0 {
            selections.push(selection);
        }
    }

    Ok(selections)
}

// =============================================================================
// Unit Tests
// =============================================================================
