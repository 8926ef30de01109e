//! # Table Commands
//!
//! Open a table, take orders, correct mistakes, close with a ticket.
//!
//! ## Table Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Table Lifecycle                                      │
//! │                                                                         │
//! │  ┌──────────┐  open   ┌──────────┐  close   ┌──────────┐               │
//! │  │   Free   │────────►│ Occupied │────────►│  Ticket  │──► Free        │
//! │  └──────────┘         └──────────┘          └──────────┘               │
//! │                         │      ▲                                        │
//! │                  order  │      │  remove <index>                        │
//! │                         ▼      │                                        │
//! │                    consumption list                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use cantina_core::{Consumption, Table, TableStatus};
use chrono::NaiveTime;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::VenueState;

/// One line on a table, with its position for `remove`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionView {
    pub index: usize,
    pub code: String,
    pub name: String,
    pub quantity: i64,
    pub detail: String,
    pub unit_price: String,
    pub line_total: String,
    pub registered_at: String,
}

impl ConsumptionView {
    fn new(index: usize, consumption: &Consumption) -> Self {
        ConsumptionView {
            index,
            code: consumption.item().code().to_string(),
            name: consumption.item().name().to_string(),
            quantity: consumption.quantity(),
            detail: consumption.detail(),
            unit_price: consumption.unit_price().amount(),
            line_total: consumption.line_total().amount(),
            registered_at: consumption.registered_at().format("%H:%M:%S").to_string(),
        }
    }
}

/// A table as shown to the operator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub number: u32,
    pub occupied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opened_at: Option<String>,
    pub consumptions: Vec<ConsumptionView>,
    pub total: String,
}

impl From<&Table> for TableView {
    fn from(table: &Table) -> Self {
        let opened_at = match table.status() {
            TableStatus::Free => None,
            TableStatus::Occupied { opened_at } => Some(opened_at.format("%H:%M:%S").to_string()),
        };

        TableView {
            number: table.number(),
            occupied: table.is_occupied(),
            opened_at,
            consumptions: table
                .consumptions()
                .iter()
                .enumerate()
                .map(|(index, c)| ConsumptionView::new(index, c))
                .collect(),
            total: table.total().amount(),
        }
    }
}

/// Every table in number order.
pub fn list_tables(venue: &VenueState) -> Vec<TableView> {
    venue.with_venue(|v| v.tables().iter().map(TableView::from).collect())
}

/// Numbers of the free tables, ascending.
pub fn free_tables(venue: &VenueState) -> Vec<u32> {
    venue.with_venue(|v| v.free_tables())
}

/// Numbers of the occupied tables, ascending.
pub fn occupied_tables(venue: &VenueState) -> Vec<u32> {
    venue.with_venue(|v| v.occupied_tables())
}

pub fn get_table(venue: &VenueState, number: u32) -> Result<TableView, ApiError> {
    venue.with_venue(|v| Ok::<_, ApiError>(TableView::from(v.table(number)?)))
}

/// Opens a table at `at`, or at the venue clock when no time is given.
pub fn open_table(
    venue: &VenueState,
    number: u32,
    at: Option<NaiveTime>,
) -> Result<TableView, ApiError> {
    let view = venue.with_venue_mut(|v| {
        let at = at.unwrap_or_else(|| v.clock());
        v.open_table(number, at)?;
        Ok::<_, ApiError>(TableView::from(v.table(number)?))
    })?;

    info!(table = number, opened_at = ?view.opened_at, "Table opened");
    Ok(view)
}

/// Registers an order and returns the new line.
pub fn register_order(
    venue: &VenueState,
    number: u32,
    code: &str,
    quantity: i64,
    modifiers: &[(String, i64)],
) -> Result<ConsumptionView, ApiError> {
    let selections: Vec<(&str, i64)> = modifiers
        .iter()
        .map(|(name, qty)| (name.as_str(), *qty))
        .collect();

    let view = venue.with_venue_mut(|v| {
        let consumption = v.register_order(number, code, quantity, &selections)?;
        let view = ConsumptionView::new(0, consumption);
        let index = v.table(number)?.consumptions().len() - 1;
        Ok::<_, ApiError>(ConsumptionView { index, ..view })
    })?;

    debug!(
        table = number,
        code,
        quantity,
        line_total = %view.line_total,
        "Order registered"
    );
    Ok(view)
}

/// Removes the line at `index` and returns the table as it is now.
pub fn remove_consumption(
    venue: &VenueState,
    number: u32,
    index: usize,
) -> Result<TableView, ApiError> {
    venue.with_venue_mut(|v| {
        let removed = v.remove_consumption(number, index)?;
        debug!(table = number, index, code = removed.item().code(), "Consumption removed");
        Ok::<_, ApiError>(TableView::from(v.table(number)?))
    })
}

/// Closes a table and returns the printed ticket.
pub fn close_table(venue: &VenueState, number: u32) -> Result<String, ApiError> {
    let (text, total) = venue.with_venue_mut(|v| {
        let ticket = v.close_table_ticket(number)?;
        Ok::<_, ApiError>((v.formatter().render(&ticket), ticket.total))
    })?;

    info!(table = number, %total, "Table closed");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::sample_state;
    use crate::error::ErrorCode;

    fn mods(entries: &[(&str, i64)]) -> Vec<(String, i64)> {
        entries.iter().map(|(n, q)| (n.to_string(), *q)).collect()
    }

    #[test]
    fn test_open_defaults_to_venue_clock() {
        let venue = sample_state();
        let view = open_table(&venue, 1, None).unwrap();
        assert!(view.occupied);
        assert_eq!(view.opened_at.as_deref(), Some("12:00:00"));
        assert_eq!(occupied_tables(&venue), vec![1]);
        assert_eq!(free_tables(&venue), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_open_twice_is_a_conflict() {
        let venue = sample_state();
        open_table(&venue, 1, None).unwrap();
        let err = open_table(&venue, 1, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::StateConflict);
    }

    #[test]
    fn test_order_reports_index_and_prices() {
        let venue = sample_state();
        open_table(&venue, 2, None).unwrap();

        let first = register_order(&venue, 2, "BEER", 3, &[]).unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(first.line_total, "9.00");

        let second =
            register_order(&venue, 2, "BURGER", 2, &mods(&[("Cheese", 1), ("No ketchup", 1)]))
                .unwrap();
        assert_eq!(second.index, 1);
        assert_eq!(second.unit_price, "11.50");
        assert_eq!(second.line_total, "23.00");
        assert_eq!(second.detail, "(Cheese: 1, No ketchup)");

        let table = get_table(&venue, 2).unwrap();
        assert_eq!(table.total, "32.00");
    }

    #[test]
    fn test_order_errors() {
        let venue = sample_state();
        let err = register_order(&venue, 1, "BEER", 1, &[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::StateConflict);

        open_table(&venue, 1, None).unwrap();
        let err = register_order(&venue, 1, "WINE", 1, &[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = register_order(&venue, 1, "BEER", 0, &[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = register_order(&venue, 9, "BEER", 1, &[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_remove_then_close() {
        let venue = sample_state();
        open_table(&venue, 3, None).unwrap();
        register_order(&venue, 3, "BEER", 1, &[]).unwrap();
        register_order(&venue, 3, "BURGER", 1, &[]).unwrap();

        let view = remove_consumption(&venue, 3, 0).unwrap();
        assert_eq!(view.consumptions.len(), 1);
        assert_eq!(view.consumptions[0].code, "BURGER");
        assert_eq!(view.consumptions[0].index, 0);

        let err = remove_consumption(&venue, 3, 5).unwrap_err();
        assert_eq!(err.code, ErrorCode::StateConflict);

        let ticket = close_table(&venue, 3).unwrap();
        assert!(ticket.starts_with("Ticket - Table 3"));
        assert!(ticket.contains("10.00"));
        assert!(!get_table(&venue, 3).unwrap().occupied);
    }
}
