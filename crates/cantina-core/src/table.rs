//! # Table State Machine
//!
//! One physical table: its occupancy and its ordered consumption history.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │          open(at)                                                       │
//! │   ┌──────┐ ─────────────────────────► ┌────────────────────────┐        │
//! │   │ Free │                            │ Occupied { opened_at } │        │
//! │   └──────┘ ◄───────────────────────── └────────────────────────┘        │
//! │          close() → Ticket                  │  ▲                         │
//! │                                            │  │ register_consumption    │
//! │                                            └──┘ remove_consumption      │
//! │                                                                         │
//! │  Free ⇒ no consumptions, no opening time                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::NaiveTime;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing;
use crate::ticket::Ticket;
use crate::types::{Consumption, Item, ModifierSelection};

/// Occupancy of a table. The opening time only exists while occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    Free,
    Occupied {
        #[serde(with = "crate::types::hh_mm_ss")]
        opened_at: NaiveTime,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Table {
    number: u32,
    status: TableStatus,
    consumptions: Vec<Consumption>,
}

impl Table {
    /// A new, free table.
    pub fn new(number: u32) -> Self {
        Table {
            number,
            status: TableStatus::Free,
            consumptions: Vec::new(),
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn status(&self) -> TableStatus {
        self.status
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self.status, TableStatus::Occupied { .. })
    }

    pub fn opened_at(&self) -> Option<NaiveTime> {
        match self.status {
            TableStatus::Occupied { opened_at } => Some(opened_at),
            TableStatus::Free => None,
        }
    }

    /// Consumptions in registration order.
    pub fn consumptions(&self) -> &[Consumption] {
        &self.consumptions
    }

    /// Sum of all frozen line totals.
    pub fn total(&self) -> Money {
        self.consumptions.iter().map(Consumption::line_total).sum()
    }

    /// Whether any consumption on this table was made from the given item.
    pub fn references_item(&self, code: &str) -> bool {
        self.consumptions.iter().any(|c| c.item().code() == code)
    }

    /// `Free → Occupied`.
    pub fn open(&mut self, at: NaiveTime) -> CoreResult<()> {
        if self.is_occupied() {
            return Err(CoreError::AlreadyOccupied(self.number));
        }

        self.consumptions.clear();
        self.status = TableStatus::Occupied { opened_at: at };
        Ok(())
    }

    /// Appends a consumption with a base price frozen by the caller.
    ///
    /// Fails without changing the table when the line or the new table
    /// total would exceed `MAX_AMOUNT_CENTS`.
    pub fn register_consumption(
        &mut self,
        item: Arc<Item>,
        quantity: i64,
        base_price: Money,
        selections: Vec<ModifierSelection>,
        at: NaiveTime,
    ) -> CoreResult<&Consumption> {
        if !self.is_occupied() {
            return Err(CoreError::NotOccupied(self.number));
        }

        let consumption = Consumption::new(item, quantity, base_price, selections, at)?;
        pricing::add_to_total(self.total(), consumption.line_total())?;
        self.consumptions.push(consumption);

        let index = self.consumptions.len() - 1;
        Ok(&self.consumptions[index])
    }

    /// Removes the consumption at `index` (0-based), keeping the rest in order.
    pub fn remove_consumption(&mut self, index: usize) -> CoreResult<Consumption> {
        if !self.is_occupied() {
            return Err(CoreError::NotOccupied(self.number));
        }

        if index >= self.consumptions.len() {
            return Err(CoreError::IndexOutOfRange {
                table: self.number,
                index,
                len: self.consumptions.len(),
            });
        }

        Ok(self.consumptions.remove(index))
    }

    /// `Occupied → Free`, handing back everything recorded as a ticket.
    pub fn close(&mut self) -> CoreResult<Ticket> {
        let TableStatus::Occupied { opened_at } = self.status else {
            return Err(CoreError::NotOccupied(self.number));
        };

        let consumptions = std::mem::take(&mut self.consumptions);
        self.status = TableStatus::Free;

        Ok(Ticket::new(self.number, opened_at, consumptions))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tests::{at, beer, burger, cheese};

    fn order(table: &mut Table, item: Item, qty: i64, cents: i64) -> CoreResult<()> {
        table
            .register_consumption(Arc::new(item), qty, Money::from_cents(cents), vec![], at(12, 0))
            .map(|_| ())
    }

    #[test]
    fn test_new_table_is_free() {
        let table = Table::new(1);
        assert!(!table.is_occupied());
        assert!(table.opened_at().is_none());
        assert!(table.consumptions().is_empty());
    }

    #[test]
    fn test_open_twice_fails() {
        let mut table = Table::new(2);
        table.open(at(19, 30)).unwrap();
        assert_eq!(table.opened_at(), Some(at(19, 30)));
        assert!(matches!(table.open(at(19, 31)), Err(CoreError::AlreadyOccupied(2))));
        assert_eq!(table.opened_at(), Some(at(19, 30)));
    }

    #[test]
    fn test_register_on_free_table_fails() {
        let mut table = Table::new(3);
        assert!(matches!(order(&mut table, beer(), 1, 300), Err(CoreError::NotOccupied(3))));
        assert!(table.consumptions().is_empty());
    }

    #[test]
    fn test_register_and_total() {
        let mut table = Table::new(1);
        table.open(at(12, 0)).unwrap();

        let selections = vec![ModifierSelection::new(cheese(), 1).unwrap()];
        let line = table
            .register_consumption(Arc::new(burger()), 2, Money::from_cents(1000), selections, at(12, 5))
            .unwrap();
        assert_eq!(line.line_total().cents(), 2300);

        order(&mut table, beer(), 3, 300).unwrap();
        assert_eq!(table.total().cents(), 3200);
        assert!(table.references_item("BURGER"));
        assert!(!table.references_item("WINE"));
    }

    #[test]
    fn test_register_past_amount_ceiling_leaves_table_unchanged() {
        let mut table = Table::new(1);
        table.open(at(22, 0)).unwrap();

        // 99,999.99 x 100 = 9,999,999.00, just under the ceiling
        order(&mut table, beer(), 100, crate::MAX_PRICE_CENTS).unwrap();
        assert!(matches!(
            order(&mut table, beer(), 1, 100),
            Err(CoreError::AmountTooLarge { .. })
        ));
        assert!(matches!(
            order(&mut table, beer(), 999, crate::MAX_PRICE_CENTS),
            Err(CoreError::AmountTooLarge { .. })
        ));

        assert_eq!(table.consumptions().len(), 1);
        assert_eq!(table.total().cents(), 999_999_900);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut table = Table::new(1);
        table.open(at(12, 0)).unwrap();
        order(&mut table, beer(), 1, 300).unwrap();
        order(&mut table, burger(), 1, 1000).unwrap();
        order(&mut table, beer(), 2, 300).unwrap();

        let removed = table.remove_consumption(1).unwrap();
        assert_eq!(removed.item().code(), "BURGER");

        let remaining: Vec<i64> = table.consumptions().iter().map(|c| c.quantity()).collect();
        assert_eq!(remaining, vec![1, 2]);
    }

    #[test]
    fn test_remove_out_of_range_leaves_table_unchanged() {
        let mut table = Table::new(4);
        table.open(at(12, 0)).unwrap();
        order(&mut table, beer(), 1, 300).unwrap();

        let result = table.remove_consumption(1);
        assert!(matches!(
            result,
            Err(CoreError::IndexOutOfRange { table: 4, index: 1, len: 1 })
        ));
        assert_eq!(table.consumptions().len(), 1);
    }

    #[test]
    fn test_remove_on_free_table() {
        let mut table = Table::new(1);
        assert!(matches!(table.remove_consumption(0), Err(CoreError::NotOccupied(1))));
    }

    #[test]
    fn test_close_clears_everything() {
        let mut table = Table::new(5);
        table.open(at(21, 15)).unwrap();
        order(&mut table, beer(), 2, 400).unwrap();

        let ticket = table.close().unwrap();
        assert_eq!(ticket.table_number, 5);
        assert_eq!(ticket.opened_at, at(21, 15));
        assert_eq!(ticket.consumptions.len(), 1);
        assert_eq!(ticket.total.cents(), 800);

        assert!(!table.is_occupied());
        assert!(table.opened_at().is_none());
        assert!(table.consumptions().is_empty());
    }

    #[test]
    fn test_close_free_table_fails() {
        let mut table = Table::new(1);
        assert!(matches!(table.close(), Err(CoreError::NotOccupied(1))));
    }

    #[test]
    fn test_open_close_empty() {
        let mut table = Table::new(1);
        table.open(at(10, 0)).unwrap();
        let ticket = table.close().unwrap();
        assert!(ticket.consumptions.is_empty());
        assert!(ticket.total.is_zero());
    }
}
