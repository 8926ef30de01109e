//! # Ticket
//!
//! The closing receipt of a table and its fixed-width text rendering.
//!
//! ## Layout (width 40)
//! ```text
//! Ticket - Table 3
//! Opened at 21:15
//! ----------------------------------------
//! Item                      Qty   Subtotal
//! ----------------------------------------
//! Burger (Cheese: 1, No k     2      23.00
//! ----------------------------------------
//! TOTAL:                             23.00
//! ----------------------------------------
//! ```

use std::fmt;

use chrono::NaiveTime;
use serde::Serialize;

use crate::money::Money;
use crate::types::Consumption;
use crate::{DEFAULT_TICKET_WIDTH, MIN_TICKET_WIDTH};

/// Width of the quantity column.
const QTY_WIDTH: usize = 5;

/// Width of the subtotal column: `9999999.99`, the widest line total
/// `MAX_AMOUNT_CENTS` allows.
const SUBTOTAL_WIDTH: usize = 10;

/// Everything a table held at the moment it was closed.
#[derive(Debug, Clone, Serialize)]
pub struct Ticket {
    pub table_number: u32,
    #[serde(with = "crate::types::hh_mm_ss")]
    pub opened_at: NaiveTime,
    pub consumptions: Vec<Consumption>,
    pub total: Money,
}

impl Ticket {
    pub fn new(table_number: u32, opened_at: NaiveTime, consumptions: Vec<Consumption>) -> Self {
        let total = consumptions.iter().map(Consumption::line_total).sum();
        Ticket {
            table_number,
            opened_at,
            consumptions,
            total,
        }
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&TicketFormatter::default().render(self))
    }
}

// =============================================================================
// Formatter
// =============================================================================

/// Renders tickets at a fixed character width.
#[derive(Debug, Clone, Copy)]
pub struct TicketFormatter {
    width: usize,
}

impl Default for TicketFormatter {
    fn default() -> Self {
        TicketFormatter {
            width: DEFAULT_TICKET_WIDTH,
        }
    }
}

impl TicketFormatter {
    /// Widths below the minimum are raised to it.
    pub fn new(width: usize) -> Self {
        TicketFormatter {
            width: width.max(MIN_TICKET_WIDTH),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    fn item_width(&self) -> usize {
        self.width - QTY_WIDTH - SUBTOTAL_WIDTH - 2
    }

    /// Renders the ticket. Pure: the ticket is only read.
    pub fn render(&self, ticket: &Ticket) -> String {
        let rule = "-".repeat(self.width);
        let item_width = self.item_width();
        let mut lines = Vec::with_capacity(ticket.consumptions.len() + 8);

        lines.push(format!("Ticket - Table {}", ticket.table_number));
        lines.push(format!("Opened at {}", ticket.opened_at.format("%H:%M")));
        lines.push(rule.clone());
        lines.push(self.row("Item", "Qty", "Subtotal"));
        lines.push(rule.clone());

        for consumption in &ticket.consumptions {
            let label = item_label(consumption);
            let label: String = label.chars().take(item_width).collect();
            lines.push(self.row(
                &label,
                &consumption.quantity().to_string(),
                &consumption.line_total().amount(),
            ));
        }

        lines.push(rule.clone());
        lines.push(format!(
            "TOTAL:{:>width$}",
            ticket.total.amount(),
            width = self.width - "TOTAL:".len()
        ));
        lines.push(rule);

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    fn row(&self, item: &str, qty: &str, subtotal: &str) -> String {
        format!(
            "{:<item_w$} {:>qty_w$} {:>subtotal_w$}",
            item,
            qty,
            subtotal,
            item_w = self.item_width(),
            qty_w = QTY_WIDTH,
            subtotal_w = SUBTOTAL_WIDTH,
        )
    }
}

/// Item name followed by the modifier summary, if any.
fn item_label(consumption: &Consumption) -> String {
    let detail = consumption.detail();
    if detail.is_empty() {
        consumption.item().name().to_string()
    } else {
        format!("{} {}", consumption.item().name(), detail)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tests::{at, beer, burger, cheese, no_ketchup};
    use crate::types::ModifierSelection;
    use std::sync::Arc;

    fn burger_line() -> Consumption {
        let selections = vec![
            ModifierSelection::new(cheese(), 1).unwrap(),
            ModifierSelection::new(no_ketchup(), 1).unwrap(),
        ];
        Consumption::new(Arc::new(burger()), 2, Money::from_cents(1000), selections, at(21, 20))
            .unwrap()
    }

    #[test]
    fn test_render_layout() {
        let ticket = Ticket::new(3, at(21, 15), vec![burger_line()]);
        let text = TicketFormatter::default().render(&ticket);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Ticket - Table 3");
        assert_eq!(lines[1], "Opened at 21:15");
        assert_eq!(lines[2], "-".repeat(40));
        assert_eq!(lines[3], "Item                      Qty   Subtotal");
        assert_eq!(lines[5], "Burger (Cheese: 1, No k     2      23.00");
        assert_eq!(lines[7], "TOTAL:                             23.00");
        assert_eq!(lines.len(), 9);

        for line in &lines[2..] {
            assert_eq!(line.chars().count(), 40);
        }
    }

    #[test]
    fn test_render_empty_ticket() {
        let ticket = Ticket::new(1, at(9, 0), Vec::new());
        let text = ticket.to_string();

        assert!(ticket.total.is_zero());
        assert!(text.contains("TOTAL:"));
        assert!(text.lines().nth(6).unwrap().ends_with("0.00"));
        assert_eq!(text.lines().count(), 8);
    }

    #[test]
    fn test_truncates_on_char_boundary() {
        let item = crate::types::Item::new(
            "CANA",
            "Caña de cerveza ñandú especial",
            crate::types::tests::prices(300, 300, 300),
            "",
            vec![],
        )
        .unwrap();
        let line = Consumption::new(Arc::new(item), 1, Money::from_cents(300), vec![], at(1, 0))
            .unwrap();
        let ticket = Ticket::new(2, at(1, 0), vec![line]);

        let text = TicketFormatter::new(30).render(&ticket);
        let row = text.lines().nth(5).unwrap();
        assert_eq!(row.chars().count(), 30);
        assert!(row.starts_with("Caña de cerve"));
    }

    #[test]
    fn test_widest_amounts_keep_fixed_width() {
        let top = Money::from_cents(crate::MAX_PRICE_CENTS);
        let extra =
            crate::types::Modifier::new("Extra", crate::types::ModifierKind::Quantity, top).unwrap();
        let item = crate::types::Item::new(
            "BIG",
            "Big",
            crate::types::tests::prices(crate::MAX_PRICE_CENTS, 0, 0),
            "",
            vec![extra.clone()],
        )
        .unwrap();
        let selections = vec![ModifierSelection::new(extra, 99).unwrap()];
        let line = Consumption::new(Arc::new(item), 1, top, selections, at(23, 0)).unwrap();
        assert_eq!(line.line_total().amount(), "9999999.00");

        let ticket = Ticket::new(7, at(22, 0), vec![line]);
        for width in [MIN_TICKET_WIDTH, DEFAULT_TICKET_WIDTH] {
            let text = TicketFormatter::new(width).render(&ticket);
            for row in text.lines().skip(2) {
                assert_eq!(row.chars().count(), width, "row {:?}", row);
            }
            assert!(text.lines().nth(5).unwrap().ends_with(" 9999999.00"));
        }
    }

    #[test]
    fn test_minimum_width() {
        assert_eq!(TicketFormatter::new(10).width(), MIN_TICKET_WIDTH);
        assert_eq!(TicketFormatter::new(60).width(), 60);
    }

    #[test]
    fn test_total_sums_lines() {
        let beer_line =
            Consumption::new(Arc::new(beer()), 3, Money::from_cents(400), vec![], at(22, 0)).unwrap();
        let ticket = Ticket::new(1, at(21, 0), vec![burger_line(), beer_line]);
        assert_eq!(ticket.total.cents(), 2300 + 1200);
    }
}
