//! # Commands Module
//!
//! Parses one operator line into a [`Command`] and runs it against the
//! shared state.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (parsing, dispatch)
//! ├── table.rs    ◄─── open, order, remove, close, table listings
//! ├── catalog.rs  ◄─── items, item, price, add/replace/remove item
//! └── clock.rs    ◄─── status, happy, clock set, tick, ticker task
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  stdin: "order 2 BURGER 2 Cheese=1, No ketchup"                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Command::parse ──► Command::Order { table: 2, code, quantity, mods }   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  execute(&VenueState, &ConfigState, command)                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Reply::Json(view) / Reply::Text(ticket) / Err(ApiError)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod clock;
pub mod table;

use chrono::NaiveTime;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{ConfigState, VenueState};

/// Help text printed by `help`.
pub const HELP: &str = "\
Commands:
  status                          clock, day part, happy hour
  tables | free | occupied        list tables
  table <n>                       show one table
  items | item <code>             list items / show one item
  price <code>                    base price a new order would get now
  open <n> [HH:MM]                open a table (default: venue clock)
  order <n> <code> <qty> [mods]   mods: name=qty, comma separated
  remove <n> <index>              remove a consumption (0-based)
  close <n>                       close a table and print its ticket
  happy                           toggle happy hour
  clock set <hour>                set the clock to hour:00:00
  tick                            advance the clock one second
  add-item <row>                  code,name,day,night,happy,image[,mods]
  replace-item <row>              same row format, replaces by code
  remove-item <code>              remove an item not in use
  quit";

// =============================================================================
// Command
// =============================================================================

/// One parsed operator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Status,
    Tables,
    FreeTables,
    OccupiedTables,
    Table(u32),
    Items,
    Item(String),
    Price(String),
    Open {
        table: u32,
        at: Option<NaiveTime>,
    },
    Order {
        table: u32,
        code: String,
        quantity: i64,
        modifiers: Vec<(String, i64)>,
    },
    Remove {
        table: u32,
        index: usize,
    },
    Close(u32),
    Happy,
    SetClock(u32),
    Tick,
    AddItem(String),
    ReplaceItem(String),
    RemoveItem(String),
    Quit,
}

impl Command {
    /// Parses a command line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, ApiError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match (keyword.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("help", []) => Command::Help,
            ("status", []) => Command::Status,
            ("tables", []) => Command::Tables,
            ("free", []) => Command::FreeTables,
            ("occupied", []) => Command::OccupiedTables,
            ("table", [n]) => Command::Table(number("table", n)?),
            ("items", []) => Command::Items,
            ("item", [code]) => Command::Item(code.to_string()),
            ("price", [code]) => Command::Price(code.to_string()),
            ("open", [n]) => Command::Open {
                table: number("table", n)?,
                at: None,
            },
            ("open", [n, at]) => Command::Open {
                table: number("table", n)?,
                at: Some(time_of_day(at)?),
            },
            ("order", [n, code, qty, ..]) => Command::Order {
                table: number("table", n)?,
                code: code.to_string(),
                quantity: number("quantity", qty)?,
                modifiers: parse_modifier_choices(remainder(rest, 3))?,
            },
            ("remove", [n, index]) => Command::Remove {
                table: number("table", n)?,
                index: number("index", index)?,
            },
            ("close", [n]) => Command::Close(number("table", n)?),
            ("happy", []) => Command::Happy,
            ("clock", ["set", hour]) => Command::SetClock(number("hour", hour)?),
            ("tick", []) => Command::Tick,
            ("add-item", [_, ..]) => Command::AddItem(rest.to_string()),
            ("replace-item", [_, ..]) => Command::ReplaceItem(rest.to_string()),
            ("remove-item", [code]) => Command::RemoveItem(code.to_string()),
            ("quit" | "exit", []) => Command::Quit,
            (other, _) if is_keyword(other) => {
                return Err(ApiError::bad_command(format!(
                    "Wrong arguments for '{}'; type help",
                    other
                )))
            }
            (other, _) => {
                return Err(ApiError::bad_command(format!(
                    "Unknown command '{}'; type help",
                    other
                )))
            }
        };

        Ok(Some(command))
    }
}

const KEYWORDS: &[&str] = &[
    "help", "status", "tables", "free", "occupied", "table", "items", "item", "price", "open",
    "order", "remove", "close", "happy", "clock", "tick", "add-item", "replace-item",
    "remove-item", "quit", "exit",
];

fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

fn number<T: std::str::FromStr>(what: &str, text: &str) -> Result<T, ApiError> {
    text.parse()
        .map_err(|_| ApiError::bad_command(format!("Invalid {}: '{}'", what, text)))
}

fn time_of_day(text: &str) -> Result<NaiveTime, ApiError> {
    NaiveTime::parse_from_str(text, "%H:%M")
        .map_err(|_| ApiError::bad_command(format!("Invalid time '{}': expected HH:MM", text)))
}

/// The text after the first `skip` whitespace-separated words.
fn remainder(text: &str, skip: usize) -> &str {
    let mut rest = text.trim_start();
    for _ in 0..skip {
        rest = match rest.split_once(char::is_whitespace) {
            Some((_, tail)) => tail.trim_start(),
            None => "",
        };
    }
    rest
}

/// Parses `Cheese=2, No ketchup` into `[("Cheese", 2), ("No ketchup", 1)]`.
///
/// Entries are comma separated because modifier names may contain spaces
/// but never commas. A bare name means quantity 1.
pub fn parse_modifier_choices(text: &str) -> Result<Vec<(String, i64)>, ApiError> {
    text.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| -> Result<(String, i64), ApiError> {
            match entry.rsplit_once('=') {
                Some((name, qty)) if !name.trim().is_empty() => {
                    Ok((name.trim().to_string(), number("modifier quantity", qty.trim())?))
                }
                Some(_) => Err(ApiError::bad_command(format!("Invalid modifier '{}'", entry))),
                None => Ok((entry.to_string(), 1)),
            }
        })
        .collect()
}

// =============================================================================
// Dispatch
// =============================================================================

/// What a command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Plain text (help, tickets)
    Text(String),
    /// A structured view, printed as JSON
    Json(serde_json::Value),
    /// End the session
    Quit,
}

impl Reply {
    fn json<T: Serialize>(value: T) -> Result<Reply, ApiError> {
        serde_json::to_value(value)
            .map(Reply::Json)
            .map_err(|e| ApiError::validation(e.to_string()))
    }

    /// Renders the reply for stdout.
    pub fn render(&self) -> Option<String> {
        match self {
            Reply::Text(text) => Some(text.trim_end().to_string()),
            Reply::Json(value) => {
                Some(serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()))
            }
            Reply::Quit => None,
        }
    }
}

/// Runs one command.
pub fn execute(
    venue: &VenueState,
    config: &ConfigState,
    command: Command,
) -> Result<Reply, ApiError> {
    debug!(?command, "Executing command");

    match command {
        Command::Help => Ok(Reply::Text(HELP.to_string())),
        Command::Status => Reply::json(clock::get_status(venue, config)),
        Command::Tables => Reply::json(table::list_tables(venue)),
        Command::FreeTables => Reply::json(table::free_tables(venue)),
        Command::OccupiedTables => Reply::json(table::occupied_tables(venue)),
        Command::Table(number) => Reply::json(table::get_table(venue, number)?),
        Command::Items => Reply::json(catalog::list_items(venue)),
        Command::Item(code) => Reply::json(catalog::get_item(venue, &code)?),
        Command::Price(code) => Reply::json(catalog::current_price(venue, &code)?),
        Command::Open { table: number, at } => Reply::json(table::open_table(venue, number, at)?),
        Command::Order {
            table: number,
            code,
            quantity,
            modifiers,
        } => Reply::json(table::register_order(
            venue, number, &code, quantity, &modifiers,
        )?),
        Command::Remove {
            table: number,
            index,
        } => Reply::json(table::remove_consumption(venue, number, index)?),
        Command::Close(number) => Ok(Reply::Text(table::close_table(venue, number)?)),
        Command::Happy => Reply::json(clock::toggle_happy_hour(venue, config)),
        Command::SetClock(hour) => Reply::json(clock::set_clock(venue, config, hour)?),
        Command::Tick => Reply::json(clock::tick(venue, config)),
        Command::AddItem(row) => Reply::json(catalog::add_item(venue, &row)?),
        Command::ReplaceItem(row) => Reply::json(catalog::replace_item(venue, &row)?),
        Command::RemoveItem(code) => Reply::json(catalog::remove_item(venue, &code)?),
        Command::Quit => Ok(Reply::Quit),
    }
}

/// Parses and runs one line, folding errors into JSON text.
pub fn handle_line(venue: &VenueState, config: &ConfigState, line: &str) -> Option<Reply> {
    let result = Command::parse(line).and_then(|command| match command {
        Some(command) => execute(venue, config, command).map(Some),
        None => Ok(None),
    });

    match result {
        Ok(reply) => reply,
        Err(err) => {
            debug!(code = ?err.code, message = %err.message, "Command failed");
            Some(Reply::Text(err.to_json()))
        }
    }
}

// =============================================================================
// Test Support
// =============================================================================

#[cfg(test)]
pub(crate) mod test_support {
    use cantina_core::{Catalog, Venue, VenueConfig};
    use cantina_store::parse_item_line;
    use chrono::NaiveTime;

    use crate::state::{ConfigState, VenueState};

    pub fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    pub fn sample_state() -> VenueState {
        let rows = [
            "BURGER,Burger,10,12,8,images/burger.png,Cheese:QUANTITY:1.5;No ketchup:BOOLEAN:0",
            "BEER,Beer,3,4,2,images/beer.png,",
        ];
        let catalog =
            Catalog::from_items(rows.iter().map(|row| parse_item_line(row).unwrap().item)).unwrap();
        VenueState::new(Venue::new(VenueConfig::default(), catalog, noon()))
    }

    pub fn config() -> ConfigState {
        ConfigState::from_lookup(|_| None)
    }
}
