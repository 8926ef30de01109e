//! # Configuration State
//!
//! Stores the terminal configuration read at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CANTINA_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;
use std::str::FromStr;

use cantina_core::{
    VenueConfig, DEFAULT_TABLE_COUNT, DEFAULT_TICKET_WIDTH, MAX_TABLE_COUNT, MIN_TICKET_WIDTH,
};
use directories::ProjectDirs;
use serde::Serialize;
use tracing::warn;

/// Default clock tick period: one venue second per real second.
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Terminal configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Venue name (shown by `status`)
    pub venue_name: String,

    /// Number of tables, numbered from 1
    pub table_count: u32,

    /// Catalog file location
    pub catalog_path: PathBuf,

    /// Receipt width in characters
    pub ticket_width: usize,

    /// Clock tick period in milliseconds; 0 turns the ticker off
    pub tick_ms: u64,
}

impl Default for ConfigState {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Venue: "Cantina Dev Bar"
    /// - Tables: 5
    /// - Catalog: `catalog.csv` in the platform data directory
    /// - Ticket width: 40
    /// - Tick: 1000 ms
    fn default() -> Self {
        ConfigState {
            venue_name: "Cantina Dev Bar".to_string(),
            table_count: DEFAULT_TABLE_COUNT,
            catalog_path: default_catalog_path(),
            ticket_width: DEFAULT_TICKET_WIDTH,
            tick_ms: DEFAULT_TICK_MS,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `CANTINA_VENUE_NAME`: Override venue name
    /// - `CANTINA_TABLES`: Number of tables (1 to 999)
    /// - `CANTINA_CATALOG_PATH`: Catalog file path
    /// - `CANTINA_TICKET_WIDTH`: Receipt width (at least 30)
    /// - `CANTINA_TICK_MS`: Clock tick period, 0 disables it
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(name) = lookup("CANTINA_VENUE_NAME").filter(|n| !n.trim().is_empty()) {
            config.venue_name = name.trim().to_string();
        }

        if let Some(path) = lookup("CANTINA_CATALOG_PATH").filter(|p| !p.trim().is_empty()) {
            config.catalog_path = PathBuf::from(path.trim());
        }

        let tables = parse_var(&lookup, "CANTINA_TABLES", |n: &u32| {
            (1..=MAX_TABLE_COUNT).contains(n)
        });
        if let Some(tables) = tables {
            config.table_count = tables;
        }

        if let Some(width) =
            parse_var(&lookup, "CANTINA_TICKET_WIDTH", |w: &usize| *w >= MIN_TICKET_WIDTH)
        {
            config.ticket_width = width;
        }

        if let Some(tick) = parse_var(&lookup, "CANTINA_TICK_MS", |_: &u64| true) {
            config.tick_ms = tick;
        }

        config
    }

    /// Venue settings derived from this configuration.
    pub fn venue_config(&self) -> VenueConfig {
        VenueConfig {
            table_count: self.table_count,
            ticket_width: self.ticket_width,
        }
    }
}

/// Reads and parses one variable, keeping the default (with a warning) when
/// the value does not parse or is out of range.
fn parse_var<F, T, V>(lookup: &F, key: &str, valid: V) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    V: Fn(&T) -> bool,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => Some(value),
        _ => {
            warn!(key, value = %raw, "Ignoring invalid configuration value");
            None
        }
    }
}

/// Platform data directory for the catalog.
///
/// - **macOS**: `~/Library/Application Support/com.cantina.pos/catalog.csv`
/// - **Windows**: `%APPDATA%\cantina\pos\data\catalog.csv`
/// - **Linux**: `~/.local/share/pos/catalog.csv`
///
/// Falls back to `./catalog.csv` when no home directory is known.
fn default_catalog_path() -> PathBuf {
    ProjectDirs::from("com", "cantina", "pos")
        .map(|dirs| dirs.data_dir().join("catalog.csv"))
        .unwrap_or_else(|| PathBuf::from("catalog.csv"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ConfigState {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ConfigState::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.venue_name, "Cantina Dev Bar");
        assert_eq!(config.table_count, 5);
        assert_eq!(config.ticket_width, 40);
        assert_eq!(config.tick_ms, 1000);
        assert!(config.catalog_path.ends_with("catalog.csv"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("CANTINA_VENUE_NAME", "La Cantina"),
            ("CANTINA_TABLES", "12"),
            ("CANTINA_CATALOG_PATH", "/tmp/bar.csv"),
            ("CANTINA_TICKET_WIDTH", "48"),
            ("CANTINA_TICK_MS", "0"),
        ]);

        assert_eq!(config.venue_name, "La Cantina");
        assert_eq!(config.table_count, 12);
        assert_eq!(config.catalog_path, PathBuf::from("/tmp/bar.csv"));
        assert_eq!(config.ticket_width, 48);
        assert_eq!(config.tick_ms, 0);

        let venue = config.venue_config();
        assert_eq!(venue.table_count, 12);
        assert_eq!(venue.ticket_width, 48);
    }

    #[test]
    fn test_table_count_bounds() {
        assert_eq!(config_from(&[("CANTINA_TABLES", "999")]).table_count, 999);
        assert_eq!(config_from(&[("CANTINA_TABLES", "1000")]).table_count, 5);
        assert_eq!(config_from(&[("CANTINA_TABLES", "4000000000")]).table_count, 5);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = config_from(&[
            ("CANTINA_TABLES", "0"),
            ("CANTINA_TICKET_WIDTH", "20"),
            ("CANTINA_TICK_MS", "fast"),
            ("CANTINA_VENUE_NAME", "   "),
        ]);

        assert_eq!(config.table_count, 5);
        assert_eq!(config.ticket_width, 40);
        assert_eq!(config.tick_ms, 1000);
        assert_eq!(config.venue_name, "Cantina Dev Bar");
    }
}
