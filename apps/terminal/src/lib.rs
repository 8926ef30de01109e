//! # Cantina Terminal Library
//!
//! Operator front end for Cantina POS: one command per stdin line, one
//! reply per command on stdout, logs on stderr.
//!
//! ## Module Organization
//! ```text
//! cantina_terminal/
//! ├── lib.rs          ◄─── You are here (startup & command loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── venue.rs    ◄─── Shared venue behind Arc<Mutex>
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command parsing & dispatch
//! │   ├── table.rs    ◄─── Table lifecycle commands
//! │   ├── catalog.rs  ◄─── Item browsing & editing commands
//! │   └── clock.rs    ◄─── Status, happy hour, clock commands
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::time::Duration;

use cantina_core::Venue;
use cantina_store::CatalogFile;
use chrono::{Local, NaiveTime, Timelike};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use commands::handle_line;
use state::{ConfigState, VenueState};

/// Runs the terminal until `quit` or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Terminal Startup                                  │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,cantina=debug, can be overridden with RUST_LOG      │
/// │                                                                         │
/// │  2. Read Configuration ───────────────────────────────────────────────► │
/// │     • CANTINA_* environment variables over defaults                     │
/// │                                                                         │
/// │  3. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • Bad rows are skipped with a warning                               │
/// │     • A missing file starts an empty catalog                            │
/// │                                                                         │
/// │  4. Initialize State ─────────────────────────────────────────────────► │
/// │     • Venue clock starts at the local wall-clock time                   │
/// │     • Catalog edits are saved back to the same file                     │
/// │                                                                         │
/// │  5. Start Clock Ticker, then Read Commands ───────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Cantina POS terminal");

    let config = ConfigState::from_env();
    info!(
        venue = %config.venue_name,
        tables = config.table_count,
        catalog = ?config.catalog_path,
        "Configuration loaded"
    );

    let file = CatalogFile::new(config.catalog_path.clone());
    let load = file.load_or_empty()?;
    if !load.skipped.is_empty() {
        warn!(skipped = load.skipped.len(), "Some catalog rows were not loaded");
    }

    let venue = Venue::new(config.venue_config(), load.catalog, start_clock())
        .with_persister(Box::new(file));
    let venue = VenueState::new(venue);

    let ticker = if config.tick_ms > 0 {
        Some(commands::clock::spawn_clock_ticker(
            venue.clone(),
            Duration::from_millis(config.tick_ms),
        ))
    } else {
        None
    };

    info!("Ready; type help for commands");
    let result = command_loop(&venue, &config).await;

    if let Some(ticker) = ticker {
        ticker.abort();
    }
    info!("Terminal stopped");

    result
}

/// Reads stdin line by line until `quit` or EOF.
async fn command_loop(
    venue: &VenueState,
    config: &ConfigState,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let Some(reply) = handle_line(venue, config, &line) else {
            continue;
        };

        match reply.render() {
            Some(text) => {
                stdout.write_all(text.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
            None => break,
        }
    }

    Ok(())
}

/// Local time of day truncated to whole seconds.
fn start_clock() -> NaiveTime {
    let now = Local::now().time();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cantina=trace` - Show trace for cantina crates only
/// - Default: INFO, DEBUG for cantina crates
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,cantina=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
