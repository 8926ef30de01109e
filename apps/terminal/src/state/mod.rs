//! # State Module
//!
//! Shared state of the terminal front end.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │        stdin command loop            clock ticker task                  │
//! │               │                             │                           │
//! │               ▼                             ▼                           │
//! │  ┌────────────────────────────────────────────────────┐                 │
//! │  │  VenueState: Arc<Mutex<Venue>>                     │                 │
//! │  │  (tables, catalog, happy hour, clock)              │                 │
//! │  └────────────────────────────────────────────────────┘                 │
//! │                                                                         │
//! │  ┌────────────────────────────────────────────────────┐                 │
//! │  │  ConfigState (read-only after startup)             │                 │
//! │  └────────────────────────────────────────────────────┘                 │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • VenueState: every read and write takes the mutex, so a clock tick   │
//! │    never lands halfway through pricing an order                        │
//! │  • ConfigState: immutable, shared by reference                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod venue;

pub use config::ConfigState;
pub use venue::VenueState;
