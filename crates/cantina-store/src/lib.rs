//! # cantina-store: Catalog File Layer for Cantina POS
//!
//! Reads the item catalog from a comma-delimited text file at startup and
//! writes it back after every catalog change.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cantina POS Data Flow                            │
//! │                                                                         │
//! │  Terminal command (add-item / replace-item / remove-item)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Venue (cantina-core) mutates its Catalog                               │
//! │       │ CatalogPersister::persist                                       │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  cantina-store (THIS CRATE)                     │   │
//! │  │   CatalogFile::save → catalog.csv.tmp → rename → catalog.csv    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cantina_store::CatalogFile;
//!
//! let file = CatalogFile::new("data/catalog.csv");
//! let load = file.load_or_empty()?;
//! let venue = Venue::new(config, load.catalog, clock).with_persister(Box::new(file));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog_file;
pub mod error;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog_file::{
    parse_item_line, parse_record, CatalogFile, CatalogLoad, ParsedItem, SkippedRow,
    DEFAULT_IMAGE_REF, HEADER,
};
pub use error::{StoreError, StoreResult};
