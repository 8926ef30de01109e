//! # Catalog File
//!
//! Loads and saves the item catalog as comma-delimited text.
//!
//! ## Format
//! ```text
//! code,name,day_price,night_price,happy_hour_price,image,modifiers
//! BURGER,Burger,10.00,12.00,8.00,images/burger.png,Cheese:QUANTITY:1.50;No ketchup:BOOLEAN:0.00
//! BEER,Beer,3.00,4.00,2.00,images/beer.png
//! ```
//!
//! The first line is a header and is skipped. The 7th column is optional.
//! A bad row never aborts a load: it is logged and reported in
//! [`CatalogLoad::skipped`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cantina_core::{
    format_modifiers, parse_modifiers, Catalog, CatalogPersister, Item, ItemPrices, Money,
    RejectedModifier,
};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use tracing::{debug, error, info, warn};

use crate::error::{StoreError, StoreResult};

/// Image reference given to items whose image column is empty.
pub const DEFAULT_IMAGE_REF: &str = "images/default.png";

/// Header row written on save.
pub const HEADER: [&str; 7] = [
    "code",
    "name",
    "day_price",
    "night_price",
    "happy_hour_price",
    "image",
    "modifiers",
];

// =============================================================================
// Load Results
// =============================================================================

/// A row left out of the catalog, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

/// The catalog read from disk plus the rows that did not make it in.
#[derive(Debug, Default)]
pub struct CatalogLoad {
    pub catalog: Catalog,
    pub skipped: Vec<SkippedRow>,
}

/// One item parsed from a row, with any modifier entries that were dropped.
#[derive(Debug)]
pub struct ParsedItem {
    pub item: Item,
    pub rejected: Vec<RejectedModifier>,
}

// =============================================================================
// Row Parsing
// =============================================================================

/// Builds an item from one record of 6 or 7 fields.
pub fn parse_record(record: &StringRecord, line: u64) -> StoreResult<ParsedItem> {
    if record.len() != 6 && record.len() != 7 {
        return Err(StoreError::invalid_row(
            line,
            format!("expected 6 or 7 fields, found {}", record.len()),
        ));
    }

    let price = |index: usize| -> StoreResult<Money> {
        Money::parse(&record[index])
            .map_err(|e| StoreError::invalid_row(line, format!("{} {}", HEADER[index], e)))
    };

    let prices = ItemPrices {
        day: price(2)?,
        night: price(3)?,
        happy_hour: price(4)?,
    };

    let image_ref = match record[5].trim() {
        "" => DEFAULT_IMAGE_REF,
        image => image,
    };

    let parsed = parse_modifiers(record.get(6).unwrap_or(""));
    let item = Item::new(&record[0], &record[1], prices, image_ref, parsed.modifiers)?;

    Ok(ParsedItem {
        item,
        rejected: parsed.rejected,
    })
}

/// Parses a single catalog row typed by an operator (no header).
///
/// ## Example
/// ```rust
/// use cantina_store::parse_item_line;
///
/// let parsed = parse_item_line("WINE,House Wine,5,6.5,4,,").unwrap();
/// assert_eq!(parsed.item.code(), "WINE");
/// assert_eq!(parsed.item.night_price().cents(), 650);
/// ```
pub fn parse_item_line(text: &str) -> StoreResult<ParsedItem> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    match reader.records().next() {
        Some(record) => parse_record(&record?, 1),
        None => Err(StoreError::invalid_row(1, "empty row")),
    }
}

// =============================================================================
// Catalog File
// =============================================================================

/// The catalog file on disk.
#[derive(Debug, Clone)]
pub struct CatalogFile {
    path: PathBuf,
}

impl CatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CatalogFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the catalog. A missing file is an error.
    pub fn load(&self) -> StoreResult<CatalogLoad> {
        let file = fs::File::open(&self.path)?;
        let load = Self::read_from(file)?;

        info!(
            path = %self.path.display(),
            items = load.catalog.len(),
            skipped = load.skipped.len(),
            "Catalog loaded"
        );

        Ok(load)
    }

    /// Loads the catalog, starting empty when the file does not exist yet.
    pub fn load_or_empty(&self) -> StoreResult<CatalogLoad> {
        match self.load() {
            Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "Catalog file not found, starting empty");
                Ok(CatalogLoad::default())
            }
            other => other,
        }
    }

    /// Reads catalog rows from any reader, skipping the header line.
    pub fn read_from<R: io::Read>(reader: R) -> StoreResult<CatalogLoad> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut load = CatalogLoad::default();

        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    let line = e.position().map_or(0, |p| p.line());
                    skip(&mut load, skipped_row(line, e.into()));
                    continue;
                }
            };

            let line = record.position().map_or(0, |p| p.line());
            let outcome = parse_record(&record, line).and_then(|parsed| {
                load.catalog.add_item(parsed.item)?;
                Ok(parsed.rejected)
            });

            match outcome {
                Ok(rejected) => {
                    for entry in rejected {
                        warn!(line, entry = %entry.entry, reason = %entry.reason, "Skipping modifier");
                    }
                }
                Err(e) => skip(&mut load, skipped_row(line, e)),
            }
        }

        Ok(load)
    }

    /// Writes the catalog to a temp file next to the target, then renames
    /// it into place.
    pub fn save(&self, catalog: &Catalog) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.temp_path();
        let file = fs::File::create(&tmp)?;
        Self::write_to(catalog, file)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), items = catalog.len(), "Catalog saved");
        Ok(())
    }

    /// Writes the header and one row per item.
    pub fn write_to<W: io::Write>(catalog: &Catalog, writer: W) -> StoreResult<()> {
        let mut writer = WriterBuilder::new().flexible(false).from_writer(writer);
        writer.write_record(HEADER)?;

        for item in catalog.all_items() {
            let prices = item.prices();
            writer.write_record([
                item.code().to_string(),
                item.name().to_string(),
                prices.day.amount(),
                prices.night.amount(),
                prices.happy_hour.amount(),
                item.image_ref().to_string(),
                format_modifiers(item.modifiers()),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

fn skipped_row(line: u64, err: StoreError) -> SkippedRow {
    match err {
        StoreError::InvalidRow { line, reason } => SkippedRow { line, reason },
        other => SkippedRow {
            line,
            reason: other.to_string(),
        },
    }
}

fn skip(load: &mut CatalogLoad, row: SkippedRow) {
    warn!(line = row.line, reason = %row.reason, "Skipping catalog row");
    load.skipped.push(row);
}

impl CatalogPersister for CatalogFile {
    fn persist(&self, catalog: &Catalog) {
        if let Err(e) = self.save(catalog) {
            error!(path = %self.path.display(), error = %e, "Failed to persist catalog");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
