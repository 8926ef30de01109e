//! # Sample Catalog Generator
//!
//! Writes a small bar catalog for development.
//!
//! ## Usage
//! ```bash
//! # Write ./catalog.csv (default)
//! cargo run -p cantina-store --bin seed
//!
//! # Specify the output path
//! cargo run -p cantina-store --bin seed -- --path ./data/catalog.csv
//!
//! # Overwrite an existing file
//! cargo run -p cantina-store --bin seed -- --force
//! ```

use std::env;

use cantina_core::{Catalog, Item, ItemPrices, Modifier, ModifierKind, Money};
use cantina_store::CatalogFile;

/// (code, name, day, night, happy hour, image, modifiers)
type SampleItem = (&'static str, &'static str, i64, i64, i64, &'static str, &'static [SampleModifier]);

/// (name, kind, price per unit)
type SampleModifier = (&'static str, ModifierKind, i64);

const ITEMS: &[SampleItem] = &[
    (
        "BURGER",
        "Burger",
        1000,
        1200,
        800,
        "images/burger.png",
        &[
            ("Cheese", ModifierKind::Quantity, 150),
            ("Bacon", ModifierKind::Quantity, 200),
            ("No ketchup", ModifierKind::Boolean, 0),
        ],
    ),
    (
        "FRIES",
        "Fries",
        400,
        500,
        300,
        "images/fries.png",
        &[("Extra sauce", ModifierKind::Quantity, 50)],
    ),
    ("BEER", "Draft Beer", 300, 400, 200, "images/beer.png", &[]),
    (
        "WINE",
        "House Wine",
        500,
        650,
        400,
        "images/wine.png",
        &[("Ice", ModifierKind::Boolean, 0)],
    ),
    (
        "MOJITO",
        "Mojito",
        700,
        900,
        500,
        "images/mojito.png",
        &[
            ("Extra rum", ModifierKind::Quantity, 250),
            ("No sugar", ModifierKind::Boolean, 0),
        ],
    ),
    ("SODA", "Soda", 200, 250, 150, "images/soda.png", &[]),
    (
        "NACHOS",
        "Nachos",
        650,
        750,
        500,
        "images/nachos.png",
        &[
            ("Guacamole", ModifierKind::Boolean, 120),
            ("Jalapenos", ModifierKind::Quantity, 30),
        ],
    ),
    ("COFFEE", "Coffee", 180, 220, 180, "images/coffee.png", &[]),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut path = String::from("./catalog.csv");
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--path" | "-p" => {
                if i + 1 < args.len() {
                    path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("Cantina POS Sample Catalog Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -p, --path <PATH>  Catalog file path (default: ./catalog.csv)");
                println!("  -f, --force        Overwrite an existing catalog");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Cantina POS Sample Catalog Generator");
    println!("====================================");
    println!("Catalog: {}", path);
    println!();

    let file = CatalogFile::new(&path);
    if file.path().exists() && !force {
        println!("⚠ {} already exists", path);
        println!("  Skipping seed to avoid overwriting it.");
        println!("  Pass --force to regenerate.");
        return Ok(());
    }

    let catalog = sample_catalog()?;
    file.save(&catalog)?;

    println!("✓ Wrote {} items", catalog.len());

    let reloaded = file.load()?;
    println!(
        "✓ Reloaded {} items ({} skipped rows)",
        reloaded.catalog.len(),
        reloaded.skipped.len()
    );

    Ok(())
}

/// Builds the sample catalog from [`ITEMS`].
fn sample_catalog() -> Result<Catalog, Box<dyn std::error::Error>> {
    let mut catalog = Catalog::new();

    for (code, name, day, night, happy_hour, image, modifiers) in ITEMS {
        let modifiers = modifiers
            .iter()
            .map(|(name, kind, price)| Modifier::new(*name, *kind, Money::from_cents(*price)))
            .collect::<Result<Vec<_>, _>>()?;

        let prices = ItemPrices {
            day: Money::from_cents(*day),
            night: Money::from_cents(*night),
            happy_hour: Money::from_cents(*happy_hour),
        };

        catalog.add_item(Item::new(*code, *name, prices, *image, modifiers)?)?;
    }

    Ok(catalog)
}
