//! # Seed Data Generator
//!
//! Populates a store with sample shop data for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default data directory
//! cargo run -p thiri-store --bin seed
//!
//! # Seed a specific directory
//! THIRI_DATA_DIR=./data cargo run -p thiri-store --bin seed
//! ```
//!
//! ## Generated Data
//! A small corner-shop inventory (teas, snacks, staples), a handful of
//! purchase records with their stock increments applied, one completed
//! sale, and kyat settings with 5% tax.

use tracing::info;
use tracing_subscriber::EnvFilter;

use thiri_core::ledger::Ledger;
use thiri_core::types::{ItemDraft, Settings};
use thiri_store::{session, JsonStore, StoreConfig};

/// (name, purchase price cents, sale price cents, stock)
const ITEMS: &[(&str, i64, i64, i64)] = &[
    ("Green Tea", 70_000, 100_000, 24),
    ("Black Tea", 60_000, 90_000, 18),
    ("Instant Coffee", 120_000, 180_000, 30),
    ("Condensed Milk", 90_000, 130_000, 12),
    ("Rice 1kg", 180_000, 230_000, 40),
    ("Cooking Oil 1L", 450_000, 550_000, 10),
    ("Eggs (dozen)", 320_000, 400_000, 15),
    ("Dried Noodles", 40_000, 70_000, 50),
    ("Fish Sauce", 150_000, 210_000, 8),
    ("Palm Sugar", 110_000, 160_000, 20),
];

/// (item name, quantity, lot total cents)
const PURCHASES: &[(&str, i64, i64)] = &[
    ("Green Tea", 12, 800_000),
    ("Rice 1kg", 20, 3_500_000),
    ("Instant Coffee", 10, 1_150_000),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = StoreConfig::from_env()?;
    info!(dir = %config.data_dir.display(), "Seeding store");
    let store = JsonStore::open(config)?;

    let mut ledger = Ledger::new();

    for (name, purchase, sale, stock) in ITEMS {
        ledger.create_item(ItemDraft::new(*name, Some(*purchase), *sale, *stock))?;
    }
    info!(count = ledger.items().len(), "Created items");

    for (name, qty, total) in PURCHASES {
        let outcome = ledger.record_purchase(name, *qty, *total)?;
        info!(
            name = %outcome.record.name,
            quantity = outcome.record.quantity,
            stock = ?outcome.stock,
            "Recorded purchase"
        );
    }

    // One completed sale so the history page has something to show.
    let settings = Settings {
        currency: "Ks".to_string(),
        tax_rate_bps: 500,
    };
    let green_tea = ledger
        .items()
        .iter()
        .find(|i| i.matches_name("Green Tea"))
        .map(|i| i.id)
        .ok_or("seed item missing")?;
    let rice = ledger
        .items()
        .iter()
        .find(|i| i.matches_name("Rice 1kg"))
        .map(|i| i.id)
        .ok_or("seed item missing")?;

    ledger.add_to_cart(green_tea, 1)?;
    ledger.add_to_cart(green_tea, 1)?;
    ledger.add_to_cart(rice, 1)?;
    let sale = ledger.checkout(settings.tax_rate())?;
    info!(total = %settings.format_amount(sale.total()), "Recorded sale");

    session::commit(&store, &mut ledger)?;
    session::save_settings(&store, &settings)?;
    info!("Seed complete");

    Ok(())
}
