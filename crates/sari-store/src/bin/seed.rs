//! # Seed Data Generator
//!
//! Populates a data directory with a starter sari-sari catalog for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the default ./data directory
//! cargo run -p sari-store --bin seed
//!
//! # Specify the data directory
//! cargo run -p sari-store --bin seed -- --data ./my-store
//! ```
//!
//! Skips seeding when the catalog already has products, so it is safe
//! to run twice. The default accounts (admin/admin123 and
//! cashier/cashier123) are created by the store itself on first open.

use std::env;
use std::sync::Arc;

use sari_core::{Money, NewProduct};
use sari_store::{JsonFileStore, Pos};

/// `(name, category, price in centavos, cost in centavos, stock, barcode)`
const PRODUCTS: &[(&str, &str, i64, i64, i64, Option<&str>)] = &[
    ("Coca-Cola 350ml", "Beverages", 2500, 1800, 50, Some("4902102119825")),
    ("C2 Apple 355ml", "Beverages", 2000, 1400, 36, None),
    ("Piattos Cheese 85g", "Snacks", 1800, 1300, 30, Some("4800016644931")),
    ("Chippy BBQ 110g", "Snacks", 2200, 1600, 24, None),
    ("Lucky Me Pancit Canton Original", "Instant Noodles", 1500, 1100, 60, Some("4807770190629")),
    ("Nissin Cup Noodles Seafood", "Instant Noodles", 2800, 2100, 20, None),
    ("Silver Swan Soy Sauce 200ml", "Seasonings", 1200, 800, 40, None),
    ("Datu Puti Vinegar 385ml", "Seasonings", 1800, 1200, 35, None),
    ("Safeguard Soap 60g", "Personal Care", 2500, 1900, 25, Some("4902430456784")),
    ("Tide Powder 66g", "Household", 1000, 700, 48, None),
    ("555 Sardines in Tomato Sauce", "Canned Goods", 2400, 1800, 45, Some("4800194118354")),
    ("Bear Brand Powdered Milk 33g", "Dairy", 1300, 950, 55, None),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut data_dir = "./data".to_string();
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-d" | "--data" if i + 1 < args.len() => {
                data_dir = args[i + 1].clone();
                i += 2;
            }
            "-h" | "--help" => {
                println!("Sari POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --data <PATH>  Data directory (default: ./data)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => i += 1,
        }
    }

    println!("Sari POS Seed Data Generator");
    println!("============================");
    println!("Data directory: {}", data_dir);
    println!();

    let store = JsonFileStore::open(&data_dir)?;
    let mut pos = Pos::open(Arc::new(store))?;
    println!("✓ Store opened");

    let existing = pos.catalog.products().len();
    if existing > 0 {
        println!("⚠ Catalog already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the data directory to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding products...");
    for &(name, category, price, cost, stock, barcode) in PRODUCTS {
        pos.catalog.add_product(NewProduct {
            name: name.to_string(),
            category: category.to_string(),
            price: Money::from_centavos(price),
            cost: Some(Money::from_centavos(cost)),
            stock,
            barcode: barcode.map(str::to_string),
            description: None,
        })?;
    }

    println!();
    println!("✓ Seeded {} products", pos.catalog.products().len());
    println!("✓ {} categories available", pos.catalog.categories().len());
    println!("✓ {} user accounts ready", pos.users.users().len());
    println!();
    println!("Log in with admin/admin123 or cashier/cashier123.");
    Ok(())
}
