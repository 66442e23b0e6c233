//! # Seed Data Generator
//!
//! Populates a store with a demo spa catalog and staff roster for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p oasis-db --bin seed
//!
//! # Specify database path
//! cargo run -p oasis-db --bin seed -- --db ./data/oasis.db
//! ```

use std::env;

use oasis_db::{RegisterService, Store, StoreConfig};

/// Demo services: (name, price in cents)
const SERVICES: &[(&str, i64)] = &[
    ("Manicure", 5_000),
    ("Pedicure", 6_500),
    ("Gel manicure", 8_000),
    ("Relaxing massage 60min", 12_000),
    ("Deep tissue massage 60min", 15_000),
    ("Facial cleansing", 9_000),
    ("Hair wash & style", 4_500),
    ("Waxing half leg", 3_500),
];

/// Demo products: (name, price in cents)
const PRODUCTS: &[(&str, i64)] = &[
    ("Nail polish", 2_500),
    ("Cuticle oil", 1_850),
    ("Hand cream", 3_200),
    ("Essential oil blend", 4_800),
    ("Hair serum", 5_600),
];

/// Demo staff
const EMPLOYEES: &[&str] = &["Ana", "Lucia", "Valeria", "Camila"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./oasis_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Oasis POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./oasis_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Oasis POS Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let store = Store::new(StoreConfig::new(&db_path)).await?;
    println!("✓ Connected to store");
    println!("✓ Migrations applied");

    let mut service = RegisterService::load(store.slices()).await;

    // Don't double-seed an existing catalog
    if !service.services().is_empty() || !service.products().is_empty() {
        println!(
            "⚠ Store already has {} services and {} products",
            service.services().len(),
            service.products().len()
        );
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding catalog and staff...");

    for (name, price_cents) in SERVICES {
        service.add_service(name, *price_cents).await?;
    }
    for (name, price_cents) in PRODUCTS {
        service.add_product(name, *price_cents).await?;
    }
    for name in EMPLOYEES {
        service.add_employee(name).await?;
    }

    println!(
        "✓ Seeded {} services, {} products, {} employees",
        service.services().len(),
        service.products().len(),
        service.employees().len()
    );
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
