//! # Document Seeder
//!
//! Loads settings and catalog documents into a SQLite database.
//!
//! ## Usage
//! ```bash
//! # Built-in defaults into ./pourplan_dev.db
//! cargo run -p pourplan-db --bin seed
//!
//! # Custom documents
//! cargo run -p pourplan-db --bin seed -- --settings data/settings.json --catalog data/catalog.json
//!
//! # Overwrite documents that already exist
//! cargo run -p pourplan-db --bin seed -- --db ./data/pourplan.db --force
//! ```

use std::env;
use std::path::Path;

use pourplan_core::{validate_menu, Catalog, EventSettings};
use pourplan_db::{defaults, Database, DbConfig, PlannerRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./pourplan_dev.db");
    let mut settings_path: Option<String> = None;
    let mut catalog_path: Option<String> = None;
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--settings" | "-s" => {
                if i + 1 < args.len() {
                    settings_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--catalog" | "-c" => {
                if i + 1 < args.len() {
                    catalog_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("Pourplan Document Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>          Database file path (default: ./pourplan_dev.db)");
                println!("  -s, --settings <PATH>    Settings JSON (default: built-in)");
                println!("  -c, --catalog <PATH>     Catalog JSON (default: built-in)");
                println!("  -f, --force              Overwrite existing documents");
                println!("  -h, --help               Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {}", other);
            }
        }
        i += 1;
    }

    println!("🌱 Pourplan Document Seeder");
    println!("===========================");
    println!("Database: {}", db_path);
    println!();

    let settings = match &settings_path {
        Some(path) => EventSettings::from_document(&read_json(path)?)?,
        None => defaults::settings()?,
    };
    let catalog = match &catalog_path {
        Some(path) => Catalog::from_document(&read_json(path)?)?,
        None => defaults::catalog()?,
    };

    println!(
        "✓ Loaded settings ({} guests, {} menu categories)",
        settings.guests,
        settings.menu.len()
    );
    println!(
        "✓ Loaded catalog ({} ingredients, {} cocktails)",
        catalog.ingredients.len(),
        catalog.cocktails.len()
    );

    let errors = validate_menu(&settings.menu);
    if !errors.is_empty() {
        println!("⚠ Menu does not validate yet:");
        for error in &errors {
            println!("  {}", error);
        }
    }

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if force {
        let repo = PlannerRepository::new(db.documents());
        repo.save_settings(&settings).await?;
        repo.save_catalog(&catalog).await?;
        println!("✓ Documents written (forced)");
    } else if db.seed_if_empty(&settings, &catalog).await? {
        println!("✓ Documents written");
    } else {
        println!("⚠ Database already holds documents");
        println!("  Skipping seed. Use --force to overwrite.");
    }

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

fn read_json(path: impl AsRef<Path>) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
