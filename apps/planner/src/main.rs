//! # pourplan
//!
//! Command-line front end for the planner.
//!
//! ## Usage
//! ```bash
//! pourplan               # same as `pourplan calculate`
//! pourplan calculate     # shopping list + financial summary as JSON
//! pourplan validate      # menu validation errors as JSON
//! pourplan levels        # alcohol-level presets as JSON
//! ```
//!
//! Exit status is 2 when the menu does not validate, 1 on any other error.

use std::env;
use std::process::ExitCode;

use pourplan_planner::commands::{self, CalculationOutcome};
use pourplan_planner::error::ApiError;
use pourplan_planner::{init_tracing, start};
use serde::Serialize;
use tracing::{error, info};

const EXIT_INVALID_MENU: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Subcommand {
    Calculate,
    Validate,
    Levels,
}

fn print_help() {
    println!("Pourplan party drink planner");
    println!();
    println!("Usage: pourplan [COMMAND]");
    println!();
    println!("Commands:");
    println!("  calculate    Print shopping list and financial summary (default)");
    println!("  validate     Print menu validation errors");
    println!("  levels       Print alcohol-level presets");
    println!();
    println!("Environment:");
    println!("  POURPLAN_DATABASE_PATH   Use the SQLite store at this path");
    println!("  POURPLAN_DATA_DIR        JSON document directory");
    println!("  POURPLAN_SCOPE           Per-user document scope");
    println!("  RUST_LOG                 Log filter (logs go to stderr)");
}

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    let subcommand = match args.get(1).map(String::as_str) {
        None | Some("calculate") => Subcommand::Calculate,
        Some("validate") => Subcommand::Validate,
        Some("levels") => Subcommand::Levels,
        Some("--help") | Some("-h") | Some("help") => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            print_help();
            return ExitCode::FAILURE;
        }
    };

    init_tracing();
    info!(?subcommand, "Starting pourplan");

    match run(subcommand).await {
        Ok(code) => code,
        Err(e) => {
            error!(code = ?e.code, "{}", e.message);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(subcommand: Subcommand) -> Result<ExitCode, ApiError> {
    let state = start().await?;

    match subcommand {
        Subcommand::Calculate => {
            let outcome = commands::calculate(&state).await?;
            let code = match &outcome {
                CalculationOutcome::Ready { .. } => ExitCode::SUCCESS,
                CalculationOutcome::Invalid { .. } => ExitCode::from(EXIT_INVALID_MENU),
            };
            print_json(&outcome)?;
            Ok(code)
        }
        Subcommand::Validate => {
            let errors = commands::validate_current_menu(&state).await?;
            let code = if errors.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_INVALID_MENU)
            };
            print_json(&errors)?;
            Ok(code)
        }
        Subcommand::Levels => {
            print_json(&commands::alcohol_levels(&state).await?)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ApiError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| ApiError::internal(e.to_string()))?;
    println!("{}", text);
    Ok(())
}
