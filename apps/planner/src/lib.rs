//! # Pourplan Planner Library
//!
//! Command layer over `pourplan-core` and `pourplan-db`, used by the
//! `pourplan` binary and by any front end that embeds it.
//!
//! ## Module Organization
//! ```text
//! pourplan_planner/
//! ├── lib.rs          ◄─── You are here (startup, logging)
//! ├── config.rs       ◄─── Environment configuration
//! ├── state.rs        ◄─── Store handle + write lock
//! ├── commands/
//! │   ├── settings.rs ◄─── get_settings, update_settings
//! │   ├── menu.rs     ◄─── save_menu
//! │   ├── catalog.rs  ◄─── ingredient / cocktail editing
//! │   └── calculate.rs◄─── calculate, alcohol_levels
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

use config::PlannerConfig;
use error::ApiError;
use state::PlannerState;

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,pourplan=debug,sqlx=warn";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=pourplan_core=trace` - Show engine skip decisions
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration from the environment and opens the store.
///
/// ## Startup Sequence
/// ```text
/// PlannerConfig::load() ──► open SQLite or JSON store ──► seed defaults
///                                                        (first start only)
/// ```
pub async fn start() -> Result<PlannerState, ApiError> {
    let config = PlannerConfig::load().map_err(|e| ApiError::internal(e.to_string()))?;
    info!(backend = ?config.backend, scope = ?config.scope, "Configuration loaded");

    PlannerState::open(&config).await
}
