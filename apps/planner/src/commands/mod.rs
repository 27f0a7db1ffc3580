//! # Planner Commands
//!
//! Every operation the planner exposes. Each command takes the shared
//! [`PlannerState`](crate::state::PlannerState), reads fresh documents from
//! the store and returns `Result<T, ApiError>`.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── settings.rs   ◄─── get_settings, update_settings
//! ├── menu.rs       ◄─── save_menu, validate_current_menu
//! ├── catalog.rs    ◄─── ingredient and cocktail editing
//! └── calculate.rs  ◄─── calculate, alcohol_levels
//! ```
//!
//! ## Write Discipline
//! ```text
//! lock_for_write() ──► repo.settings() ──► modify + validate ──► save ──► unlock
//!                                              │
//!                                              └── Err ──► nothing written
//! ```

pub mod calculate;
pub mod catalog;
pub mod menu;
pub mod settings;

pub use calculate::{alcohol_levels, calculate, AlcoholLevelInfo, CalculationOutcome};
pub use catalog::{
    add_cocktail, add_ingredient, delete_cocktail, delete_ingredient, update_ingredient_price,
};
pub use menu::{save_menu, validate_current_menu};
pub use settings::{get_settings, update_settings};
