//! # pourplan-core: Pure Planning Logic for Pourplan
//!
//! Allocation engine, menu validation and catalog rules for party drink
//! planning. Zero I/O: persistence lives in `pourplan-db`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pourplan Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 pourplan-planner (apps/planner)                 │   │
//! │  │   get_settings, update_settings, save_menu, calculate, ...      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ pourplan-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  catalog  │  │  engine   │  │ validation│  │   │
//! │  │   │ Settings  │  │Ingredient │  │ calculate │  │ menu sums │  │   │
//! │  │   │ MenuTree  │  │ Cocktail  │  │ Summary   │  │  fields   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO FILES • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              pourplan-db (Document Store Layer)                 │   │
//! │  │           SQLite kv_store or JSON files, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Event settings, menu tree, extras, alcohol presets
//! - [`catalog`] - Ingredients, cocktails and catalog editing
//! - [`engine`] - Four-pass allocation and the financial roll-up
//! - [`validation`] - Menu tree sums and field rules
//! - [`money`] - Integer-cents money and full-precision unit prices
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pourplan_core::types::{MenuCategory, MenuSpirit, MenuTree};
//! use pourplan_core::validate_menu;
//!
//! let mut menu = MenuTree::new();
//! menu.insert(
//!     "cocktails".into(),
//!     MenuCategory::new(1.0)
//!         .with_spirit("Gin", MenuSpirit::new(1.0).with_drink("Gin Tonic", 1.0)),
//! );
//! assert!(validate_menu(&menu).is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod engine;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, Cocktail, Ingredient, RecipeLine};
pub use engine::{calculate, calculate_documents, BreakEven, FinancialSummary, ShoppingListEntry};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, UnitPrice};
pub use types::*;
pub use validation::{validate_event_settings, validate_menu};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Allowed absolute deviation of a sibling-fraction sum from 1.0.
pub const MENU_SUM_TOLERANCE: f64 = 0.01;

/// Containers at or above this volume (ml) are bottles, below it cans.
pub const BOTTLE_THRESHOLD_ML: u32 = 250;

/// Maximum length of ingredient and cocktail names.
pub const MAX_NAME_LENGTH: usize = 100;
