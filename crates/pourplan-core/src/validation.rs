//! # Validation Module
//!
//! Menu tree validation and input field checks.
//!
//! ## Two Kinds of Validation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  validate_menu(&MenuTree) -> Vec<String>                               │
//! │  ├── Structural: every fraction group sums to 100% ± 1%                │
//! │  ├── Returns ALL problems at once, as display messages                 │
//! │  └── Empty list = the engine may run                                   │
//! │                                                                         │
//! │  validate_* field checks -> Result<(), ValidationError>                │
//! │  ├── Settings ranges, names, prices, ABV                               │
//! │  └── Fail fast before anything is written to the store                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pourplan_core::types::{MenuCategory, MenuSpirit, MenuTree};
//! use pourplan_core::validation::validate_menu;
//!
//! let mut menu = MenuTree::new();
//! menu.insert(
//!     "cocktails".to_string(),
//!     MenuCategory::new(1.0).with_spirit("Gin", MenuSpirit::new(1.0).with_drink("Gin Tonic", 1.0)),
//! );
//! assert!(validate_menu(&menu).is_empty());
//! ```

use crate::error::ValidationError;
use crate::money::{Money, UnitPrice};
use crate::types::{EventSettings, MenuTree};
use crate::{MAX_NAME_LENGTH, MENU_SUM_TOLERANCE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Menu Tree
// =============================================================================

/// Checks that every level of the menu tree sums to 100%.
///
/// ## Rules
/// 1. Category `macro_pct` values sum to 1.0 ± [`MENU_SUM_TOLERANCE`]
/// 2. Within each category, spirit `pct` values sum to 1.0 ± tolerance
/// 3. Within each spirit, drink fractions sum to 1.0 ± tolerance
///
/// ## Returns
/// One message per failing group, category level first, then nested in
/// tree order. An empty list means the tree is valid.
///
/// An empty menu, a category without spirits, and a spirit without drinks
/// all sum to 0% and are reported.
pub fn validate_menu(menu: &MenuTree) -> Vec<String> {
    let mut errors = Vec::new();

    let macro_sum: f64 = menu.values().map(|category| category.macro_pct).sum();
    if out_of_tolerance(macro_sum) {
        errors.push(format!(
            "Macro categories sum = {:.1}% (must be 100%)",
            macro_sum * 100.0
        ));
    }

    for (category_name, category) in menu {
        let spirits_sum: f64 = category.spirits.values().map(|spirit| spirit.pct).sum();
        if out_of_tolerance(spirits_sum) {
            errors.push(format!(
                "[{}] Spirits sum = {:.1}% (must be 100%)",
                category_name,
                spirits_sum * 100.0
            ));
        }

        for (spirit_name, spirit) in &category.spirits {
            let drinks_sum: f64 = spirit.drinks.values().sum();
            if out_of_tolerance(drinks_sum) {
                errors.push(format!(
                    "[{} → {}] Drinks sum = {:.1}% (must be 100%)",
                    category_name,
                    spirit_name,
                    drinks_sum * 100.0
                ));
            }
        }
    }

    errors
}

fn out_of_tolerance(sum: f64) -> bool {
    // NaN compares false, so negate the "inside" test to flag it too
    !((sum - 1.0).abs() <= MENU_SUM_TOLERANCE)
}

// =============================================================================
// Settings
// =============================================================================

/// Validates the scalar fields of event settings.
///
/// ## Rules
/// - `buffer` ≥ 1.0
/// - `alcohol_ml_per_person` ≥ 0
/// - ticket price, venue cost, equipment cost not negative
/// - all floating point fields finite
pub fn validate_event_settings(settings: &EventSettings) -> ValidationResult<()> {
    validate_finite("alcohol_ml_per_person", settings.alcohol_ml_per_person)?;
    if settings.alcohol_ml_per_person < 0.0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "alcohol_ml_per_person".to_string(),
        });
    }

    validate_finite("buffer", settings.buffer)?;
    if settings.buffer < 1.0 {
        return Err(ValidationError::TooSmall {
            field: "buffer".to_string(),
            min: 1.0,
        });
    }

    validate_non_negative_money("ticket_price", settings.ticket_price)?;
    validate_non_negative_money("venue_cost", settings.venue_cost)?;
    validate_non_negative_money("equipment_cost", settings.equipment_cost)?;

    Ok(())
}

fn validate_finite(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn validate_non_negative_money(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn validate_non_negative_price(field: &str, price: UnitPrice) -> ValidationResult<()> {
    validate_finite(field, price.amount())?;
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Catalog Fields
// =============================================================================

/// Validates a catalog entry name (ingredient, cocktail, main spirit).
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_NAME_LENGTH`] characters
///
/// ## Example
/// ```rust
/// use pourplan_core::validation::validate_item_name;
///
/// assert!(validate_item_name("name", "Lime juice").is_ok());
/// assert!(validate_item_name("name", "  ").is_err());
/// ```
pub fn validate_item_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a min/max price pair.
///
/// ## Example
/// ```rust
/// use pourplan_core::money::UnitPrice;
/// use pourplan_core::validation::validate_price_range;
///
/// assert!(validate_price_range(UnitPrice::new(1.0), UnitPrice::new(1.5)).is_ok());
/// assert!(validate_price_range(UnitPrice::new(1.5), UnitPrice::new(1.0)).is_err());
/// ```
pub fn validate_price_range(price_min: UnitPrice, price_max: UnitPrice) -> ValidationResult<()> {
    validate_non_negative_price("price_min", price_min)?;
    validate_non_negative_price("price_max", price_max)?;

    if price_min > price_max {
        return Err(ValidationError::InvertedRange {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates an alcohol-by-volume fraction (0.0 - 1.0).
pub fn validate_abv(abv: f64) -> ValidationResult<()> {
    validate_finite("abv", abv)?;
    if !(0.0..=1.0).contains(&abv) {
        return Err(ValidationError::OutOfRange {
            field: "abv".to_string(),
            min: 0.0,
            max: 1.0,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
