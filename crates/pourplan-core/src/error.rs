//! # Error Types
//!
//! Domain-specific error types for pourplan-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pourplan-core errors (this file)                                      │
//! │  ├── CoreError        - Contract violations, catalog lookups           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  pourplan-db errors (separate crate)                                   │
//! │  └── DbError          - Store operation failures                       │
//! │                                                                         │
//! │  planner app errors                                                    │
//! │  └── ApiError         - What the caller sees (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Caller                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What is NOT an error here
//! Menu percentage sums out of tolerance are reported as a list of messages
//! by [`crate::validation::validate_menu`]. Dangling catalog references and
//! degenerate arithmetic inside the engine are skipped or guarded, never
//! raised.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A settings or catalog document is missing a required field or has
    /// the wrong type.
    ///
    /// ## When This Occurs
    /// - `guests` absent from the settings document
    /// - `price_min` given as a string in the catalog
    ///
    /// This is the only condition that aborts a calculation.
    #[error("Contract violation in {document}: {reason}")]
    ContractViolation { document: String, reason: String },

    /// Ingredient cannot be found in the catalog.
    #[error("Ingredient not found: {0}")]
    IngredientNotFound(String),

    /// Cocktail cannot be found in the catalog.
    #[error("Cocktail not found: {0}")]
    CocktailNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a ContractViolation for the named document.
    pub fn contract(document: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::ContractViolation {
            document: document.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used by the caller layer before anything is written to the store.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is below its lower bound.
    #[error("{field} must be at least {min}")]
    TooSmall { field: String, min: f64 },

    /// Numeric value is outside a closed range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Lower bound of a range exceeds its upper bound.
    #[error("Min {field} cannot exceed max {field}")]
    InvertedRange { field: String },

    /// Duplicate value (e.g., ingredient name already in the catalog).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::contract("settings", "missing field `guests`");
        assert_eq!(
            err.to_string(),
            "Contract violation in settings: missing field `guests`"
        );

        let err = CoreError::IngredientNotFound("Rum".to_string());
        assert_eq!(err.to_string(), "Ingredient not found: Rum");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::InvertedRange {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "Min price cannot exceed max price");

        let err = ValidationError::Duplicate {
            field: "ingredient".to_string(),
            value: "Gin".to_string(),
        };
        assert_eq!(err.to_string(), "ingredient 'Gin' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
