//! # API Error Type
//!
//! Unified error type for planner commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Pourplan                               │
//! │                                                                         │
//! │  Command Function  ──  Result<T, ApiError>                             │
//! │         │                                                               │
//! │         ├── Store error?      DbError::InvalidDocument ───┐            │
//! │         ├── Rule violated?    CoreError::Validation ──────┤            │
//! │         ├── Menu sums off?    validate_menu(..) list ─────┼─► ApiError │
//! │         └── Success ─────────────────────────────────────────► T       │
//! │                                                                         │
//! │  Serialized:                                                           │
//! │  { "code": "INVALID_MENU",                                             │
//! │    "message": "Menu fractions do not add up",                          │
//! │    "details": ["Macro categories sum = 90.0% (must be 100%)"] }        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pourplan_core::{CoreError, ValidationError};
use pourplan_db::DbError;
use serde::Serialize;

/// API error returned from planner commands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Individual problems, e.g. every failing menu sum
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Menu fractions do not sum to 100% (400)
    InvalidMenu,

    /// Stored document is malformed (422)
    ContractViolation,

    /// Store operation failed (500)
    DatabaseError,

    /// Internal error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an invalid menu error carrying the validator messages.
    pub fn invalid_menu(errors: Vec<String>) -> Self {
        ApiError {
            code: ErrorCode::InvalidMenu,
            message: "Menu fractions do not add up".to_string(),
            details: errors,
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts store errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::InvalidDocument { key, reason } => ApiError::new(
                ErrorCode::ContractViolation,
                format!("Stored {} document is invalid: {}", key, reason),
            ),
            DbError::InvalidScope(scope) => {
                ApiError::validation(format!("Invalid scope: '{}'", scope))
            }
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Io(e) => {
                tracing::error!("Document file I/O failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Document storage failed")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal store error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ContractViolation { .. } => {
                ApiError::new(ErrorCode::ContractViolation, err.to_string())
            }
            CoreError::IngredientNotFound(name) => ApiError::not_found("Ingredient", &name),
            CoreError::CocktailNotFound(name) => ApiError::not_found("Cocktail", &name),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        for detail in &self.details {
            write!(f, "\n  - {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_db_not_found_maps_to_not_found() {
        let err: ApiError = DbError::not_found("document", "settings").into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "document not found: settings");
    }

    #[test]
    fn test_core_errors_map() {
        let err: ApiError = CoreError::IngredientNotFound("Mezcal".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: ApiError = CoreError::contract("settings", "missing field `guests`").into();
        assert_eq!(err.code, ErrorCode::ContractViolation);

        let err: ApiError = CoreError::from(ValidationError::InvertedRange {
            field: "price".into(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Min price cannot exceed max price");
    }

    #[test]
    fn test_serialization() {
        let plain = serde_json::to_value(ApiError::validation("bad")).unwrap();
        assert_eq!(plain, json!({ "code": "VALIDATION_ERROR", "message": "bad" }));

        let menu = serde_json::to_value(ApiError::invalid_menu(vec!["x".into()])).unwrap();
        assert_eq!(menu["code"], "INVALID_MENU");
        assert_eq!(menu["details"], json!(["x"]));
    }
}
