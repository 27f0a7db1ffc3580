//! # Menu Commands
//!
//! Saving the menu tree.
//!
//! ## Structural vs. Percentage Saves
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  structural = true   adding / removing a category, spirit or drink     │
//! │                      → saved as-is; sums are fixed up afterwards        │
//! │                                                                         │
//! │  structural = false  editing percentages                               │
//! │                      → validate_menu must return no errors             │
//! │                      → otherwise INVALID_MENU, nothing written          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pourplan_core::{validate_menu, MenuTree};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::PlannerState;

/// Replaces the menu tree.
pub async fn save_menu(
    state: &PlannerState,
    menu: MenuTree,
    structural: bool,
) -> Result<(), ApiError> {
    if !structural {
        let errors = validate_menu(&menu);
        if !errors.is_empty() {
            debug!(errors = errors.len(), "Menu rejected");
            return Err(ApiError::invalid_menu(errors));
        }
    }

    let _guard = state.lock_for_write().await;
    let mut settings = state.repo().settings().await?;
    settings.menu = menu;
    state.repo().save_settings(&settings).await?;

    info!(categories = settings.menu.len(), structural, "Menu saved");
    Ok(())
}

/// Validates the stored menu and returns the error list (empty when valid).
pub async fn validate_current_menu(state: &PlannerState) -> Result<Vec<String>, ApiError> {
    let settings = state.repo().settings().await?;
    Ok(validate_menu(&settings.menu))
}
