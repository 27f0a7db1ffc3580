//! # Settings Commands
//!
//! Read and partially update the event's scalar settings.

use pourplan_core::{validate_event_settings, EventSettings, SettingsPatch};
use tracing::info;

use crate::error::ApiError;
use crate::state::PlannerState;

/// Returns the current event settings.
pub async fn get_settings(state: &PlannerState) -> Result<EventSettings, ApiError> {
    Ok(state.repo().settings().await?)
}

/// Applies a partial update and returns the stored result.
///
/// The patched settings are validated before anything is written; on error
/// the stored document is unchanged.
pub async fn update_settings(
    state: &PlannerState,
    patch: SettingsPatch,
) -> Result<EventSettings, ApiError> {
    let _guard = state.lock_for_write().await;

    let mut settings = state.repo().settings().await?;
    settings.apply_patch(&patch);
    validate_event_settings(&settings)?;

    state.repo().save_settings(&settings).await?;

    info!(
        guests = settings.guests,
        ticket_price = %settings.ticket_price,
        "Settings updated"
    );
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::seeded_state;
    use crate::error::ErrorCode;
    use pourplan_core::Money;

    #[tokio::test]
    async fn test_get_settings() {
        let state = seeded_state().await;
        let settings = get_settings(&state).await.unwrap();
        assert_eq!(settings.guests, 80);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let state = seeded_state().await;
        let before = get_settings(&state).await.unwrap();

        let patch = SettingsPatch {
            guests: Some(120),
            ticket_price: Some(Money::from_cents(3000)),
            ..Default::default()
        };
        let after = update_settings(&state, patch).await.unwrap();

        assert_eq!(after.guests, 120);
        assert_eq!(after.ticket_price, Money::from_cents(3000));
        assert_eq!(after.venue_cost, before.venue_cost);
        assert_eq!(after.menu, before.menu);
        assert_eq!(get_settings(&state).await.unwrap(), after);
    }

    #[tokio::test]
    async fn test_invalid_patch_is_not_written() {
        let state = seeded_state().await;
        let before = get_settings(&state).await.unwrap();

        let patch = SettingsPatch {
            guests: Some(10),
            buffer: Some(0.9),
            ..Default::default()
        };
        let err = update_settings(&state, patch).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(get_settings(&state).await.unwrap(), before);
    }
}
