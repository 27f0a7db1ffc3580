//! # Calculate Command
//!
//! Validates the stored menu, then runs the allocation engine on fresh
//! copies of both documents.
//!
//! ```text
//! repo.settings() + repo.catalog()
//!        │
//!        ▼
//! validate_menu ── errors? ──► CalculationOutcome::Invalid { errors }
//!        │                     (engine not invoked)
//!        ▼
//! calculate(&settings, &catalog) ──► CalculationOutcome::Ready { summary }
//! ```

use pourplan_core::{validate_menu, AlcoholLevel, FinancialSummary};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::PlannerState;

/// Result of a calculation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalculationOutcome {
    /// The menu does not validate; messages in menu order.
    Invalid { errors: Vec<String> },
    /// Shopping list and financial summary.
    Ready { summary: FinancialSummary },
}

/// Validates and, when valid, calculates the current plan.
pub async fn calculate(state: &PlannerState) -> Result<CalculationOutcome, ApiError> {
    let settings = state.repo().settings().await?;

    let errors = validate_menu(&settings.menu);
    if !errors.is_empty() {
        debug!(errors = errors.len(), "Calculation skipped, menu invalid");
        return Ok(CalculationOutcome::Invalid { errors });
    }

    let catalog = state.repo().catalog().await?;
    let summary = pourplan_core::calculate(&settings, &catalog);

    info!(
        rows = summary.shopping_list.len(),
        total_min = %summary.total_min,
        total_max = %summary.total_max,
        "Plan calculated"
    );
    Ok(CalculationOutcome::Ready { summary })
}

/// One alcohol-level preset, as shown in the level picker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlcoholLevelInfo {
    pub level: AlcoholLevel,
    pub label: &'static str,
    pub ml_per_person: u32,
    /// Whether the current settings use this preset.
    pub selected: bool,
}

/// Lists the alcohol-level presets, marking the one in use.
pub async fn alcohol_levels(state: &PlannerState) -> Result<Vec<AlcoholLevelInfo>, ApiError> {
    let settings = state.repo().settings().await?;
    let current = AlcoholLevel::from_ml(settings.alcohol_ml_per_person);

    Ok(AlcoholLevel::ALL
        .into_iter()
        .map(|level| AlcoholLevelInfo {
            level,
            label: level.label(),
            ml_per_person: level.ml_per_person(),
            selected: current == Some(level),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::menu::save_menu;
    use crate::commands::test_support::seeded_state;
    use pourplan_core::{BreakEven, MenuCategory, MenuSpirit, MenuTree};

    #[tokio::test]
    async fn test_calculate_default_plan() {
        let state = seeded_state().await;

        let summary = match calculate(&state).await.unwrap() {
            CalculationOutcome::Ready { summary } => summary,
            other => panic!("expected a summary, got {other:?}"),
        };

        assert!(!summary.shopping_list.is_empty());
        assert!(summary.total_min <= summary.total_max);
        assert_eq!(summary.profit_max - summary.profit_min, summary.total_max - summary.total_min);
        assert!(matches!(summary.break_even, BreakEven::Reachable(_)));
    }

    #[tokio::test]
    async fn test_invalid_menu_skips_engine() {
        let state = seeded_state().await;
        let mut menu = MenuTree::new();
        menu.insert(
            "beer".to_string(),
            MenuCategory::new(1.0)
                .with_spirit("Lager", MenuSpirit::new(0.8).with_drink("Lager Can", 1.0)),
        );
        save_menu(&state, menu, true).await.unwrap();

        let outcome = calculate(&state).await.unwrap();
        assert_eq!(
            outcome,
            CalculationOutcome::Invalid {
                errors: vec!["[beer] Spirits sum = 80.0% (must be 100%)".to_string()]
            }
        );
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = CalculationOutcome::Invalid {
            errors: vec!["x".to_string()],
        };
        let value = serde_json::to_value(outcome).unwrap();
        assert_eq!(value, serde_json::json!({ "status": "invalid", "errors": ["x"] }));
    }

    #[tokio::test]
    async fn test_alcohol_levels_marks_current() {
        let state = seeded_state().await;
        let levels = alcohol_levels(&state).await.unwrap();

        assert_eq!(levels.len(), 4);
        let selected: Vec<_> = levels.iter().filter(|l| l.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].level, AlcoholLevel::Aperitivo);
        assert_eq!(selected[0].ml_per_person, 50);
    }
}
