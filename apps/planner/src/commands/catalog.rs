//! # Catalog Commands
//!
//! Ingredient and cocktail editing. The rules (name checks, duplicates,
//! price range) live in [`pourplan_core::Catalog`]; these commands wrap
//! them in a locked read-modify-write of the catalog document.

use pourplan_core::{Catalog, Cocktail, CoreResult, Ingredient, UnitPrice};
use tracing::info;

use crate::error::ApiError;
use crate::state::PlannerState;

/// Runs `edit` on a fresh catalog and saves it when the edit succeeds.
async fn edit_catalog<T>(
    state: &PlannerState,
    edit: impl FnOnce(&mut Catalog) -> CoreResult<T>,
) -> Result<T, ApiError> {
    let _guard = state.lock_for_write().await;

    let mut catalog = state.repo().catalog().await?;
    let result = edit(&mut catalog)?;
    state.repo().save_catalog(&catalog).await?;

    Ok(result)
}

/// Adds a new ingredient.
pub async fn add_ingredient(
    state: &PlannerState,
    name: &str,
    ingredient: Ingredient,
) -> Result<(), ApiError> {
    edit_catalog(state, |catalog| catalog.add_ingredient(name, ingredient)).await?;
    info!(ingredient = %name.trim(), "Ingredient added");
    Ok(())
}

/// Replaces an ingredient's min/max price.
pub async fn update_ingredient_price(
    state: &PlannerState,
    name: &str,
    price_min: UnitPrice,
    price_max: UnitPrice,
) -> Result<(), ApiError> {
    edit_catalog(state, |catalog| {
        catalog.update_ingredient_price(name, price_min, price_max)
    })
    .await?;
    info!(ingredient = %name.trim(), %price_min, %price_max, "Ingredient price updated");
    Ok(())
}

/// Deletes an ingredient. Returns whether it existed.
pub async fn delete_ingredient(state: &PlannerState, name: &str) -> Result<bool, ApiError> {
    let removed = edit_catalog(state, |catalog| Ok(catalog.remove_ingredient(name).is_some())).await?;
    info!(ingredient = %name, removed, "Ingredient deleted");
    Ok(removed)
}

/// Adds a new cocktail.
pub async fn add_cocktail(
    state: &PlannerState,
    name: &str,
    cocktail: Cocktail,
) -> Result<(), ApiError> {
    edit_catalog(state, |catalog| catalog.add_cocktail(name, cocktail)).await?;
    info!(cocktail = %name.trim(), "Cocktail added");
    Ok(())
}

/// Deletes a cocktail. Returns whether it existed.
pub async fn delete_cocktail(state: &PlannerState, name: &str) -> Result<bool, ApiError> {
    let removed = edit_catalog(state, |catalog| Ok(catalog.remove_cocktail(name).is_some())).await?;
    info!(cocktail = %name, removed, "Cocktail deleted");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::seeded_state;
    use crate::error::ErrorCode;
    use pourplan_core::Money;

    fn mezcal() -> Ingredient {
        Ingredient::new("spirit", "ml")
            .with_abv(0.4)
            .with_volume_ml(700)
            .with_prices(Money::from_cents(2800), Money::from_cents(3500))
    }

    #[tokio::test]
    async fn test_add_ingredient_persists() {
        let state = seeded_state().await;
        add_ingredient(&state, "  Mezcal ", mezcal()).await.unwrap();

        let catalog = state.repo().catalog().await.unwrap();
        assert_eq!(catalog.ingredients["Mezcal"], mezcal());
    }

    #[tokio::test]
    async fn test_add_duplicate_ingredient_fails() {
        let state = seeded_state().await;
        let err = add_ingredient(&state, "Gin", mezcal()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "ingredient 'Gin' already exists");
    }

    #[tokio::test]
    async fn test_add_unnamed_ingredient_fails() {
        let state = seeded_state().await;
        let err = add_ingredient(&state, "   ", mezcal()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_update_price() {
        let state = seeded_state().await;
        update_ingredient_price(&state, "Lime", UnitPrice::new(0.25), UnitPrice::new(0.4))
            .await
            .unwrap();

        let lime = &state.repo().catalog().await.unwrap().ingredients["Lime"];
        assert_eq!(lime.price_min, UnitPrice::new(0.25));
        assert_eq!(lime.price_max, UnitPrice::new(0.4));
    }

    #[tokio::test]
    async fn test_sub_cent_price_survives_save() {
        let state = seeded_state().await;
        update_ingredient_price(&state, "Napkins", UnitPrice::new(0.005), UnitPrice::new(0.008))
            .await
            .unwrap();

        let napkins = &state.repo().catalog().await.unwrap().ingredients["Napkins"];
        assert_eq!(napkins.price_min.amount(), 0.005);
        assert_eq!(napkins.price_max.amount(), 0.008);
    }

    #[tokio::test]
    async fn test_update_price_rejects_inverted_range() {
        let state = seeded_state().await;
        let before = state.repo().catalog().await.unwrap();

        let err = update_ingredient_price(&state, "Lime", UnitPrice::new(0.5), UnitPrice::new(0.4))
            .await
            .unwrap_err();

        assert_eq!(err.message, "Min price cannot exceed max price");
        assert_eq!(state.repo().catalog().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_price_of_unknown_ingredient() {
        let state = seeded_state().await;
        let err = update_ingredient_price(&state, "Absinthe", UnitPrice::zero(), UnitPrice::zero())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_delete_ingredient() {
        let state = seeded_state().await;

        assert!(delete_ingredient(&state, "Mint").await.unwrap());
        assert!(!delete_ingredient(&state, "Mint").await.unwrap());
        assert!(!state
            .repo()
            .catalog()
            .await
            .unwrap()
            .ingredients
            .contains_key("Mint"));
    }

    #[tokio::test]
    async fn test_cocktail_add_and_delete() {
        let state = seeded_state().await;
        let paloma = Cocktail::new("Tequila")
            .with_line("Tequila", 50.0)
            .with_line("Soda Water", 100.0);

        add_cocktail(&state, "Paloma", paloma.clone()).await.unwrap();
        assert_eq!(
            state.repo().catalog().await.unwrap().cocktails["Paloma"],
            paloma
        );

        let err = add_cocktail(&state, "Paloma", paloma).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert!(delete_cocktail(&state, "Paloma").await.unwrap());
        assert!(!delete_cocktail(&state, "Paloma").await.unwrap());
    }
}
