//! Default documents written on first start.
//!
//! Compiled in from the workspace `data/` directory so a fresh install never
//! depends on files next to the binary.

use pourplan_core::{Catalog, EventSettings};
use serde_json::Value;

use crate::error::{DbError, DbResult};
use crate::store::DocumentKey;

const SETTINGS_JSON: &str = include_str!("../../../data/settings.json");
const CATALOG_JSON: &str = include_str!("../../../data/catalog.json");

fn parse(key: DocumentKey, text: &str) -> DbResult<Value> {
    serde_json::from_str(text).map_err(|e| DbError::invalid_document(key.as_str(), e.to_string()))
}

/// Default event settings.
pub fn settings() -> DbResult<EventSettings> {
    let value = parse(DocumentKey::Settings, SETTINGS_JSON)?;
    EventSettings::from_document(&value)
        .map_err(|e| DbError::invalid_document(DocumentKey::Settings.as_str(), e.to_string()))
}

/// Default catalog.
pub fn catalog() -> DbResult<Catalog> {
    let value = parse(DocumentKey::Catalog, CATALOG_JSON)?;
    Catalog::from_document(&value)
        .map_err(|e| DbError::invalid_document(DocumentKey::Catalog.as_str(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pourplan_core::{calculate, validate_menu};

    #[test]
    fn test_defaults_decode() {
        let settings = settings().unwrap();
        let catalog = catalog().unwrap();

        assert_eq!(settings.guests, 80);
        assert!(catalog.ingredients.contains_key("Gin"));
        assert!(catalog.cocktails.contains_key("Gin Tonic"));
    }

    #[test]
    fn test_default_menu_is_valid() {
        let settings = settings().unwrap();
        assert_eq!(validate_menu(&settings.menu), Vec::<String>::new());
    }

    #[test]
    fn test_default_menu_references_resolve() {
        let settings = settings().unwrap();
        let catalog = catalog().unwrap();

        for category in settings.menu.values() {
            for (spirit, node) in &category.spirits {
                assert!(catalog.ingredients.contains_key(spirit), "{spirit}");
                for drink in node.drinks.keys() {
                    let cocktail = &catalog.cocktails[drink];
                    for ingredient in cocktail.recipe.keys() {
                        assert!(catalog.ingredients.contains_key(ingredient), "{ingredient}");
                    }
                }
            }
        }
        for extra in settings.extras.keys() {
            assert!(catalog.ingredients.contains_key(extra), "{extra}");
        }

        let summary = calculate(&settings, &catalog);
        assert!(!summary.shopping_list.is_empty());
        assert!(summary.total_min <= summary.total_max);
    }
}
