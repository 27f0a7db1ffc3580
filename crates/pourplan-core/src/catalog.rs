//! # Catalog
//!
//! Ingredient and cocktail reference data, plus the rules for editing it.
//!
//! ## Document Shape
//! ```json
//! {
//!   "ingredients": {
//!     "Gin":   { "type": "spirit", "abv": 0.4, "volume_ml": 700, "unit": "ml",
//!                "price_min": 12.0, "price_max": 18.0 },
//!     "Tonic": { "type": "mixer", "abv": 0, "volume_ml": 200, "unit": "ml",
//!                "price_min": 0.6, "price_max": 0.9 },
//!     "Cups":  { "type": "extra", "unit": "pcs", "price_min": 0.05, "price_max": 0.08 }
//!   },
//!   "cocktails": {
//!     "Gin Tonic": { "main_spirit": "Gin", "category": "highball",
//!                    "recipe": { "Gin": { "quantity": 50 }, "Tonic": { "quantity": 150 } } }
//!   }
//! }
//! ```
//!
//! Ingredients without `volume_ml` are counted in their own `unit` instead of
//! containers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::UnitPrice;
use crate::validation::{validate_abv, validate_item_name, validate_price_range};

fn default_item_type() -> String {
    "extra".to_string()
}

fn default_unit() -> String {
    "pcs".to_string()
}

// =============================================================================
// Ingredient
// =============================================================================

/// A purchasable item: a leaf of demand aggregation and a row of the
/// shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Ingredient {
    /// Grouping used to sort the shopping list ("spirit", "mixer", "extra").
    #[serde(rename = "type", default = "default_item_type")]
    pub item_type: String,

    /// Alcohol by volume, 0.0 - 1.0. `None` means no separate ABV record.
    #[serde(default)]
    pub abv: Option<f64>,

    /// Container size in ml. `None` or 0 means the item is unit-counted.
    #[serde(default)]
    pub volume_ml: Option<f64>,

    /// Native unit for unit-counted items ("pcs", "kg").
    #[serde(default = "default_unit")]
    pub unit: String,

    #[ts(type = "number")]
    pub price_min: UnitPrice,

    #[ts(type = "number")]
    pub price_max: UnitPrice,
}

impl Ingredient {
    /// Creates an ingredient with zero prices, no ABV and no container.
    pub fn new(item_type: impl Into<String>, unit: impl Into<String>) -> Self {
        Ingredient {
            item_type: item_type.into(),
            abv: None,
            volume_ml: None,
            unit: unit.into(),
            price_min: UnitPrice::zero(),
            price_max: UnitPrice::zero(),
        }
    }

    /// Sets the ABV (builder style).
    pub fn with_abv(mut self, abv: f64) -> Self {
        self.abv = Some(abv);
        self
    }

    /// Sets the container volume (builder style).
    pub fn with_volume_ml(mut self, volume_ml: impl Into<f64>) -> Self {
        self.volume_ml = Some(volume_ml.into());
        self
    }

    /// Sets the price range (builder style).
    pub fn with_prices(
        mut self,
        price_min: impl Into<UnitPrice>,
        price_max: impl Into<UnitPrice>,
    ) -> Self {
        self.price_min = price_min.into();
        self.price_max = price_max.into();
        self
    }

    /// Container volume in ml, if the item is bought in containers.
    pub fn container_ml(&self) -> Option<f64> {
        self.volume_ml.filter(|ml| *ml > 0.0)
    }
}

// =============================================================================
// Cocktail
// =============================================================================

/// One recipe line: quantity per serving in the ingredient's native unit.
///
/// Accepts both `50` and `{ "quantity": 50 }` when decoding; always encodes
/// the object form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(from = "RecipeLineRepr")]
#[ts(export)]
pub struct RecipeLine {
    pub quantity: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecipeLineRepr {
    Bare(f64),
    Detailed { quantity: f64 },
}

impl From<RecipeLineRepr> for RecipeLine {
    fn from(repr: RecipeLineRepr) -> Self {
        match repr {
            RecipeLineRepr::Bare(quantity) | RecipeLineRepr::Detailed { quantity } => {
                RecipeLine { quantity }
            }
        }
    }
}

impl From<f64> for RecipeLine {
    fn from(quantity: f64) -> Self {
        RecipeLine { quantity }
    }
}

/// A cocktail recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cocktail {
    /// Ingredient whose ABV turns alcohol volume into servings.
    pub main_spirit: String,

    /// Free-form label for grouping on the menu page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Ingredient name → per-serving quantity.
    pub recipe: IndexMap<String, RecipeLine>,
}

impl Cocktail {
    /// Creates a cocktail with an empty recipe.
    pub fn new(main_spirit: impl Into<String>) -> Self {
        Cocktail {
            main_spirit: main_spirit.into(),
            category: None,
            recipe: IndexMap::new(),
        }
    }

    /// Adds a recipe line (builder style).
    pub fn with_line(mut self, ingredient: impl Into<String>, quantity: f64) -> Self {
        self.recipe.insert(ingredient.into(), RecipeLine { quantity });
        self
    }

    /// Per-serving quantity of the main spirit (0 if the recipe omits it).
    pub fn main_spirit_quantity(&self) -> f64 {
        self.recipe
            .get(&self.main_spirit)
            .map(|line| line.quantity)
            .unwrap_or(0.0)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// All ingredient and cocktail reference data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Catalog {
    pub ingredients: IndexMap<String, Ingredient>,
    pub cocktails: IndexMap<String, Cocktail>,
}

impl Catalog {
    /// Decodes a raw catalog document.
    pub fn from_document(document: &Value) -> CoreResult<Self> {
        Catalog::deserialize(document).map_err(|e| CoreError::contract("catalog", e.to_string()))
    }

    /// Adds an ingredient.
    ///
    /// ## Rules
    /// - Name is trimmed and must be non-empty
    /// - Name must not already exist
    /// - `price_min ≤ price_max`, both non-negative
    /// - ABV, when given, within 0.0 - 1.0
    pub fn add_ingredient(&mut self, name: &str, ingredient: Ingredient) -> CoreResult<()> {
        let name = name.trim();
        validate_item_name("ingredient name", name)?;

        if self.ingredients.contains_key(name) {
            return Err(ValidationError::Duplicate {
                field: "ingredient".to_string(),
                value: name.to_string(),
            }
            .into());
        }

        validate_price_range(ingredient.price_min, ingredient.price_max)?;
        if let Some(abv) = ingredient.abv {
            validate_abv(abv)?;
        }

        self.ingredients.insert(name.to_string(), ingredient);
        Ok(())
    }

    /// Replaces an ingredient's price range.
    pub fn update_ingredient_price(
        &mut self,
        name: &str,
        price_min: UnitPrice,
        price_max: UnitPrice,
    ) -> CoreResult<()> {
        let name = name.trim();
        let ingredient = self
            .ingredients
            .get_mut(name)
            .ok_or_else(|| CoreError::IngredientNotFound(name.to_string()))?;

        validate_price_range(price_min, price_max)?;

        ingredient.price_min = price_min;
        ingredient.price_max = price_max;
        Ok(())
    }

    /// Removes an ingredient. Removing an unknown name is not an error.
    ///
    /// Recipes and menus that still reference the name are left alone; the
    /// engine skips dangling references.
    pub fn remove_ingredient(&mut self, name: &str) -> Option<Ingredient> {
        self.ingredients.shift_remove(name)
    }

    /// Adds a cocktail.
    pub fn add_cocktail(&mut self, name: &str, cocktail: Cocktail) -> CoreResult<()> {
        let name = name.trim();
        validate_item_name("cocktail name", name)?;
        validate_item_name("main spirit", cocktail.main_spirit.trim())?;

        if self.cocktails.contains_key(name) {
            return Err(ValidationError::Duplicate {
                field: "cocktail".to_string(),
                value: name.to_string(),
            }
            .into());
        }

        self.cocktails.insert(name.to_string(), cocktail);
        Ok(())
    }

    /// Removes a cocktail. Removing an unknown name is not an error.
    pub fn remove_cocktail(&mut self, name: &str) -> Option<Cocktail> {
        self.cocktails.shift_remove(name)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
