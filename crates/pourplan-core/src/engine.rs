//! # Allocation Engine
//!
//! Turns event settings and the catalog into a shopping list with a cost
//! range and the event's financial summary.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      calculate(settings, catalog)                       │
//! │                                                                         │
//! │  Pass 1  guests × ml/guest ──► category % ──► spirit % ──► drink %     │
//! │          (alcohol ml at every node; unknown spirits skipped)           │
//! │                                  │                                      │
//! │  Pass 2  drink alcohol ÷ (main spirit ml × ABV) = servings             │
//! │          (unknown cocktails / zero alcohol per serving skipped)        │
//! │                                  │                                      │
//! │  Pass 3  servings × recipe line ──► DemandTotals (+= across paths)     │
//! │          extras: max(min_qty, qty_per_person × guests)                 │
//! │                                  │                                      │
//! │  Pass 4  demand × buffer ──► ceil(÷ container) or ceil(units)          │
//! │          × price_min / price_max ──► ShoppingListEntry                 │
//! │                                  │                                      │
//! │  Roll-up totals, revenue, profit range, break-even                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Policy
//! The engine never fails on typed input. Dangling references are skipped
//! (logged at `trace`), degenerate arithmetic is guarded. Run
//! [`crate::validation::validate_menu`] first: an invalid tree yields
//! meaningless numbers, not a panic.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};
use ts_rs::TS;

use crate::catalog::{Catalog, Cocktail, Ingredient};
use crate::error::CoreResult;
use crate::money::Money;
use crate::types::EventSettings;
use crate::BOTTLE_THRESHOLD_ML;

/// Display unit for containers of at least [`BOTTLE_THRESHOLD_ML`].
pub const UNIT_BOTTLE: &str = "btl.";

/// Display unit for smaller containers.
pub const UNIT_CAN: &str = "can";

// =============================================================================
// Output Types
// =============================================================================

/// One row of the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ShoppingListEntry {
    pub name: String,

    #[serde(rename = "type")]
    pub item_type: String,

    /// Whole containers or units to buy.
    pub quantity: u64,

    /// "btl.", "can", or the ingredient's own unit.
    pub unit: String,

    #[ts(type = "number")]
    pub cost_min: Money,

    #[ts(type = "number")]
    pub cost_max: Money,
}

/// Guest count at which ticket revenue covers fixed costs.
///
/// Encoded as a number, or `null` when unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<u64>", into = "Option<u64>")]
pub enum BreakEven {
    Reachable(u64),
    /// The ticket price does not exceed the variable cost per guest.
    Unreachable,
}

impl BreakEven {
    /// Guest count, if reachable.
    pub fn guests(&self) -> Option<u64> {
        match self {
            BreakEven::Reachable(guests) => Some(*guests),
            BreakEven::Unreachable => None,
        }
    }
}

impl From<Option<u64>> for BreakEven {
    fn from(value: Option<u64>) -> Self {
        value.map_or(BreakEven::Unreachable, BreakEven::Reachable)
    }
}

impl From<BreakEven> for Option<u64> {
    fn from(value: BreakEven) -> Self {
        value.guests()
    }
}

/// Result of a calculation: shopping list plus the money roll-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FinancialSummary {
    pub shopping_list: Vec<ShoppingListEntry>,

    #[ts(type = "number")]
    pub total_min: Money,

    #[ts(type = "number")]
    pub total_max: Money,

    #[ts(type = "number")]
    pub fixed_costs: Money,

    #[ts(type = "number")]
    pub revenue: Money,

    /// Revenue minus the most expensive shopping and fixed costs.
    #[ts(type = "number")]
    pub profit_min: Money,

    /// Revenue minus the cheapest shopping and fixed costs.
    #[ts(type = "number")]
    pub profit_max: Money,

    #[ts(type = "number | null")]
    pub break_even: BreakEven,
}

// =============================================================================
// Demand Aggregation
// =============================================================================

/// Ingredient name → accumulated quantity (ml for liquids, native unit
/// otherwise). Built fresh for every calculation.
#[derive(Debug, Default)]
struct DemandTotals(IndexMap<String, f64>);

impl DemandTotals {
    fn add(&mut self, ingredient: &str, quantity: f64) {
        *self.0.entry(ingredient.to_string()).or_insert(0.0) += quantity;
    }

    fn set(&mut self, ingredient: &str, quantity: f64) {
        self.0.insert(ingredient.to_string(), quantity);
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Runs the full calculation on typed inputs.
///
/// Pure and deterministic: identical inputs give identical output.
///
/// ## Example
/// ```rust
/// use pourplan_core::catalog::{Catalog, Cocktail, Ingredient};
/// use pourplan_core::engine::calculate;
/// use pourplan_core::money::Money;
/// use pourplan_core::types::{EventSettings, MenuCategory, MenuSpirit, MenuTree};
///
/// let mut catalog = Catalog::default();
/// catalog.ingredients.insert(
///     "Gin".into(),
///     Ingredient::new("spirit", "ml").with_abv(0.4).with_volume_ml(750)
///         .with_prices(Money::from_cents(1500), Money::from_cents(2000)),
/// );
/// catalog.cocktails.insert("Gin Shot".into(), Cocktail::new("Gin").with_line("Gin", 50.0));
///
/// let mut menu = MenuTree::new();
/// menu.insert("shots".into(), MenuCategory::new(1.0)
///     .with_spirit("Gin", MenuSpirit::new(1.0).with_drink("Gin Shot", 1.0)));
///
/// let settings = EventSettings {
///     guests: 50,
///     alcohol_ml_per_person: 60.0,
///     buffer: 1.0,
///     ticket_price: Money::from_cents(1000),
///     venue_cost: Money::zero(),
///     equipment_cost: Money::zero(),
///     menu,
///     extras: Default::default(),
/// };
///
/// let summary = calculate(&settings, &catalog);
/// // 3000 ml alcohol / 20 ml per serving = 150 servings × 50 ml = 7500 ml = 10 bottles
/// assert_eq!(summary.shopping_list[0].quantity, 10);
/// assert_eq!(summary.total_min.cents(), 15000);
/// ```
pub fn calculate(settings: &EventSettings, catalog: &Catalog) -> FinancialSummary {
    let demand = aggregate_demand(settings, catalog);
    let shopping_list = build_shopping_list(&demand, settings.buffer, catalog);
    let summary = roll_up(settings, shopping_list);

    debug!(
        guests = settings.guests,
        rows = summary.shopping_list.len(),
        total_min = %summary.total_min,
        total_max = %summary.total_max,
        break_even = ?summary.break_even.guests(),
        "Calculation complete"
    );

    summary
}

/// Decodes raw settings and catalog documents, then calculates.
///
/// ## Errors
/// [`crate::CoreError::ContractViolation`] when a required field is missing
/// or mistyped. Nothing else aborts the calculation.
pub fn calculate_documents(settings: &Value, catalog: &Value) -> CoreResult<FinancialSummary> {
    let settings = EventSettings::from_document(settings)?;
    let catalog = Catalog::from_document(catalog)?;
    Ok(calculate(&settings, &catalog))
}

/// Passes 1-3: percentage distribution, servings, recipe demand, extras.
fn aggregate_demand(settings: &EventSettings, catalog: &Catalog) -> DemandTotals {
    let mut demand = DemandTotals::default();
    let total_alcohol = settings.total_alcohol_ml();

    for (category_name, category) in &settings.menu {
        let category_alcohol = total_alcohol * category.macro_pct;

        for (spirit_name, spirit) in &category.spirits {
            let Some(spirit_ingredient) = catalog.ingredients.get(spirit_name) else {
                trace!(category = %category_name, spirit = %spirit_name, "Spirit not in catalog, skipping");
                continue;
            };
            let spirit_alcohol = category_alcohol * spirit.pct;
            let spirit_abv = spirit_ingredient.abv.unwrap_or(0.0);

            for (drink_name, drink_fraction) in &spirit.drinks {
                let Some(cocktail) = catalog.cocktails.get(drink_name) else {
                    trace!(spirit = %spirit_name, drink = %drink_name, "Cocktail not in catalog, skipping");
                    continue;
                };
                let drink_alcohol = spirit_alcohol * drink_fraction;

                let Some(servings) = servings_for(cocktail, drink_alcohol, spirit_abv, catalog) else {
                    trace!(drink = %drink_name, "No alcohol per serving, skipping");
                    continue;
                };

                for (ingredient_name, line) in &cocktail.recipe {
                    demand.add(ingredient_name, line.quantity * servings);
                }
            }
        }
    }

    for (item_name, extra) in &settings.extras {
        demand.set(item_name, extra.demand_for(settings.guests));
    }

    demand
}

/// Servings of `cocktail` that deliver `drink_alcohol` ml of pure alcohol.
///
/// The main spirit's own ABV wins; `fallback_abv` (the menu spirit's) is used
/// when the main spirit has no ABV record. `None` when a serving carries no
/// alcohol.
fn servings_for(
    cocktail: &Cocktail,
    drink_alcohol: f64,
    fallback_abv: f64,
    catalog: &Catalog,
) -> Option<f64> {
    let main_abv = catalog
        .ingredients
        .get(&cocktail.main_spirit)
        .and_then(|ingredient| ingredient.abv)
        .unwrap_or(fallback_abv);

    let alcohol_per_serving = cocktail.main_spirit_quantity() * main_abv;
    // Also rejects NaN
    if !(alcohol_per_serving > 0.0) {
        return None;
    }

    Some(drink_alcohol / alcohol_per_serving)
}

/// Pass 4: purchase quantities, units and line costs, sorted by (type, name).
fn build_shopping_list(
    demand: &DemandTotals,
    buffer: f64,
    catalog: &Catalog,
) -> Vec<ShoppingListEntry> {
    let mut rows: Vec<ShoppingListEntry> = demand
        .0
        .iter()
        .filter(|(_, quantity)| **quantity > 0.0)
        .filter_map(|(name, quantity)| match catalog.ingredients.get(name) {
            Some(ingredient) => Some(purchase_row(name, ingredient, *quantity, buffer)),
            None => {
                trace!(ingredient = %name, "Ingredient not in catalog, dropping from list");
                None
            }
        })
        .collect();

    rows.sort_by(|a, b| (&a.item_type, &a.name).cmp(&(&b.item_type, &b.name)));
    rows
}

fn purchase_row(name: &str, ingredient: &Ingredient, demand: f64, buffer: f64) -> ShoppingListEntry {
    let buffered = demand * buffer;

    let (quantity, unit) = match ingredient.container_ml() {
        Some(container_ml) => {
            let unit = if container_ml >= f64::from(BOTTLE_THRESHOLD_ML) {
                UNIT_BOTTLE
            } else {
                UNIT_CAN
            };
            (whole_units(buffered / container_ml), unit.to_string())
        }
        None => (whole_units(buffered), ingredient.unit.clone()),
    };

    ShoppingListEntry {
        name: name.to_string(),
        item_type: ingredient.item_type.clone(),
        quantity,
        unit,
        cost_min: ingredient.price_min.line_cost(quantity),
        cost_max: ingredient.price_max.line_cost(quantity),
    }
}

fn whole_units(amount: f64) -> u64 {
    amount.ceil() as u64
}

/// Totals, profit range and break-even.
fn roll_up(settings: &EventSettings, shopping_list: Vec<ShoppingListEntry>) -> FinancialSummary {
    let total_min: Money = shopping_list.iter().map(|row| row.cost_min).sum();
    let total_max: Money = shopping_list.iter().map(|row| row.cost_max).sum();
    let fixed_costs = settings.fixed_costs();
    let revenue = settings.revenue();

    let break_even = break_even(settings, total_min, total_max, fixed_costs);

    FinancialSummary {
        shopping_list,
        total_min,
        total_max,
        fixed_costs,
        revenue,
        profit_min: revenue - total_max - fixed_costs,
        profit_max: revenue - total_min - fixed_costs,
        break_even,
    }
}

fn break_even(
    settings: &EventSettings,
    total_min: Money,
    total_max: Money,
    fixed_costs: Money,
) -> BreakEven {
    let average_cost_per_guest = if settings.guests > 0 {
        (total_min + total_max).to_major() / 2.0 / settings.guests as f64
    } else {
        0.0
    };

    let margin = settings.ticket_price.to_major() - average_cost_per_guest;
    if margin > 0.0 {
        BreakEven::Reachable((fixed_costs.to_major() / margin).ceil() as u64)
    } else {
        BreakEven::Unreachable
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
