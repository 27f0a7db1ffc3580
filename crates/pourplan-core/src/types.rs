//! # Domain Types
//!
//! Event settings and the three-level menu tree.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         EventSettings                                   │
//! │  guests, alcohol_ml_per_person, buffer, ticket/venue/equipment prices   │
//! │                                                                         │
//! │  menu: MenuTree                                                         │
//! │  ┌───────────────────────┐                                             │
//! │  │ "cocktails"           │  macro_pct = 0.7                            │
//! │  │  ├── "Gin"            │  pct = 0.6                                  │
//! │  │  │    ├── Gin Tonic   │  0.8                                        │
//! │  │  │    └── Negroni     │  0.2                                        │
//! │  │  └── "Rum"            │  pct = 0.4                                  │
//! │  │       └── Mojito      │  1.0                                        │
//! │  │ "beer"                │  macro_pct = 0.3                            │
//! │  │  └── ...              │                                             │
//! │  └───────────────────────┘                                             │
//! │                                                                         │
//! │  extras: name → { qty_per_person, min_qty }                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every level is a name-keyed [`IndexMap`], so iteration follows the order
//! the document was written in.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// Category name → category node.
pub type MenuTree = IndexMap<String, MenuCategory>;

// =============================================================================
// Menu Tree
// =============================================================================

/// Top-level grouping in the menu tree ("cocktails", "beer", ...).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuCategory {
    /// Share of the event's total alcohol (0.0 - 1.0).
    pub macro_pct: f64,

    /// Spirits poured in this category, keyed by ingredient name.
    #[serde(default)]
    pub spirits: IndexMap<String, MenuSpirit>,
}

/// A spirit within a category.
///
/// The key in [`MenuCategory::spirits`] must name an ingredient in the
/// catalog; unknown spirits are skipped by the engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuSpirit {
    /// Share of the category's alcohol (0.0 - 1.0).
    pub pct: f64,

    /// Cocktail name → share of this spirit's alcohol.
    #[serde(default)]
    pub drinks: IndexMap<String, f64>,
}

impl MenuCategory {
    /// Creates a category with no spirits.
    pub fn new(macro_pct: f64) -> Self {
        MenuCategory {
            macro_pct,
            spirits: IndexMap::new(),
        }
    }

    /// Adds a spirit (builder style).
    pub fn with_spirit(mut self, name: impl Into<String>, spirit: MenuSpirit) -> Self {
        self.spirits.insert(name.into(), spirit);
        self
    }
}

impl MenuSpirit {
    /// Creates a spirit with no drinks.
    pub fn new(pct: f64) -> Self {
        MenuSpirit {
            pct,
            drinks: IndexMap::new(),
        }
    }

    /// Adds a drink share (builder style).
    pub fn with_drink(mut self, cocktail: impl Into<String>, fraction: f64) -> Self {
        self.drinks.insert(cocktail.into(), fraction);
        self
    }
}

// =============================================================================
// Extras
// =============================================================================

/// A fixed per-guest item (cups, ice, snacks).
///
/// Demand is `max(min_qty, qty_per_person × guests)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExtraItem {
    #[serde(default)]
    pub qty_per_person: f64,

    #[serde(default)]
    pub min_qty: f64,
}

impl ExtraItem {
    /// Quantity needed for the given head count.
    pub fn demand_for(&self, guests: u32) -> f64 {
        self.min_qty.max(self.qty_per_person * guests as f64)
    }
}

// =============================================================================
// Event Settings
// =============================================================================

/// Event parameters plus the menu tree.
///
/// ## Document Shape
/// ```json
/// {
///   "guests": 120,
///   "alcohol_ml_per_person": 50,
///   "buffer": 1.1,
///   "ticket_price": 25,
///   "venue_cost": 800,
///   "equipment_cost": 150,
///   "menu": { "cocktails": { "macro_pct": 1.0, "spirits": { ... } } },
///   "extras": { "Cups": { "qty_per_person": 3, "min_qty": 200 } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EventSettings {
    /// Expected head count.
    pub guests: u32,

    /// Pure alcohol to serve per guest, in ml.
    pub alcohol_ml_per_person: f64,

    /// Safety multiplier on demand (≥ 1.0) for spillage and waste.
    pub buffer: f64,

    #[ts(type = "number")]
    pub ticket_price: Money,

    #[ts(type = "number")]
    pub venue_cost: Money,

    #[ts(type = "number")]
    pub equipment_cost: Money,

    pub menu: MenuTree,

    #[serde(default)]
    pub extras: IndexMap<String, ExtraItem>,
}

impl EventSettings {
    /// Decodes a raw settings document.
    ///
    /// A missing or mistyped required field is a contract violation; the
    /// calculation must not run on a partially decoded document.
    pub fn from_document(document: &Value) -> CoreResult<Self> {
        EventSettings::deserialize(document)
            .map_err(|e| CoreError::contract("settings", e.to_string()))
    }

    /// Sum of venue and equipment costs.
    pub fn fixed_costs(&self) -> Money {
        self.venue_cost + self.equipment_cost
    }

    /// Ticket revenue at full attendance.
    pub fn revenue(&self) -> Money {
        self.ticket_price.multiply_quantity(self.guests as i64)
    }

    /// Total pure alcohol to serve, in ml.
    pub fn total_alcohol_ml(&self) -> f64 {
        self.guests as f64 * self.alcohol_ml_per_person
    }

    /// Applies a partial update of the scalar fields.
    pub fn apply_patch(&mut self, patch: &SettingsPatch) {
        if let Some(guests) = patch.guests {
            self.guests = guests;
        }
        if let Some(ml) = patch.alcohol_ml_per_person {
            self.alcohol_ml_per_person = ml;
        }
        if let Some(buffer) = patch.buffer {
            self.buffer = buffer;
        }
        if let Some(price) = patch.ticket_price {
            self.ticket_price = price;
        }
        if let Some(cost) = patch.venue_cost {
            self.venue_cost = cost;
        }
        if let Some(cost) = patch.equipment_cost {
            self.equipment_cost = cost;
        }
    }
}

/// Partial update of [`EventSettings`]; absent fields are left unchanged.
///
/// The menu and extras are replaced through their own operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SettingsPatch {
    #[serde(default)]
    pub guests: Option<u32>,

    #[serde(default)]
    pub alcohol_ml_per_person: Option<f64>,

    #[serde(default)]
    pub buffer: Option<f64>,

    #[serde(default)]
    #[ts(type = "number | null")]
    pub ticket_price: Option<Money>,

    #[serde(default)]
    #[ts(type = "number | null")]
    pub venue_cost: Option<Money>,

    #[serde(default)]
    #[ts(type = "number | null")]
    pub equipment_cost: Option<Money>,
}

// =============================================================================
// Alcohol Level Presets
// =============================================================================

/// Named presets for `alcohol_ml_per_person`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AlcoholLevel {
    /// 25 ml per guest.
    Soft,
    /// 50 ml per guest.
    Aperitivo,
    /// 75 ml per guest.
    Party,
    /// 100 ml per guest.
    Hardcore,
}

impl AlcoholLevel {
    /// All presets, lightest first.
    pub const ALL: [AlcoholLevel; 4] = [
        AlcoholLevel::Soft,
        AlcoholLevel::Aperitivo,
        AlcoholLevel::Party,
        AlcoholLevel::Hardcore,
    ];

    /// Pure alcohol per guest in ml.
    pub const fn ml_per_person(&self) -> u32 {
        match self {
            AlcoholLevel::Soft => 25,
            AlcoholLevel::Aperitivo => 50,
            AlcoholLevel::Party => 75,
            AlcoholLevel::Hardcore => 100,
        }
    }

    /// Display label.
    pub const fn label(&self) -> &'static str {
        match self {
            AlcoholLevel::Soft => "Soft",
            AlcoholLevel::Aperitivo => "Aperitivo",
            AlcoholLevel::Party => "Party",
            AlcoholLevel::Hardcore => "Hardcore",
        }
    }

    /// Finds the preset matching a configured per-guest volume, if any.
    pub fn from_ml(ml: f64) -> Option<Self> {
        AlcoholLevel::ALL
            .into_iter()
            .find(|level| (level.ml_per_person() as f64 - ml).abs() < f64::EPSILON)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings_document() -> Value {
        json!({
            "guests": 100,
            "alcohol_ml_per_person": 50,
            "buffer": 1.1,
            "ticket_price": 20,
            "venue_cost": 300,
            "equipment_cost": 200.5,
            "menu": {
                "cocktails": {
                    "macro_pct": 1.0,
                    "spirits": {
                        "Gin": { "pct": 1.0, "drinks": { "Gin Tonic": 1.0 } }
                    }
                }
            }
        })
    }

    #[test]
    fn test_from_document() {
        let settings = EventSettings::from_document(&settings_document()).unwrap();
        assert_eq!(settings.guests, 100);
        assert_eq!(settings.ticket_price.cents(), 2000);
        assert_eq!(settings.fixed_costs().cents(), 50050);
        assert_eq!(settings.revenue().cents(), 200000);
        assert_eq!(settings.total_alcohol_ml(), 5000.0);
        assert!(settings.extras.is_empty());
        assert_eq!(settings.menu["cocktails"].spirits["Gin"].drinks["Gin Tonic"], 1.0);
    }

    #[test]
    fn test_missing_field_is_contract_violation() {
        let mut doc = settings_document();
        doc.as_object_mut().unwrap().remove("guests");

        let err = EventSettings::from_document(&doc).unwrap_err();
        assert!(matches!(err, CoreError::ContractViolation { .. }));
        assert!(err.to_string().contains("guests"));
    }

    #[test]
    fn test_wrong_type_is_contract_violation() {
        let mut doc = settings_document();
        doc["buffer"] = json!("lots");

        let err = EventSettings::from_document(&doc).unwrap_err();
        assert!(matches!(err, CoreError::ContractViolation { .. }));
    }

    #[test]
    fn test_menu_keeps_document_order() {
        let doc = json!({
            "zeta": { "macro_pct": 0.5, "spirits": {} },
            "alpha": { "macro_pct": 0.5 }
        });
        let menu: MenuTree = serde_json::from_value(doc).unwrap();
        let names: Vec<&str> = menu.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert!(menu["alpha"].spirits.is_empty());
    }

    #[test]
    fn test_extra_demand_is_a_floor() {
        let cups = ExtraItem {
            qty_per_person: 3.0,
            min_qty: 200.0,
        };
        assert_eq!(cups.demand_for(50), 200.0);
        assert_eq!(cups.demand_for(100), 300.0);
        assert_eq!(cups.demand_for(0), 200.0);
    }

    #[test]
    fn test_apply_patch() {
        let mut settings = EventSettings::from_document(&settings_document()).unwrap();
        let patch = SettingsPatch {
            guests: Some(80),
            ticket_price: Some(Money::from_cents(2500)),
            ..Default::default()
        };
        settings.apply_patch(&patch);

        assert_eq!(settings.guests, 80);
        assert_eq!(settings.ticket_price.cents(), 2500);
        assert_eq!(settings.buffer, 1.1);
    }

    #[test]
    fn test_alcohol_levels() {
        assert_eq!(AlcoholLevel::Party.ml_per_person(), 75);
        assert_eq!(AlcoholLevel::Soft.label(), "Soft");
        assert_eq!(AlcoholLevel::from_ml(50.0), Some(AlcoholLevel::Aperitivo));
        assert_eq!(AlcoholLevel::from_ml(60.0), None);
    }
}
