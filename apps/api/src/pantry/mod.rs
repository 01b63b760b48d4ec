// Pantry: turns free-text pantry descriptions into structured items.
// No I/O and no LLM calls; everything here is deterministic.

pub mod matching;
pub mod parser;
pub mod synonyms;

use serde::{Deserialize, Serialize};

/// Coarse ingredient grouping, used for display and shopping-list grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientCategory {
    Grain,
    Vegetable,
    Spice,
    Dairy,
    Protein,
    Oil,
    Other,
}

/// A single normalized pantry entry. `name` is the canonical (lower-case English) name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: IngredientCategory,
}
