//! Ingredient Normalizer — parses free-text pantry input into `PantryItem`s.
//!
//! Input is split on commas and newlines. Each token may carry a quantity and unit
//! either in front ("2kg atta") or behind ("atta 2kg"). The remaining phrase is mapped
//! through the synonym table; unknown phrases pass through with a guessed category.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::synonyms::{guess_category, lookup, BASIC_SPICES};
use super::{IngredientCategory, PantryItem};

const DEFAULT_QUANTITY: f64 = 1.0;
const DEFAULT_UNIT: &str = "piece";
const SPICE_SHORTHAND: &str = "spices";
const SPICE_UNIT: &str = "tsp";

lazy_static! {
    static ref LEADING_QUANTITY: Regex = Regex::new(
        r"^(\d+(?:\.\d+)?)\s*(?:(kg|g|l|ml|cups|cup|tbsp|tsp|pieces|piece)\b)?\s*(.*)$"
    )
    .expect("leading quantity pattern should be valid");
    static ref TRAILING_QUANTITY: Regex = Regex::new(
        r"^(.+?)\s*(\d+(?:\.\d+)?)\s*(kg|g|l|ml|cups|cup|tbsp|tsp|pieces|piece)?$"
    )
    .expect("trailing quantity pattern should be valid");
}

/// A raw token split into its quantity, unit and ingredient phrase.
#[derive(Debug, PartialEq)]
struct Measured<'a> {
    quantity: f64,
    unit: String,
    phrase: &'a str,
}

/// Parses a pantry description. Order follows the input; duplicates are kept.
pub fn parse_pantry(text: &str) -> Vec<PantryItem> {
    let lowered = text.to_lowercase();
    let mut items = Vec::new();

    for token in lowered
        .split([',', '\n'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        let measured = measure(token);

        if measured.phrase.is_empty() {
            debug!("Dropping pantry token with no ingredient name: {token:?}");
            continue;
        }

        if measured.phrase.contains(SPICE_SHORTHAND) {
            items.extend(BASIC_SPICES.iter().map(|&spice| PantryItem {
                name: spice.to_string(),
                quantity: DEFAULT_QUANTITY,
                unit: SPICE_UNIT.to_string(),
                category: IngredientCategory::Spice,
            }));
            continue;
        }

        let (name, category) = match lookup(measured.phrase) {
            Some((canonical, category)) => (canonical.to_string(), category),
            None => (measured.phrase.to_string(), guess_category(measured.phrase)),
        };

        items.push(PantryItem {
            name,
            quantity: measured.quantity,
            unit: measured.unit,
            category,
        });
    }

    items
}

/// Splits one lower-cased, trimmed token into quantity, unit and phrase.
fn measure(token: &str) -> Measured<'_> {
    if let Some(caps) = LEADING_QUANTITY.captures(token) {
        let (quantity, unit) = quantity_and_unit(&caps[1], caps.get(2).map(|m| m.as_str()));
        return Measured {
            quantity,
            unit,
            phrase: caps.get(3).map_or("", |m| m.as_str().trim()),
        };
    }

    if let Some(caps) = TRAILING_QUANTITY.captures(token) {
        let (quantity, unit) = quantity_and_unit(&caps[2], caps.get(3).map(|m| m.as_str()));
        return Measured {
            quantity,
            unit,
            phrase: caps.get(1).map_or("", |m| m.as_str().trim()),
        };
    }

    Measured {
        quantity: DEFAULT_QUANTITY,
        unit: DEFAULT_UNIT.to_string(),
        phrase: token,
    }
}

/// A quantity that fails to parse resets both quantity and unit to the defaults.
fn quantity_and_unit(raw_quantity: &str, unit: Option<&str>) -> (f64, String) {
    match raw_quantity.parse::<f64>() {
        Ok(q) if q.is_finite() => (q, unit.unwrap_or(DEFAULT_UNIT).to_string()),
        _ => (DEFAULT_QUANTITY, DEFAULT_UNIT.to_string()),
    }
}
