//! Shopping List Deriver — essentials the pantry is missing, grouped by category.
//!
//! Costs are static heuristics from the essentials table, not live prices.

use crate::pantry::matching::has_ingredient;
use crate::pantry::PantryItem;
use crate::planning::catalog::Catalog;
use crate::planning::models::{Rupees, ShoppingCategory};

/// Display quantity suggested for every missing essential.
const SUGGESTED_QUANTITY: &str = "500g";

/// Missing essentials grouped by category in first-seen order. Empty if nothing is missing.
pub fn derive_shopping_list(catalog: &Catalog, pantry: &[PantryItem]) -> Vec<ShoppingCategory> {
    let mut groups: Vec<ShoppingCategory> = Vec::new();

    for essential in catalog
        .essentials()
        .iter()
        .filter(|e| !has_ingredient(pantry, e.name))
    {
        let entry = format!("{} ({SUGGESTED_QUANTITY})", essential.name);

        match groups.iter_mut().find(|g| g.category == essential.category) {
            Some(group) => {
                group.items.push(entry);
                group.cost = group.cost + essential.cost;
            }
            None => groups.push(ShoppingCategory {
                category: essential.category.to_string(),
                items: vec![entry],
                cost: essential.cost,
            }),
        }
    }

    groups
}

/// Sum of all category costs.
pub fn total_cost(list: &[ShoppingCategory]) -> Rupees {
    list.iter().map(|c| c.cost).sum()
}
