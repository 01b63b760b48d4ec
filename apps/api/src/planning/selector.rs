//! Meal Slot Selector — picks one meal for a (day, slot) pair.
//!
//! Selection walks an ordered fallback chain: catalog recipe → Basic Roti → placeholder.
//! The placeholder always succeeds, so every slot resolves to a meal.
//!
//! Within the catalog strategy, each slot has a fixed name preference list (not a
//! score). Ties beyond the named preferences fall back to catalog declaration order.

use std::collections::BTreeSet;

use tracing::debug;

use crate::pantry::matching::{has_ingredient, ingredient_quantity};
use crate::pantry::PantryItem;
use crate::planning::catalog::{Catalog, RecipeTemplate};
use crate::planning::models::{Meal, Slot, UserPreferences};

/// Everything a strategy may look at. Strategies never mutate shared state.
struct SlotContext<'a> {
    catalog: &'a Catalog,
    pantry: &'a [PantryItem],
    slot: Slot,
    spice_ceiling: u8,
}

/// A chosen meal plus the canonical ingredients it consumes from the pantry.
struct Selection {
    meal: Meal,
    used: &'static [&'static str],
}

type Strategy = fn(&SlotContext<'_>) -> Option<Selection>;

/// Tried in order; the first strategy returning a meal wins.
const FALLBACK_CHAIN: &[(&str, Strategy)] = &[("catalog", from_catalog), ("basic_roti", basic_roti)];

/// Selects a meal for `slot`, recording the ingredients it uses into `used`.
pub fn select_meal(
    catalog: &Catalog,
    pantry: &[PantryItem],
    slot: Slot,
    preferences: &UserPreferences,
    used: &mut BTreeSet<String>,
) -> Meal {
    let ctx = SlotContext {
        catalog,
        pantry,
        slot,
        spice_ceiling: preferences.spice_level,
    };

    let selection = FALLBACK_CHAIN
        .iter()
        .find_map(|(label, strategy)| {
            let selection = strategy(&ctx);
            if selection.is_some() {
                debug!("{slot:?} resolved by {label} strategy");
            }
            selection
        })
        .unwrap_or_else(placeholder);

    used.extend(selection.used.iter().map(|s| s.to_string()));
    selection.meal
}

/// Name fragments a slot prefers, most preferred first.
fn slot_preferences(slot: Slot) -> [&'static str; 2] {
    match slot {
        Slot::Breakfast => ["Paratha", "Roti"],
        Slot::Lunch => ["Rice", "Dal"],
        Slot::Dinner => ["Sabzi", "Roti"],
    }
}

fn from_catalog(ctx: &SlotContext<'_>) -> Option<Selection> {
    let eligible: Vec<&RecipeTemplate> = ctx.catalog.eligible(ctx.pantry).collect();

    let recipe = slot_preferences(ctx.slot)
        .iter()
        .find_map(|fragment| eligible.iter().find(|r| r.name.contains(fragment)))
        .or_else(|| eligible.first())?;

    Some(Selection {
        meal: render_recipe(recipe, ctx.pantry, ctx.spice_ceiling),
        used: recipe.required_ingredients,
    })
}

fn basic_roti(ctx: &SlotContext<'_>) -> Option<Selection> {
    if !has_ingredient(ctx.pantry, "wheat flour") {
        return None;
    }
    Some(Selection {
        meal: Meal {
            name: "Basic Roti".to_string(),
            time: "15 mins".to_string(),
            spice: 1,
            ingredients: to_strings(&["Wheat flour", "Salt", "Water"]),
            steps: to_strings(&[
                "Mix wheat flour with salt and water to make dough",
                "Knead well and rest for 10 minutes",
                "Roll and cook on hot tawa",
                "Serve hot",
            ]),
            nutrition: None,
            tips: vec![],
        },
        used: &[],
    })
}

fn placeholder() -> Selection {
    Selection {
        meal: Meal {
            name: "Simple Meal".to_string(),
            time: "10 mins".to_string(),
            spice: 1,
            ingredients: to_strings(&["Available pantry items"]),
            steps: to_strings(&["Prepare with available ingredients"]),
            nutrition: None,
            tips: vec![],
        },
        used: &[],
    }
}

/// Turns a template into a meal: clamps spice and attaches pantry quantities.
fn render_recipe(recipe: &RecipeTemplate, pantry: &[PantryItem], spice_ceiling: u8) -> Meal {
    Meal {
        name: recipe.name.to_string(),
        time: recipe.time.to_string(),
        spice: recipe.spice.min(spice_ceiling),
        ingredients: recipe
            .required_ingredients
            .iter()
            .map(|&ingredient| match ingredient_quantity(pantry, ingredient) {
                Some(q) => format!("{ingredient} ({}{})", q.quantity, q.unit),
                None => ingredient.to_string(),
            })
            .collect(),
        steps: to_strings(recipe.steps),
        nutrition: None,
        tips: vec![],
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pantry::parser::parse_pantry;
    use crate::planning::catalog::Essential;
    use crate::planning::models::Rupees;

    fn prefs(spice_level: u8) -> UserPreferences {
        UserPreferences {
            pantry_text: String::new(),
            cuisine: "North Indian".to_string(),
            family_size: 4,
            spice_level,
            time_constraint: "45 mins".to_string(),
            diet_type: "Vegetarian".to_string(),
        }
    }

    fn select(pantry_text: &str, slot: Slot) -> (Meal, BTreeSet<String>) {
        let catalog = Catalog::builtin().unwrap();
        let pantry = parse_pantry(pantry_text);
        let mut used = BTreeSet::new();
        let meal = select_meal(&catalog, &pantry, slot, &prefs(5), &mut used);
        (meal, used)
    }

    #[test]
    fn test_breakfast_prefers_paratha() {
        let (meal, used) = select("atta 2kg, aloo 1kg, green chili, salt", Slot::Breakfast);
        assert_eq!(meal.name, "Aloo Paratha");
        let expected: BTreeSet<String> = ["wheat flour", "potato", "green chili", "salt"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(used, expected);
    }

    #[test]
    fn test_ingredients_carry_pantry_quantities() {
        let (meal, _) = select("atta 2kg, aloo 1kg, green chili, salt", Slot::Breakfast);
        assert_eq!(
            meal.ingredients,
            vec![
                "wheat flour (2kg)",
                "potato (1kg)",
                "green chili (1piece)",
                "salt (1piece)"
            ]
        );
    }

    #[test]
    fn test_lunch_prefers_rice_then_dal() {
        let (meal, _) = select("rice, toor dal, basic spices", Slot::Lunch);
        assert_eq!(meal.name, "Jeera Rice");

        let (meal, _) = select("toor dal, basic spices", Slot::Lunch);
        assert_eq!(meal.name, "Simple Dal");
    }

    #[test]
    fn test_dinner_prefers_sabzi_then_roti() {
        let (meal, _) = select("atta, aloo, pyaz, basic spices", Slot::Dinner);
        assert_eq!(meal.name, "Simple Aloo Sabzi");

        let (meal, _) = select("atta, salt", Slot::Dinner);
        assert_eq!(meal.name, "Fresh Roti");
    }

    #[test]
    fn test_unpreferred_slot_takes_first_eligible() {
        // Only Nutritious Khichdi is eligible; no lunch preference matches it.
        let (meal, _) = select("moong dal, rice, haldi, jeera", Slot::Lunch);
        // "rice" + "cumin seeds" but no salt: Jeera Rice is not eligible
        assert_eq!(meal.name, "Nutritious Khichdi");
    }

    #[test]
    fn test_wheat_flour_only_falls_back_to_basic_roti() {
        for slot in [Slot::Breakfast, Slot::Lunch, Slot::Dinner] {
            let (meal, used) = select("atta", slot);
            assert_eq!(meal.name, "Basic Roti");
            assert!(used.is_empty());
        }
    }

    #[test]
    fn test_empty_pantry_gets_placeholder() {
        let (meal, used) = select("", Slot::Dinner);
        assert_eq!(meal.name, "Simple Meal");
        assert_eq!(meal.ingredients, vec!["Available pantry items"]);
        assert!(used.is_empty());
    }

    #[test]
    fn test_spice_clamped_to_preference() {
        let catalog = Catalog::builtin().unwrap();
        let pantry = parse_pantry("pyaz, basic spices");
        let mut used = BTreeSet::new();

        let mild = select_meal(&catalog, &pantry, Slot::Dinner, &prefs(1), &mut used);
        assert_eq!(mild.name, "Pyaz ki Sabzi");
        assert_eq!(mild.spice, 1);

        let hot = select_meal(&catalog, &pantry, Slot::Dinner, &prefs(5), &mut used);
        assert_eq!(hot.spice, 3);
    }

    #[test]
    fn test_substituted_catalog_is_used() {
        let catalog = Catalog::new(
            vec![RecipeTemplate {
                name: "Curd Rice",
                required_ingredients: &["rice", "curd"],
                time: "10 mins",
                spice: 1,
                steps: &["Mix", "Temper", "Serve"],
            }],
            vec![Essential {
                name: "rice",
                category: "Grains",
                cost: Rupees(60),
            }],
        )
        .unwrap();
        let pantry = parse_pantry("basmati rice, dahi");
        let mut used = BTreeSet::new();
        let meal = select_meal(&catalog, &pantry, Slot::Breakfast, &prefs(3), &mut used);
        assert_eq!(meal.name, "Curd Rice");
        assert_eq!(meal.ingredients, vec!["rice (1piece)", "curd (1piece)"]);
    }
}
