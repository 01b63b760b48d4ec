//! Plan Assembler — the rule-based generation path.
//!
//! Flow: parse_pantry → select_meal × 21 → derive_shopping_list → featured recipe,
//!       total cost and pantry utilization → MealPlan.
//!
//! Pure and synchronous: no I/O, no failure mode. Every slot resolves to at least the
//! placeholder meal, so an empty pantry still yields a complete week.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::pantry::parser::parse_pantry;
use crate::planning::catalog::Catalog;
use crate::planning::models::{FeaturedRecipe, Meal, MealPlan, UserPreferences, WeeklyPlan};
use crate::planning::selector::select_meal;
use crate::planning::shopping::{derive_shopping_list, total_cost};

/// Builds a complete week from the pantry text and preferences.
pub fn assemble(catalog: &Catalog, preferences: &UserPreferences) -> MealPlan {
    let pantry = parse_pantry(&preferences.pantry_text);
    let mut used: BTreeSet<String> = BTreeSet::new();

    let weekly_plan = WeeklyPlan::build(|_, slot| {
        select_meal(catalog, &pantry, slot, preferences, &mut used)
    });

    let featured_recipe = FeaturedRecipe {
        meal: pick_featured(&weekly_plan).clone(),
        servings: preferences.family_size,
    };

    let shopping_list = derive_shopping_list(catalog, &pantry);
    let total_cost = total_cost(&shopping_list);
    let pantry_utilization = utilization_percent(used.len(), pantry.len());

    debug!(
        "Assembled rule-based plan: {} pantry items, {} used, featured={:?}, {} shopping categories",
        pantry.len(),
        used.len(),
        featured_recipe.meal.name,
        shopping_list.len()
    );

    MealPlan {
        weekly_plan,
        featured_recipe,
        shopping_list,
        total_cost,
        pantry_utilization,
        nutrition_summary: None,
        ai_insights: None,
    }
}

/// The meal with the strictly longest step list; the earliest (day, slot) wins ties.
pub fn pick_featured(plan: &WeeklyPlan) -> &Meal {
    plan.meals().fold(plan.first_meal(), |best, (_, _, meal)| {
        if meal.steps.len() > best.steps.len() {
            meal
        } else {
            best
        }
    })
}

/// `round(100 * used / max(pantry, 1))`, clamped to 100.
///
/// The raw ratio can exceed 100 when recipes reference more distinct canonical names
/// than the pantry listed (e.g. one "spices" token feeding several recipes through
/// fuzzy matching). The clamp is logged rather than applied silently.
pub fn utilization_percent(used: usize, pantry: usize) -> u32 {
    let raw = (100.0 * used as f64 / pantry.max(1) as f64).round() as u32;
    if raw > 100 {
        warn!("Pantry utilization computed as {raw}% ({used} used / {pantry} listed); clamping to 100");
        return 100;
    }
    raw
}
