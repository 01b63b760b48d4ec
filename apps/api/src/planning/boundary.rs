//! Remote boundary — the request we send to the LLM and the document shape it returns.
//!
//! The LLM speaks a list-of-days document (`days[].meals[]`, `grocery_list`). Inside the
//! service only the canonical `MealPlan` exists; this module validates documents and
//! translates in both directions. A document either passes validation as a whole or is
//! rejected as a whole.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pantry::matching::names_overlap;
use crate::pantry::PantryItem;
use crate::planning::assembler::{pick_featured, utilization_percent};
use crate::planning::models::{
    AiInsights, DayMeals, DayPlan, FeaturedRecipe, Meal, MealNutrition, MealPlan,
    NutritionSummary, Rupees, ShoppingCategory, UserPreferences, Weekday, WeeklyPlan,
    MAX_SPICE, MIN_SPICE, SLOTS, WEEK,
};

/// Days and meals-per-day we always ask the remote generator for.
pub const PLAN_DAYS: u8 = 7;
pub const MEALS_PER_DAY: u8 = 3;

const MAX_REQUEST_DAYS: u8 = 14;
const MAX_REQUEST_MEALS: u8 = 6;
const UNKNOWN_TIME: &str = "varies";
const DEFAULT_AISLE: &str = "Other";

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("request has no ingredients")]
    NoIngredients,

    #[error("request days must be 1-14, got {0}")]
    RequestDays(u8),

    #[error("request mealsPerDay must be 1-6, got {0}")]
    RequestMeals(u8),

    #[error("request calories must be positive")]
    RequestCalories,

    #[error("document has no days")]
    NoDays,

    #[error("document has {0} days, expected 7")]
    DayCount(usize),

    #[error("day {position} is {found:?}, expected {expected}")]
    DayOrder {
        position: usize,
        expected: Weekday,
        found: String,
    },

    #[error("{day} has {count} meals, expected 3")]
    MealCount { day: Weekday, count: usize },

    #[error("{day} meal {index} has an empty {field}")]
    EmptyField {
        day: Weekday,
        index: usize,
        field: &'static str,
    },

    #[error("{day} meal {index} has spice {spice}, expected 1-5")]
    Spice { day: Weekday, index: usize, spice: u8 },
}

// ────────────────────────────────────────────────────────────────────────────
// Outbound request
// ────────────────────────────────────────────────────────────────────────────

/// What we ask the remote generator for. Serialized into the prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub ingredients: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dietary: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    pub days: u8,
    pub meals_per_day: u8,
}

impl PlanRequest {
    /// Builds the request from normalized pantry names and the caller's diet type.
    pub fn from_preferences(preferences: &UserPreferences, pantry: &[PantryItem]) -> Self {
        let diet = preferences.diet_type.trim();
        Self {
            ingredients: pantry.iter().map(|item| item.name.clone()).collect(),
            dietary: if diet.is_empty() {
                vec![]
            } else {
                vec![diet.to_string()]
            },
            calories: None,
            days: PLAN_DAYS,
            meals_per_day: MEALS_PER_DAY,
        }
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.ingredients.is_empty() {
            return Err(SchemaError::NoIngredients);
        }
        if !(1..=MAX_REQUEST_DAYS).contains(&self.days) {
            return Err(SchemaError::RequestDays(self.days));
        }
        if !(1..=MAX_REQUEST_MEALS).contains(&self.meals_per_day) {
            return Err(SchemaError::RequestMeals(self.meals_per_day));
        }
        if self.calories == Some(0) {
            return Err(SchemaError::RequestCalories);
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Inbound document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMeal {
    pub name: String,
    /// Short description of the dish.
    pub recipe: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spice: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<MealNutrition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDay {
    pub day: String,
    pub meals: Vec<DocumentMeal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItem {
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aisle: Option<String>,
    /// Whole rupees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<u32>,
}

/// The plan document exchanged with the remote generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    pub days: Vec<DocumentDay>,
    pub grocery_list: Vec<GroceryItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition_summary: Option<NutritionSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<AiInsights>,
}

impl PlanDocument {
    /// Structural checks serde cannot express: day order, meal counts, non-empty fields.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.days.is_empty() {
            return Err(SchemaError::NoDays);
        }
        if self.days.len() != WEEK.len() {
            return Err(SchemaError::DayCount(self.days.len()));
        }

        for (position, (doc_day, expected)) in self.days.iter().zip(WEEK).enumerate() {
            if Weekday::parse(&doc_day.day) != Some(expected) {
                return Err(SchemaError::DayOrder {
                    position,
                    expected,
                    found: doc_day.day.clone(),
                });
            }
            if doc_day.meals.len() != SLOTS.len() {
                return Err(SchemaError::MealCount {
                    day: expected,
                    count: doc_day.meals.len(),
                });
            }
            for (index, meal) in doc_day.meals.iter().enumerate() {
                validate_meal(expected, index, meal)?;
            }
        }

        Ok(())
    }

    /// Validates and translates into the canonical plan.
    pub fn into_meal_plan(
        self,
        pantry: &[PantryItem],
        preferences: &UserPreferences,
    ) -> Result<MealPlan, SchemaError> {
        self.validate()?;

        let default_spice = preferences.spice_level;
        let mut days = Vec::with_capacity(WEEK.len());
        for (doc_day, day) in self.days.into_iter().zip(WEEK) {
            let count = doc_day.meals.len();
            let [breakfast, lunch, dinner]: [DocumentMeal; 3] = doc_day
                .meals
                .try_into()
                .map_err(|_| SchemaError::MealCount { day, count })?;
            days.push(DayPlan {
                day,
                meals: DayMeals {
                    breakfast: breakfast.into_meal(default_spice),
                    lunch: lunch.into_meal(default_spice),
                    dinner: dinner.into_meal(default_spice),
                },
            });
        }
        let weekly_plan =
            WeeklyPlan::from_days(days).ok_or(SchemaError::DayCount(WEEK.len()))?;

        let featured_recipe = FeaturedRecipe {
            meal: pick_featured(&weekly_plan).clone(),
            servings: preferences.family_size,
        };
        let pantry_utilization = referenced_share(&weekly_plan, pantry);
        let shopping_list = group_groceries(self.grocery_list);
        let total_cost = shopping_list.iter().map(|c| c.cost).sum();

        Ok(MealPlan {
            weekly_plan,
            featured_recipe,
            shopping_list,
            total_cost,
            pantry_utilization,
            nutrition_summary: self.nutrition_summary,
            ai_insights: self.ai_insights,
        })
    }
}

fn validate_meal(day: Weekday, index: usize, meal: &DocumentMeal) -> Result<(), SchemaError> {
    let empty = |field| SchemaError::EmptyField { day, index, field };

    if meal.name.trim().is_empty() {
        return Err(empty("name"));
    }
    if has_no_content(&meal.ingredients) {
        return Err(empty("ingredients"));
    }
    if has_no_content(&meal.instructions) {
        return Err(empty("instructions"));
    }
    if let Some(spice) = meal.spice {
        if !(MIN_SPICE..=MAX_SPICE).contains(&spice) {
            return Err(SchemaError::Spice { day, index, spice });
        }
    }
    Ok(())
}

/// True for an empty list or one holding a blank entry.
fn has_no_content(entries: &[String]) -> bool {
    entries.is_empty() || entries.iter().any(|e| e.trim().is_empty())
}

impl DocumentMeal {
    fn into_meal(self, default_spice: u8) -> Meal {
        Meal {
            name: self.name,
            time: self
                .time
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_TIME.to_string()),
            spice: self.spice.unwrap_or(default_spice),
            ingredients: self.ingredients,
            steps: self.instructions,
            nutrition: self.nutrition,
            tips: self.tips,
        }
    }
}

/// Share of pantry items that any meal's ingredient list mentions.
fn referenced_share(plan: &WeeklyPlan, pantry: &[PantryItem]) -> u32 {
    let referenced = pantry
        .iter()
        .filter(|item| {
            plan.meals().any(|(_, _, meal)| {
                meal.ingredients
                    .iter()
                    .any(|ingredient| names_overlap(&item.name, ingredient))
            })
        })
        .count();
    utilization_percent(referenced, pantry.len())
}

/// Groups grocery items by aisle in first-seen order and sums their estimated costs.
fn group_groceries(items: Vec<GroceryItem>) -> Vec<ShoppingCategory> {
    let mut groups: Vec<ShoppingCategory> = Vec::new();

    for item in items {
        let aisle = item
            .aisle
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(DEFAULT_AISLE)
            .to_string();
        let cost = Rupees(item.estimated_cost.unwrap_or(0));
        let label = grocery_label(&item);

        match groups.iter_mut().find(|g| g.category == aisle) {
            Some(group) => {
                group.items.push(label);
                group.cost = group.cost + cost;
            }
            None => groups.push(ShoppingCategory {
                category: aisle,
                items: vec![label],
                cost,
            }),
        }
    }

    groups
}

fn grocery_label(item: &GroceryItem) -> String {
    match (item.quantity, item.unit.as_deref()) {
        (Some(q), Some(unit)) => format!("{} ({q}{unit})", item.item),
        (Some(q), None) => format!("{} ({q})", item.item),
        _ => item.item.clone(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Canonical → document
// ────────────────────────────────────────────────────────────────────────────

impl From<&MealPlan> for PlanDocument {
    fn from(plan: &MealPlan) -> Self {
        let days = plan
            .weekly_plan
            .days()
            .iter()
            .map(|day_plan| DocumentDay {
                day: day_plan.day.to_string(),
                meals: SLOTS
                    .into_iter()
                    .map(|slot| {
                        let meal = day_plan.meals.get(slot);
                        DocumentMeal {
                            name: meal.name.clone(),
                            recipe: format!(
                                "{} for {}, ready in {}",
                                meal.name,
                                slot.as_str(),
                                meal.time
                            ),
                            ingredients: meal.ingredients.clone(),
                            instructions: meal.steps.clone(),
                            time: Some(meal.time.clone()),
                            spice: Some(meal.spice),
                            nutrition: meal.nutrition.clone(),
                            tips: meal.tips.clone(),
                        }
                    })
                    .collect(),
            })
            .collect();

        // The category cost rides on its first item so regrouping restores it.
        let grocery_list = plan
            .shopping_list
            .iter()
            .flat_map(|category| {
                category
                    .items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| GroceryItem {
                        item: item.clone(),
                        quantity: None,
                        unit: None,
                        alternatives: vec![],
                        aisle: Some(category.category.clone()),
                        estimated_cost: (i == 0).then_some(category.cost.0),
                    })
            })
            .collect();

        PlanDocument {
            days,
            grocery_list,
            nutrition_summary: plan.nutrition_summary.clone(),
            ai_insights: plan.ai_insights.clone(),
        }
    }
}
