//! Planning data models: preferences in, canonical meal plan out.
//!
//! The canonical plan shape is day → {breakfast, lunch, dinner}. The list-of-days
//! document the LLM speaks lives in `planning::boundary` and never leaks past it.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::errors::AppError;

// ────────────────────────────────────────────────────────────────────────────
// Preferences
// ────────────────────────────────────────────────────────────────────────────

/// Time budget labels accepted from callers.
pub const TIME_CONSTRAINTS: &[&str] = &["30 mins", "45 mins", "1 hour", "1.5 hours", "2+ hours"];

pub const MIN_SPICE: u8 = 1;
pub const MAX_SPICE: u8 = 5;

/// Request body for plan generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(alias = "pantryList")]
    pub pantry_text: String,
    pub cuisine: String,
    pub family_size: u32,
    pub spice_level: u8,
    pub time_constraint: String,
    pub diet_type: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum PreferenceError {
    #[error("pantryText cannot be empty")]
    EmptyPantry,

    #[error("familySize must be at least 1")]
    FamilySize,

    #[error("spiceLevel must be between 1 and 5, got {0}")]
    SpiceLevel(u8),

    #[error("timeConstraint {0:?} is not a supported time budget")]
    TimeConstraint(String),
}

impl From<PreferenceError> for AppError {
    fn from(e: PreferenceError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl UserPreferences {
    /// Rejects malformed preferences before they reach any generation logic.
    pub fn validate(&self) -> Result<(), PreferenceError> {
        if self.pantry_text.trim().is_empty() {
            return Err(PreferenceError::EmptyPantry);
        }
        if self.family_size == 0 {
            return Err(PreferenceError::FamilySize);
        }
        if !(MIN_SPICE..=MAX_SPICE).contains(&self.spice_level) {
            return Err(PreferenceError::SpiceLevel(self.spice_level));
        }
        if !TIME_CONSTRAINTS.contains(&self.time_constraint.as_str()) {
            return Err(PreferenceError::TimeConstraint(self.time_constraint.clone()));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Calendar
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Every plan covers these days, in this order.
pub const WEEK: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

impl Weekday {
    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Case-insensitive parse of a day label.
    pub fn parse(label: &str) -> Option<Self> {
        WEEK.into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Breakfast,
    Lunch,
    Dinner,
}

impl Slot {
    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Breakfast => "breakfast",
            Slot::Lunch => "lunch",
            Slot::Dinner => "dinner",
        }
    }
}

/// Slots of a day, in serving order.
pub const SLOTS: [Slot; 3] = [Slot::Breakfast, Slot::Lunch, Slot::Dinner];

// ────────────────────────────────────────────────────────────────────────────
// Meals and plans
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meal {
    pub name: String,
    pub time: String,
    /// 1 – 5
    pub spice: u8,
    /// Display strings, e.g. "potato (1kg)"
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    /// Only remote plans carry nutrition and tips.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<MealNutrition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tips: Vec<String>,
}

/// Per-meal nutrition as the remote generator states it ("15g", not grams as numbers).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealNutrition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fats: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayMeals {
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
}

impl DayMeals {
    pub fn get(&self, slot: Slot) -> &Meal {
        match slot {
            Slot::Breakfast => &self.breakfast,
            Slot::Lunch => &self.lunch,
            Slot::Dinner => &self.dinner,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan {
    pub day: Weekday,
    pub meals: DayMeals,
}

/// Seven days, Monday through Sunday, each with all three slots filled.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyPlan {
    days: [DayPlan; 7],
}

impl WeeklyPlan {
    /// Builds a full week by asking `meal_for` for every (day, slot) in calendar order.
    pub fn build(mut meal_for: impl FnMut(Weekday, Slot) -> Meal) -> Self {
        let days = WEEK.map(|day| DayPlan {
            day,
            meals: DayMeals {
                breakfast: meal_for(day, Slot::Breakfast),
                lunch: meal_for(day, Slot::Lunch),
                dinner: meal_for(day, Slot::Dinner),
            },
        });
        Self { days }
    }

    /// Accepts pre-built days only if they are exactly Monday..Sunday in order.
    pub fn from_days(days: Vec<DayPlan>) -> Option<Self> {
        let days: [DayPlan; 7] = days.try_into().ok()?;
        days.iter()
            .zip(WEEK)
            .all(|(plan, day)| plan.day == day)
            .then_some(Self { days })
    }

    pub fn days(&self) -> &[DayPlan] {
        &self.days
    }

    /// Monday's breakfast.
    pub fn first_meal(&self) -> &Meal {
        &self.days[0].meals.breakfast
    }

    /// All 21 meals in (day, slot) order.
    pub fn meals(&self) -> impl Iterator<Item = (Weekday, Slot, &Meal)> + '_ {
        self.days.iter().flat_map(|plan| {
            SLOTS
                .into_iter()
                .map(move |slot| (plan.day, slot, plan.meals.get(slot)))
        })
    }
}

impl Serialize for WeeklyPlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for plan in &self.days {
            map.serialize_entry(plan.day.as_str(), &plan.meals)?;
        }
        map.end()
    }
}

/// The featured recipe: a meal plus the number of servings to cook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeaturedRecipe {
    #[serde(flatten)]
    pub meal: Meal,
    pub servings: u32,
}

/// Whole-rupee amount, rendered as "₹80".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rupees(pub u32);

impl fmt::Display for Rupees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.0)
    }
}

impl Serialize for Rupees {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Add for Rupees {
    type Output = Rupees;

    fn add(self, rhs: Rupees) -> Rupees {
        Rupees(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Rupees {
    fn sum<I: Iterator<Item = Rupees>>(iter: I) -> Rupees {
        iter.fold(Rupees::default(), Add::add)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingCategory {
    pub category: String,
    pub items: Vec<String>,
    pub cost: Rupees,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionDaily {
    pub day: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs_g: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_g: Option<f64>,
}

/// Nutrition figures as supplied by the remote generator. Never computed locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionSummary {
    #[serde(default)]
    pub daily: Vec<NutritionDaily>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub weekly_plan: WeeklyPlan,
    pub featured_recipe: FeaturedRecipe,
    pub shopping_list: Vec<ShoppingCategory>,
    pub total_cost: Rupees,
    /// 0 – 100
    pub pantry_utilization: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition_summary: Option<NutritionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<AiInsights>,
}

/// Free-form commentary from the remote generator, passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiInsights {
    #[serde(alias = "nutritional_balance")]
    pub nutritional_balance: String,
    #[serde(alias = "variety_score")]
    pub variety_score: f64,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Which path produced a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanOrigin {
    Ai,
    RuleBased,
}

#[derive(Debug, Clone)]
pub struct GeneratedPlan {
    pub plan: MealPlan,
    pub origin: PlanOrigin,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs() -> UserPreferences {
        UserPreferences {
            pantry_text: "atta, salt".to_string(),
            cuisine: "North Indian".to_string(),
            family_size: 4,
            spice_level: 3,
            time_constraint: "45 mins".to_string(),
            diet_type: "Vegetarian".to_string(),
        }
    }

    fn meal(name: &str) -> Meal {
        Meal {
            name: name.to_string(),
            time: "10 mins".to_string(),
            spice: 1,
            ingredients: vec![],
            steps: vec!["Cook".to_string()],
            nutrition: None,
            tips: vec![],
        }
    }

    #[test]
    fn test_valid_preferences_pass() {
        assert_eq!(prefs().validate(), Ok(()));
    }

    #[test]
    fn test_preferences_rejections() {
        let mut p = prefs();
        p.pantry_text = "   ".to_string();
        assert_eq!(p.validate(), Err(PreferenceError::EmptyPantry));

        let mut p = prefs();
        p.family_size = 0;
        assert_eq!(p.validate(), Err(PreferenceError::FamilySize));

        let mut p = prefs();
        p.spice_level = 6;
        assert_eq!(p.validate(), Err(PreferenceError::SpiceLevel(6)));

        let mut p = prefs();
        p.spice_level = 0;
        assert_eq!(p.validate(), Err(PreferenceError::SpiceLevel(0)));

        let mut p = prefs();
        p.time_constraint = "3 days".to_string();
        assert!(matches!(p.validate(), Err(PreferenceError::TimeConstraint(_))));
    }

    #[test]
    fn test_preferences_accept_camel_case_and_legacy_pantry_field() {
        let json = serde_json::json!({
            "pantryList": "aloo",
            "cuisine": "Bengali",
            "familySize": 2,
            "spiceLevel": 2,
            "timeConstraint": "30 mins",
            "dietType": "Vegan"
        });
        let p: UserPreferences = serde_json::from_value(json).unwrap();
        assert_eq!(p.pantry_text, "aloo");
        assert_eq!(p.family_size, 2);
    }

    #[test]
    fn test_weekday_parse_is_case_insensitive() {
        assert_eq!(Weekday::parse("monday"), Some(Weekday::Monday));
        assert_eq!(Weekday::parse(" SUNDAY "), Some(Weekday::Sunday));
        assert_eq!(Weekday::parse("Funday"), None);
    }

    #[test]
    fn test_weekly_plan_build_is_calendar_ordered() {
        let plan = WeeklyPlan::build(|day, slot| meal(&format!("{day}-{slot:?}")));
        let days: Vec<Weekday> = plan.days().iter().map(|d| d.day).collect();
        assert_eq!(days, WEEK.to_vec());
        assert_eq!(plan.meals().count(), 21);
        let (day, slot, first) = plan.meals().next().unwrap();
        assert_eq!((day, slot), (Weekday::Monday, Slot::Breakfast));
        assert_eq!(first.name, "Monday-Breakfast");
    }

    #[test]
    fn test_weekly_plan_from_days_rejects_wrong_order() {
        let plan = WeeklyPlan::build(|_, _| meal("x"));
        let mut days = plan.days().to_vec();
        assert!(WeeklyPlan::from_days(days.clone()).is_some());
        days.swap(0, 1);
        assert!(WeeklyPlan::from_days(days.clone()).is_none());
        days.truncate(6);
        assert!(WeeklyPlan::from_days(days).is_none());
    }

    #[test]
    fn test_weekly_plan_serializes_as_ordered_day_map() {
        let plan = WeeklyPlan::build(|_, _| meal("Dal"));
        let json = serde_json::to_string(&plan).unwrap();
        let monday = json.find("\"Monday\"").unwrap();
        let sunday = json.find("\"Sunday\"").unwrap();
        assert!(monday < sunday);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["Wednesday"]["lunch"]["name"], "Dal");
    }

    #[test]
    fn test_rupees_display_and_sum() {
        assert_eq!(Rupees(0).to_string(), "₹0");
        let total: Rupees = [Rupees(80), Rupees(60), Rupees(20)].into_iter().sum();
        assert_eq!(total, Rupees(160));
        assert_eq!(serde_json::to_value(total).unwrap(), "₹160");
    }
}
