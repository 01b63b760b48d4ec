//! Axum route handlers for the Planning API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, AppJson};
use crate::pantry::parser::parse_pantry;
use crate::pantry::PantryItem;
use crate::planning::models::{MealPlan, PlanOrigin, UserPreferences};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanResponse {
    pub plan_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub source: PlanOrigin,
    pub ai_powered: bool,
    #[serde(flatten)]
    pub plan: MealPlan,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsePantryRequest {
    pub pantry_text: String,
}

#[derive(Debug, Serialize)]
pub struct ParsePantryResponse {
    pub items: Vec<PantryItem>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/plans
///
/// Validates preferences, then runs the planner chain: remote generation when
/// configured, rule-based otherwise. Always returns a complete week.
pub async fn handle_generate_plan(
    State(state): State<AppState>,
    AppJson(preferences): AppJson<UserPreferences>,
) -> Result<Json<GeneratePlanResponse>, AppError> {
    preferences.validate()?;

    let generated = state.planner.generate(&preferences).await;
    let plan_id = Uuid::new_v4();

    info!(
        "Plan {plan_id} generated: source={:?}, total_cost={}, utilization={}%",
        generated.origin, generated.plan.total_cost, generated.plan.pantry_utilization
    );

    Ok(Json(GeneratePlanResponse {
        plan_id,
        generated_at: Utc::now(),
        source: generated.origin,
        ai_powered: generated.origin == PlanOrigin::Ai,
        plan: generated.plan,
    }))
}

/// POST /api/v1/pantry/parse
///
/// Returns the normalized pantry so clients can preview how free text was read.
pub async fn handle_parse_pantry(
    AppJson(request): AppJson<ParsePantryRequest>,
) -> Result<Json<ParsePantryResponse>, AppError> {
    if request.pantry_text.trim().is_empty() {
        return Err(AppError::Validation(
            "pantryText cannot be empty".to_string(),
        ));
    }

    Ok(Json(ParsePantryResponse {
        items: parse_pantry(&request.pantry_text),
    }))
}
