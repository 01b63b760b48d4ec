use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version and whether remote generation is active.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "planner-api",
        "aiService": state.config.ai_service.as_str(),
        "remoteGeneration": state.planner.remote_enabled(),
        "catalogRecipes": state.catalog.recipes().len()
    }))
}
