pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::planning::handlers;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("No such route".to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Planning API
        .route("/api/v1/plans", post(handlers::handle_generate_plan))
        .route("/api/v1/pantry/parse", post(handlers::handle_parse_pantry))
        .fallback(not_found)
        .with_state(state)
}
