use std::sync::Arc;

use crate::config::Config;
use crate::planning::catalog::Catalog;
use crate::planning::sources::PlannerChain;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Built once at startup; read-only.
    pub catalog: Arc<Catalog>,
    /// Remote sources (if configured) followed by the rule-based planner.
    pub planner: PlannerChain,
}
