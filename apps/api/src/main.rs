mod config;
mod errors;
mod llm_client;
mod pantry;
mod planning;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{AiService, Config};
use crate::llm_client::{
    anthropic::{self, AnthropicClient},
    openai::{self, OpenAiClient},
};
use crate::planning::catalog::Catalog;
use crate::planning::sources::{LlmPlanSource, PlanSource, PlannerChain, RuleBasedPlanner};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (aborts on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Planner API v{}", env!("CARGO_PKG_VERSION"));

    // Recipe catalog and essentials table
    let catalog = Arc::new(Catalog::builtin()?);
    info!(
        "Catalog loaded: {} recipes, {} essentials",
        catalog.recipes().len(),
        catalog.essentials().len()
    );

    // Remote source for the configured provider, then the rule-based planner
    let mut remote: Vec<Arc<dyn PlanSource>> = Vec::new();
    match (config.ai_service, config.remote_api_key()) {
        (AiService::Anthropic, Some(api_key)) => {
            let model = AnthropicClient::new(api_key.to_string(), config.llm_timeout)?;
            info!(
                "LLM client initialized (provider: anthropic, model: {}, timeout: {:?})",
                anthropic::MODEL,
                config.llm_timeout
            );
            remote.push(Arc::new(LlmPlanSource::new(Arc::new(model))));
        }
        (AiService::OpenAi, Some(api_key)) => {
            let model = OpenAiClient::new(api_key.to_string(), config.llm_timeout)?;
            info!(
                "LLM client initialized (provider: openai, model: {}, timeout: {:?})",
                openai::MODEL,
                config.llm_timeout
            );
            remote.push(Arc::new(LlmPlanSource::new(Arc::new(model))));
        }
        (AiService::Fallback, _) => {
            info!("AI_SERVICE=fallback; remote generation disabled");
        }
        (service, None) => {
            warn!(
                "{} is not set; plans will use the rule-based planner only",
                service.key_var().unwrap_or("API key")
            );
        }
    }

    let planner = PlannerChain::new(
        remote,
        RuleBasedPlanner::new(catalog.clone()),
        config.llm_timeout,
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        catalog,
        planner,
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
