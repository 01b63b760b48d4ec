//! Plan sources and the fallback chain that picks between them.
//!
//! Remote sources are tried in order under a bounded timeout. The first success is
//! returned verbatim; if every remote source fails (or none is configured) the
//! rule-based planner runs. The two paths are never merged.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, PANTRY_FIRST_INSTRUCTION};
use crate::llm_client::{call_json, ChatModel, LlmError};
use crate::pantry::parser::parse_pantry;
use crate::planning::assembler::assemble;
use crate::planning::boundary::{PlanDocument, PlanRequest, SchemaError};
use crate::planning::catalog::Catalog;
use crate::planning::models::{GeneratedPlan, MealPlan, PlanOrigin, UserPreferences};
use crate::planning::prompts::{PLAN_PROMPT_TEMPLATE, PLAN_SYSTEM};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("schema violation: {0}")]
    Schema(#[from] SchemaError),

    #[error("could not encode plan request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// A remote generator of complete plans. Carried in `PlannerChain` as `Arc<dyn PlanSource>`.
#[async_trait]
pub trait PlanSource: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &'static str;

    async fn generate(&self, preferences: &UserPreferences) -> Result<MealPlan, SourceError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmPlanSource
// ────────────────────────────────────────────────────────────────────────────

/// Asks a chat model (Anthropic or OpenAI) for a plan document and validates it.
pub struct LlmPlanSource {
    model: Arc<dyn ChatModel>,
}

impl LlmPlanSource {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl PlanSource for LlmPlanSource {
    fn name(&self) -> &'static str {
        self.model.provider()
    }

    async fn generate(&self, preferences: &UserPreferences) -> Result<MealPlan, SourceError> {
        let pantry = parse_pantry(&preferences.pantry_text);
        let request = PlanRequest::from_preferences(preferences, &pantry);
        request.validate()?;

        let prompt = build_plan_prompt(&request, preferences)?;
        let system = format!("{PLAN_SYSTEM}\n\n{JSON_ONLY_SYSTEM}");

        let document: PlanDocument = call_json(self.model.as_ref(), &prompt, &system).await?;
        Ok(document.into_meal_plan(&pantry, preferences)?)
    }
}

fn build_plan_prompt(
    request: &PlanRequest,
    preferences: &UserPreferences,
) -> Result<String, serde_json::Error> {
    let request_json = serde_json::to_string_pretty(request)?;
    let family_size = preferences.family_size.to_string();
    let spice_level = preferences.spice_level.to_string();

    Ok(fill_placeholders(
        PLAN_PROMPT_TEMPLATE,
        &[
            ("pantry_instruction", PANTRY_FIRST_INSTRUCTION),
            ("json_only", JSON_ONLY_SYSTEM),
            ("request_json", &request_json),
            ("pantry_text", preferences.pantry_text.trim()),
            ("cuisine", &preferences.cuisine),
            ("family_size", &family_size),
            ("spice_level", &spice_level),
            ("time_constraint", &preferences.time_constraint),
            ("diet_type", &preferences.diet_type),
        ],
    ))
}

/// Replaces `{key}` markers in a single left-to-right pass. Inserted values are never
/// scanned again, and braces that do not name a key are copied through.
fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let filled = values.iter().find_map(|&(key, value)| {
            after
                .strip_prefix(key)
                .and_then(|tail| tail.strip_prefix('}'))
                .map(|tail| (value, tail))
        });
        match filled {
            Some((value, tail)) => {
                out.push_str(value);
                rest = tail;
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

// ────────────────────────────────────────────────────────────────────────────
// RuleBasedPlanner
// ────────────────────────────────────────────────────────────────────────────

/// Deterministic catalog-driven planner. Never fails.
pub struct RuleBasedPlanner {
    catalog: Arc<Catalog>,
}

impl RuleBasedPlanner {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn plan(&self, preferences: &UserPreferences) -> MealPlan {
        assemble(&self.catalog, preferences)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PlannerChain
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct PlannerChain {
    remote: Vec<Arc<dyn PlanSource>>,
    fallback: Arc<RuleBasedPlanner>,
    timeout: Duration,
}

impl PlannerChain {
    /// `timeout` bounds each remote source call as a whole, retries included.
    pub fn new(
        remote: Vec<Arc<dyn PlanSource>>,
        fallback: RuleBasedPlanner,
        timeout: Duration,
    ) -> Self {
        Self {
            remote,
            fallback: Arc::new(fallback),
            timeout,
        }
    }

    pub fn remote_enabled(&self) -> bool {
        !self.remote.is_empty()
    }

    pub async fn generate(&self, preferences: &UserPreferences) -> GeneratedPlan {
        for source in &self.remote {
            match self.try_source(source.as_ref(), preferences).await {
                Ok(plan) => {
                    info!("Plan generated by remote source '{}'", source.name());
                    return GeneratedPlan {
                        plan,
                        origin: PlanOrigin::Ai,
                    };
                }
                Err(e) => warn!(
                    "Remote source '{}' failed, falling back: {e}",
                    source.name()
                ),
            }
        }

        info!("Plan generated by rule-based planner");
        GeneratedPlan {
            plan: self.fallback.plan(preferences),
            origin: PlanOrigin::RuleBased,
        }
    }

    async fn try_source(
        &self,
        source: &dyn PlanSource,
        preferences: &UserPreferences,
    ) -> Result<MealPlan, SourceError> {
        tokio::time::timeout(self.timeout, source.generate(preferences))
            .await
            .map_err(|_| SourceError::Timeout(self.timeout))?
    }
}
