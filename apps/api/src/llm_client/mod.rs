//! Chat-completion clients for remote plan generation.
//!
//! Each provider implements `ChatModel`; plan sources only see the trait. Shared here:
//! the error type, the retry loop and JSON extraction from model text. Every `LlmError`
//! means "remote unavailable" to callers, who fall back locally.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tracing::warn;

pub mod anthropic;
pub mod openai;
pub mod prompts;

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A provider that turns a (system, user) prompt pair into raw model text.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Provider label for logs, e.g. "anthropic".
    fn provider(&self) -> &'static str;

    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError>;
}

/// Calls `model` and deserializes its reply as JSON.
/// The prompt must instruct the model to return valid JSON.
pub async fn call_json<T: DeserializeOwned>(
    model: &dyn ChatModel,
    prompt: &str,
    system: &str,
) -> Result<T, LlmError> {
    let text = model.complete(prompt, system).await?;
    parse_json(&text)
}

fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    if text.trim().is_empty() {
        return Err(LlmError::EmptyContent);
    }
    serde_json::from_str(strip_json_fences(text)).map_err(LlmError::Parse)
}

/// Both providers wrap failures as `{"error": {"message": ...}}`.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Sends the request built by `build`, retrying 429 and 5xx with exponential backoff
/// (1s, 2s). Other non-2xx statuses fail immediately.
async fn send_with_retries(build: impl Fn() -> RequestBuilder) -> Result<Response, LlmError> {
    let mut last_error: Option<LlmError> = None;

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
            warn!(
                "LLM call attempt {} failed, retrying after {}ms...",
                attempt,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
        }

        let response = match build().send().await {
            Ok(r) => r,
            Err(e) => {
                last_error = Some(LlmError::Http(e));
                continue;
            }
        };

        let status = response.status();

        if status.as_u16() == 429 || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM API returned {}: {}", status, body);
            last_error = Some(LlmError::Api {
                status: status.as_u16(),
                message: body,
            });
            continue;
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        return Ok(response);
    }

    Err(last_error.unwrap_or(LlmError::RateLimited {
        retries: MAX_RETRIES,
    }))
}

/// The provider's error message when the body has one, else the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(stripped) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };
    let stripped = stripped.trim_start();
    stripped
        .strip_suffix("```")
        .map(str::trim)
        .unwrap_or(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Replying(&'static str);

    #[async_trait]
    impl ChatModel for Replying {
        fn provider(&self) -> &'static str {
            "replying"
        }

        async fn complete(&self, _: &str, _: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Days {
        days: Vec<String>,
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_unterminated() {
        let input = "```json\n{\"days\": []}";
        assert_eq!(strip_json_fences(input), "{\"days\": []}");
    }

    #[tokio::test]
    async fn test_call_json_parses_fenced_reply() {
        let model = Replying("```json\n{\"days\": [\"Monday\"]}\n```");
        let parsed: Days = call_json(&model, "prompt", "system").await.unwrap();
        assert_eq!(parsed.days, vec!["Monday"]);
    }

    #[tokio::test]
    async fn test_call_json_blank_reply_is_empty_content() {
        let err = call_json::<Days>(&Replying("  \n"), "prompt", "system")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[tokio::test]
    async fn test_call_json_prose_reply_is_parse_error() {
        let err = call_json::<Days>(&Replying("Sorry, I cannot help."), "prompt", "system")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }

    #[test]
    fn test_api_error_message_extraction() {
        let body = r#"{"type": "error", "error": {"type": "invalid_request_error", "message": "bad key"}}"#;
        assert_eq!(api_error_message(body.to_string()), "bad key");
        assert_eq!(api_error_message("upstream down".to_string()), "upstream down");
    }
}
