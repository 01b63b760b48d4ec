use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Which remote generator, if any, the planner chain should try first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiService {
    Anthropic,
    OpenAi,
    /// Rule-based planning only.
    Fallback,
}

impl AiService {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "anthropic" => Ok(Self::Anthropic),
            "openai" => Ok(Self::OpenAi),
            "fallback" => Ok(Self::Fallback),
            other => bail!("AI_SERVICE must be 'anthropic', 'openai' or 'fallback', got '{other}'"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
            Self::Fallback => "fallback",
        }
    }

    /// Environment variable holding this service's API key.
    pub fn key_var(self) -> Option<&'static str> {
        match self {
            Self::Anthropic => Some("ANTHROPIC_API_KEY"),
            Self::OpenAi => Some("OPENAI_API_KEY"),
            Self::Fallback => None,
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup aborts if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub ai_service: AiService,
    /// `None` when unset or blank.
    pub anthropic_api_key: Option<String>,
    /// `None` when unset or blank.
    pub openai_api_key: Option<String>,
    pub llm_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let ai_service = AiService::parse(&lookup("AI_SERVICE").unwrap_or_default())?;

        let timeout_secs = lookup("LLM_TIMEOUT_SECS")
            .unwrap_or_else(|| "60".to_string())
            .parse::<u64>()
            .context("LLM_TIMEOUT_SECS must be a positive integer")?;
        if timeout_secs == 0 {
            bail!("LLM_TIMEOUT_SECS must be a positive integer");
        }

        Ok(Config {
            ai_service,
            anthropic_api_key: non_blank(lookup("ANTHROPIC_API_KEY")),
            openai_api_key: non_blank(lookup("OPENAI_API_KEY")),
            llm_timeout: Duration::from_secs(timeout_secs),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// The API key to use for remote generation, if remote generation is on.
    pub fn remote_api_key(&self) -> Option<&str> {
        match self.ai_service {
            AiService::Anthropic => self.anthropic_api_key.as_deref(),
            AiService::OpenAi => self.openai_api_key.as_deref(),
            AiService::Fallback => None,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.ai_service, AiService::Anthropic);
        assert_eq!(config.anthropic_api_key, None);
        assert_eq!(config.llm_timeout, Duration::from_secs(60));
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.remote_api_key(), None);
    }

    #[test]
    fn test_remote_key_follows_service() {
        let config = load(&[("ANTHROPIC_API_KEY", "sk-test")]).unwrap();
        assert_eq!(config.remote_api_key(), Some("sk-test"));

        let config = load(&[("AI_SERVICE", "Fallback"), ("ANTHROPIC_API_KEY", "sk-test")]).unwrap();
        assert_eq!(config.ai_service, AiService::Fallback);
        assert_eq!(config.remote_api_key(), None);
    }

    #[test]
    fn test_openai_service_uses_openai_key() {
        let config = load(&[
            ("AI_SERVICE", "openai"),
            ("ANTHROPIC_API_KEY", "sk-ant"),
            ("OPENAI_API_KEY", "sk-oai"),
        ])
        .unwrap();
        assert_eq!(config.ai_service, AiService::OpenAi);
        assert_eq!(config.remote_api_key(), Some("sk-oai"));
        assert_eq!(config.ai_service.key_var(), Some("OPENAI_API_KEY"));

        let config = load(&[("AI_SERVICE", "OpenAI"), ("ANTHROPIC_API_KEY", "sk-ant")]).unwrap();
        assert_eq!(config.remote_api_key(), None);
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let config = load(&[("ANTHROPIC_API_KEY", "   ")]).unwrap();
        assert_eq!(config.anthropic_api_key, None);
    }

    #[test]
    fn test_rejects_malformed_values() {
        assert!(load(&[("AI_SERVICE", "gemini")]).is_err());
        assert!(load(&[("LLM_TIMEOUT_SECS", "0")]).is_err());
        assert!(load(&[("LLM_TIMEOUT_SECS", "soon")]).is_err());
        assert!(load(&[("PORT", "99999")]).is_err());
    }
}
