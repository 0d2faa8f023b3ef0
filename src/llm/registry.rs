//! Provider registry - maps a backend configuration to a ready service.
//!
//! Every service handed out by [`build_service`] is wrapped in a
//! [`RetryingService`], so callers only ever see exhausted failures.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::anthropic::AnthropicClient;
use super::client::{GenerationError, GenerationService};
use super::cohere::CohereClient;
use super::gemini::GeminiClient;
use super::openai::OpenAiClient;
use super::retry::{RetryPolicy, RetryingService};
use crate::error::{ProofrError, Result};

/// Supported text-generation providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "gemini")]
    Gemini,
    #[serde(rename = "cohere")]
    Cohere,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "openrouter")]
    OpenRouter,
}

impl Provider {
    pub const ALL: [Provider; 6] = [
        Provider::Anthropic,
        Provider::OpenAi,
        Provider::Gemini,
        Provider::Cohere,
        Provider::DeepSeek,
        Provider::OpenRouter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Anthropic => "anthropic",
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
            Provider::Cohere => "cohere",
            Provider::DeepSeek => "deepseek",
            Provider::OpenRouter => "openrouter",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Anthropic => "claude-sonnet-4-20250514",
            Provider::OpenAi => "gpt-4o",
            Provider::Gemini => "gemini-2.5-pro",
            Provider::Cohere => "command-a-03-2025",
            Provider::DeepSeek => "deepseek-reasoner",
            Provider::OpenRouter => "openai/gpt-4o",
        }
    }

    /// Environment variable holding the API key
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Gemini => "GOOGLE_API_KEY",
            Provider::Cohere => "COHERE_API_KEY",
            Provider::DeepSeek => "DEEPSEEK_API_KEY",
            Provider::OpenRouter => "OPENROUTER_API_KEY",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Anthropic => "https://api.anthropic.com/v1",
            Provider::OpenAi => "https://api.openai.com/v1",
            Provider::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            Provider::Cohere => "https://api.cohere.com/v2",
            Provider::DeepSeek => "https://api.deepseek.com/v1",
            Provider::OpenRouter => "https://openrouter.ai/api/v1",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ProofrError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        Provider::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == name)
            .ok_or_else(|| {
                let available: Vec<&str> = Provider::ALL.iter().map(|p| p.as_str()).collect();
                ProofrError::Backend(format!(
                    "Unknown backend: {}. Available backends: {}",
                    s,
                    available.join(", ")
                ))
            })
    }
}

/// Settings shared by all provider adapters
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
    pub base_url: String,
}

/// Per-role backend configuration (solver or verifier)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub provider: Provider,
    /// Model name; provider default when unset
    pub model: Option<String>,
    pub temperature: f32,
    pub retry_attempts: u32,
    pub retry_base_delay_ms: u64,
    pub max_tokens: u32,
    pub timeout_ms: u64,
    pub base_url: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Anthropic,
            model: None,
            temperature: 0.7,
            retry_attempts: 3,
            retry_base_delay_ms: 1000,
            max_tokens: 8192,
            timeout_ms: 300000,
            base_url: None,
        }
    }
}

impl BackendConfig {
    pub fn model_name(&self) -> &str {
        self.model.as_deref().unwrap_or_else(|| self.provider.default_model())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry_attempts, Duration::from_millis(self.retry_base_delay_ms))
    }

    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            model: self.model_name().to_string(),
            max_tokens: self.max_tokens,
            timeout: Duration::from_millis(self.timeout_ms),
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| self.provider.default_base_url().to_string())
                .trim_end_matches('/')
                .to_string(),
        }
    }

    /// `provider/model` label for logs and console output
    pub fn label(&self) -> String {
        format!("{}/{}", self.provider, self.model_name())
    }
}

/// Build a retrying generation service, reading the API key from the environment.
pub fn build_service(backend: &BackendConfig) -> Result<Arc<dyn GenerationService>> {
    let api_key = api_key_from_env(backend.provider.api_key_env())?;
    build_service_with_key(backend, api_key)
}

fn api_key_from_env(env_var: &str) -> Result<String> {
    std::env::var(env_var)
        .ok()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| {
            GenerationError::MissingApiKey {
                env_var: env_var.to_string(),
            }
            .into()
        })
}

/// Build a retrying generation service with an explicit API key.
pub fn build_service_with_key(backend: &BackendConfig, api_key: String) -> Result<Arc<dyn GenerationService>> {
    let config = backend.provider_config();
    let policy = backend.retry_policy();

    log::info!("Building {} backend (retry attempts: {})", backend.label(), policy.max_attempts);

    let service: Arc<dyn GenerationService> = match backend.provider {
        Provider::Anthropic => Arc::new(RetryingService::new(AnthropicClient::with_api_key(api_key, config)?, policy)),
        Provider::OpenAi => Arc::new(RetryingService::new(
            OpenAiClient::with_api_key(backend.provider, api_key, config)?.with_token_field("max_completion_tokens"),
            policy,
        )),
        Provider::DeepSeek | Provider::OpenRouter => Arc::new(RetryingService::new(
            OpenAiClient::with_api_key(backend.provider, api_key, config)?,
            policy,
        )),
        Provider::Gemini => Arc::new(RetryingService::new(GeminiClient::with_api_key(api_key, config)?, policy)),
        Provider::Cohere => Arc::new(RetryingService::new(CohereClient::with_api_key(api_key, config)?, policy)),
    };

    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("anthropic".parse::<Provider>().unwrap(), Provider::Anthropic);
        assert_eq!("OpenAI".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert_eq!(" gemini ".parse::<Provider>().unwrap(), Provider::Gemini);
        assert_eq!("openrouter".parse::<Provider>().unwrap(), Provider::OpenRouter);
    }

    #[test]
    fn test_provider_from_str_unknown_lists_available() {
        let err = "mistral".parse::<Provider>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Unknown backend: mistral"));
        assert!(msg.contains("cohere"));
        assert!(msg.contains("deepseek"));
    }

    #[test]
    fn test_provider_serde_names() {
        assert_eq!(serde_yaml::to_string(&Provider::OpenAi).unwrap().trim(), "openai");
        let p: Provider = serde_yaml::from_str("deepseek").unwrap();
        assert_eq!(p, Provider::DeepSeek);
    }

    #[test]
    fn test_backend_config_defaults() {
        let config = BackendConfig::default();
        assert_eq!(config.provider, Provider::Anthropic);
        assert_eq!(config.model_name(), Provider::Anthropic.default_model());
        assert_eq!(config.retry_policy(), RetryPolicy::new(3, Duration::from_secs(1)));
        assert_eq!(config.label(), format!("anthropic/{}", Provider::Anthropic.default_model()));
    }

    #[test]
    fn test_provider_config_base_url_override() {
        let config = BackendConfig {
            provider: Provider::OpenAi,
            model: Some("gpt-4.1".to_string()),
            base_url: Some("http://localhost:8000/v1/".to_string()),
            ..Default::default()
        };
        let pc = config.provider_config();
        assert_eq!(pc.model, "gpt-4.1");
        assert_eq!(pc.base_url, "http://localhost:8000/v1");
        assert_eq!(pc.timeout, Duration::from_millis(300000));
    }

    #[test]
    fn test_unset_api_key_is_missing_api_key() {
        let err = api_key_from_env("PROOFR_TEST_UNSET_API_KEY").unwrap_err();
        match err {
            ProofrError::Generation(GenerationError::MissingApiKey { env_var }) => {
                assert_eq!(env_var, "PROOFR_TEST_UNSET_API_KEY");
            }
            other => panic!("expected MissingApiKey, got {other:?}"),
        }
    }

    #[test]
    fn test_build_service_with_key_every_provider() {
        for provider in Provider::ALL {
            let config = BackendConfig {
                provider,
                ..Default::default()
            };
            let service = build_service_with_key(&config, "test-key".to_string()).unwrap();
            assert_eq!(service.describe(), config.label());
        }
    }
}
