//! Core generation service types and trait definitions

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Stateless text generation capability - each call is independent (fresh context).
///
/// Implemented once per provider. The solver and verifier roles are two
/// instances of this same trait built from different configurations.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Submit one request and return the normalized final text.
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;

    /// Human readable identity, e.g. `anthropic/claude-sonnet-4-20250514`
    fn describe(&self) -> String;
}

#[async_trait]
impl<T: GenerationService + ?Sized> GenerationService for Arc<T> {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        (**self).generate(request).await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// A generation request - everything needed for one call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// System prompt (may be empty)
    pub system_prompt: String,

    /// Primary user prompt
    pub user_prompt: String,

    /// Extra user turns appended after the primary prompt, in order
    pub auxiliary_prompts: Vec<String>,

    /// Sampling temperature in [0, 1]
    pub temperature: f32,
}

impl GenerationRequest {
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            auxiliary_prompts: Vec::new(),
            temperature,
        }
    }

    /// Append auxiliary prompts (hints)
    pub fn with_auxiliary_prompts(mut self, prompts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.auxiliary_prompts.extend(prompts.into_iter().map(Into::into));
        self
    }
}

/// Errors that can occur during generation
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Missing API key: environment variable {env_var} not set")]
    MissingApiKey { env_var: String },

    #[error("Generation failed after {attempts} attempt(s): {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: Box<GenerationError>,
    },
}

impl GenerationError {
    /// Transient failures worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationError::RateLimited { .. } => true,
            GenerationError::Api { status, .. } => *status >= 500 || *status == 408,
            GenerationError::Network(_) => true,
            GenerationError::InvalidResponse(_) => true,
            GenerationError::MissingApiKey { .. } => false,
            GenerationError::Exhausted { .. } => false,
        }
    }

    /// Number of attempts made before this error surfaced
    pub fn attempts(&self) -> u32 {
        match self {
            GenerationError::Exhausted { attempts, .. } => *attempts,
            _ => 1,
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GenerationError::InvalidResponse(err.to_string())
        } else {
            GenerationError::Network(err.to_string())
        }
    }
}
