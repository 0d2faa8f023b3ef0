//! Anthropic API client implementation
//!
//! This module implements the GenerationService trait for the Anthropic (Claude) Messages API.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use super::client::{GenerationError, GenerationRequest, GenerationService};
use super::http::{build_http_client, require_text, send_json};
use super::registry::ProviderConfig;
use super::types::{SystemPlacement, build_conversation, join_segments, merge_consecutive};
use crate::error::Result;

/// Anthropic API version
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic API client
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    config: ProviderConfig,
}

impl AnthropicClient {
    /// Create a client with an explicit API key
    pub fn with_api_key(api_key: String, config: ProviderConfig) -> Result<Self> {
        let client = build_http_client(config.timeout)?;
        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    /// Build the request body for the Anthropic API
    fn build_request(&self, request: &GenerationRequest) -> Value {
        // Anthropic rejects consecutive turns with the same role
        let messages: Vec<Value> = merge_consecutive(build_conversation(request, SystemPlacement::Separate))
            .iter()
            .map(|m| json!({ "role": m.role.as_str(), "content": m.content }))
            .collect();

        let mut body = json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": request.temperature,
            "messages": messages
        });

        if !request.system_prompt.is_empty() {
            body["system"] = json!(request.system_prompt);
        }

        body
    }

    /// Keep only `text` blocks; `thinking` and `redacted_thinking` are dropped
    fn parse_response(&self, body: &Value) -> std::result::Result<String, GenerationError> {
        let blocks = body["content"]
            .as_array()
            .ok_or_else(|| GenerationError::InvalidResponse("missing content array".to_string()))?;

        let text = join_segments(
            blocks
                .iter()
                .filter(|b| b["type"].as_str() == Some("text"))
                .filter_map(|b| b["text"].as_str()),
        );

        require_text(text, "anthropic")
    }
}

#[async_trait]
impl GenerationService for AnthropicClient {
    async fn generate(&self, request: GenerationRequest) -> std::result::Result<String, GenerationError> {
        let body = self.build_request(&request);
        let response = send_json(
            self.client
                .post(format!("{}/messages", self.config.base_url))
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&body),
        )
        .await?;
        self.parse_response(&response)
    }

    fn describe(&self) -> String {
        format!("anthropic/{}", self.config.model)
    }
}

impl std::fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("model", &self.config.model)
            .field("max_tokens", &self.config.max_tokens)
            .finish()
    }
}
