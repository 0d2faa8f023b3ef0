//! OpenAI-compatible chat completions client
//!
//! Serves OpenAI itself plus the DeepSeek and OpenRouter endpoints, which
//! speak the same wire format from a different base URL.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use super::client::{GenerationError, GenerationRequest, GenerationService};
use super::http::{build_http_client, require_text, send_json};
use super::registry::{Provider, ProviderConfig};
use super::types::{SystemPlacement, build_conversation, merge_consecutive, strip_reasoning};
use crate::error::Result;

pub struct OpenAiClient {
    client: Client,
    provider: Provider,
    api_key: String,
    config: ProviderConfig,
    token_field: &'static str,
}

impl OpenAiClient {
    pub fn with_api_key(provider: Provider, api_key: String, config: ProviderConfig) -> Result<Self> {
        let client = build_http_client(config.timeout)?;
        Ok(Self {
            client,
            provider,
            api_key,
            config,
            token_field: "max_tokens",
        })
    }

    /// Name of the output-token limit field (`max_completion_tokens` on api.openai.com)
    pub fn with_token_field(mut self, field: &'static str) -> Self {
        self.token_field = field;
        self
    }

    fn build_request(&self, request: &GenerationRequest) -> Value {
        let messages: Vec<Value> = merge_consecutive(build_conversation(request, SystemPlacement::Inline))
            .iter()
            .map(|m| json!({ "role": m.role.as_str(), "content": m.content }))
            .collect();

        let mut body = json!({
            "model": self.config.model,
            "messages": messages,
            "temperature": request.temperature,
        });
        body[self.token_field] = json!(self.config.max_tokens);
        body
    }

    /// Final answer only: `reasoning_content` and inline think tags are discarded
    fn parse_response(&self, body: &Value) -> std::result::Result<String, GenerationError> {
        let choice = body["choices"]
            .as_array()
            .and_then(|c| c.first())
            .ok_or_else(|| GenerationError::InvalidResponse("No choices in response".to_string()))?;

        let content = match &choice["message"]["content"] {
            Value::String(s) => s.clone(),
            // Some compatible servers return content parts
            Value::Array(parts) => parts
                .iter()
                .filter(|p| p["type"].as_str() == Some("text"))
                .filter_map(|p| p["text"].as_str())
                .collect::<Vec<_>>()
                .join("\n"),
            _ => String::new(),
        };

        require_text(strip_reasoning(&content), self.provider.as_str())
    }
}

#[async_trait]
impl GenerationService for OpenAiClient {
    async fn generate(&self, request: GenerationRequest) -> std::result::Result<String, GenerationError> {
        let body = self.build_request(&request);
        let response = send_json(
            self.client
                .post(format!("{}/chat/completions", self.config.base_url))
                .bearer_auth(&self.api_key)
                .json(&body),
        )
        .await?;
        self.parse_response(&response)
    }

    fn describe(&self) -> String {
        format!("{}/{}", self.provider, self.config.model)
    }
}
