//! Cohere v2 chat client

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use super::client::{GenerationError, GenerationRequest, GenerationService};
use super::http::{build_http_client, require_text, send_json};
use super::registry::ProviderConfig;
use super::types::{SystemPlacement, build_conversation, merge_consecutive};
use crate::error::Result;

pub struct CohereClient {
    client: Client,
    api_key: String,
    config: ProviderConfig,
}

impl CohereClient {
    pub fn with_api_key(api_key: String, config: ProviderConfig) -> Result<Self> {
        let client = build_http_client(config.timeout)?;
        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    fn build_request(&self, request: &GenerationRequest) -> Value {
        let messages: Vec<Value> = merge_consecutive(build_conversation(request, SystemPlacement::Inline))
            .iter()
            .map(|m| json!({ "role": m.role.as_str(), "content": m.content }))
            .collect();

        json!({
            "model": self.config.model,
            "messages": messages,
            "temperature": request.temperature,
            "max_tokens": self.config.max_tokens
        })
    }

    /// `text` blocks are concatenated, `thinking` blocks dropped
    fn parse_response(&self, body: &Value) -> std::result::Result<String, GenerationError> {
        let text = match &body["message"]["content"] {
            Value::Array(blocks) => blocks
                .iter()
                .filter(|b| b["type"].as_str() == Some("text"))
                .filter_map(|b| b["text"].as_str())
                .collect::<String>(),
            Value::String(s) => s.clone(),
            _ => {
                return Err(GenerationError::InvalidResponse(
                    "missing message content".to_string(),
                ));
            }
        };

        require_text(text, "cohere")
    }
}

#[async_trait]
impl GenerationService for CohereClient {
    async fn generate(&self, request: GenerationRequest) -> std::result::Result<String, GenerationError> {
        let body = self.build_request(&request);
        let response = send_json(
            self.client
                .post(format!("{}/chat", self.config.base_url))
                .bearer_auth(&self.api_key)
                .json(&body),
        )
        .await?;
        self.parse_response(&response)
    }

    fn describe(&self) -> String {
        format!("cohere/{}", self.config.model)
    }
}
