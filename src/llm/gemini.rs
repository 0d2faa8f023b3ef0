//! Google Gemini `generateContent` client

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use super::client::{GenerationError, GenerationRequest, GenerationService};
use super::http::{build_http_client, require_text, send_json};
use super::registry::ProviderConfig;
use super::types::{Role, SystemPlacement, build_conversation, join_segments, merge_consecutive};
use crate::error::Result;

pub struct GeminiClient {
    client: Client,
    api_key: String,
    config: ProviderConfig,
}

impl GeminiClient {
    pub fn with_api_key(api_key: String, config: ProviderConfig) -> Result<Self> {
        let client = build_http_client(config.timeout)?;
        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    fn build_request(&self, request: &GenerationRequest) -> Value {
        let contents: Vec<Value> = merge_consecutive(build_conversation(request, SystemPlacement::Separate))
            .iter()
            .map(|m| {
                let role = match m.role {
                    Role::Assistant => "model",
                    _ => "user",
                };
                json!({ "role": role, "parts": [ { "text": m.content } ] })
            })
            .collect();

        let mut body = json!({
            "contents": contents,
            "generationConfig": {
                "temperature": request.temperature,
                "maxOutputTokens": self.config.max_tokens
            }
        });

        if !request.system_prompt.is_empty() {
            body["systemInstruction"] = json!({ "parts": [ { "text": request.system_prompt } ] });
        }

        body
    }

    /// Parts flagged `thought: true` are reasoning, not the answer
    fn parse_response(&self, body: &Value) -> std::result::Result<String, GenerationError> {
        let parts = body["candidates"]
            .as_array()
            .and_then(|c| c.first())
            .and_then(|c| c["content"]["parts"].as_array())
            .ok_or_else(|| GenerationError::InvalidResponse("No candidates in response".to_string()))?;

        let text = join_segments(
            parts
                .iter()
                .filter(|p| !p["thought"].as_bool().unwrap_or(false))
                .filter_map(|p| p["text"].as_str()),
        );

        require_text(text, "gemini")
    }
}

#[async_trait]
impl GenerationService for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> std::result::Result<String, GenerationError> {
        let body = self.build_request(&request);
        let response = send_json(
            self.client
                .post(format!("{}/models/{}:generateContent", self.config.base_url, self.config.model))
                .header("x-goog-api-key", &self.api_key)
                .json(&body),
        )
        .await?;
        self.parse_response(&response)
    }

    fn describe(&self) -> String {
        format!("gemini/{}", self.config.model)
    }
}
