//! Shared HTTP plumbing for the provider adapters.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;

use super::client::GenerationError;
use crate::error::{ProofrError, Result};

/// Build a reqwest client with the given request timeout
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProofrError::Backend(format!("Failed to create HTTP client: {}", e)))
}

/// Send a prepared JSON request and classify the failure modes.
pub async fn send_json(request: RequestBuilder) -> std::result::Result<Value, GenerationError> {
    let response = request.send().await?;
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);
        return Err(GenerationError::RateLimited { retry_after });
    }

    if !status.is_success() {
        let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        return Err(GenerationError::Api {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| GenerationError::InvalidResponse(format!("Failed to parse response body: {}", e)))
}

/// Fail with `InvalidResponse` when a provider returned no usable text
pub fn require_text(text: String, provider: &str) -> std::result::Result<String, GenerationError> {
    if text.trim().is_empty() {
        Err(GenerationError::InvalidResponse(format!("{} returned no text content", provider)))
    } else {
        Ok(text)
    }
}
