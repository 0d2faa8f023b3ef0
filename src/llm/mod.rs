//! Generation Service Layer - provider adapters behind one trait
//!
//! This module provides:
//! - GenerationService trait and request/error types
//! - RetryingService for exponential backoff
//! - Provider adapters (Anthropic, OpenAI-compatible, Gemini, Cohere)
//! - Conversation normalization helpers
//! - A registry that builds a retrying service from a BackendConfig

pub mod anthropic;
pub mod client;
pub mod cohere;
pub mod gemini;
mod http;
pub mod mock;
pub mod openai;
pub mod registry;
pub mod retry;
pub mod types;

pub use client::{GenerationError, GenerationRequest, GenerationService};
pub use mock::ScriptedService;
pub use registry::{BackendConfig, Provider, ProviderConfig, build_service, build_service_with_key};
pub use retry::{RetryPolicy, RetryingService};
pub use types::{Message, Role};
