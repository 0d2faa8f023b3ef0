//! Conversation types shared by the provider adapters
//!
//! Providers differ in how they want a conversation shaped: some take the
//! system prompt out of band, some reject two consecutive turns with the same
//! role, some interleave reasoning with the final answer. The helpers here
//! normalize both directions so the core never sees those differences.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::client::GenerationRequest;

/// Role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Whether the system prompt travels inside the message list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemPlacement {
    /// As a leading `system` message (OpenAI, Cohere)
    Inline,
    /// In a dedicated request field (Anthropic, Gemini)
    Separate,
}

/// Build the message list for a request.
///
/// The primary user prompt comes first, each auxiliary prompt follows as
/// its own user turn. Empty prompts are skipped.
pub fn build_conversation(request: &GenerationRequest, placement: SystemPlacement) -> Vec<Message> {
    let mut messages = Vec::with_capacity(2 + request.auxiliary_prompts.len());

    if placement == SystemPlacement::Inline && !request.system_prompt.trim().is_empty() {
        messages.push(Message::system(&request.system_prompt));
    }

    messages.push(Message::user(&request.user_prompt));

    for prompt in &request.auxiliary_prompts {
        if !prompt.trim().is_empty() {
            messages.push(Message::user(prompt));
        }
    }

    messages
}

/// Collapse consecutive turns with the same role into one, joined by a blank line.
pub fn merge_consecutive(messages: Vec<Message>) -> Vec<Message> {
    let mut merged: Vec<Message> = Vec::with_capacity(messages.len());
    for message in messages {
        match merged.last_mut() {
            Some(last) if last.role == message.role => {
                last.content.push_str("\n\n");
                last.content.push_str(&message.content);
            }
            _ => merged.push(message),
        }
    }
    merged
}

static THINK_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<(think|thinking|reasoning)>.*?</(think|thinking|reasoning)>").unwrap());

/// Remove inline reasoning segments (`<think>...</think>` and friends)
/// that some models emit ahead of the final answer.
pub fn strip_reasoning(text: &str) -> String {
    THINK_BLOCK.replace_all(text, "").trim().to_string()
}

/// Join final-answer segments in order, skipping empty ones.
pub fn join_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for segment in segments {
        if segment.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(segment);
    }
    out
}
