//! Error types for Proofr
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

use crate::llm::GenerationError;

/// All error types that can occur in Proofr
#[derive(Debug, Error)]
pub enum ProofrError {
    /// Configuration could not be loaded or is inconsistent
    #[error("Config error: {0}")]
    Config(String),

    /// A generation backend could not be constructed
    #[error("Backend error: {0}")]
    Backend(String),

    /// A generation call failed after exhausting its retries
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Prompt template rendering failed
    #[error("Prompt error: {0}")]
    Prompt(String),
}

/// Result type alias for Proofr operations
pub type Result<T> = std::result::Result<T, ProofrError>;
