//! LLM error types.

use thiserror::Error;

/// Errors from model configuration and completion requests.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Failed to read LLM config file.
    #[error("Failed to read LLM config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse LLM config file.
    #[error("Failed to parse LLM config '{path}': {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// No API key for the selected provider.
    #[error("No API key configured for LLM provider '{provider}'")]
    MissingCredential { provider: String },

    /// Completion did not finish in time.
    #[error("LLM request timed out after {0} seconds")]
    Timeout(u64),

    /// Model error.
    #[error("Model error: {0}")]
    Model(#[from] serdes_ai_models::ModelError),

    /// Agent run error.
    #[error("Agent run error: {0}")]
    AgentRun(#[from] serdes_ai::agent::AgentRunError),
}
