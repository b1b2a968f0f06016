//! Language model access through serdes-ai.

mod config;
mod error;

pub use config::{LlmSettings, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::LlmError;

use async_trait::async_trait;
use serdes_ai::agent::{Agent, AgentBuilder};
use serdes_ai_models::Model;
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Sampling temperature for every completion; verdicts must be reproducible.
const TEMPERATURE: f64 = 0.0;

/// Upper bound on a single completion request.
const LLM_TIMEOUT_SECS: u64 = 120;

/// External language model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Sends `prompt` and returns the model's text reply.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// [`LanguageModel`] backed by a serdes-ai agent without tools.
pub struct SerdesAiModel {
    agent: Agent<(), String>,
}

impl SerdesAiModel {
    /// Wraps an already-built model.
    pub fn new(model: Arc<dyn Model>) -> Self {
        let agent = AgentBuilder::from_arc(model)
            .system_prompt(SYSTEM_PROMPT.to_string())
            .temperature(TEMPERATURE)
            .build();
        Self { agent }
    }

    /// Resolves the model from a config file or the command-line settings.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError`] if the config file is unreadable or no API key
    /// is available.
    pub fn from_settings(settings: &LlmSettings) -> Result<Self, LlmError> {
        config::resolve_model(settings).map(Self::new)
    }
}

#[async_trait]
impl LanguageModel for SerdesAiModel {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let result = tokio::time::timeout(
            tokio::time::Duration::from_secs(LLM_TIMEOUT_SECS),
            self.agent.run(prompt.to_string(), ()),
        )
        .await
        .map_err(|_| LlmError::Timeout(LLM_TIMEOUT_SECS))??;
        Ok(result.output)
    }
}
