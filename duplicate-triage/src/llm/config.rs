//! LLM provider configuration.

use crate::config::{require_value, validate_url, ConfigError};
use crate::llm::error::LlmError;
use serde::Deserialize;
use serdes_ai_models::{build_model_with_config, openrouter::OpenRouterModel, Model};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Default model when no config file is given.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default OpenAI-compatible endpoint when no config file is given.
pub const DEFAULT_BASE_URL: &str = "https://models.inference.ai.azure.com";

/// Model selection supplied on the command line.
///
/// Targets an OpenAI-compatible endpoint. A config file, when given,
/// replaces these values entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmSettings {
    /// Model name (e.g., "gpt-4o").
    pub model: String,
    /// OpenAI-compatible base URL.
    pub base_url: String,
    /// API key for the endpoint.
    pub api_key: Option<String>,
    /// Optional TOML config file selecting another provider.
    pub config_path: Option<PathBuf>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            config_path: None,
        }
    }
}

impl LlmSettings {
    /// Checks the command-line model selection is usable.
    ///
    /// The API key is checked when the model is resolved, since a config
    /// file may supply it instead.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        require_value("llm model", &self.model)?;
        validate_url(&self.base_url)
    }
}

/// Top-level structure for `config.toml` with a single `[llm]` section.
#[derive(Debug, Clone, Deserialize)]
struct LlmConfigFile {
    llm: LlmConfig,
}

/// Provider selection parsed from the `[llm]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct LlmConfig {
    /// Which provider serves the model.
    pub(crate) provider: Provider,
    /// Model name as the provider spells it.
    pub(crate) model: String,
    /// API key; falls back to the provider's usual environment variable.
    pub(crate) api_key: Option<String>,
    /// Base URL override (not used by OpenRouter).
    pub(crate) base_url: Option<String>,
    /// Request timeout in seconds (not used by OpenRouter).
    pub(crate) timeout_secs: Option<u64>,
}

/// Supported LLM providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Provider {
    OpenAi,
    OpenRouter,
    Anthropic,
    Gemini,
}

impl Provider {
    /// Provider id understood by `serdes-ai-models`.
    pub(crate) fn id(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::OpenRouter => "openrouter",
            Self::Anthropic => "anthropic",
            Self::Gemini => "gemini",
        }
    }

    /// Environment variable holding this provider's API key.
    fn api_key_env(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::OpenRouter => "OPENROUTER_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Gemini => "GOOGLE_API_KEY",
        }
    }
}

impl LlmConfig {
    /// Builds a model from the configuration.
    pub(crate) fn build_model(&self) -> Result<Arc<dyn Model>, LlmError> {
        let provider = self.provider.id();
        let api_key = self
            .api_key
            .clone()
            .or_else(|| std::env::var(self.provider.api_key_env()).ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LlmError::MissingCredential {
                provider: provider.to_string(),
            })?;

        if self.provider == Provider::OpenRouter {
            if self.base_url.is_some() || self.timeout_secs.is_some() {
                warn!("base-url and timeout-secs are ignored for OpenRouter");
            }
            return Ok(Arc::new(OpenRouterModel::new(&self.model, &api_key)));
        }

        let timeout = self.timeout_secs.map(core::time::Duration::from_secs);
        build_model_with_config(
            provider,
            &self.model,
            Some(api_key.as_str()),
            self.base_url.as_deref(),
            timeout,
        )
        .map_err(LlmError::Model)
    }
}

/// Resolves the model from the config file if one is set, otherwise from
/// the command-line settings.
///
/// # Errors
///
/// Returns [`LlmError::MissingCredential`] when no API key is available, so
/// a misconfigured run fails up front instead of rejecting every candidate.
pub(crate) fn resolve_model(settings: &LlmSettings) -> Result<Arc<dyn Model>, LlmError> {
    if let Some(path) = settings.config_path.as_deref() {
        let config = load_config(path)?;
        debug!(provider = config.provider.id(), model = %config.model, "Using LLM config file");
        return config.build_model();
    }

    let api_key = settings
        .api_key
        .as_deref()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| LlmError::MissingCredential {
            provider: Provider::OpenAi.id().to_string(),
        })?;

    build_model_with_config(
        Provider::OpenAi.id(),
        &settings.model,
        Some(api_key),
        Some(settings.base_url.as_str()),
        None,
    )
    .map_err(LlmError::Model)
}

/// Loads the LLM config file.
pub(crate) fn load_config(path: &Path) -> Result<LlmConfig, LlmError> {
    let contents = std::fs::read_to_string(path).map_err(|source| LlmError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let parsed: LlmConfigFile = toml::from_str(&contents).map_err(|source| LlmError::Toml {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parsed.llm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(temp: &TempDir, contents: &str) -> PathBuf {
        let path = temp.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn load_config_parses_openai() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            r#"
[llm]
provider = "openai"
model = "gpt-4o"
base-url = "https://api.openai.com/v1"
timeout-secs = 30
"#,
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.provider, Provider::OpenAi);
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url.as_deref(), Some("https://api.openai.com/v1"));
        assert_eq!(config.timeout_secs, Some(30));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn load_config_parses_other_providers() {
        let temp = TempDir::new().unwrap();
        for (name, expected) in [
            ("openrouter", Provider::OpenRouter),
            ("anthropic", Provider::Anthropic),
            ("gemini", Provider::Gemini),
        ] {
            let path = write_config(
                &temp,
                &format!("[llm]\nprovider = \"{name}\"\nmodel = \"some-model\"\napi-key = \"k\"\n"),
            );
            let config = load_config(&path).unwrap();
            assert_eq!(config.provider, expected);
            assert_eq!(config.provider.id(), name);
            assert_eq!(config.api_key.as_deref(), Some("k"));
        }
    }

    #[test]
    fn load_config_reports_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "not = [valid");
        let error = load_config(&path).unwrap_err();
        assert!(matches!(error, LlmError::Toml { .. }));
    }

    #[test]
    fn load_config_reports_unknown_provider() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "[llm]\nprovider = \"mystery\"\nmodel = \"m\"\n");
        assert!(matches!(load_config(&path), Err(LlmError::Toml { .. })));
    }

    #[test]
    fn load_config_reports_missing_file() {
        let temp = TempDir::new().unwrap();
        let error = load_config(&temp.path().join("missing.toml")).unwrap_err();
        assert!(matches!(error, LlmError::Io { .. }));
    }

    #[test]
    fn resolve_model_requires_api_key() {
        let settings = LlmSettings::default();
        let error = resolve_model(&settings).err().unwrap();
        assert!(matches!(
            error,
            LlmError::MissingCredential { ref provider } if provider == "openai"
        ));

        let blank = LlmSettings {
            api_key: Some("  ".to_string()),
            ..LlmSettings::default()
        };
        assert!(matches!(
            resolve_model(&blank),
            Err(LlmError::MissingCredential { .. })
        ));
    }

    #[test]
    fn config_file_without_key_falls_back_to_env_then_fails() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "[llm]\nprovider = \"anthropic\"\nmodel = \"claude\"\n");
        let settings = LlmSettings {
            config_path: Some(path),
            ..LlmSettings::default()
        };

        temp_env::with_var_unset("ANTHROPIC_API_KEY", || {
            let error = resolve_model(&settings).err().unwrap();
            assert!(matches!(
                error,
                LlmError::MissingCredential { ref provider } if provider == "anthropic"
            ));
        });
    }

    #[test]
    fn settings_validation() {
        assert!(LlmSettings::default().validate().is_ok());

        let bad_url = LlmSettings {
            base_url: "models.example".to_string(),
            ..LlmSettings::default()
        };
        assert!(matches!(
            bad_url.validate(),
            Err(ConfigError::InvalidUrl { .. })
        ));

        let no_model = LlmSettings {
            model: String::new(),
            ..LlmSettings::default()
        };
        assert!(matches!(
            no_model.validate(),
            Err(ConfigError::MissingValue { .. })
        ));
    }
}
