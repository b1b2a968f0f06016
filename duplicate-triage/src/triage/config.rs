//! Triage configuration.

use crate::candidates::SelectionConfig;
use crate::config::{require_value, ConfigError, Repository};
use crate::llm::LlmSettings;
use std::path::{Path, PathBuf};

/// Configuration for a triage run, built once at startup.
#[derive(Debug, Clone)]
pub struct TriageConfig {
    /// GitHub token used for API calls.
    token: String,
    /// Repository the triggering issue belongs to.
    repository: Repository,
    /// Path to the workflow event payload.
    event_path: PathBuf,
    /// Similarity floor and candidate limit.
    selection: SelectionConfig,
    /// Language model selection.
    llm: LlmSettings,
    /// Optional custom comment template.
    comment_template_path: Option<PathBuf>,
    /// Optional directory for downloaded embedding model files.
    model_cache_dir: Option<PathBuf>,
    /// Whether to log the comment instead of posting it.
    dry_run: bool,
}

impl TriageConfig {
    /// Creates a configuration with default selection and LLM settings.
    pub fn new(token: String, repository: Repository, event_path: PathBuf) -> Self {
        Self {
            token,
            repository,
            event_path,
            selection: SelectionConfig::default(),
            llm: LlmSettings::default(),
            comment_template_path: None,
            model_cache_dir: None,
            dry_run: false,
        }
    }

    /// Sets the similarity floor and candidate limit.
    pub fn with_selection(mut self, selection: SelectionConfig) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the language model selection.
    pub fn with_llm(mut self, llm: LlmSettings) -> Self {
        self.llm = llm;
        self
    }

    /// Sets a custom comment template path.
    pub fn with_comment_template_path(mut self, path: PathBuf) -> Self {
        self.comment_template_path = Some(path);
        self
    }

    /// Sets the directory embedding model files are downloaded to.
    pub fn with_model_cache_dir(mut self, path: PathBuf) -> Self {
        self.model_cache_dir = Some(path);
        self
    }

    /// Enables or disables dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Checks every value before any external call is made.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] describing the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_value("token", &self.token)?;
        require_value("event path", &self.event_path.to_string_lossy())?;

        let threshold = self.selection.threshold;
        if !threshold.is_finite() || !(-1.0..=1.0).contains(&threshold) {
            return Err(ConfigError::InvalidThreshold { value: threshold });
        }
        if self.selection.max_candidates == 0 {
            return Err(ConfigError::InvalidMaxCandidates);
        }

        self.llm.validate()
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the repository.
    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// Returns the event payload path.
    pub fn event_path(&self) -> &Path {
        &self.event_path
    }

    /// Returns the candidate selection settings.
    pub fn selection(&self) -> &SelectionConfig {
        &self.selection
    }

    /// Returns the language model selection.
    pub fn llm(&self) -> &LlmSettings {
        &self.llm
    }

    /// Returns the custom comment template path, if any.
    pub fn comment_template_path(&self) -> Option<&Path> {
        self.comment_template_path.as_deref()
    }

    /// Returns the embedding model cache directory, if any.
    pub fn model_cache_dir(&self) -> Option<&Path> {
        self.model_cache_dir.as_deref()
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}
