//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while validating run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required value was empty.
    #[error("Missing required configuration value: {name}")]
    MissingValue { name: &'static str },

    /// Repository identifier is not in `owner/name` form.
    #[error("Invalid repository '{value}': expected 'owner/name'")]
    InvalidRepository { value: String },

    /// Similarity threshold is not a usable cosine score.
    #[error("Invalid similarity threshold {value}: must be finite and within -1.0..=1.0")]
    InvalidThreshold { value: f32 },

    /// Maximum candidate count of zero.
    #[error("Invalid max candidates: must be at least 1")]
    InvalidMaxCandidates,

    /// A configured endpoint is not a valid URL.
    #[error("Invalid URL '{value}': {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}
