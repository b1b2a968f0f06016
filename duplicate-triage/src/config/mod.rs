//! Configuration types and validation.
//!
//! Values arrive from the CLI (flags with environment fallbacks) and are
//! checked once at startup; anything rejected here aborts the run before any
//! GitHub, embedding or LLM call is made.

mod error;
mod repository;

pub use error::ConfigError;
pub use repository::Repository;

use url::Url;

/// Ensures a required string value is present and non-blank.
pub(crate) fn require_value(name: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingValue { name });
    }
    Ok(())
}

/// Ensures an endpoint parses as an absolute URL.
pub(crate) fn validate_url(value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|source| ConfigError::InvalidUrl {
            value: value.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_value_rejects_blank() {
        assert!(require_value("token", "ghp_abc").is_ok());
        assert!(matches!(
            require_value("token", "   "),
            Err(ConfigError::MissingValue { name: "token" })
        ));
    }

    #[test]
    fn validate_url_reports_parse_errors() {
        assert!(validate_url("https://models.inference.ai.azure.com").is_ok());
        assert!(matches!(
            validate_url("not a url"),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }
}
