//! Template renderer.

use super::TemplateError;
use handlebars::{no_escape, Handlebars};
use serde::Serialize;
use std::path::Path;

/// Name the comment template is registered under.
const COMMENT_TEMPLATE: &str = "comment";

/// Built-in duplicate announcement.
pub const DEFAULT_COMMENT_TEMPLATE: &str = "It looks like this issue might be a duplicate of #{{duplicate_number}}.

Reason: {{rationale}}

(Automated by Hybrid Semantic Triage)";

/// Values available to the comment template.
#[derive(Debug, Clone, Serialize)]
pub struct CommentContext<'a> {
    /// The triggering issue.
    pub issue_number: u64,
    /// The confirmed duplicate.
    pub duplicate_number: u64,
    /// Title of the confirmed duplicate.
    pub duplicate_title: &'a str,
    /// Model rationale for the verdict.
    pub rationale: &'a str,
    /// Similarity score, formatted to two decimals.
    pub score: String,
}

impl CommentContext<'static> {
    /// Placeholder values used to check a template at load time.
    fn placeholder() -> Self {
        Self {
            issue_number: 2,
            duplicate_number: 1,
            duplicate_title: "Existing issue",
            rationale: "Same problem.",
            score: "1.00".to_string(),
        }
    }
}

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (for markdown output)
/// - Strict mode (catches missing variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs
}

/// Renders the duplicate announcement comment.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Creates a renderer using [`DEFAULT_COMMENT_TEMPLATE`].
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in template fails to register.
    pub fn new() -> Result<Self, TemplateError> {
        Self::with_comment_template(DEFAULT_COMMENT_TEMPLATE)
    }

    /// Creates a renderer using a custom comment template.
    ///
    /// The template is rendered once against placeholder values, so a
    /// reference to an unknown variable fails here rather than after a
    /// duplicate has been confirmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the template has invalid Handlebars syntax or
    /// references a variable that [`CommentContext`] does not provide.
    pub fn with_comment_template(template: &str) -> Result<Self, TemplateError> {
        let mut handlebars = create_handlebars_registry();
        handlebars.register_template_string(COMMENT_TEMPLATE, template)?;
        let renderer = Self { handlebars };
        renderer.render_comment(&CommentContext::placeholder())?;
        Ok(renderer)
    }

    /// Creates a renderer using the comment template stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or has invalid syntax.
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let template = std::fs::read_to_string(path).map_err(|source| TemplateError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        Self::with_comment_template(&template)
    }

    /// Renders the comment for a confirmed duplicate.
    ///
    /// # Errors
    ///
    /// Returns an error if the template references an unknown variable.
    pub fn render_comment(&self, context: &CommentContext<'_>) -> Result<String, TemplateError> {
        Ok(self.handlebars.render(COMMENT_TEMPLATE, context)?)
    }
}
