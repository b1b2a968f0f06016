//! Triage error types.

/// Fatal errors that abort a triage run before any comment is posted.
///
/// Recoverable failures (listing open issues, a single model call, posting
/// the comment) never surface here; they are recorded in the
/// [`TriageSummary`](crate::TriageSummary) instead.
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    /// Invalid or missing configuration.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Language model could not be configured.
    #[error(transparent)]
    Llm(#[from] crate::llm::LlmError),

    /// Comment template could not be loaded.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Event payload could not be read.
    #[error(transparent)]
    Event(#[from] crate::issues::IssueError),

    /// The event payload carries no issue.
    #[error("No issue found in event payload")]
    MissingIssue,

    /// Embedding model unavailable.
    #[error(transparent)]
    Embedding(#[from] crate::embeddings::EmbeddingError),
}
