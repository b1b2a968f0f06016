//! Issue source and comment sink error types.

use thiserror::Error;

/// Errors that can occur while reading or writing issues.
#[derive(Debug, Error)]
pub enum IssueError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// Permission denied.
    #[error("Permission denied: no write access to {repository}")]
    PermissionDenied { repository: String },

    /// Failed to read the event payload file.
    #[error("Failed to read event payload '{path}': {source}")]
    EventIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Event payload is not valid JSON or has a malformed `issue` object.
    #[error("Failed to parse event payload '{path}': {source}")]
    EventJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
