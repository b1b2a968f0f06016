//! Comment status types.

use serde::Serialize;

/// Status of the duplicate announcement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommentStatus {
    /// No duplicate was confirmed, so nothing was posted.
    #[default]
    NotNeeded,

    /// Comment posted on the triggering issue.
    Posted,

    /// Comment deliberately not posted.
    Skipped {
        /// Reason for skipping.
        reason: String,
    },

    /// Comment could not be rendered or posted.
    Failed {
        /// Error message.
        error: String,
    },
}

impl CommentStatus {
    /// Returns the status as a lowercase string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotNeeded => "not needed",
            Self::Posted => "posted",
            Self::Skipped { .. } => "skipped",
            Self::Failed { .. } => "failed",
        }
    }
}
