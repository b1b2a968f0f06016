//! Issue data as seen by the triage pipeline.

use serde::{Deserialize, Serialize};

/// Open/closed state of an issue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    /// Issue is open.
    #[default]
    Open,

    /// Issue is closed.
    Closed,
}

/// A tracker issue, immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number, unique within the repository.
    pub number: u64,

    /// Issue title.
    pub title: String,

    /// Issue body, if one was written.
    #[serde(default)]
    pub body: Option<String>,

    /// Open/closed state.
    #[serde(default)]
    pub state: IssueState,
}

impl Issue {
    /// Creates an open issue.
    #[must_use]
    pub fn new(number: u64, title: impl Into<String>, body: Option<String>) -> Self {
        Self {
            number,
            title: title.into(),
            body,
            state: IssueState::Open,
        }
    }

    /// Returns the body, or an empty string when absent.
    #[must_use]
    pub fn body_or_empty(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}
