//! Triage summary types.

use super::CommentStatus;
use serde::Serialize;

/// A confirmed duplicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateMatch {
    /// Number of the existing issue.
    pub number: u64,

    /// Title of the existing issue.
    pub title: String,

    /// Cosine similarity to the new issue.
    pub score: f32,

    /// Model rationale.
    pub rationale: String,
}

/// Summary of a complete triage run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TriageSummary {
    /// Number of the triggering issue.
    pub issue_number: u64,

    /// Number of open issues compared against.
    pub open_issues: usize,

    /// Whether listing open issues failed and the run continued without them.
    pub fetch_degraded: bool,

    /// Number of candidates above the similarity threshold.
    pub candidates: usize,

    /// Number of language model confirmations performed.
    pub confirmations: usize,

    /// The confirmed duplicate, if any.
    pub duplicate: Option<DuplicateMatch>,

    /// Outcome of the announcement.
    pub comment: CommentStatus,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl TriageSummary {
    /// Creates a new empty summary for `issue_number`.
    #[must_use]
    pub fn new(issue_number: u64, dry_run: bool) -> Self {
        Self {
            issue_number,
            dry_run,
            ..Default::default()
        }
    }

    /// Returns true if a duplicate was confirmed.
    #[must_use]
    pub fn found_duplicate(&self) -> bool {
        self.duplicate.is_some()
    }

    /// Returns true if the announcement was rendered but could not be posted.
    #[must_use]
    pub fn comment_failed(&self) -> bool {
        matches!(self.comment, CommentStatus::Failed { .. })
    }
}
