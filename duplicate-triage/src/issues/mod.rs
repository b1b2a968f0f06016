//! Issue retrieval and comment posting.
//!
//! This module defines the collaborator traits the triage pipeline reads
//! issues from and posts comments through, plus their GitHub implementation.

mod error;
mod event;
mod issue;

pub use error::IssueError;
pub use event::load_event_issue;
pub use issue::{Issue, IssueState};

use crate::config::Repository;
use async_trait::async_trait;
use octocrab::models::issues::Issue as GitHubIssue;
use octocrab::{params, Octocrab};
use std::path::PathBuf;
use tracing::{debug, info, info_span, warn, Instrument};

/// Maximum number of open issues fetched for comparison.
const MAX_OPEN_ISSUES: usize = 1000;

/// Results per page when listing issues.
const RESULTS_PER_PAGE: u8 = 100;

/// Source of the issue being triaged and of the issues it is compared to.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Returns the issue that triggered this run, if the event carries one.
    async fn triggering_issue(&self) -> Result<Option<Issue>, IssueError>;

    /// Lists open issues, skipping the one numbered `excluding`.
    async fn list_open_issues(&self, excluding: u64) -> Result<Vec<Issue>, IssueError>;
}

/// Destination for the duplicate announcement.
#[async_trait]
pub trait CommentSink: Send + Sync {
    /// Posts `body` as a comment on issue `issue_number`.
    async fn post_comment(&self, issue_number: u64, body: &str) -> Result<(), IssueError>;
}

/// GitHub-backed [`IssueSource`] and [`CommentSink`].
pub struct GitHubIssues {
    octocrab: Octocrab,
    repository: Repository,
    event_path: PathBuf,
}

impl GitHubIssues {
    /// Creates a GitHub collaborator for `repository`.
    ///
    /// # Arguments
    ///
    /// * `octocrab` - Authenticated GitHub client
    /// * `repository` - Repository the triggering issue belongs to
    /// * `event_path` - Path to the workflow event payload
    pub fn new(octocrab: Octocrab, repository: Repository, event_path: PathBuf) -> Self {
        Self {
            octocrab,
            repository,
            event_path,
        }
    }
}

#[async_trait]
impl IssueSource for GitHubIssues {
    async fn triggering_issue(&self) -> Result<Option<Issue>, IssueError> {
        load_event_issue(&self.event_path)
    }

    async fn list_open_issues(&self, excluding: u64) -> Result<Vec<Issue>, IssueError> {
        let span = info_span!("list_open_issues", repo = %self.repository);

        async {
            let mut page = self
                .octocrab
                .issues(&self.repository.owner, &self.repository.name)
                .list()
                .state(params::State::Open)
                .per_page(RESULTS_PER_PAGE)
                .send()
                .await?;

            let mut fetched = 0usize;
            let mut issues = Vec::new();
            loop {
                let items = std::mem::take(&mut page.items);
                fetched += items.len();
                issues.extend(items.into_iter().filter_map(|item| convert_issue(item, excluding)));

                if fetched >= MAX_OPEN_ISSUES {
                    warn!(max = MAX_OPEN_ISSUES, "Reached maximum open issue limit");
                    break;
                }

                match self.octocrab.get_page::<GitHubIssue>(&page.next).await? {
                    Some(next_page) => page = next_page,
                    None => break,
                }
            }

            debug!(fetched, kept = issues.len(), "Listed open issues");
            Ok(issues)
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl CommentSink for GitHubIssues {
    async fn post_comment(&self, issue_number: u64, body: &str) -> Result<(), IssueError> {
        let result = self
            .octocrab
            .issues(&self.repository.owner, &self.repository.name)
            .create_comment(issue_number, body)
            .await;

        match result {
            Ok(comment) => {
                info!(issue_number, url = %comment.html_url, "Comment posted");
                Ok(())
            }
            Err(e) if is_permission_denied(&e) => Err(IssueError::PermissionDenied {
                repository: self.repository.full_name(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

/// Converts a listed GitHub issue, dropping pull requests and the excluded issue.
fn convert_issue(item: GitHubIssue, excluding: u64) -> Option<Issue> {
    if item.pull_request.is_some() || item.number == excluding {
        return None;
    }
    let state = match item.state {
        octocrab::models::IssueState::Closed => IssueState::Closed,
        _ => IssueState::Open,
    };
    Some(Issue {
        number: item.number,
        title: item.title,
        body: item.body,
        state,
    })
}

/// Checks if a GitHub error indicates permission denied.
fn is_permission_denied(error: &octocrab::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    msg.contains("403") || msg.contains("forbidden") || msg.contains("permission")
}
