//! Triggering issue extraction from the workflow event payload.

use super::{Issue, IssueError};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// The subset of an `issues` webhook payload the triage needs.
#[derive(Debug, Deserialize)]
struct EventPayload {
    #[serde(default)]
    issue: Option<Issue>,
}

/// Loads the triggering issue from the event payload at `path`.
///
/// Returns `Ok(None)` when the payload has no `issue` object, e.g. when the
/// workflow was triggered by an unrelated event.
///
/// # Errors
///
/// Returns [`IssueError`] if the file can't be read or isn't valid JSON.
pub fn load_event_issue(path: &Path) -> Result<Option<Issue>, IssueError> {
    debug!(path = %path.display(), "Reading event payload");
    let contents = std::fs::read_to_string(path).map_err(|source| IssueError::EventIo {
        path: path.display().to_string(),
        source,
    })?;
    parse_event_issue(&contents).map_err(|source| IssueError::EventJson {
        path: path.display().to_string(),
        source,
    })
}

/// Parses the triggering issue out of a raw event payload.
pub(crate) fn parse_event_issue(contents: &str) -> Result<Option<Issue>, serde_json::Error> {
    let payload: EventPayload = serde_json::from_str(contents)?;
    Ok(payload.issue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::IssueState;

    #[test]
    fn parses_issue_from_payload() {
        let payload = r#"{
            "action": "opened",
            "issue": {
                "number": 42,
                "title": "Crash on startup",
                "body": "Stack trace attached",
                "state": "open",
                "user": { "login": "octocat" }
            },
            "repository": { "full_name": "octo/repo" }
        }"#;

        let issue = parse_event_issue(payload).unwrap().unwrap();
        assert_eq!(issue.number, 42);
        assert_eq!(issue.title, "Crash on startup");
        assert_eq!(issue.body.as_deref(), Some("Stack trace attached"));
        assert_eq!(issue.state, IssueState::Open);
    }

    #[test]
    fn null_body_is_absent() {
        let payload = r#"{ "issue": { "number": 7, "title": "No body", "body": null } }"#;
        let issue = parse_event_issue(payload).unwrap().unwrap();
        assert!(issue.body.is_none());
        assert_eq!(issue.body_or_empty(), "");
    }

    #[test]
    fn missing_issue_is_none() {
        let payload = r#"{ "action": "created", "comment": {} }"#;
        assert!(parse_event_issue(payload).unwrap().is_none());
    }

    #[test]
    fn invalid_json_is_error() {
        assert!(parse_event_issue("{ not json").is_err());
    }
}
