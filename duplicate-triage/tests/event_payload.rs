use std::path::PathBuf;

use duplicate_triage::{comparable_text, load_event_issue, IssueError, IssueState};

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/events")
}

#[test]
fn load_issue_from_opened_event() {
    let issue = load_event_issue(&fixtures_root().join("issue-opened.json"))
        .unwrap()
        .unwrap();

    assert_eq!(issue.number, 57);
    assert_eq!(issue.title, "Editor crashes when saving a large file");
    assert_eq!(issue.state, IssueState::Open);
    assert!(issue
        .body
        .as_deref()
        .is_some_and(|body| body.ends_with("Version: 1.4.2")));
}

#[test]
fn null_body_normalizes_to_title() {
    let issue = load_event_issue(&fixtures_root().join("issue-opened-no-body.json"))
        .unwrap()
        .unwrap();

    assert!(issue.body.is_none());
    assert_eq!(comparable_text(&issue), "Dark mode toggle does nothing");
}

#[test]
fn event_without_issue_yields_none() {
    let issue = load_event_issue(&fixtures_root().join("push.json")).unwrap();
    assert!(issue.is_none());
}

#[test]
fn missing_event_file_is_error() {
    let result = load_event_issue(&fixtures_root().join("does-not-exist.json"));
    assert!(matches!(result, Err(IssueError::EventIo { .. })));
}
