//! Comparable text projection of an issue.

use crate::issues::Issue;

/// Reduces an issue to the single string fed to the embedding model.
///
/// Title and body are joined by a newline. An absent or empty body yields the
/// title alone. Markup is passed through untouched.
#[must_use]
pub fn comparable_text(issue: &Issue) -> String {
    match issue.body.as_deref() {
        Some(body) if !body.is_empty() => format!("{}\n{}", issue.title, body),
        _ => issue.title.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_title_and_body() {
        let issue = Issue::new(1, "Crash on save", Some("Happens with **large** files".into()));
        assert_eq!(
            comparable_text(&issue),
            "Crash on save\nHappens with **large** files"
        );
    }

    #[test]
    fn absent_body_yields_title() {
        let issue = Issue::new(2, "Crash on save", None);
        let text = comparable_text(&issue);
        assert_eq!(text, "Crash on save");
        assert!(!text.contains("None"));
        assert!(!text.contains("null"));
    }

    #[test]
    fn empty_body_yields_title() {
        let issue = Issue::new(3, "Crash on save", Some(String::new()));
        assert_eq!(comparable_text(&issue), "Crash on save");
    }
}
