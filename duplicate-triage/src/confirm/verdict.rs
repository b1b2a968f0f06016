//! Verdict type and model-reply parsing.

use serde::Serialize;

/// Leading token of a positive reply.
pub const POSITIVE_TOKEN: &str = "YES";

/// Leading token of a negative reply.
pub const NEGATIVE_TOKEN: &str = "NO";

/// Rationale prefix used when the model could not be consulted.
pub const ERROR_MARKER: &str = "[error]";

/// Outcome of a precise duplicate check for one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "rationale", rename_all = "snake_case")]
pub enum Verdict {
    /// The new issue duplicates the candidate.
    Positive(String),

    /// The new issue is not a duplicate, or the check failed.
    Negative(String),
}

impl Verdict {
    /// Returns true for [`Verdict::Positive`].
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Positive(_))
    }

    /// Returns the rationale text.
    #[must_use]
    pub fn rationale(&self) -> &str {
        match self {
            Self::Positive(rationale) | Self::Negative(rationale) => rationale,
        }
    }

    /// Builds the negative verdict recorded when the model call fails.
    #[must_use]
    pub fn failed(error: &impl std::fmt::Display) -> Self {
        Self::Negative(format!("{ERROR_MARKER} {error}"))
    }
}

/// Parses a model reply into a [`Verdict`].
///
/// The reply is positive if and only if, after trimming, it starts with
/// [`POSITIVE_TOKEN`] in any case. Everything else, including empty or
/// malformed replies, is negative.
///
/// The rationale is whatever follows the leading token with separator
/// punctuation removed; a bare token keeps the whole reply as rationale.
#[must_use]
pub fn parse_verdict(reply: &str) -> Verdict {
    let reply = reply.trim();
    if reply.is_empty() {
        return Verdict::Negative("empty response".to_string());
    }

    if starts_with_token(reply, POSITIVE_TOKEN) {
        return Verdict::Positive(rationale_after(reply, POSITIVE_TOKEN));
    }
    if starts_with_token(reply, NEGATIVE_TOKEN) {
        return Verdict::Negative(rationale_after(reply, NEGATIVE_TOKEN));
    }
    Verdict::Negative(reply.to_string())
}

fn starts_with_token(reply: &str, token: &str) -> bool {
    reply
        .get(..token.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(token))
}

fn rationale_after(reply: &str, token: &str) -> String {
    let rest = reply[token.len()..]
        .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '.' | ',' | ':' | ';' | '-' | '!'))
        .trim_end();
    if rest.is_empty() {
        reply.to_string()
    } else {
        rest.to_string()
    }
}
