//! Candidate selection over embedding similarity.

use crate::embeddings::{similarity, Embedding};
use crate::issues::Issue;
use serde::Serialize;
use tracing::debug;

/// Default similarity floor; only scores strictly above it are kept.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.5;

/// Default maximum number of candidates passed to confirmation.
pub const DEFAULT_MAX_CANDIDATES: usize = 5;

/// Tuning for [`select_candidates`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionConfig {
    /// Minimum similarity, exclusive.
    pub threshold: f32,

    /// Maximum number of candidates returned.
    pub max_candidates: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

/// An existing issue similar enough to warrant a precise duplicate check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    /// The existing issue.
    pub issue: &'a Issue,

    /// Cosine similarity to the new issue.
    pub score: f32,
}

/// Ranks `existing` issues against the new issue's embedding.
///
/// Keeps issues scoring strictly above the threshold, sorted by descending
/// score, truncated to `max_candidates`. Equal scores keep fetch order. The
/// first element is always the most similar issue, which the confirmation
/// loop relies on for early stop.
///
/// `embeddings[i]` must be the embedding of `existing[i]`; extra entries on
/// either side are ignored.
#[must_use]
pub fn select_candidates<'a>(
    new_embedding: &[f32],
    existing: &'a [Issue],
    embeddings: &[Embedding],
    config: &SelectionConfig,
) -> Vec<Candidate<'a>> {
    let mut candidates: Vec<Candidate<'a>> = existing
        .iter()
        .zip(embeddings)
        .filter_map(|(issue, embedding)| {
            let score = similarity(new_embedding, embedding);
            debug!(issue_number = issue.number, score, "Compared with existing issue");
            (score > config.threshold).then_some(Candidate { issue, score })
        })
        .collect();

    // `sort_by` is stable, so ties stay in fetch order.
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates.truncate(config.max_candidates);
    candidates
}
