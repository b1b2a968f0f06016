//! Precise duplicate confirmation for a single candidate.

mod verdict;

pub use verdict::{parse_verdict, Verdict, ERROR_MARKER, NEGATIVE_TOKEN, POSITIVE_TOKEN};

use crate::issues::Issue;
use crate::llm::LanguageModel;
use tracing::{debug, info_span, warn, Instrument};

/// Asks a language model whether a new issue duplicates one candidate.
pub struct DuplicateConfirmer<'a> {
    model: &'a dyn LanguageModel,
}

impl<'a> DuplicateConfirmer<'a> {
    /// Creates a confirmer using `model`.
    pub fn new(model: &'a dyn LanguageModel) -> Self {
        Self { model }
    }

    /// Produces a verdict for `issue` against `candidate`.
    ///
    /// Never fails: a model or transport error yields a negative verdict whose
    /// rationale starts with [`ERROR_MARKER`], so the caller can move on to
    /// the next candidate.
    pub async fn confirm(&self, issue: &Issue, candidate: &Issue) -> Verdict {
        let span = info_span!("confirm", candidate = candidate.number);

        async {
            let prompt = build_prompt(issue, candidate);
            match self.model.complete(&prompt).await {
                Ok(reply) => {
                    debug!(reply = %reply.trim(), "Model replied");
                    parse_verdict(&reply)
                }
                Err(e) => {
                    warn!(error = %e, "Language model call failed, treating as not a duplicate");
                    Verdict::failed(&e)
                }
            }
        }
        .instrument(span)
        .await
    }
}

/// Builds the duplicate-check prompt for the LLM.
fn build_prompt(issue: &Issue, candidate: &Issue) -> String {
    format!(
        "You are an expert GitHub issue triager. Determine if \"Issue A\" is a duplicate of \"Issue B\".\n\
\n\
Issue A (New):\n\
Title: {new_title}\n\
Body: {new_body}\n\
\n\
Issue B (Existing #{number}):\n\
Title: {candidate_title}\n\
Body: {candidate_body}\n\
\n\
Is Issue A a duplicate of Issue B?\n\
Respond with ONLY \"{positive}\" or \"{negative}\" followed by a very brief one-sentence explanation.",
        new_title = issue.title,
        new_body = issue.body_or_empty(),
        number = candidate.number,
        candidate_title = candidate.title,
        candidate_body = candidate.body_or_empty(),
        positive = POSITIVE_TOKEN,
        negative = NEGATIVE_TOKEN,
    )
}
