//! Orchestrates duplicate triage for one newly opened issue.
//!
//! The run is linear: load the triggering issue, list the other open issues,
//! rank them by embedding similarity, then ask the language model about each
//! candidate in rank order. The first confirmed duplicate is announced and
//! ends the run, so an issue gets at most one duplicate comment.

mod config;
mod error;

pub use config::TriageConfig;
pub use error::TriageError;

use crate::candidates::{select_candidates, Candidate};
use crate::confirm::{DuplicateConfirmer, Verdict};
use crate::embeddings::{EmbeddingIndex, EmbeddingProvider, FastEmbedProvider};
use crate::issues::{CommentSink, GitHubIssues, Issue, IssueSource};
use crate::llm::{LanguageModel, SerdesAiModel};
use crate::summary::{CommentStatus, DuplicateMatch, TriageSummary};
use crate::templates::{CommentContext, TemplateRenderer};
use crate::text::comparable_text;
use octocrab::Octocrab;
use tracing::{error, info, info_span, warn, Instrument};

/// Runs triage against GitHub with the production embedding model and LLM.
///
/// # Errors
///
/// Returns [`TriageError`] for fatal preconditions: invalid configuration,
/// unresolvable model, unreadable event payload, missing triggering issue or
/// an unavailable embedding model.
pub async fn run(config: &TriageConfig) -> Result<TriageSummary, TriageError> {
    config.validate()?;

    let model = SerdesAiModel::from_settings(config.llm())?;
    let renderer = match config.comment_template_path() {
        Some(path) => TemplateRenderer::from_file(path)?,
        None => TemplateRenderer::new()?,
    };
    let octocrab = Octocrab::builder()
        .personal_token(config.token().to_string())
        .build()?;
    let github = GitHubIssues::new(
        octocrab,
        config.repository().clone(),
        config.event_path().to_path_buf(),
    );
    let embedder = match config.model_cache_dir() {
        Some(dir) => FastEmbedProvider::new().with_cache_dir(dir.to_path_buf()),
        None => FastEmbedProvider::new(),
    };

    Triage::new(config, &github, &github, &embedder, &model, &renderer)
        .run()
        .await
}

/// Duplicate triage pipeline over injected collaborators.
pub struct Triage<'a> {
    config: &'a TriageConfig,
    source: &'a dyn IssueSource,
    sink: &'a dyn CommentSink,
    embeddings: EmbeddingIndex<'a>,
    confirmer: DuplicateConfirmer<'a>,
    renderer: &'a TemplateRenderer,
}

impl<'a> Triage<'a> {
    /// Builds a pipeline from its collaborators.
    pub fn new(
        config: &'a TriageConfig,
        source: &'a dyn IssueSource,
        sink: &'a dyn CommentSink,
        embedder: &'a dyn EmbeddingProvider,
        model: &'a dyn LanguageModel,
        renderer: &'a TemplateRenderer,
    ) -> Self {
        Self {
            config,
            source,
            sink,
            embeddings: EmbeddingIndex::new(embedder),
            confirmer: DuplicateConfirmer::new(model),
            renderer,
        }
    }

    /// Executes the triage flow.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::MissingIssue`] when the event has no issue, and
    /// other [`TriageError`] variants for unreadable events or embedding
    /// failures. Nothing is posted when an error is returned.
    pub async fn run(&self) -> Result<TriageSummary, TriageError> {
        let issue = self
            .source
            .triggering_issue()
            .await?
            .ok_or(TriageError::MissingIssue)?;

        let span = info_span!("triage", issue_number = issue.number);
        self.triage(&issue).instrument(span).await
    }

    async fn triage(&self, issue: &Issue) -> Result<TriageSummary, TriageError> {
        info!(title = %issue.title, "Processing issue");
        let mut summary = TriageSummary::new(issue.number, self.config.dry_run());

        let existing = match self.source.list_open_issues(issue.number).await {
            Ok(existing) => existing,
            Err(e) => {
                warn!(error = %e, "Failed to fetch open issues, continuing without them");
                summary.fetch_degraded = true;
                Vec::new()
            }
        };
        info!(count = existing.len(), "Found existing open issues");
        summary.open_issues = existing.len();

        let candidates = self.rank_candidates(issue, &existing).await?;
        info!(count = candidates.len(), "Found potential semantic matches");
        summary.candidates = candidates.len();

        for candidate in &candidates {
            info!(
                candidate = candidate.issue.number,
                score = candidate.score,
                "Checking candidate"
            );
            summary.confirmations += 1;

            match self.confirmer.confirm(issue, candidate.issue).await {
                Verdict::Positive(rationale) => {
                    info!(candidate = candidate.issue.number, "Confirmed duplicate");
                    summary.comment = self.announce(issue, candidate, &rationale).await;
                    summary.duplicate = Some(DuplicateMatch {
                        number: candidate.issue.number,
                        title: candidate.issue.title.clone(),
                        score: candidate.score,
                        rationale,
                    });
                    break;
                }
                Verdict::Negative(rationale) => {
                    info!(
                        candidate = candidate.issue.number,
                        rationale = %rationale,
                        "Not a duplicate"
                    );
                }
            }
        }

        Ok(summary)
    }

    /// Embeds the new and existing issues and selects candidates.
    ///
    /// With no existing issues the embedding model is never invoked.
    async fn rank_candidates<'b>(
        &self,
        issue: &Issue,
        existing: &'b [Issue],
    ) -> Result<Vec<Candidate<'b>>, TriageError> {
        if existing.is_empty() {
            return Ok(Vec::new());
        }

        let new_embedding = self.embeddings.embed(&comparable_text(issue)).await?;
        let texts: Vec<String> = existing.iter().map(comparable_text).collect();
        let embeddings = self.embeddings.embed_batch(&texts).await?;

        Ok(select_candidates(
            &new_embedding,
            existing,
            &embeddings,
            self.config.selection(),
        ))
    }

    /// Posts the duplicate comment, or logs it in dry-run mode.
    async fn announce(
        &self,
        issue: &Issue,
        candidate: &Candidate<'_>,
        rationale: &str,
    ) -> CommentStatus {
        let context = CommentContext {
            issue_number: issue.number,
            duplicate_number: candidate.issue.number,
            duplicate_title: &candidate.issue.title,
            rationale,
            score: format!("{:.2}", candidate.score),
        };
        let body = match self.renderer.render_comment(&context) {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, "Failed to render comment");
                return CommentStatus::Failed {
                    error: e.to_string(),
                };
            }
        };

        if self.config.dry_run() {
            info!(body = %body, "[DRY RUN] Would post comment");
            return CommentStatus::Skipped {
                reason: "dry run".to_string(),
            };
        }

        match self.sink.post_comment(issue.number, &body).await {
            Ok(()) => CommentStatus::Posted,
            Err(e) => {
                error!(error = %e, "Failed to post comment");
                CommentStatus::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
}
