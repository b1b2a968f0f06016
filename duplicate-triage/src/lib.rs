#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod candidates;
pub mod config;
pub mod confirm;
pub mod embeddings;
pub mod issues;
pub mod llm;
pub mod summary;
pub mod templates;
pub mod text;
pub mod triage;

pub use candidates::{
    select_candidates, Candidate, SelectionConfig, DEFAULT_MAX_CANDIDATES,
    DEFAULT_SIMILARITY_THRESHOLD,
};
pub use config::{ConfigError, Repository};
pub use confirm::{parse_verdict, DuplicateConfirmer, Verdict};
pub use embeddings::{
    similarity, Embedding, EmbeddingError, EmbeddingIndex, EmbeddingProvider, FastEmbedProvider,
};
pub use issues::{
    load_event_issue, CommentSink, GitHubIssues, Issue, IssueError, IssueSource, IssueState,
};
pub use llm::{LanguageModel, LlmError, LlmSettings, SerdesAiModel};
pub use summary::{CommentStatus, DuplicateMatch, TriageSummary};
pub use templates::{CommentContext, TemplateError, TemplateRenderer};
pub use text::comparable_text;
pub use triage::{run, Triage, TriageConfig, TriageError};
