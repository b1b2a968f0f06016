//! Embedding error types.

use thiserror::Error;

/// Errors raised while producing embeddings. Every variant is fatal to a run.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// The embedding model failed to load.
    #[error("Failed to load embedding model: {0}")]
    ModelLoad(String),

    /// The embedding model failed to encode a batch.
    #[error("Embedding model error: {0}")]
    Encode(String),

    /// The provider returned a different number of vectors than inputs.
    #[error("Embedding provider returned {actual} vectors for {expected} inputs")]
    CountMismatch { expected: usize, actual: usize },

    /// The blocking encode task panicked or was cancelled.
    #[error("Embedding task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// A previous encode panicked while holding the model lock.
    #[error("Embedding model lock poisoned")]
    Poisoned,
}
