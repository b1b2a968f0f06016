//! Text embeddings and cosine similarity.
//!
//! [`EmbeddingProvider`] is the seam to the external model;
//! [`EmbeddingIndex`] wraps a provider and enforces the batch contract the
//! candidate selector relies on (one vector per input, in input order).

mod error;
mod local;

pub use error::EmbeddingError;
pub use local::FastEmbedProvider;

use async_trait::async_trait;

/// A fixed-length vector representing a text's semantic content.
pub type Embedding = Vec<f32>;

/// External embedding model.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Encodes every text, returning vectors in input order.
    ///
    /// Each vector must equal what encoding that text alone would produce.
    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbeddingError>;

    /// Encodes a single text.
    async fn encode(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let mut vectors = self.encode_batch(&[text.to_string()]).await?;
        if vectors.len() != 1 {
            return Err(EmbeddingError::CountMismatch {
                expected: 1,
                actual: vectors.len(),
            });
        }
        Ok(vectors.swap_remove(0))
    }
}

/// Embeds texts through a provider.
pub struct EmbeddingIndex<'a> {
    provider: &'a dyn EmbeddingProvider,
}

impl<'a> EmbeddingIndex<'a> {
    /// Wraps `provider`.
    pub fn new(provider: &'a dyn EmbeddingProvider) -> Self {
        Self { provider }
    }

    /// Embeds a single text.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError`] if the model is unavailable; there is no
    /// fallback.
    pub async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        self.provider.encode(text).await
    }

    /// Embeds a batch of texts, checking the provider returned one vector per input.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::CountMismatch`] when the provider breaks the
    /// 1:1 contract, or any provider error.
    pub async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let vectors = self.provider.encode_batch(texts).await?;
        if vectors.len() != texts.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: texts.len(),
                actual: vectors.len(),
            });
        }
        Ok(vectors)
    }
}

/// Cosine similarity: dot product over the product of norms, in `-1.0..=1.0`.
///
/// Accumulates in `f64` and divides by `sqrt(|a|² · |b|²)` so a vector scored
/// against itself is exactly `1.0` and argument order never changes the
/// result. Mismatched lengths, empty vectors and zero-norm vectors score `0.0`.
#[must_use]
pub fn similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = (norm_a * norm_b).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return 0.0;
    }
    (dot / denom).clamp(-1.0, 1.0) as f32
}
