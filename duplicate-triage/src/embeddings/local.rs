//! Local sentence-transformer embeddings via fastembed.

use super::{Embedding, EmbeddingError, EmbeddingProvider};
use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::task::spawn_blocking;
use tracing::{debug, info};

/// [`EmbeddingProvider`] backed by `all-MiniLM-L6-v2` running on ONNX Runtime.
///
/// The model is downloaded and loaded on first use, so runs that never need
/// an embedding (no open issues to compare against) never pay for it.
/// `TextEmbedding::embed` takes `&mut self`, hence the mutex.
#[derive(Clone, Default)]
pub struct FastEmbedProvider {
    model: Arc<Mutex<Option<TextEmbedding>>>,
    cache_dir: Option<PathBuf>,
}

impl FastEmbedProvider {
    /// Creates a provider using fastembed's default model cache location.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom directory for downloaded model files.
    #[must_use]
    pub fn with_cache_dir(mut self, cache_dir: PathBuf) -> Self {
        self.cache_dir = Some(cache_dir);
        self
    }
}

#[async_trait]
impl EmbeddingProvider for FastEmbedProvider {
    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Embedding>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = Arc::clone(&self.model);
        let cache_dir = self.cache_dir.clone();
        let owned = texts.to_vec();
        debug!(count = owned.len(), "Encoding texts");

        spawn_blocking(move || embed_blocking(&model, cache_dir, owned)).await?
    }
}

/// Loads the model if needed and encodes `texts` on the current thread.
fn embed_blocking(
    model: &Mutex<Option<TextEmbedding>>,
    cache_dir: Option<PathBuf>,
    texts: Vec<String>,
) -> Result<Vec<Embedding>, EmbeddingError> {
    let mut guard = model.lock().map_err(|_| EmbeddingError::Poisoned)?;
    if guard.is_none() {
        *guard = Some(load_model(cache_dir)?);
    }
    let Some(model) = guard.as_mut() else {
        return Err(EmbeddingError::ModelLoad("model not initialised".to_string()));
    };

    model
        .embed(texts, None)
        .map_err(|e| EmbeddingError::Encode(e.to_string()))
}

fn load_model(cache_dir: Option<PathBuf>) -> Result<TextEmbedding, EmbeddingError> {
    info!(model = "all-MiniLM-L6-v2", "Loading embedding model");
    let mut options =
        InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(false);
    if let Some(dir) = cache_dir {
        options = options.with_cache_dir(dir);
    }
    TextEmbedding::try_new(options).map_err(|e| EmbeddingError::ModelLoad(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_dir_is_configurable() {
        assert!(FastEmbedProvider::new().cache_dir.is_none());

        let provider = FastEmbedProvider::new().with_cache_dir(PathBuf::from("/tmp/models"));
        assert_eq!(provider.cache_dir, Some(PathBuf::from("/tmp/models")));
    }

    #[tokio::test]
    async fn empty_batch_never_loads_model() {
        let provider = FastEmbedProvider::new();
        let vectors = provider.encode_batch(&[]).await.unwrap();

        assert!(vectors.is_empty());
        assert!(provider.model.lock().unwrap().is_none());
    }
}
