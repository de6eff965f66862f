use async_trait::async_trait;

use crate::domain::Embedding;

/// Embedding provider. Output length and order always match the input batch.
/// Transient failures (rate limits, outages) are surfaced as-is; the
/// orchestrator owns the retry policy.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError>;

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError>;

    /// Fixed dimensionality of every vector this embedder produces, consumed
    /// by the vector store's collection config.
    fn dimensions(&self) -> usize;
}

#[derive(Debug, thiserror::Error)]
pub enum EmbedderError {
    #[error("embedding provider rate limited")]
    RateLimited,
    #[error("embedding provider unavailable: {0}")]
    Unavailable(String),
    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),
}

impl EmbedderError {
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            EmbedderError::RateLimited | EmbedderError::Unavailable(_)
        )
    }
}
