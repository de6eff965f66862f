use async_trait::async_trait;

use super::SearchResult;
use crate::domain::{Chunk, DocumentId, Embedding};

/// Vector side of the dual-store model. Writes are idempotent per
/// (document_id, chunk_index): re-running persistence for the same document
/// overwrites rather than duplicates, which is what makes reconciliation of
/// partial vector state safe.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create the collection if it does not exist yet. Returns true when it
    /// was created by this call.
    async fn ensure_collection(&self, config: &CollectionConfig) -> Result<bool, VectorStoreError>;

    async fn upsert(
        &self,
        chunks: &[Chunk],
        embeddings: &[Embedding],
    ) -> Result<(), VectorStoreError>;

    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError>;

    async fn count_for_document(&self, document_id: DocumentId) -> Result<u64, VectorStoreError>;

    async fn delete_for_document(&self, document_id: DocumentId) -> Result<(), VectorStoreError>;
}

#[derive(Debug, Clone)]
pub struct CollectionConfig {
    pub vector_dimensions: u64,
    pub distance_metric: DistanceMetric,
}

impl CollectionConfig {
    pub fn new(vector_dimensions: u64) -> Self {
        Self {
            vector_dimensions,
            distance_metric: DistanceMetric::Cosine,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceMetric {
    Cosine,
    Euclidean,
    DotProduct,
}

#[derive(Debug, thiserror::Error)]
pub enum VectorStoreError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("collection creation failed: {0}")]
    CollectionCreationFailed(String),
    #[error("vector store unavailable: {0}")]
    Unavailable(String),
    #[error("upsert failed: {0}")]
    UpsertFailed(String),
    #[error("search failed: {0}")]
    SearchFailed(String),
    #[error("count failed: {0}")]
    CountFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
}

impl VectorStoreError {
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            VectorStoreError::ConnectionFailed(_) | VectorStoreError::Unavailable(_)
        )
    }
}
