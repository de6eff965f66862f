use std::sync::Arc;

use crate::application::ports::{
    Embedder, EmbedderError, SearchResult, VectorStore, VectorStoreError,
};

/// Semantic search over persisted chunk embeddings: embed the query, take
/// the top-k nearest chunks.
pub struct SearchService {
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
    top_k: usize,
}

impl SearchService {
    pub fn new(embedder: Arc<dyn Embedder>, vector_store: Arc<dyn VectorStore>, top_k: usize) -> Self {
        Self {
            embedder,
            vector_store,
            top_k,
        }
    }

    #[tracing::instrument(skip(self, query))]
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let embedding = self
            .embedder
            .embed(query)
            .await
            .map_err(SearchError::Embedding)?;

        let results = self.vector_store.search(&embedding, self.top_k).await?;
        tracing::debug!(hits = results.len(), "search complete");
        Ok(results)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("embedding: {0}")]
    Embedding(EmbedderError),
    #[error("search: {0}")]
    Search(#[from] VectorStoreError),
}
