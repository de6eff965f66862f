use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use qdrant_client::{Qdrant, QdrantError};
use qdrant_client::qdrant::{
    Condition, CountPointsBuilder, CreateCollectionBuilder, DeletePointsBuilder, Distance, Filter,
    PointId, PointStruct, SearchPointsBuilder, UpsertPointsBuilder, VectorParamsBuilder,
    VectorsConfig,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::application::ports::{
    CollectionConfig, DistanceMetric, SearchResult, VectorStore, VectorStoreError,
};
use crate::domain::{Chunk, DocumentId, Embedding};

/// Qdrant-backed vector persister. Point ids are UUIDv5 over
/// `"{document_id}:{chunk_index}"`, so re-persisting the same document
/// overwrites its points instead of duplicating them.
pub struct QdrantAdapter {
    client: Arc<Qdrant>,
    collection_name: String,
}

impl QdrantAdapter {
    pub async fn new(url: &str, collection_name: String) -> Result<Self, VectorStoreError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| VectorStoreError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            collection_name,
        })
    }

    pub fn with_client(client: Arc<Qdrant>, collection_name: String) -> Self {
        Self {
            client,
            collection_name,
        }
    }

    fn point_id(chunk: &Chunk) -> PointId {
        let key = format!("{}:{}", chunk.document_id, chunk.index);
        let uuid = Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes());
        PointId::from(uuid.to_string())
    }

    fn document_filter(document_id: DocumentId) -> Filter {
        Filter::must([Condition::matches(
            "document_id",
            document_id.as_uuid().to_string(),
        )])
    }

    fn map_distance_metric(metric: &DistanceMetric) -> Distance {
        match metric {
            DistanceMetric::Cosine => Distance::Cosine,
            DistanceMetric::Euclidean => Distance::Euclid,
            DistanceMetric::DotProduct => Distance::Dot,
        }
    }

    /// Connectivity failures become `Unavailable`, which retries upstream;
    /// anything else keeps the operation-specific variant.
    fn classify_error(err: QdrantError, fallback: fn(String) -> VectorStoreError) -> VectorStoreError {
        let detail = err.to_string();
        if Self::is_connectivity_error(&detail) {
            VectorStoreError::Unavailable(detail)
        } else {
            fallback(detail)
        }
    }

    fn is_connectivity_error(detail: &str) -> bool {
        let lowered = detail.to_ascii_lowercase();
        [
            "unavailable",
            "timeout",
            "timed out",
            "deadline",
            "connection",
            "transport",
            "broken pipe",
            "resource exhausted",
        ]
        .iter()
        .any(|marker| lowered.contains(marker))
    }
}

#[async_trait]
impl VectorStore for QdrantAdapter {
    #[instrument(skip(self, config), fields(collection = %self.collection_name))]
    async fn ensure_collection(&self, config: &CollectionConfig) -> Result<bool, VectorStoreError> {
        let exists = self
            .client
            .collection_exists(&self.collection_name)
            .await
            .map_err(|e| VectorStoreError::ConnectionFailed(e.to_string()))?;
        if exists {
            return Ok(false);
        }

        let vectors_config = VectorsConfig::from(VectorParamsBuilder::new(
            config.vector_dimensions,
            Self::map_distance_metric(&config.distance_metric),
        ));

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection_name).vectors_config(vectors_config),
            )
            .await
            .map_err(|e| VectorStoreError::CollectionCreationFailed(e.to_string()))?;

        info!(collection = %self.collection_name, "collection created");
        Ok(true)
    }

    #[instrument(skip(self, chunks, embeddings), fields(collection = %self.collection_name, count = chunks.len()))]
    async fn upsert(
        &self,
        chunks: &[Chunk],
        embeddings: &[Embedding],
    ) -> Result<(), VectorStoreError> {
        if chunks.len() != embeddings.len() {
            return Err(VectorStoreError::UpsertFailed(
                "chunks and embeddings count mismatch".to_string(),
            ));
        }

        let points: Vec<PointStruct> = chunks
            .iter()
            .zip(embeddings.iter())
            .map(|(chunk, embedding)| {
                let mut payload: HashMap<String, serde_json::Value> = HashMap::new();
                payload.insert(
                    "document_id".to_string(),
                    serde_json::Value::String(chunk.document_id.as_uuid().to_string()),
                );
                payload.insert(
                    "chunk_index".to_string(),
                    serde_json::Value::Number((chunk.index as u64).into()),
                );
                payload.insert(
                    "offset".to_string(),
                    serde_json::Value::Number((chunk.offset as u64).into()),
                );
                payload.insert(
                    "text".to_string(),
                    serde_json::Value::String(chunk.text.clone()),
                );

                PointStruct::new(Self::point_id(chunk), embedding.values.clone(), payload)
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection_name, points))
            .await
            .map_err(|e| Self::classify_error(e, VectorStoreError::UpsertFailed))?;

        info!(count = chunks.len(), "points upserted");
        Ok(())
    }

    #[instrument(skip(self, embedding), fields(collection = %self.collection_name, top_k))]
    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        let search_result = self
            .client
            .search_points(
                SearchPointsBuilder::new(
                    &self.collection_name,
                    embedding.values.clone(),
                    top_k as u64,
                )
                .with_payload(true),
            )
            .await
            .map_err(|e| VectorStoreError::SearchFailed(e.to_string()))?;

        let results = search_result
            .result
            .into_iter()
            .filter_map(|point| {
                let payload = point.payload;

                let document_id_str = payload.get("document_id")?.as_str()?;
                let document_id = Uuid::parse_str(document_id_str).ok()?;
                let chunk_index = payload.get("chunk_index")?.as_integer()? as usize;
                let text = payload.get("text")?.as_str()?.to_string();

                Some(SearchResult {
                    document_id: DocumentId::from_uuid(document_id),
                    chunk_index,
                    text,
                    score: point.score,
                })
            })
            .collect();

        Ok(results)
    }

    #[instrument(skip(self), fields(collection = %self.collection_name, document_id = %document_id))]
    async fn count_for_document(&self, document_id: DocumentId) -> Result<u64, VectorStoreError> {
        let response = self
            .client
            .count(
                CountPointsBuilder::new(&self.collection_name)
                    .filter(Self::document_filter(document_id))
                    .exact(true),
            )
            .await
            .map_err(|e| Self::classify_error(e, VectorStoreError::CountFailed))?;

        Ok(response.result.map(|r| r.count).unwrap_or(0))
    }

    #[instrument(skip(self), fields(collection = %self.collection_name, document_id = %document_id))]
    async fn delete_for_document(&self, document_id: DocumentId) -> Result<(), VectorStoreError> {
        self.client
            .delete_points(
                DeletePointsBuilder::new(&self.collection_name)
                    .points(Self::document_filter(document_id)),
            )
            .await
            .map_err(|e| VectorStoreError::DeleteFailed(e.to_string()))?;

        info!("document points deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectivity_failures_are_recognized() {
        assert!(QdrantAdapter::is_connectivity_error(
            "status: Unavailable, message: \"error trying to connect\""
        ));
        assert!(QdrantAdapter::is_connectivity_error("transport error"));
        assert!(QdrantAdapter::is_connectivity_error(
            "request timed out after 5s"
        ));
        assert!(!QdrantAdapter::is_connectivity_error(
            "status: InvalidArgument, message: \"wrong vector dimension\""
        ));
    }

    #[test]
    fn classified_connectivity_failures_retry_and_data_failures_do_not() {
        let transient = VectorStoreError::Unavailable("connection refused".to_string());
        let permanent = VectorStoreError::UpsertFailed("wrong vector dimension".to_string());

        assert!(transient.is_transient());
        assert!(!permanent.is_transient());
    }
}
