use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::application::ports::{
    CollectionConfig, DocumentRepository, EntityRepository, RepositoryError, SearchResult,
    VectorStore, VectorStoreError,
};
use crate::domain::{
    Chunk, Document, DocumentId, DocumentStatus, Embedding, EntityCounts, ExtractedEntities,
    PdfType,
};

/// In-memory stand-ins for the two stores, used by tests and local wiring.
/// The document fake also records its status history so tests can assert
/// that transitions were persisted eagerly and in order.
#[derive(Default)]
pub struct InMemoryDocumentRepository {
    documents: Mutex<HashMap<Uuid, Document>>,
    history: Mutex<Vec<(Uuid, DocumentStatus)>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status_history(&self, id: DocumentId) -> Vec<DocumentStatus> {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|(doc, _)| *doc == id.as_uuid())
            .map(|(_, status)| *status)
            .collect()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn create(&self, document: &Document) -> Result<(), RepositoryError> {
        let mut documents = self.documents.lock().unwrap_or_else(|e| e.into_inner());
        if documents.contains_key(&document.id.as_uuid()) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "duplicate document id: {}",
                document.id
            )));
        }
        documents.insert(document.id.as_uuid(), document.clone());
        Ok(())
    }

    async fn get(&self, id: DocumentId) -> Result<Option<Document>, RepositoryError> {
        Ok(self
            .documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id.as_uuid())
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Document>, RepositoryError> {
        let mut all: Vec<Document> = self
            .documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn update_status(
        &self,
        id: DocumentId,
        status: DocumentStatus,
        error_detail: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let mut documents = self.documents.lock().unwrap_or_else(|e| e.into_inner());
        let document = documents
            .get_mut(&id.as_uuid())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        document.status = status;
        document.error_detail = error_detail.map(str::to_string);
        document.updated_at = Utc::now();
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((id.as_uuid(), status));
        Ok(())
    }

    async fn record_extracted_text(
        &self,
        id: DocumentId,
        text: &str,
    ) -> Result<(), RepositoryError> {
        let mut documents = self.documents.lock().unwrap_or_else(|e| e.into_inner());
        let document = documents
            .get_mut(&id.as_uuid())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        document.extracted_text = Some(text.to_string());
        document.updated_at = Utc::now();
        Ok(())
    }

    async fn record_pdf_type(
        &self,
        id: DocumentId,
        pdf_type: PdfType,
    ) -> Result<(), RepositoryError> {
        let mut documents = self.documents.lock().unwrap_or_else(|e| e.into_inner());
        let document = documents
            .get_mut(&id.as_uuid())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        document.pdf_type = pdf_type;
        document.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: DocumentId) -> Result<(), RepositoryError> {
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&id.as_uuid());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryEntityRepository {
    entities: Mutex<HashMap<Uuid, ExtractedEntities>>,
}

impl InMemoryEntityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entities_for(&self, id: DocumentId) -> Option<ExtractedEntities> {
        self.entities
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id.as_uuid())
            .cloned()
    }
}

#[async_trait]
impl EntityRepository for InMemoryEntityRepository {
    async fn persist(
        &self,
        document_id: DocumentId,
        entities: &ExtractedEntities,
    ) -> Result<(), RepositoryError> {
        self.entities
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(document_id.as_uuid(), entities.clone());
        Ok(())
    }

    async fn counts(&self, document_id: DocumentId) -> Result<EntityCounts, RepositoryError> {
        let entities = self.entities.lock().unwrap_or_else(|e| e.into_inner());
        let counts = entities
            .get(&document_id.as_uuid())
            .map(|e| EntityCounts {
                cost_items: e.cost_items.len() as u64,
                tasks: e.tasks.len() as u64,
                rules: e.rules.len() as u64,
            })
            .unwrap_or_default();
        Ok(counts)
    }
}

/// Vector store fake keyed by (document_id, chunk_index), mirroring the
/// idempotent-upsert contract of the real adapter.
#[derive(Default)]
pub struct InMemoryVectorStore {
    points: Mutex<HashMap<(Uuid, usize), (Embedding, String)>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point_count(&self) -> usize {
        self.points.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn ensure_collection(
        &self,
        _config: &CollectionConfig,
    ) -> Result<bool, VectorStoreError> {
        Ok(false)
    }

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
        let mut points = self.points.lock().unwrap_or_else(|e| e.into_inner());
        for (chunk, embedding) in chunks.iter().zip(embeddings.iter()) {
            points.insert(
                (chunk.document_id.as_uuid(), chunk.index),
                (embedding.clone(), chunk.text.clone()),
            );
        }
        Ok(())
    }

    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        let points = self.points.lock().unwrap_or_else(|e| e.into_inner());
        let mut scored: Vec<SearchResult> = points
            .iter()
            .map(|((doc, index), (vector, text))| SearchResult {
                document_id: DocumentId::from_uuid(*doc),
                chunk_index: *index,
                text: text.clone(),
                score: cosine(&embedding.values, &vector.values),
            })
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_k);
        Ok(scored)
    }

    async fn count_for_document(&self, document_id: DocumentId) -> Result<u64, VectorStoreError> {
        let points = self.points.lock().unwrap_or_else(|e| e.into_inner());
        Ok(points
            .keys()
            .filter(|(doc, _)| *doc == document_id.as_uuid())
            .count() as u64)
    }

    async fn delete_for_document(&self, document_id: DocumentId) -> Result<(), VectorStoreError> {
        self.points
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|(doc, _), _| *doc != document_id.as_uuid());
        Ok(())
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    dot / (mag_a * mag_b)
}
