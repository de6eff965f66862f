use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    Classifier, DocumentRepository, Embedder, EntityRepository, FileStore, RepositoryError,
    TextExtractor, TextExtractorError, TextSplitter, VectorStore,
};
use crate::application::services::{CancellationRegistry, ExtractorRegistry};
use crate::domain::{
    Chunk, Document, DocumentId, DocumentStatus, Embedding, ExtractedEntities, PdfType, Stage,
};

/// Bounded retry for transient-failure-prone stages (embedding calls and
/// vector-store writes). Deterministic failures are never retried.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(500),
        }
    }
}

/// Terminal result of one ingestion run. The caller always gets a terminal
/// status; on failure the stage name and cause are included.
#[derive(Debug, Clone)]
pub struct IngestionOutcome {
    pub document_id: DocumentId,
    pub status: DocumentStatus,
    pub stage_reached: Stage,
    pub error: Option<StageError>,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("stage {stage} failed ({kind}): {message}")]
pub struct StageError {
    pub stage: Stage,
    pub kind: ErrorKind,
    pub message: String,
}

impl StageError {
    fn new(stage: Stage, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            stage,
            kind,
            message: message.into(),
        }
    }

    fn internal(stage: Stage) -> impl FnOnce(RepositoryError) -> StageError {
        move |e| StageError::new(stage, ErrorKind::Internal, e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    UnparseableInput,
    TransientExternal,
    PersistenceConflict,
    Cancelled,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::UnparseableInput => "unparseable_input",
            ErrorKind::TransientExternal => "transient_external",
            ErrorKind::PersistenceConflict => "persistence_conflict",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Internal => "internal",
        };
        f.write_str(s)
    }
}

/// Failure of the orchestrator itself, as opposed to a stage failure that
/// gets recorded on the document.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("document not found: {0}")]
    DocumentNotFound(DocumentId),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}

/// Sequences the ingestion stages for one document, persisting each status
/// transition eagerly so that an external observer or a recovery pass can
/// tell exactly which stage was in progress at any moment.
///
/// Stage order: extract text, classify, extract entities (persisted
/// atomically at the end of that stage), chunk, embed, persist vectors.
/// Entity rows therefore always exist before any embedding work starts;
/// the converse gap (entities without vectors) is the recoverable
/// inconsistency `reconcile` repairs.
pub struct IngestionOrchestrator {
    file_store: Arc<dyn FileStore>,
    text_extractor: Arc<dyn TextExtractor>,
    classifier: Arc<dyn Classifier>,
    extractors: ExtractorRegistry,
    splitter: Arc<dyn TextSplitter>,
    embedder: Arc<dyn Embedder>,
    documents: Arc<dyn DocumentRepository>,
    entities: Arc<dyn EntityRepository>,
    vector_store: Arc<dyn VectorStore>,
    cancellations: CancellationRegistry,
    retry: RetryPolicy,
}

impl IngestionOrchestrator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        file_store: Arc<dyn FileStore>,
        text_extractor: Arc<dyn TextExtractor>,
        classifier: Arc<dyn Classifier>,
        extractors: ExtractorRegistry,
        splitter: Arc<dyn TextSplitter>,
        embedder: Arc<dyn Embedder>,
        documents: Arc<dyn DocumentRepository>,
        entities: Arc<dyn EntityRepository>,
        vector_store: Arc<dyn VectorStore>,
        cancellations: CancellationRegistry,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            file_store,
            text_extractor,
            classifier,
            extractors,
            splitter,
            embedder,
            documents,
            entities,
            vector_store,
            cancellations,
            retry,
        }
    }

    pub fn cancellations(&self) -> &CancellationRegistry {
        &self.cancellations
    }

    /// Runs the full pipeline for a previously created document. Always
    /// leaves the document in a terminal status.
    #[tracing::instrument(skip(self), fields(document_id = %document_id))]
    pub async fn start_ingestion(
        &self,
        document_id: DocumentId,
    ) -> Result<IngestionOutcome, OrchestratorError> {
        let mut document = self
            .documents
            .get(document_id)
            .await?
            .ok_or(OrchestratorError::DocumentNotFound(document_id))?;

        let result = self.run_pipeline(&mut document).await;
        self.finish(document_id, result).await
    }

    /// Re-runs only the missing suffix of stages for a document whose
    /// ingestion partially succeeded. Persisted text and entity rows are
    /// reused; the entity extractor is not re-invoked when its rows already
    /// landed, and vector writes are idempotent so re-upserting is safe.
    #[tracing::instrument(skip(self), fields(document_id = %document_id))]
    pub async fn reconcile(
        &self,
        document_id: DocumentId,
    ) -> Result<IngestionOutcome, OrchestratorError> {
        let mut document = self
            .documents
            .get(document_id)
            .await?
            .ok_or(OrchestratorError::DocumentNotFound(document_id))?;

        if document.status == DocumentStatus::Complete {
            return Ok(IngestionOutcome {
                document_id,
                status: DocumentStatus::Complete,
                stage_reached: Stage::PersistVectors,
                error: None,
            });
        }

        let Some(text) = document.extracted_text.clone() else {
            // Nothing durable to resume from; run the whole pipeline again.
            tracing::info!("no persisted text, falling back to full ingestion");
            let result = self.run_pipeline(&mut document).await;
            return self.finish(document_id, result).await;
        };

        let result = self.resume_from_text(&mut document, &text).await;
        self.finish(document_id, result).await
    }

    async fn finish(
        &self,
        document_id: DocumentId,
        result: Result<(), StageError>,
    ) -> Result<IngestionOutcome, OrchestratorError> {
        match result {
            Ok(()) => {
                self.documents
                    .update_status(document_id, DocumentStatus::Complete, None)
                    .await?;
                tracing::info!("ingestion complete");
                Ok(IngestionOutcome {
                    document_id,
                    status: DocumentStatus::Complete,
                    stage_reached: Stage::PersistVectors,
                    error: None,
                })
            }
            Err(err) => {
                let detail = err.to_string();
                self.documents
                    .update_status(document_id, DocumentStatus::Failed, Some(&detail))
                    .await?;
                tracing::warn!(stage = %err.stage, kind = %err.kind, "ingestion failed");
                Ok(IngestionOutcome {
                    document_id,
                    status: DocumentStatus::Failed,
                    stage_reached: err.stage,
                    error: Some(err),
                })
            }
        }
    }

    async fn run_pipeline(&self, document: &mut Document) -> Result<(), StageError> {
        let id = document.id;
        if document.status != DocumentStatus::Pending {
            document.reopen();
        }

        self.enter_stage(document, Stage::ExtractText, DocumentStatus::Extracting)
            .await?;
        let data = self
            .file_store
            .read(&document.storage_path)
            .await
            .map_err(|e| StageError::new(Stage::ExtractText, ErrorKind::Internal, e.to_string()))?;
        let text = self
            .text_extractor
            .extract_text(&data)
            .await
            .map_err(|e| StageError::new(Stage::ExtractText, extraction_kind(&e), e.to_string()))?;
        self.documents
            .record_extracted_text(id, &text)
            .await
            .map_err(StageError::internal(Stage::ExtractText))?;

        self.enter_stage(document, Stage::Classify, DocumentStatus::Classifying)
            .await?;
        let pdf_type = self.classifier.classify(&text);
        tracing::info!(pdf_type = %pdf_type, "document classified");
        self.documents
            .record_pdf_type(id, pdf_type)
            .await
            .map_err(StageError::internal(Stage::Classify))?;

        self.enter_stage(document, Stage::ExtractEntities, DocumentStatus::ExtractingEntities)
            .await?;
        let records = self
            .extractors
            .for_type(pdf_type)
            .extract(&text)
            .map_err(|e| {
                StageError::new(Stage::ExtractEntities, ErrorKind::UnparseableInput, e.to_string())
            })?;
        let entities = ExtractedEntities::from_records(records);
        tracing::info!(entity_count = entities.len(), "entities extracted");
        self.persist_entities(id, &entities).await?;

        self.embed_and_persist(document, &text).await
    }

    async fn resume_from_text(
        &self,
        document: &mut Document,
        text: &str,
    ) -> Result<(), StageError> {
        let id = document.id;
        let stored_type = document.pdf_type;
        document.reopen();

        // A stored Unknown may mean classification never ran before the
        // failure. Classification is deterministic, so re-running it cannot
        // diverge from a completed earlier attempt.
        let pdf_type = if stored_type == PdfType::Unknown {
            self.enter_stage(document, Stage::Classify, DocumentStatus::Classifying)
                .await?;
            let pdf_type = self.classifier.classify(text);
            tracing::info!(pdf_type = %pdf_type, "document classified");
            self.documents
                .record_pdf_type(id, pdf_type)
                .await
                .map_err(StageError::internal(Stage::Classify))?;
            pdf_type
        } else {
            stored_type
        };

        let counts = self
            .entities
            .counts(id)
            .await
            .map_err(StageError::internal(Stage::ExtractEntities))?;

        if counts.total() == 0 && pdf_type != PdfType::Unknown {
            // No rows landed. Extraction is deterministic, so re-running it
            // here cannot diverge from the original attempt.
            let extractor = self.extractors.for_type(pdf_type);
            self.enter_stage(document, Stage::ExtractEntities, DocumentStatus::ExtractingEntities)
                .await?;
            let records = extractor.extract(text).map_err(|e| {
                StageError::new(Stage::ExtractEntities, ErrorKind::UnparseableInput, e.to_string())
            })?;
            let entities = ExtractedEntities::from_records(records);
            self.persist_entities(id, &entities).await?;
        } else {
            tracing::info!(
                entity_rows = counts.total(),
                "entity rows already persisted, skipping extractor"
            );
        }

        let expected = self.splitter.split(text, id).len() as u64;
        let existing = self
            .vector_store
            .count_for_document(id)
            .await
            .map_err(|e| {
                let kind = if e.is_transient() {
                    ErrorKind::TransientExternal
                } else {
                    ErrorKind::Internal
                };
                StageError::new(Stage::PersistVectors, kind, e.to_string())
            })?;
        if expected > 0 && existing == expected {
            tracing::info!(points = existing, "vector points already complete");
            return Ok(());
        }

        self.embed_and_persist(document, text).await
    }

    async fn embed_and_persist(
        &self,
        document: &mut Document,
        text: &str,
    ) -> Result<(), StageError> {
        let id = document.id;
        self.enter_stage(document, Stage::Chunk, DocumentStatus::Embedding)
            .await?;
        let chunks = self.splitter.split(text, id);
        tracing::info!(chunk_count = chunks.len(), "text chunked");

        let embeddings = if chunks.is_empty() {
            Vec::new()
        } else {
            self.embed_with_retry(&chunks).await?
        };

        self.enter_stage(document, Stage::PersistVectors, DocumentStatus::Persisting)
            .await?;
        if !chunks.is_empty() {
            self.upsert_with_retry(&chunks, &embeddings).await?;
        }
        Ok(())
    }

    async fn persist_entities(
        &self,
        id: DocumentId,
        entities: &ExtractedEntities,
    ) -> Result<(), StageError> {
        self.entities.persist(id, entities).await.map_err(|e| {
            let kind = match e {
                RepositoryError::ConstraintViolation(_) => ErrorKind::PersistenceConflict,
                _ => ErrorKind::Internal,
            };
            StageError::new(Stage::PersistEntities, kind, e.to_string())
        })
    }

    async fn embed_with_retry(&self, chunks: &[Chunk]) -> Result<Vec<Embedding>, StageError> {
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let mut attempt = 1;
        loop {
            match self.embedder.embed_batch(&texts).await {
                Ok(embeddings) => {
                    if embeddings.len() != chunks.len() {
                        return Err(StageError::new(
                            Stage::Embed,
                            ErrorKind::Internal,
                            format!(
                                "embedder returned {} vectors for {} chunks",
                                embeddings.len(),
                                chunks.len()
                            ),
                        ));
                    }
                    return Ok(embeddings);
                }
                Err(e) if e.is_transient() && attempt < self.retry.max_attempts => {
                    tracing::warn!(attempt, error = %e, "embedding attempt failed, retrying");
                    tokio::time::sleep(self.retry.backoff * attempt).await;
                    attempt += 1;
                }
                Err(e) => {
                    let kind = if e.is_transient() {
                        ErrorKind::TransientExternal
                    } else {
                        ErrorKind::Internal
                    };
                    return Err(StageError::new(Stage::Embed, kind, e.to_string()));
                }
            }
        }
    }

    async fn upsert_with_retry(
        &self,
        chunks: &[Chunk],
        embeddings: &[Embedding],
    ) -> Result<(), StageError> {
        let mut attempt = 1;
        loop {
            match self.vector_store.upsert(chunks, embeddings).await {
                Ok(()) => return Ok(()),
                Err(e) if e.is_transient() && attempt < self.retry.max_attempts => {
                    tracing::warn!(attempt, error = %e, "vector upsert failed, retrying");
                    tokio::time::sleep(self.retry.backoff * attempt).await;
                    attempt += 1;
                }
                Err(e) => {
                    let kind = if e.is_transient() {
                        ErrorKind::TransientExternal
                    } else {
                        ErrorKind::Internal
                    };
                    return Err(StageError::new(Stage::PersistVectors, kind, e.to_string()));
                }
            }
        }
    }

    /// Cancellation is honored here, between stages, never mid-stage. The
    /// status moves through `Document::transition`, so a backward or
    /// out-of-order jump is rejected before anything is persisted.
    async fn enter_stage(
        &self,
        document: &mut Document,
        stage: Stage,
        status: DocumentStatus,
    ) -> Result<(), StageError> {
        let id = document.id;
        if self.cancellations.take(id) {
            return Err(StageError::new(
                stage,
                ErrorKind::Cancelled,
                format!("cancelled before {}", stage),
            ));
        }
        document
            .transition(status)
            .map_err(|e| StageError::new(stage, ErrorKind::Internal, e.to_string()))?;
        tracing::debug!(stage = %stage, status = %status, "entering stage");
        self.documents
            .update_status(id, status, None)
            .await
            .map_err(StageError::internal(stage))
    }
}

fn extraction_kind(error: &TextExtractorError) -> ErrorKind {
    match error {
        TextExtractorError::UnreadablePdf(_) | TextExtractorError::NoTextFound => {
            ErrorKind::UnparseableInput
        }
        TextExtractorError::Timeout => ErrorKind::TransientExternal,
    }
}
