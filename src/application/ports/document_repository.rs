use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Document, DocumentId, DocumentStatus, PdfType};

/// Relational home of the per-document pipeline state. Status transitions
/// and stage outputs (extracted text, detected type) are written eagerly so
/// an external observer or a recovery pass can see exactly how far an
/// ingestion got.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn create(&self, document: &Document) -> Result<(), RepositoryError>;

    async fn get(&self, id: DocumentId) -> Result<Option<Document>, RepositoryError>;

    async fn list(&self) -> Result<Vec<Document>, RepositoryError>;

    async fn update_status(
        &self,
        id: DocumentId,
        status: DocumentStatus,
        error_detail: Option<&str>,
    ) -> Result<(), RepositoryError>;

    async fn record_extracted_text(
        &self,
        id: DocumentId,
        text: &str,
    ) -> Result<(), RepositoryError>;

    async fn record_pdf_type(
        &self,
        id: DocumentId,
        pdf_type: PdfType,
    ) -> Result<(), RepositoryError>;

    /// Removes the document row; entity rows for it go with it.
    async fn delete(&self, id: DocumentId) -> Result<(), RepositoryError>;
}
