use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{DocumentRepository, RepositoryError};
use crate::domain::{Document, DocumentId, DocumentStatus, PdfType, StoragePath};

pub struct PgDocumentRepository {
    pool: PgPool,
}

impl PgDocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> Result<Document, RepositoryError> {
        let status: String = row
            .try_get("status")
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
        let pdf_type: String = row
            .try_get("pdf_type")
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        let id: Uuid = get(row, "id")?;
        Ok(Document {
            id: DocumentId::from_uuid(id),
            pdf_name: get(row, "pdf_name")?,
            storage_path: StoragePath::from_raw(get::<String>(row, "storage_path")?),
            pdf_type: pdf_type.parse::<PdfType>().map_err(RepositoryError::QueryFailed)?,
            status: status
                .parse::<DocumentStatus>()
                .map_err(RepositoryError::QueryFailed)?,
            error_detail: get(row, "error_detail")?,
            extracted_text: get(row, "extracted_text")?,
            created_at: get::<DateTime<Utc>>(row, "created_at")?,
            updated_at: get::<DateTime<Utc>>(row, "updated_at")?,
        })
    }
}

fn get<'r, T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>>(
    row: &'r PgRow,
    column: &str,
) -> Result<T, RepositoryError> {
    row.try_get(column)
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
}

const DOCUMENT_COLUMNS: &str = "id, pdf_name, storage_path, pdf_type, status, error_detail, \
     extracted_text, created_at, updated_at";

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    #[instrument(skip(self, document), fields(document_id = %document.id))]
    async fn create(&self, document: &Document) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO documents \
             (id, pdf_name, storage_path, pdf_type, status, error_detail, extracted_text, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(document.id.as_uuid())
        .bind(&document.pdf_name)
        .bind(document.storage_path.as_str())
        .bind(document.pdf_type.as_str())
        .bind(document.status.as_str())
        .bind(&document.error_detail)
        .bind(&document.extracted_text)
        .bind(document.created_at)
        .bind(document.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    #[instrument(skip(self), fields(document_id = %id))]
    async fn get(&self, id: DocumentId) -> Result<Option<Document>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(Self::map_row).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Document>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(Self::map_row).collect()
    }

    #[instrument(skip(self, error_detail), fields(document_id = %id, status = %status))]
    async fn update_status(
        &self,
        id: DocumentId,
        status: DocumentStatus,
        error_detail: Option<&str>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "UPDATE documents SET status = $1, error_detail = $2, updated_at = $3 WHERE id = $4",
        )
        .bind(status.as_str())
        .bind(error_detail)
        .bind(Utc::now())
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    #[instrument(skip(self, text), fields(document_id = %id, chars = text.len()))]
    async fn record_extracted_text(
        &self,
        id: DocumentId,
        text: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE documents SET extracted_text = $1, updated_at = $2 WHERE id = $3")
            .bind(text)
            .bind(Utc::now())
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    #[instrument(skip(self), fields(document_id = %id, pdf_type = %pdf_type))]
    async fn record_pdf_type(
        &self,
        id: DocumentId,
        pdf_type: PdfType,
    ) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE documents SET pdf_type = $1, updated_at = $2 WHERE id = $3")
            .bind(pdf_type.as_str())
            .bind(Utc::now())
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    #[instrument(skip(self), fields(document_id = %id))]
    async fn delete(&self, id: DocumentId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}

pub(super) fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() || db.is_foreign_key_violation() => {
            RepositoryError::ConstraintViolation(e.to_string())
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
            RepositoryError::ConnectionFailed(e.to_string())
        }
        _ => RepositoryError::QueryFailed(e.to_string()),
    }
}
