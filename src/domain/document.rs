use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{DocumentStatus, InvalidTransition, PdfType, StoragePath};

/// A single ingested PDF. Owned by the orchestrator; everything the pipeline
/// learns about the file (type, status, extracted text) is written back here
/// so a crashed or partial ingestion can be observed and resumed.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub pdf_name: String,
    pub storage_path: StoragePath,
    pub pdf_type: PdfType,
    pub status: DocumentStatus,
    pub error_detail: Option<String>,
    pub extracted_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Document {
    pub fn new(pdf_name: String, storage_path: StoragePath) -> Self {
        let now = Utc::now();
        Self {
            id: DocumentId::new(),
            pdf_name,
            storage_path,
            pdf_type: PdfType::Unknown,
            status: DocumentStatus::Pending,
            error_detail: None,
            extracted_text: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move to the next pipeline status, rejecting backward jumps.
    pub fn transition(&mut self, next: DocumentStatus) -> Result<(), InvalidTransition> {
        self.status.check_transition(next)?;
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Puts the document back at the start of the pipeline. This is the one
    /// sanctioned way out of a terminal or mid-run status; every transition
    /// after it obeys the forward-only rule again.
    pub fn reopen(&mut self) {
        self.status = DocumentStatus::Pending;
        self.error_detail = None;
        self.updated_at = Utc::now();
    }
}
