use crate::domain::EntityRecord;

/// Type-specific structured extraction. Implementations are deterministic
/// and order-stable. Zero matches is a valid result; an error means the
/// input is structurally unparseable for this document type (expected table
/// markers or clause numbering absent).
pub trait EntityExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Result<Vec<EntityRecord>, ExtractorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractorError {
    #[error("expected table markers absent: {0}")]
    MissingTableMarkers(String),
    #[error("malformed structure: {0}")]
    MalformedStructure(String),
}
