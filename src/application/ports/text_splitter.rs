use crate::domain::{Chunk, DocumentId};

/// Splits extracted text into overlapping passages for embedding. Output
/// covers the full input with no gaps, is ordered (chunk index = position)
/// and is deterministic for identical input and configuration.
pub trait TextSplitter: Send + Sync {
    fn split(&self, text: &str, document_id: DocumentId) -> Vec<Chunk>;
}

/// Rejected at construction time, before any document is touched. Invalid
/// chunking parameters are a deployment problem, not a runtime failure.
#[derive(Debug, thiserror::Error)]
pub enum SplitterConfigError {
    #[error("chunk_size must be greater than zero")]
    ZeroChunkSize,
    #[error("overlap ({overlap}) must be strictly less than chunk_size ({chunk_size})")]
    OverlapTooLarge { chunk_size: usize, overlap: usize },
}
