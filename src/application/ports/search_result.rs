use crate::domain::DocumentId;

/// One semantic search hit: the stored chunk text plus enough metadata to
/// trace it back to its document.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub document_id: DocumentId,
    pub chunk_index: usize,
    pub text: String,
    pub score: f32,
}
