use super::DocumentId;

/// A contiguous span of extracted document text. Chunks are derived
/// deterministically from the text and never persisted relationally; the
/// index doubles as the stable vector-store key for the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub document_id: DocumentId,
    pub index: usize,
    pub offset: usize,
    pub text: String,
}

impl Chunk {
    pub fn new(document_id: DocumentId, index: usize, offset: usize, text: String) -> Self {
        Self {
            document_id,
            index,
            offset,
            text,
        }
    }
}
