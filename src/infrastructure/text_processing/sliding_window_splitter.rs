use crate::application::ports::{SplitterConfigError, TextSplitter};
use crate::domain::{Chunk, DocumentId};

/// Character-window chunker: fixed-size windows advanced by
/// `chunk_size - overlap`, so consecutive chunks share `overlap` characters
/// and together cover the whole input with no gaps. Offsets and indexes are
/// character-based and fully determined by (text, config).
pub struct SlidingWindowSplitter {
    chunk_size: usize,
    overlap: usize,
}

impl SlidingWindowSplitter {
    /// Invalid parameters are a configuration error caught here, before any
    /// document is processed.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self, SplitterConfigError> {
        if chunk_size == 0 {
            return Err(SplitterConfigError::ZeroChunkSize);
        }
        if overlap >= chunk_size {
            return Err(SplitterConfigError::OverlapTooLarge {
                chunk_size,
                overlap,
            });
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    pub fn step(&self) -> usize {
        self.chunk_size - self.overlap
    }
}

impl TextSplitter for SlidingWindowSplitter {
    fn split(&self, text: &str, document_id: DocumentId) -> Vec<Chunk> {
        let chars: Vec<char> = text.chars().collect();
        let total = chars.len();
        let mut chunks = Vec::new();

        let mut offset = 0;
        while offset < total {
            let end = (offset + self.chunk_size).min(total);
            let chunk_text: String = chars[offset..end].iter().collect();
            chunks.push(Chunk::new(document_id, chunks.len(), offset, chunk_text));

            if end == total {
                break;
            }
            offset += self.step();
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::TextSplitter;

    #[test]
    fn rejects_overlap_equal_to_chunk_size() {
        assert!(matches!(
            SlidingWindowSplitter::new(10, 10),
            Err(SplitterConfigError::OverlapTooLarge { .. })
        ));
    }

    #[test]
    fn rejects_zero_chunk_size() {
        assert!(matches!(
            SlidingWindowSplitter::new(0, 0),
            Err(SplitterConfigError::ZeroChunkSize)
        ));
    }

    #[test]
    fn indexes_are_sequential_and_offsets_advance_by_step() {
        let splitter = SlidingWindowSplitter::new(8, 3).unwrap();
        let chunks = splitter.split("abcdefghijklmnopqrstuvwxyz", DocumentId::new());

        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
            assert_eq!(chunk.offset, i * splitter.step());
        }
    }
}
