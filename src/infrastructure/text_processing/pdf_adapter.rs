use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{TextExtractor, TextExtractorError};

use super::text_sanitizer::sanitize_extracted_text;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// PDF text extraction via `pdf-extract`, run on the blocking pool with an
/// explicit timeout so a hostile file cannot stall a worker forever.
#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractor for PdfAdapter {
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    async fn extract_text(&self, data: &[u8]) -> Result<String, TextExtractorError> {
        let owned = data.to_vec();

        let raw = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&owned)),
        )
        .await
        .map_err(|_| TextExtractorError::Timeout)?
        .map_err(|e| TextExtractorError::UnreadablePdf(format!("task join error: {e}")))?
        .map_err(|e| TextExtractorError::UnreadablePdf(e.to_string()))?;

        let sanitized = sanitize_extracted_text(&raw);
        if sanitized.is_empty() {
            return Err(TextExtractorError::NoTextFound);
        }

        tracing::info!(chars = sanitized.len(), "PDF text extraction complete");
        Ok(sanitized)
    }
}
