use async_trait::async_trait;

/// PDF-to-text capability. Extraction of an untrusted binary may fail
/// permanently (`UnreadablePdf`); that outcome is never retried.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, data: &[u8]) -> Result<String, TextExtractorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TextExtractorError {
    #[error("not a parseable PDF: {0}")]
    UnreadablePdf(String),
    #[error("no text content found")]
    NoTextFound,
    #[error("extraction timed out")]
    Timeout,
}
