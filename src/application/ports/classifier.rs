use crate::domain::PdfType;

/// Document type detection. Pure function over text features: deterministic,
/// no external state, and infallible — text that matches nothing with enough
/// confidence classifies as `PdfType::Unknown`.
pub trait Classifier: Send + Sync {
    fn classify(&self, text: &str) -> PdfType;
}
