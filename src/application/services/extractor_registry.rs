use std::collections::HashMap;
use std::sync::Arc;

use crate::application::ports::{EntityExtractor, ExtractorError};
use crate::domain::{EntityRecord, PdfType};

/// Fixed mapping from detected document type to its extractor, resolved at
/// the start of the entity stage. Types without a registered extractor
/// (including `Unknown`) route to a no-op that yields zero records.
pub struct ExtractorRegistry {
    extractors: HashMap<PdfType, Arc<dyn EntityExtractor>>,
    noop: Arc<dyn EntityExtractor>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
            noop: Arc::new(NoopExtractor),
        }
    }

    pub fn register(mut self, pdf_type: PdfType, extractor: Arc<dyn EntityExtractor>) -> Self {
        self.extractors.insert(pdf_type, extractor);
        self
    }

    pub fn for_type(&self, pdf_type: PdfType) -> Arc<dyn EntityExtractor> {
        self.extractors
            .get(&pdf_type)
            .cloned()
            .unwrap_or_else(|| Arc::clone(&self.noop))
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Unrecognized documents still ingest and become searchable; they
/// contribute no structured rows.
struct NoopExtractor;

impl EntityExtractor for NoopExtractor {
    fn extract(&self, _text: &str) -> Result<Vec<EntityRecord>, ExtractorError> {
        Ok(Vec::new())
    }
}
