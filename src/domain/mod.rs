mod chunk;
mod document;
mod document_status;
mod embedding;
mod entities;
mod pdf_type;
mod stage;
mod storage_path;

pub use chunk::Chunk;
pub use document::{Document, DocumentId};
pub use document_status::{DocumentStatus, InvalidTransition};
pub use embedding::Embedding;
pub use entities::{CostItem, EntityCounts, EntityRecord, ExtractedEntities, ProjectTask, RegulatoryRule};
pub use pdf_type::PdfType;
pub use stage::Stage;
pub use storage_path::StoragePath;
