mod classifier;
mod document_repository;
mod embedder;
mod entity_extractor;
mod entity_repository;
mod file_store;
mod repository_error;
mod search_result;
mod text_extractor;
mod text_splitter;
mod vector_store;

pub use classifier::Classifier;
pub use document_repository::DocumentRepository;
pub use embedder::{Embedder, EmbedderError};
pub use entity_extractor::{EntityExtractor, ExtractorError};
pub use entity_repository::EntityRepository;
pub use file_store::{FileStore, FileStoreError};
pub use repository_error::RepositoryError;
pub use search_result::SearchResult;
pub use text_extractor::{TextExtractor, TextExtractorError};
pub use text_splitter::{SplitterConfigError, TextSplitter};
pub use vector_store::{CollectionConfig, DistanceMetric, VectorStore, VectorStoreError};
