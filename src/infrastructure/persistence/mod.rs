mod memory;
mod pg_document_repository;
mod pg_entity_repository;
mod pg_pool;
mod qdrant_adapter;

pub use memory::{InMemoryDocumentRepository, InMemoryEntityRepository, InMemoryVectorStore};
pub use pg_document_repository::PgDocumentRepository;
pub use pg_entity_repository::PgEntityRepository;
pub use pg_pool::create_pool;
pub use qdrant_adapter::QdrantAdapter;
