pub mod classification;
pub mod embeddings;
pub mod extraction;
pub mod observability;
pub mod persistence;
pub mod storage;
pub mod text_processing;
