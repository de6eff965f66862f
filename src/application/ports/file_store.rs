use async_trait::async_trait;

use crate::domain::StoragePath;

/// Byte storage for uploaded files. The path is recorded on the document at
/// upload time and read back by the ingestion pipeline.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn store(&self, path: &StoragePath, data: &[u8]) -> Result<(), FileStoreError>;

    async fn read(&self, path: &StoragePath) -> Result<Vec<u8>, FileStoreError>;

    async fn delete(&self, path: &StoragePath) -> Result<(), FileStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("read failed: {0}")]
    ReadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
}
