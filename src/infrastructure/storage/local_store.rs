use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::application::ports::{FileStore, FileStoreError};
use crate::domain::StoragePath;

/// Filesystem-backed file store rooted at a base directory. Storage paths
/// are `{document_id}/{filename}`, so each upload gets its own directory.
pub struct LocalFileStore {
    base_path: PathBuf,
}

impl LocalFileStore {
    pub fn new(base_path: PathBuf) -> Result<Self, FileStoreError> {
        std::fs::create_dir_all(&base_path)
            .map_err(|e| FileStoreError::WriteFailed(e.to_string()))?;
        Ok(Self { base_path })
    }

    fn resolve(&self, path: &StoragePath) -> PathBuf {
        self.base_path.join(path.as_str())
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn store(&self, path: &StoragePath, data: &[u8]) -> Result<(), FileStoreError> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| FileStoreError::WriteFailed(e.to_string()))?;
        }
        tokio::fs::write(&full, data)
            .await
            .map_err(|e| FileStoreError::WriteFailed(e.to_string()))
    }

    async fn read(&self, path: &StoragePath) -> Result<Vec<u8>, FileStoreError> {
        let full = self.resolve(path);
        tokio::fs::read(&full).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                FileStoreError::NotFound(path.to_string())
            } else {
                FileStoreError::ReadFailed(e.to_string())
            }
        })
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), FileStoreError> {
        let full = self.resolve(path);
        match tokio::fs::remove_file(&full).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FileStoreError::DeleteFailed(e.to_string())),
        }
    }
}
