use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{DocumentId, EntityCounts, ExtractedEntities};

/// Entity rows for one document are written as a single atomic unit: a
/// document is never observed with a partial entity set.
#[async_trait]
pub trait EntityRepository: Send + Sync {
    async fn persist(
        &self,
        document_id: DocumentId,
        entities: &ExtractedEntities,
    ) -> Result<(), RepositoryError>;

    async fn counts(&self, document_id: DocumentId) -> Result<EntityCounts, RepositoryError>;
}
