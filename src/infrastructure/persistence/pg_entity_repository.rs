use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::instrument;

use super::pg_document_repository::map_sqlx_error;
use crate::application::ports::{EntityRepository, RepositoryError};
use crate::domain::{DocumentId, EntityCounts, ExtractedEntities};

/// Entity rows land in one transaction per document: either the full set
/// commits or nothing does.
pub struct PgEntityRepository {
    pool: PgPool,
}

impl PgEntityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityRepository for PgEntityRepository {
    #[instrument(skip(self, entities), fields(document_id = %document_id, count = entities.len()))]
    async fn persist(
        &self,
        document_id: DocumentId,
        entities: &ExtractedEntities,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        let doc_id = document_id.as_uuid();

        for item in &entities.cost_items {
            sqlx::query(
                "INSERT INTO cost_items \
                 (document_id, item_name, quantity, unit_price, total_cost, cost_type) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(doc_id)
            .bind(&item.item_name)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.total_cost)
            .bind(&item.cost_type)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        }

        for task in &entities.tasks {
            sqlx::query(
                "INSERT INTO project_tasks \
                 (document_id, task_name, duration_days, start_date, finish_date) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(doc_id)
            .bind(&task.task_name)
            .bind(task.duration_days)
            .bind(task.start_date)
            .bind(task.finish_date)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        }

        for rule in &entities.rules {
            sqlx::query(
                "INSERT INTO regulatory_rules (document_id, rule_summary, measurement_basis) \
                 VALUES ($1, $2, $3)",
            )
            .bind(doc_id)
            .bind(&rule.rule_summary)
            .bind(&rule.measurement_basis)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        }

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    #[instrument(skip(self), fields(document_id = %document_id))]
    async fn counts(&self, document_id: DocumentId) -> Result<EntityCounts, RepositoryError> {
        let doc_id = document_id.as_uuid();

        let row = sqlx::query(
            "SELECT \
               (SELECT COUNT(*) FROM cost_items WHERE document_id = $1) AS cost_items, \
               (SELECT COUNT(*) FROM project_tasks WHERE document_id = $1) AS tasks, \
               (SELECT COUNT(*) FROM regulatory_rules WHERE document_id = $1) AS rules",
        )
        .bind(doc_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let cost_items: i64 = row
            .try_get("cost_items")
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
        let tasks: i64 = row
            .try_get("tasks")
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
        let rules: i64 = row
            .try_get("rules")
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(EntityCounts {
            cost_items: cost_items as u64,
            tasks: tasks as u64,
            rules: rules as u64,
        })
    }
}
