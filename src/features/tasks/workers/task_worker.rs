use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

use crate::core::config::WorkerConfig;
use crate::core::error::{AppError, Result};
use crate::features::audit::repositories::audit_repository;
use crate::features::categories::services::CategoryStatisticsService;
use crate::features::search::services::SearchIndexService;
use crate::features::tasks::models::{
    AuditLogPayload, BackgroundTask, SearchReindexPayload, StatisticsRefreshPayload, TaskType,
};
use crate::features::tasks::repositories::task_repository;

/// Outbox worker that runs in the background.
///
/// Drains `pending` task rows in batches and executes the matching
/// side effect. Failures are retried up to the configured attempt ceiling,
/// then parked as `failed`; nothing is ever surfaced to the request that
/// scheduled the task.
pub struct TaskWorker {
    pool: PgPool,
    config: WorkerConfig,
    statistics: Arc<CategoryStatisticsService>,
    search: Arc<SearchIndexService>,
}

impl TaskWorker {
    pub fn new(
        pool: PgPool,
        config: WorkerConfig,
        statistics: Arc<CategoryStatisticsService>,
        search: Arc<SearchIndexService>,
    ) -> Self {
        Self {
            pool,
            config,
            statistics,
            search,
        }
    }

    /// Run the worker in a background loop
    pub async fn run(&self) {
        tracing::info!(
            "Starting background task worker (interval: {}s, batch: {})",
            self.config.poll_interval_secs,
            self.config.batch_size
        );

        let mut interval = interval(Duration::from_secs(self.config.poll_interval_secs));

        loop {
            interval.tick().await;

            if let Err(e) = self.process_batch().await {
                tracing::error!("Error processing task batch: {:?}", e);
            }
        }
    }

    /// Claim and execute a batch of due tasks
    async fn process_batch(&self) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        let tasks = task_repository::claim_batch(&mut conn, self.config.batch_size).await?;
        drop(conn);

        if tasks.is_empty() {
            return Ok(());
        }

        tracing::debug!("Processing {} background tasks", tasks.len());

        for task in tasks {
            match self.execute(&task).await {
                Ok(()) => {
                    let mut conn = self.pool.acquire().await?;
                    task_repository::mark_completed(&mut conn, task.id).await?;
                }
                Err(e) => {
                    tracing::error!(
                        "Background task {} ({}) failed: {:?}",
                        task.id,
                        task.task_type,
                        e
                    );
                    let mut conn = self.pool.acquire().await?;
                    task_repository::mark_failed(
                        &mut conn,
                        task.id,
                        task.attempts,
                        self.config.max_attempts,
                        &e.to_string(),
                    )
                    .await?;
                }
            }
        }

        Ok(())
    }

    async fn execute(&self, task: &BackgroundTask) -> Result<()> {
        match task.task_type {
            TaskType::OrphanCleanup => self.run_orphan_cleanup().await,
            TaskType::AuditLog => self.run_audit_log(task).await,
            TaskType::StatisticsRefresh => self.run_statistics_refresh(task).await,
            TaskType::SearchReindex => self.run_search_reindex(task).await,
        }
    }

    /// Remove derived rows whose owning entity is gone
    async fn run_orphan_cleanup(&self) -> Result<()> {
        let pruned = self.search.prune_orphans().await?;

        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query(
            r#"
            DELETE FROM category_statistics cs
            WHERE NOT EXISTS (SELECT 1 FROM categories c WHERE c.id = cs.category_id)
            "#,
        )
        .execute(&mut *conn)
        .await?;

        tracing::debug!(
            "Orphan cleanup removed {} search documents, {} statistics rows",
            pruned,
            result.rows_affected()
        );
        Ok(())
    }

    async fn run_audit_log(&self, task: &BackgroundTask) -> Result<()> {
        let payload: AuditLogPayload = parse_payload(task)?;

        let mut conn = self.pool.acquire().await?;
        let entry = audit_repository::insert(&mut conn, &payload).await?;

        tracing::debug!(
            "Audit entry {} recorded: {} {} by {}",
            entry.id,
            payload.action,
            payload
                .entity_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
            payload.actor_name
        );
        Ok(())
    }

    async fn run_statistics_refresh(&self, task: &BackgroundTask) -> Result<()> {
        let payload: StatisticsRefreshPayload = parse_payload(task)?;
        self.statistics.refresh(payload.category_id).await
    }

    async fn run_search_reindex(&self, task: &BackgroundTask) -> Result<()> {
        let payload: SearchReindexPayload = parse_payload(task)?;
        self.search.rebuild(payload.root_category_id).await
    }
}

fn parse_payload<T: serde::de::DeserializeOwned>(task: &BackgroundTask) -> Result<T> {
    serde_json::from_value(task.payload.clone()).map_err(|e| {
        AppError::Internal(format!(
            "Malformed payload for task {} ({}): {}",
            task.id, task.task_type, e
        ))
    })
}
