use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CategoryStatisticsDto;
use crate::features::categories::models::CategoryStatistics;
use crate::features::categories::repositories::category_repository;

/// Service for the derived per-category counters.
///
/// Counters are recomputed by the `statistics_refresh` background task, so
/// reads may briefly trail the source tables.
pub struct CategoryStatisticsService {
    pool: PgPool,
}

impl CategoryStatisticsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Current counters for a category; zeros when no refresh has run yet
    pub async fn get(&self, category_id: Uuid) -> Result<CategoryStatisticsDto> {
        let mut conn = self.pool.acquire().await?;

        if !category_repository::exists_active(&mut conn, category_id).await? {
            return Err(AppError::NotFound(format!(
                "Category '{}' not found",
                category_id
            )));
        }

        let stats = sqlx::query_as::<_, CategoryStatistics>(
            r#"
            SELECT category_id, content_count, subcategory_count, total_content_count, refreshed_at
            FROM category_statistics
            WHERE category_id = $1
            "#,
        )
        .bind(category_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(stats
            .map(|s| s.into())
            .unwrap_or_else(|| CategoryStatisticsDto::empty(category_id)))
    }

    /// Recompute and upsert one category's counters. A category that
    /// disappeared before the task ran is a no-op, not an error.
    pub async fn refresh(&self, category_id: Uuid) -> Result<()> {
        let mut conn = self.pool.acquire().await?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM categories WHERE id = $1)",
        )
        .bind(category_id)
        .fetch_one(&mut *conn)
        .await?;

        if !exists {
            tracing::debug!(
                "Skipping statistics refresh for vanished category {}",
                category_id
            );
            return Ok(());
        }

        sqlx::query(
            r#"
            INSERT INTO category_statistics
                (category_id, content_count, subcategory_count, total_content_count, refreshed_at)
            SELECT
                $1,
                (SELECT COUNT(*) FROM content WHERE category_id = $1),
                (SELECT COUNT(*) FROM categories WHERE parent_id = $1),
                (
                    WITH RECURSIVE subtree AS (
                        SELECT id FROM categories WHERE id = $1
                        UNION ALL
                        SELECT c.id FROM categories c
                        JOIN subtree s ON c.parent_id = s.id
                    )
                    SELECT COUNT(*) FROM content WHERE category_id IN (SELECT id FROM subtree)
                ),
                NOW()
            ON CONFLICT (category_id) DO UPDATE SET
                content_count = EXCLUDED.content_count,
                subcategory_count = EXCLUDED.subcategory_count,
                total_content_count = EXCLUDED.total_content_count,
                refreshed_at = EXCLUDED.refreshed_at
            "#,
        )
        .bind(category_id)
        .execute(&mut *conn)
        .await?;

        tracing::debug!("Statistics refreshed for category {}", category_id);
        Ok(())
    }
}
