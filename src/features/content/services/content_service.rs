use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::repositories::category_repository;
use crate::features::content::dtos::{ContentResponseDto, CreateContentDto, UpdateContentDto};
use crate::features::content::models::{ContentChanges, ContentStatus, NewContent};
use crate::features::content::repositories::{content_repository, ContentFilter};
use crate::features::series::repositories::series_repository;
use crate::features::tasks::models::{
    AuditLogPayload, SearchReindexPayload, StatisticsRefreshPayload, TaskRequest, TaskType,
};
use crate::features::tasks::repositories::task_repository;

/// Service for content operations
pub struct ContentService {
    pool: PgPool,
}

impl ContentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns (content, total). Anonymous callers only ever see published
    /// rows regardless of the requested filter.
    pub async fn list(
        &self,
        mut filter: ContentFilter,
        limit: i64,
        offset: i64,
        authenticated: bool,
    ) -> Result<(Vec<ContentResponseDto>, i64)> {
        if !authenticated {
            filter.status = Some(ContentStatus::Published);
        }

        let mut conn = self.pool.acquire().await?;

        let total = content_repository::count(&mut conn, &filter).await?;
        let rows = content_repository::list(&mut conn, &filter, limit, offset).await?;

        Ok((rows.into_iter().map(|c| c.into()).collect(), total))
    }

    /// Get content by slug. Unpublished rows stay hidden from anonymous
    /// callers.
    pub async fn get_by_slug(&self, slug: &str, authenticated: bool) -> Result<ContentResponseDto> {
        let mut conn = self.pool.acquire().await?;

        let content = content_repository::find_by_slug(&mut conn, slug)
            .await?
            .filter(|c| authenticated || c.status == ContentStatus::Published)
            .ok_or_else(|| AppError::NotFound(format!("Content '{}' not found", slug)))?;

        Ok(content.into())
    }

    pub async fn create(
        &self,
        dto: CreateContentDto,
        actor: &AuthenticatedUser,
    ) -> Result<ContentResponseDto> {
        let mut tx = self.pool.begin().await?;

        if content_repository::slug_taken(&mut tx, &dto.slug).await? {
            return Err(AppError::Conflict(format!(
                "Content slug '{}' already in use",
                dto.slug
            )));
        }

        if !category_repository::exists_active(&mut tx, dto.category_id).await? {
            return Err(AppError::BadRequest(format!(
                "Category '{}' does not exist",
                dto.category_id
            )));
        }

        if let Some(series_id) = dto.series_id {
            if !series_repository::exists_active(&mut tx, series_id).await? {
                return Err(AppError::BadRequest(format!(
                    "Series '{}' does not exist",
                    series_id
                )));
            }
        }

        let published_at = match dto.status {
            ContentStatus::Published => Some(Utc::now()),
            _ => None,
        };

        let content = content_repository::insert(
            &mut tx,
            &NewContent {
                category_id: dto.category_id,
                series_id: dto.series_id,
                author_id: Some(actor.id),
                slug: dto.slug,
                title: dto.title,
                body: dto.body,
                status: dto.status,
                series_position: dto.series_position,
                published_at,
            },
        )
        .await?;

        let tasks = mutation_tasks(content.id, &[content.category_id], "content.create", actor);
        task_repository::insert_all(&mut tx, &tasks).await?;

        tx.commit().await?;

        tracing::info!("Content created: id={}, slug={}", content.id, content.slug);

        Ok(content.into())
    }

    pub async fn update(
        &self,
        id: Uuid,
        dto: UpdateContentDto,
        actor: &AuthenticatedUser,
    ) -> Result<ContentResponseDto> {
        let mut tx = self.pool.begin().await?;

        let existing = content_repository::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Content '{}' not found", id)))?;

        if let Some(slug) = &dto.slug {
            if slug != &existing.slug && content_repository::slug_taken(&mut tx, slug).await? {
                return Err(AppError::Conflict(format!(
                    "Content slug '{}' already in use",
                    slug
                )));
            }
        }

        if let Some(category_id) = dto.category_id {
            if !category_repository::exists_active(&mut tx, category_id).await? {
                return Err(AppError::BadRequest(format!(
                    "Category '{}' does not exist",
                    category_id
                )));
            }
        }

        if let Some(series_id) = dto.series_id {
            if !series_repository::exists_active(&mut tx, series_id).await? {
                return Err(AppError::BadRequest(format!(
                    "Series '{}' does not exist",
                    series_id
                )));
            }
        }

        // First transition into published stamps the publication time
        let published_at = match dto.status {
            Some(ContentStatus::Published) if existing.published_at.is_none() => Some(Utc::now()),
            _ => None,
        };

        let updated = content_repository::update(
            &mut tx,
            id,
            &ContentChanges {
                category_id: dto.category_id,
                series_id: dto.series_id,
                slug: dto.slug,
                title: dto.title,
                body: dto.body,
                status: dto.status,
                series_position: dto.series_position,
                published_at,
            },
        )
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Content '{}' not found", id)))?;

        // Refresh counters on both ends of a category move
        let mut stat_categories = vec![updated.category_id];
        if existing.category_id != updated.category_id {
            stat_categories.push(existing.category_id);
        }

        let tasks = mutation_tasks(updated.id, &stat_categories, "content.update", actor);
        task_repository::insert_all(&mut tx, &tasks).await?;

        tx.commit().await?;

        Ok(updated.into())
    }

    pub async fn delete(&self, id: Uuid, actor: &AuthenticatedUser) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let existing = content_repository::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Content '{}' not found", id)))?;

        content_repository::delete(&mut tx, id).await?;

        let tasks = mutation_tasks(id, &[existing.category_id], "content.delete", actor);
        task_repository::insert_all(&mut tx, &tasks).await?;

        tx.commit().await?;

        tracing::info!("Content deleted: id={}, slug={}", id, existing.slug);

        Ok(())
    }
}

/// Outbox rows for a content mutation: audit trail, counter refresh on the
/// touched categories, reindex of the owning subtree
fn mutation_tasks(
    content_id: Uuid,
    category_ids: &[Uuid],
    action: &str,
    actor: &AuthenticatedUser,
) -> Vec<TaskRequest> {
    let mut tasks = vec![TaskRequest::new(
        TaskType::AuditLog,
        serde_json::to_value(AuditLogPayload {
            actor_id: Some(actor.id),
            actor_name: actor.username.clone(),
            action: action.to_string(),
            entity_type: "content".to_string(),
            entity_id: Some(content_id),
            detail: serde_json::Value::Null,
        })
        .unwrap_or_default(),
    )];

    for &category_id in category_ids {
        tasks.push(TaskRequest::new(
            TaskType::StatisticsRefresh,
            serde_json::to_value(StatisticsRefreshPayload { category_id }).unwrap_or_default(),
        ));
    }

    if let Some(&root) = category_ids.first() {
        tasks.push(TaskRequest::new(
            TaskType::SearchReindex,
            serde_json::to_value(SearchReindexPayload {
                root_category_id: Some(root),
            })
            .unwrap_or_default(),
        ));
    }

    tasks
}
