use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::series::dtos::{CreateSeriesDto, SeriesResponseDto, UpdateSeriesDto};
use crate::features::series::models::{NewSeries, SeriesChanges};
use crate::features::series::repositories::series_repository;
use crate::features::tasks::models::{AuditLogPayload, TaskRequest, TaskType};
use crate::features::tasks::repositories::task_repository;

/// Service for series operations
pub struct SeriesService {
    pool: PgPool,
}

impl SeriesService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<SeriesResponseDto>> {
        let mut conn = self.pool.acquire().await?;

        let series = series_repository::list_active(&mut conn).await?;
        Ok(series.into_iter().map(|s| s.into()).collect())
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<SeriesResponseDto> {
        let mut conn = self.pool.acquire().await?;

        series_repository::find_by_slug_active(&mut conn, slug)
            .await?
            .map(|s| s.into())
            .ok_or_else(|| AppError::NotFound(format!("Series '{}' not found", slug)))
    }

    pub async fn create(
        &self,
        dto: CreateSeriesDto,
        actor: &AuthenticatedUser,
    ) -> Result<SeriesResponseDto> {
        let mut tx = self.pool.begin().await?;

        if series_repository::slug_taken(&mut tx, &dto.slug).await? {
            return Err(AppError::Conflict(format!(
                "Series slug '{}' already in use",
                dto.slug
            )));
        }

        let series = series_repository::insert(
            &mut tx,
            &NewSeries {
                slug: dto.slug,
                title: dto.title,
                description: dto.description,
            },
        )
        .await?;

        task_repository::insert(&mut tx, &audit_task(series.id, "series.create", actor)).await?;

        tx.commit().await?;

        tracing::info!("Series created: id={}, slug={}", series.id, series.slug);

        Ok(series.into())
    }

    pub async fn update(
        &self,
        id: Uuid,
        dto: UpdateSeriesDto,
        actor: &AuthenticatedUser,
    ) -> Result<SeriesResponseDto> {
        let mut tx = self.pool.begin().await?;

        let existing = series_repository::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Series '{}' not found", id)))?;

        if let Some(slug) = &dto.slug {
            if slug != &existing.slug && series_repository::slug_taken(&mut tx, slug).await? {
                return Err(AppError::Conflict(format!(
                    "Series slug '{}' already in use",
                    slug
                )));
            }
        }

        let updated = series_repository::update(
            &mut tx,
            id,
            &SeriesChanges {
                slug: dto.slug,
                title: dto.title,
                description: dto.description,
                is_active: dto.is_active,
            },
        )
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Series '{}' not found", id)))?;

        task_repository::insert(&mut tx, &audit_task(id, "series.update", actor)).await?;

        tx.commit().await?;

        Ok(updated.into())
    }

    /// Delete a series; its content is detached, not removed
    pub async fn delete(&self, id: Uuid, actor: &AuthenticatedUser) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let affected = series_repository::delete(&mut tx, id).await?;
        if affected == 0 {
            return Err(AppError::NotFound(format!("Series '{}' not found", id)));
        }

        task_repository::insert(&mut tx, &audit_task(id, "series.delete", actor)).await?;

        tx.commit().await?;

        tracing::info!("Series deleted: id={}", id);

        Ok(())
    }
}

fn audit_task(series_id: Uuid, action: &str, actor: &AuthenticatedUser) -> TaskRequest {
    TaskRequest::new(
        TaskType::AuditLog,
        serde_json::to_value(AuditLogPayload {
            actor_id: Some(actor.id),
            actor_name: actor.username.clone(),
            action: action.to_string(),
            entity_type: "series".to_string(),
            entity_id: Some(series_id),
            detail: serde_json::Value::Null,
        })
        .unwrap_or_default(),
    )
}
