use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::dtos::{
    CategoryResponseDto, CategoryTreeDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::{CategoryChanges, NewCategory};
use crate::features::categories::repositories::category_repository;
use crate::features::tasks::models::{
    AuditLogPayload, SearchReindexPayload, StatisticsRefreshPayload, TaskRequest, TaskType,
};
use crate::features::tasks::repositories::task_repository;

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all active categories (flat list)
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let mut conn = self.pool.acquire().await?;

        let categories = category_repository::list_active(&mut conn).await.map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// List all active categories as tree structure
    pub async fn list_tree(&self) -> Result<Vec<CategoryTreeDto>> {
        let mut conn = self.pool.acquire().await?;

        let categories = category_repository::list_active(&mut conn).await.map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(CategoryTreeDto::build_tree(categories))
    }

    /// Get category by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<CategoryResponseDto> {
        let mut conn = self.pool.acquire().await?;

        category_repository::find_by_slug_active(&mut conn, slug)
            .await?
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))
    }

    pub async fn create(
        &self,
        dto: CreateCategoryDto,
        actor: &AuthenticatedUser,
    ) -> Result<CategoryResponseDto> {
        let mut tx = self.pool.begin().await?;

        if category_repository::slug_taken(&mut tx, &dto.slug).await? {
            return Err(AppError::Conflict(format!(
                "Category slug '{}' already in use",
                dto.slug
            )));
        }

        if let Some(parent_id) = dto.parent_id {
            if !category_repository::exists_active(&mut tx, parent_id).await? {
                return Err(AppError::BadRequest(format!(
                    "Parent category '{}' does not exist",
                    parent_id
                )));
            }
        }

        let category = category_repository::insert(
            &mut tx,
            &NewCategory {
                parent_id: dto.parent_id,
                slug: dto.slug,
                name: dto.name,
                description: dto.description,
                kind: dto.kind,
                is_visible: dto.is_visible,
                sort_order: dto.sort_order,
            },
        )
        .await?;

        let tasks = mutation_tasks(category.id, category.parent_id, "category.create", actor);
        task_repository::insert_all(&mut tx, &tasks).await?;

        tx.commit().await?;

        tracing::info!("Category created: id={}, slug={}", category.id, category.slug);

        Ok(category.into())
    }

    pub async fn update(
        &self,
        id: Uuid,
        dto: UpdateCategoryDto,
        actor: &AuthenticatedUser,
    ) -> Result<CategoryResponseDto> {
        let mut tx = self.pool.begin().await?;

        let existing = category_repository::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", id)))?;

        if let Some(slug) = &dto.slug {
            if slug != &existing.slug && category_repository::slug_taken(&mut tx, slug).await? {
                return Err(AppError::Conflict(format!(
                    "Category slug '{}' already in use",
                    slug
                )));
            }
        }

        // Reparenting must keep the tree acyclic: the new parent may not be
        // the category itself or anything below it
        if let Some(parent_id) = dto.parent_id {
            if parent_id == id {
                return Err(AppError::BadRequest(
                    "A category cannot be its own parent".to_string(),
                ));
            }
            if !category_repository::exists_active(&mut tx, parent_id).await? {
                return Err(AppError::BadRequest(format!(
                    "Parent category '{}' does not exist",
                    parent_id
                )));
            }
            let descendants = category_repository::collect_descendant_ids(&mut tx, id).await?;
            if descendants.contains(&parent_id) {
                return Err(AppError::BadRequest(
                    "Cannot move a category under one of its own descendants".to_string(),
                ));
            }
        }

        let updated = category_repository::update(
            &mut tx,
            id,
            &CategoryChanges {
                parent_id: dto.parent_id,
                slug: dto.slug,
                name: dto.name,
                description: dto.description,
                kind: dto.kind,
                is_visible: dto.is_visible,
                is_active: dto.is_active,
                sort_order: dto.sort_order,
            },
        )
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", id)))?;

        let tasks = mutation_tasks(updated.id, updated.parent_id, "category.update", actor);
        task_repository::insert_all(&mut tx, &tasks).await?;

        tx.commit().await?;

        Ok(updated.into())
    }
}

/// Outbox rows for a plain create/update mutation: audit trail, counter
/// refresh on the parent, reindex of the touched subtree
fn mutation_tasks(
    category_id: Uuid,
    parent_id: Option<Uuid>,
    action: &str,
    actor: &AuthenticatedUser,
) -> Vec<TaskRequest> {
    let mut tasks = vec![TaskRequest::new(
        TaskType::AuditLog,
        serde_json::to_value(AuditLogPayload {
            actor_id: Some(actor.id),
            actor_name: actor.username.clone(),
            action: action.to_string(),
            entity_type: "category".to_string(),
            entity_id: Some(category_id),
            detail: serde_json::Value::Null,
        })
        .unwrap_or_default(),
    )];

    if let Some(parent_id) = parent_id {
        tasks.push(TaskRequest::new(
            TaskType::StatisticsRefresh,
            serde_json::to_value(StatisticsRefreshPayload {
                category_id: parent_id,
            })
            .unwrap_or_default(),
        ));
    }

    tasks.push(TaskRequest::new(
        TaskType::SearchReindex,
        serde_json::to_value(SearchReindexPayload {
            root_category_id: Some(category_id),
        })
        .unwrap_or_default(),
    ));

    tasks
}
