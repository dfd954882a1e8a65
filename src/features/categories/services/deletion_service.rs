use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::dtos::{
    CategoryDeletionDto, ContentPolicy, DeleteCategoryDto, SubcategoryPolicy,
};
use crate::features::categories::models::Category;
use crate::features::categories::repositories::category_repository;
use crate::features::tasks::models::{
    AuditLogPayload, SearchReindexPayload, StatisticsRefreshPayload, TaskRequest, TaskType,
};
use crate::features::tasks::repositories::task_repository;

/// The category deletion workflow.
///
/// The synchronous portion (one transaction) is the source of truth: it
/// resolves dependent content and subcategories per the caller's policies,
/// removes the category row, and writes the outbox rows for the follow-up
/// work. The background tasks are advisory; their failure never rolls back
/// the deletion.
pub struct CategoryDeletionService {
    pool: PgPool,
}

impl CategoryDeletionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn delete(
        &self,
        id: Uuid,
        dto: DeleteCategoryDto,
        actor: &AuthenticatedUser,
    ) -> Result<CategoryDeletionDto> {
        validate_policies(&dto)?;

        let mut tx = self.pool.begin().await?;

        // Row lock serializes concurrent deletions of the same node
        let category = category_repository::find_by_id_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", id)))?;

        let descendants = category_repository::collect_descendant_ids(&mut tx, id).await?;

        // Validate the reassignment target against live data
        if let Some(target_id) = dto.target_category_id {
            if target_id == id {
                return Err(AppError::BadRequest(
                    "Target category must differ from the category being deleted".to_string(),
                ));
            }
            if descendants.contains(&target_id) {
                return Err(AppError::BadRequest(
                    "Target category cannot be inside the deleted subtree".to_string(),
                ));
            }
            if !category_repository::exists_active(&mut tx, target_id).await? {
                return Err(AppError::BadRequest(format!(
                    "Target category '{}' does not exist",
                    target_id
                )));
            }
        }

        // Content of the category itself, plus descendant content when the
        // subtree is going away with it
        let mut content_sources = vec![id];
        if dto.subcategory_policy == SubcategoryPolicy::Delete {
            content_sources.extend_from_slice(&descendants);
        }

        let content_count =
            category_repository::count_content_in(&mut tx, &content_sources).await?;

        if !dto.force {
            if let Some(reason) = force_required(&dto, content_count, descendants.len() as i64) {
                return Err(AppError::Conflict(format!(
                    "{}; retry with force=true to confirm",
                    reason
                )));
            }
        }

        let (content_affected, content_action) = match dto.content_policy {
            ContentPolicy::Reassign => {
                // Target presence is guaranteed by validate_policies
                let target_id = dto.target_category_id.ok_or_else(|| {
                    AppError::Internal("Reassign policy without target".to_string())
                })?;
                let moved =
                    category_repository::reassign_content(&mut tx, &content_sources, target_id)
                        .await?;
                (moved as i64, "reassigned".to_string())
            }
            ContentPolicy::Delete => {
                let removed =
                    category_repository::delete_content_in(&mut tx, &content_sources).await?;
                (removed as i64, "deleted".to_string())
            }
        };

        let (subcategories_affected, subcategory_action) = match dto.subcategory_policy {
            SubcategoryPolicy::Reassign => {
                let target_id = dto.target_category_id.ok_or_else(|| {
                    AppError::Internal("Reassign policy without target".to_string())
                })?;
                let moved = category_repository::reparent_children(&mut tx, id, target_id).await?;
                (moved as i64, "reassigned".to_string())
            }
            SubcategoryPolicy::Delete => {
                let removed = category_repository::delete_many(&mut tx, &descendants).await?;
                (removed as i64, "deleted".to_string())
            }
        };

        category_repository::delete_one(&mut tx, id).await?;

        let tasks = plan_background_tasks(&category, dto.target_category_id, actor);
        let tasks_scheduled = task_repository::insert_all(&mut tx, &tasks).await? as i64;

        tx.commit().await?;

        tracing::info!(
            "Category deleted: id={}, slug={}, content_{}={}, subcategories_{}={}, tasks={}",
            category.id,
            category.slug,
            content_action,
            content_affected,
            subcategory_action,
            subcategories_affected,
            tasks_scheduled
        );

        Ok(CategoryDeletionDto {
            success: true,
            message: format!("Category '{}' deleted", category.slug),
            category_id: category.id,
            category_name: category.name,
            content_action,
            subcategory_action,
            content_affected,
            subcategories_affected,
            tasks_scheduled,
        })
    }
}

/// Structural checks that need no data: reassignment requires a target
pub(crate) fn validate_policies(dto: &DeleteCategoryDto) -> Result<()> {
    let needs_target = dto.content_policy == ContentPolicy::Reassign
        || dto.subcategory_policy == SubcategoryPolicy::Reassign;

    if needs_target && dto.target_category_id.is_none() {
        return Err(AppError::Validation(
            "targetCategoryId is required when a reassign policy is chosen".to_string(),
        ));
    }

    Ok(())
}

/// Destructive policies over a non-empty dependent set require the force
/// flag; pure reassignment never does. Returns the refusal reason.
pub(crate) fn force_required(
    dto: &DeleteCategoryDto,
    content_count: i64,
    descendant_count: i64,
) -> Option<String> {
    if dto.content_policy == ContentPolicy::Delete && content_count > 0 {
        return Some(format!(
            "Deletion would remove {} content item(s)",
            content_count
        ));
    }

    if dto.subcategory_policy == SubcategoryPolicy::Delete && descendant_count > 0 {
        return Some(format!(
            "Deletion would remove {} subcategorie(s)",
            descendant_count
        ));
    }

    None
}

/// The outbox rows written by a successful deletion: orphan cleanup, the
/// audit entry, one counter refresh per distinct affected ancestor (former
/// parent and/or reassignment target), and a reindex of the affected
/// subtree. Pure so the scheduled-count contract is testable without a
/// database.
pub(crate) fn plan_background_tasks(
    category: &Category,
    target_id: Option<Uuid>,
    actor: &AuthenticatedUser,
) -> Vec<TaskRequest> {
    let mut tasks = vec![
        TaskRequest::new(TaskType::OrphanCleanup, serde_json::json!({})),
        TaskRequest::new(
            TaskType::AuditLog,
            serde_json::to_value(AuditLogPayload {
                actor_id: Some(actor.id),
                actor_name: actor.username.clone(),
                action: "category.delete".to_string(),
                entity_type: "category".to_string(),
                entity_id: Some(category.id),
                detail: serde_json::json!({
                    "slug": category.slug,
                    "name": category.name,
                }),
            })
            .unwrap_or_default(),
        ),
    ];

    let mut stat_targets: Vec<Uuid> = Vec::new();
    if let Some(parent_id) = category.parent_id {
        stat_targets.push(parent_id);
    }
    if let Some(target_id) = target_id {
        if !stat_targets.contains(&target_id) {
            stat_targets.push(target_id);
        }
    }
    for category_id in stat_targets {
        tasks.push(TaskRequest::new(
            TaskType::StatisticsRefresh,
            serde_json::to_value(StatisticsRefreshPayload { category_id }).unwrap_or_default(),
        ));
    }

    tasks.push(TaskRequest::new(
        TaskType::SearchReindex,
        serde_json::to_value(SearchReindexPayload {
            root_category_id: category.parent_id,
        })
        .unwrap_or_default(),
    ));

    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::CategoryKind;
    use crate::features::users::models::UserRole;
    use chrono::Utc;
    use serde_json::json;

    fn actor() -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            username: "editor".to_string(),
            role: UserRole::Editor,
        }
    }

    fn category(parent_id: Option<Uuid>) -> Category {
        Category {
            id: Uuid::new_v4(),
            parent_id,
            slug: "news".to_string(),
            name: json!({"en": "News"}),
            description: None,
            kind: CategoryKind::Topic,
            is_visible: true,
            is_active: true,
            sort_order: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn dto(
        content_policy: ContentPolicy,
        subcategory_policy: SubcategoryPolicy,
        target: Option<Uuid>,
        force: bool,
    ) -> DeleteCategoryDto {
        DeleteCategoryDto {
            content_policy,
            target_category_id: target,
            subcategory_policy,
            force,
        }
    }

    #[test]
    fn test_reassign_policy_requires_target() {
        let missing = dto(ContentPolicy::Reassign, SubcategoryPolicy::Delete, None, false);
        assert!(validate_policies(&missing).is_err());

        let missing = dto(ContentPolicy::Delete, SubcategoryPolicy::Reassign, None, false);
        assert!(validate_policies(&missing).is_err());

        let ok = dto(
            ContentPolicy::Reassign,
            SubcategoryPolicy::Reassign,
            Some(Uuid::new_v4()),
            false,
        );
        assert!(validate_policies(&ok).is_ok());

        let ok = dto(ContentPolicy::Delete, SubcategoryPolicy::Delete, None, false);
        assert!(validate_policies(&ok).is_ok());
    }

    #[test]
    fn test_force_required_for_destructive_nonempty_sets() {
        let destructive = dto(ContentPolicy::Delete, SubcategoryPolicy::Delete, None, false);

        assert!(force_required(&destructive, 3, 0).is_some());
        assert!(force_required(&destructive, 0, 2).is_some());
        // Nothing to destroy: no confirmation needed
        assert!(force_required(&destructive, 0, 0).is_none());

        // Pure reassignment never needs force
        let reassign = dto(
            ContentPolicy::Reassign,
            SubcategoryPolicy::Reassign,
            Some(Uuid::new_v4()),
            false,
        );
        assert!(force_required(&reassign, 10, 10).is_none());
    }

    #[test]
    fn test_plan_base_case_schedules_four_tasks() {
        // Parented category, no reassignment target
        let cat = category(Some(Uuid::new_v4()));
        let tasks = plan_background_tasks(&cat, None, &actor());

        assert_eq!(tasks.len(), 4);
        assert_eq!(tasks[0].task_type, TaskType::OrphanCleanup);
        assert_eq!(tasks[1].task_type, TaskType::AuditLog);
        assert_eq!(tasks[2].task_type, TaskType::StatisticsRefresh);
        assert_eq!(tasks[3].task_type, TaskType::SearchReindex);
    }

    #[test]
    fn test_plan_orphan_root_schedules_three_tasks() {
        let cat = category(None);
        let tasks = plan_background_tasks(&cat, None, &actor());

        assert_eq!(tasks.len(), 3);
        assert!(tasks
            .iter()
            .all(|t| t.task_type != TaskType::StatisticsRefresh));
    }

    #[test]
    fn test_plan_distinct_parent_and_target_schedules_five_tasks() {
        let cat = category(Some(Uuid::new_v4()));
        let tasks = plan_background_tasks(&cat, Some(Uuid::new_v4()), &actor());

        assert_eq!(tasks.len(), 5);
        let refreshes = tasks
            .iter()
            .filter(|t| t.task_type == TaskType::StatisticsRefresh)
            .count();
        assert_eq!(refreshes, 2);
    }

    #[test]
    fn test_plan_deduplicates_target_equal_to_parent() {
        let parent = Uuid::new_v4();
        let cat = category(Some(parent));
        let tasks = plan_background_tasks(&cat, Some(parent), &actor());

        assert_eq!(tasks.len(), 4);
    }

    #[test]
    fn test_plan_audit_entry_names_the_actor() {
        let who = actor();
        let cat = category(None);
        let tasks = plan_background_tasks(&cat, None, &who);

        let audit = tasks
            .iter()
            .find(|t| t.task_type == TaskType::AuditLog)
            .unwrap();
        assert_eq!(audit.payload["actor_name"], json!("editor"));
        assert_eq!(audit.payload["action"], json!("category.delete"));
    }
}
