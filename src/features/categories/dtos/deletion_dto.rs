use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// What to do with content that references the deleted category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentPolicy {
    /// Move content to the target category
    Reassign,
    /// Remove the content rows
    Delete,
}

/// What to do with subcategories of the deleted category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubcategoryPolicy {
    /// Reparent direct children onto the target category
    Reassign,
    /// Remove the whole descendant set transitively
    Delete,
}

/// Request DTO for the category deletion workflow
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCategoryDto {
    pub content_policy: ContentPolicy,

    /// Required when either policy is `reassign`
    pub target_category_id: Option<Uuid>,

    pub subcategory_policy: SubcategoryPolicy,

    /// Required to confirm destructive policies over a non-empty set
    #[serde(default)]
    pub force: bool,
}

/// Result payload of the deletion workflow. Transient: reports the act of
/// deletion back to the caller, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDeletionDto {
    pub success: bool,
    pub message: String,
    pub category_id: Uuid,
    pub category_name: serde_json::Value,
    /// Action taken for dependent content, e.g. "reassigned" or "deleted"
    pub content_action: String,
    pub subcategory_action: String,
    pub content_affected: i64,
    pub subcategories_affected: i64,
    /// Number of outbox rows written in the deletion transaction
    pub tasks_scheduled: i64,
}
