use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Category kind enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "category_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Topic,
    Format,
}

impl std::fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryKind::Topic => write!(f, "topic"),
            CategoryKind::Format => write!(f, "format"),
        }
    }
}

/// Database model for category.
///
/// `name` and `description` are JSON objects mapping language codes to
/// localized strings, e.g. `{"en": "News", "fr": "Actualités"}`.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Category {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub slug: String,
    pub name: serde_json::Value,
    pub description: Option<serde_json::Value>,
    pub kind: CategoryKind,
    pub is_visible: bool,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable category record (API creation and seeding)
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub parent_id: Option<Uuid>,
    pub slug: String,
    pub name: serde_json::Value,
    pub description: Option<serde_json::Value>,
    pub kind: CategoryKind,
    pub is_visible: bool,
    pub sort_order: i32,
}

/// Partial update; `None` fields keep the current value
#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub parent_id: Option<Uuid>,
    pub slug: Option<String>,
    pub name: Option<serde_json::Value>,
    pub description: Option<serde_json::Value>,
    pub kind: Option<CategoryKind>,
    pub is_visible: Option<bool>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

/// Database model for the derived per-category counters
#[derive(Debug, Clone, FromRow)]
pub struct CategoryStatistics {
    pub category_id: Uuid,
    pub content_count: i64,
    pub subcategory_count: i64,
    pub total_content_count: i64,
    pub refreshed_at: DateTime<Utc>,
}
