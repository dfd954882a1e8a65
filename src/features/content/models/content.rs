use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Content status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "content_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Draft,
    Published,
    Archived,
}

impl std::fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentStatus::Draft => write!(f, "draft"),
            ContentStatus::Published => write!(f, "published"),
            ContentStatus::Archived => write!(f, "archived"),
        }
    }
}

/// Database model for content
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Content {
    pub id: Uuid,
    pub category_id: Uuid,
    pub series_id: Option<Uuid>,
    pub author_id: Option<Uuid>,
    pub slug: String,
    pub title: serde_json::Value,
    pub body: Option<serde_json::Value>,
    pub status: ContentStatus,
    pub series_position: Option<i32>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable content record
#[derive(Debug, Clone)]
pub struct NewContent {
    pub category_id: Uuid,
    pub series_id: Option<Uuid>,
    pub author_id: Option<Uuid>,
    pub slug: String,
    pub title: serde_json::Value,
    pub body: Option<serde_json::Value>,
    pub status: ContentStatus,
    pub series_position: Option<i32>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Partial update; `None` fields keep the current value
#[derive(Debug, Clone, Default)]
pub struct ContentChanges {
    pub category_id: Option<Uuid>,
    pub series_id: Option<Uuid>,
    pub slug: Option<String>,
    pub title: Option<serde_json::Value>,
    pub body: Option<serde_json::Value>,
    pub status: Option<ContentStatus>,
    pub series_position: Option<i32>,
    pub published_at: Option<DateTime<Utc>>,
}
