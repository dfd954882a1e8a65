use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a content series
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Series {
    pub id: Uuid,
    pub slug: String,
    pub title: serde_json::Value,
    pub description: Option<serde_json::Value>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable series record
#[derive(Debug, Clone)]
pub struct NewSeries {
    pub slug: String,
    pub title: serde_json::Value,
    pub description: Option<serde_json::Value>,
}

/// Partial update; `None` fields keep the current value
#[derive(Debug, Clone, Default)]
pub struct SeriesChanges {
    pub slug: Option<String>,
    pub title: Option<serde_json::Value>,
    pub description: Option<serde_json::Value>,
    pub is_active: Option<bool>,
}
