use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a search document. One row per entity and language,
/// rebuilt by the `search_reindex` background task.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct SearchDocument {
    pub id: Uuid,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub language: String,
    pub title: String,
    pub body: Option<String>,
    pub updated_at: DateTime<Utc>,
}
