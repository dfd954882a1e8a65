use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload for `TaskType::AuditLog`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogPayload {
    pub actor_id: Option<Uuid>,
    pub actor_name: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<Uuid>,
    #[serde(default)]
    pub detail: serde_json::Value,
}

/// Payload for `TaskType::StatisticsRefresh`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsRefreshPayload {
    pub category_id: Uuid,
}

/// Payload for `TaskType::SearchReindex`. A missing root means a full rebuild.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReindexPayload {
    pub root_category_id: Option<Uuid>,
}
