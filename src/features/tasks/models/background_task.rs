use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Task type enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "task_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    OrphanCleanup,
    AuditLog,
    StatisticsRefresh,
    SearchReindex,
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskType::OrphanCleanup => write!(f, "orphan_cleanup"),
            TaskType::AuditLog => write!(f, "audit_log"),
            TaskType::StatisticsRefresh => write!(f, "statistics_refresh"),
            TaskType::SearchReindex => write!(f, "search_reindex"),
        }
    }
}

/// Task status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "task_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

/// Database model for an outbox task row
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct BackgroundTask {
    pub id: Uuid,
    pub task_type: TaskType,
    pub payload: serde_json::Value,
    pub status: TaskStatus,
    pub attempts: i32,
    pub last_error: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A task to enqueue; built by services, written inside their transaction
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRequest {
    pub task_type: TaskType,
    pub payload: serde_json::Value,
}

impl TaskRequest {
    pub fn new(task_type: TaskType, payload: serde_json::Value) -> Self {
        Self { task_type, payload }
    }
}
