mod background_task;
mod payloads;

pub use background_task::{BackgroundTask, TaskRequest, TaskStatus, TaskType};
pub use payloads::{AuditLogPayload, SearchReindexPayload, StatisticsRefreshPayload};
