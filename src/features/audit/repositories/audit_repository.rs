use sqlx::PgConnection;

use crate::features::audit::models::AuditLog;
use crate::features::tasks::models::AuditLogPayload;

pub async fn insert(conn: &mut PgConnection, entry: &AuditLogPayload) -> sqlx::Result<AuditLog> {
    sqlx::query_as::<_, AuditLog>(
        r#"
        INSERT INTO audit_logs (actor_id, actor_name, action, entity_type, entity_id, detail)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, actor_id, actor_name, action, entity_type, entity_id, detail, created_at
        "#,
    )
    .bind(entry.actor_id)
    .bind(&entry.actor_name)
    .bind(&entry.action)
    .bind(&entry.entity_type)
    .bind(entry.entity_id)
    .bind(&entry.detail)
    .fetch_one(conn)
    .await
}
