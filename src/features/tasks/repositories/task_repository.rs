use sqlx::PgConnection;
use uuid::Uuid;

use crate::features::tasks::models::{BackgroundTask, TaskRequest};

const TASK_COLUMNS: &str = "id, task_type, payload, status, attempts, last_error, \
     scheduled_at, started_at, finished_at, created_at";

/// Insert one outbox row. Callers run this on the same connection as the
/// mutation being recorded so the row commits (or rolls back) with it.
pub async fn insert(conn: &mut PgConnection, request: &TaskRequest) -> sqlx::Result<BackgroundTask> {
    let sql = format!(
        r#"
        INSERT INTO background_tasks (task_type, payload)
        VALUES ($1, $2)
        RETURNING {TASK_COLUMNS}
        "#
    );

    sqlx::query_as::<_, BackgroundTask>(&sql)
        .bind(request.task_type)
        .bind(&request.payload)
        .fetch_one(conn)
        .await
}

/// Insert a batch of outbox rows; returns how many were written
pub async fn insert_all(
    conn: &mut PgConnection,
    requests: &[TaskRequest],
) -> sqlx::Result<usize> {
    for request in requests {
        insert(&mut *conn, request).await?;
    }
    Ok(requests.len())
}

/// Claim a batch of due pending tasks. `SKIP LOCKED` keeps concurrent
/// workers from double-claiming a row.
pub async fn claim_batch(
    conn: &mut PgConnection,
    batch_size: i64,
) -> sqlx::Result<Vec<BackgroundTask>> {
    let sql = format!(
        r#"
        UPDATE background_tasks
        SET status = 'running', attempts = attempts + 1, started_at = NOW()
        WHERE id IN (
            SELECT id FROM background_tasks
            WHERE status = 'pending' AND scheduled_at <= NOW()
            ORDER BY scheduled_at
            LIMIT $1
            FOR UPDATE SKIP LOCKED
        )
        RETURNING {TASK_COLUMNS}
        "#
    );

    sqlx::query_as::<_, BackgroundTask>(&sql)
        .bind(batch_size)
        .fetch_all(conn)
        .await
}

pub async fn mark_completed(conn: &mut PgConnection, id: Uuid) -> sqlx::Result<()> {
    sqlx::query(
        "UPDATE background_tasks SET status = 'completed', finished_at = NOW() WHERE id = $1",
    )
    .bind(id)
    .execute(conn)
    .await?;

    Ok(())
}

/// Record a failed attempt: park the row as `failed` once the attempt
/// ceiling is reached, otherwise push it back to `pending` with a delay.
pub async fn mark_failed(
    conn: &mut PgConnection,
    id: Uuid,
    attempts: i32,
    max_attempts: i32,
    error: &str,
) -> sqlx::Result<()> {
    if attempts >= max_attempts {
        sqlx::query(
            r#"
            UPDATE background_tasks
            SET status = 'failed', last_error = $2, finished_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(error)
        .execute(conn)
        .await?;
    } else {
        sqlx::query(
            r#"
            UPDATE background_tasks
            SET status = 'pending', last_error = $2,
                scheduled_at = NOW() + INTERVAL '30 seconds'
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(error)
        .execute(conn)
        .await?;
    }

    Ok(())
}
