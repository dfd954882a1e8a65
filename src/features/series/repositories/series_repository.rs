use sqlx::PgConnection;
use uuid::Uuid;

use crate::features::series::models::{NewSeries, Series, SeriesChanges};

const SERIES_COLUMNS: &str = "id, slug, title, description, is_active, created_at, updated_at";

pub async fn insert(conn: &mut PgConnection, new: &NewSeries) -> sqlx::Result<Series> {
    let sql = format!(
        r#"
        INSERT INTO series (slug, title, description)
        VALUES ($1, $2, $3)
        RETURNING {SERIES_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Series>(&sql)
        .bind(&new.slug)
        .bind(&new.title)
        .bind(&new.description)
        .fetch_one(conn)
        .await
}

pub async fn find_by_id(conn: &mut PgConnection, id: Uuid) -> sqlx::Result<Option<Series>> {
    let sql = format!("SELECT {SERIES_COLUMNS} FROM series WHERE id = $1");

    sqlx::query_as::<_, Series>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await
}

pub async fn find_by_slug_active(
    conn: &mut PgConnection,
    slug: &str,
) -> sqlx::Result<Option<Series>> {
    let sql = format!("SELECT {SERIES_COLUMNS} FROM series WHERE slug = $1 AND is_active = TRUE");

    sqlx::query_as::<_, Series>(&sql)
        .bind(slug)
        .fetch_optional(conn)
        .await
}

pub async fn list_active(conn: &mut PgConnection) -> sqlx::Result<Vec<Series>> {
    let sql =
        format!("SELECT {SERIES_COLUMNS} FROM series WHERE is_active = TRUE ORDER BY slug");

    sqlx::query_as::<_, Series>(&sql).fetch_all(conn).await
}

pub async fn exists_active(conn: &mut PgConnection, id: Uuid) -> sqlx::Result<bool> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM series WHERE id = $1 AND is_active = TRUE)",
    )
    .bind(id)
    .fetch_one(conn)
    .await
}

pub async fn slug_taken(conn: &mut PgConnection, slug: &str) -> sqlx::Result<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM series WHERE slug = $1)")
        .bind(slug)
        .fetch_one(conn)
        .await
}

pub async fn update(
    conn: &mut PgConnection,
    id: Uuid,
    changes: &SeriesChanges,
) -> sqlx::Result<Option<Series>> {
    let sql = format!(
        r#"
        UPDATE series
        SET slug = COALESCE($2, slug),
            title = COALESCE($3, title),
            description = COALESCE($4, description),
            is_active = COALESCE($5, is_active),
            updated_at = NOW()
        WHERE id = $1
        RETURNING {SERIES_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Series>(&sql)
        .bind(id)
        .bind(&changes.slug)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.is_active)
        .fetch_optional(conn)
        .await
}

/// Deleting a series detaches its content through the FK's SET NULL
pub async fn delete(conn: &mut PgConnection, id: Uuid) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM series WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
