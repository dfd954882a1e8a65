use sqlx::PgConnection;
use uuid::Uuid;

use crate::features::content::models::{Content, ContentChanges, ContentStatus, NewContent};

const CONTENT_COLUMNS: &str = "id, category_id, series_id, author_id, slug, title, body, \
     status, series_position, published_at, created_at, updated_at";

/// Optional filters applied to list/count queries
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentFilter {
    pub category_id: Option<Uuid>,
    pub series_id: Option<Uuid>,
    pub status: Option<ContentStatus>,
}

pub async fn insert(conn: &mut PgConnection, new: &NewContent) -> sqlx::Result<Content> {
    let sql = format!(
        r#"
        INSERT INTO content
            (category_id, series_id, author_id, slug, title, body, status,
             series_position, published_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {CONTENT_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Content>(&sql)
        .bind(new.category_id)
        .bind(new.series_id)
        .bind(new.author_id)
        .bind(&new.slug)
        .bind(&new.title)
        .bind(&new.body)
        .bind(new.status)
        .bind(new.series_position)
        .bind(new.published_at)
        .fetch_one(conn)
        .await
}

pub async fn find_by_id(conn: &mut PgConnection, id: Uuid) -> sqlx::Result<Option<Content>> {
    let sql = format!("SELECT {CONTENT_COLUMNS} FROM content WHERE id = $1");

    sqlx::query_as::<_, Content>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await
}

pub async fn find_by_slug(conn: &mut PgConnection, slug: &str) -> sqlx::Result<Option<Content>> {
    let sql = format!("SELECT {CONTENT_COLUMNS} FROM content WHERE slug = $1");

    sqlx::query_as::<_, Content>(&sql)
        .bind(slug)
        .fetch_optional(conn)
        .await
}

pub async fn slug_taken(conn: &mut PgConnection, slug: &str) -> sqlx::Result<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM content WHERE slug = $1)")
        .bind(slug)
        .fetch_one(conn)
        .await
}

pub async fn list(
    conn: &mut PgConnection,
    filter: &ContentFilter,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<Content>> {
    let sql = format!(
        r#"
        SELECT {CONTENT_COLUMNS} FROM content
        WHERE ($1::uuid IS NULL OR category_id = $1)
          AND ($2::uuid IS NULL OR series_id = $2)
          AND ($3::content_status IS NULL OR status = $3)
        ORDER BY COALESCE(published_at, created_at) DESC
        LIMIT $4 OFFSET $5
        "#
    );

    sqlx::query_as::<_, Content>(&sql)
        .bind(filter.category_id)
        .bind(filter.series_id)
        .bind(filter.status)
        .bind(limit)
        .bind(offset)
        .fetch_all(conn)
        .await
}

pub async fn count(conn: &mut PgConnection, filter: &ContentFilter) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM content
        WHERE ($1::uuid IS NULL OR category_id = $1)
          AND ($2::uuid IS NULL OR series_id = $2)
          AND ($3::content_status IS NULL OR status = $3)
        "#,
    )
    .bind(filter.category_id)
    .bind(filter.series_id)
    .bind(filter.status)
    .fetch_one(conn)
    .await
}

pub async fn update(
    conn: &mut PgConnection,
    id: Uuid,
    changes: &ContentChanges,
) -> sqlx::Result<Option<Content>> {
    let sql = format!(
        r#"
        UPDATE content
        SET category_id = COALESCE($2, category_id),
            series_id = COALESCE($3, series_id),
            slug = COALESCE($4, slug),
            title = COALESCE($5, title),
            body = COALESCE($6, body),
            status = COALESCE($7, status),
            series_position = COALESCE($8, series_position),
            published_at = COALESCE($9, published_at),
            updated_at = NOW()
        WHERE id = $1
        RETURNING {CONTENT_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Content>(&sql)
        .bind(id)
        .bind(changes.category_id)
        .bind(changes.series_id)
        .bind(&changes.slug)
        .bind(&changes.title)
        .bind(&changes.body)
        .bind(changes.status)
        .bind(changes.series_position)
        .bind(changes.published_at)
        .fetch_optional(conn)
        .await
}

pub async fn delete(conn: &mut PgConnection, id: Uuid) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM content WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
