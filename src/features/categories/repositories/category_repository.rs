use sqlx::PgConnection;
use uuid::Uuid;

use crate::features::categories::models::{Category, CategoryChanges, NewCategory};

const CATEGORY_COLUMNS: &str = "id, parent_id, slug, name, description, kind, \
     is_visible, is_active, sort_order, created_at, updated_at";

pub async fn insert(conn: &mut PgConnection, new: &NewCategory) -> sqlx::Result<Category> {
    let sql = format!(
        r#"
        INSERT INTO categories (parent_id, slug, name, description, kind, is_visible, sort_order)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {CATEGORY_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Category>(&sql)
        .bind(new.parent_id)
        .bind(&new.slug)
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.kind)
        .bind(new.is_visible)
        .bind(new.sort_order)
        .fetch_one(conn)
        .await
}

pub async fn find_by_id(conn: &mut PgConnection, id: Uuid) -> sqlx::Result<Option<Category>> {
    let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1");

    sqlx::query_as::<_, Category>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await
}

/// Row-locked lookup used by the deletion workflow so concurrent deletions
/// of the same node serialize
pub async fn find_by_id_for_update(
    conn: &mut PgConnection,
    id: Uuid,
) -> sqlx::Result<Option<Category>> {
    let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1 FOR UPDATE");

    sqlx::query_as::<_, Category>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await
}

pub async fn find_by_slug_active(
    conn: &mut PgConnection,
    slug: &str,
) -> sqlx::Result<Option<Category>> {
    let sql =
        format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE slug = $1 AND is_active = TRUE");

    sqlx::query_as::<_, Category>(&sql)
        .bind(slug)
        .fetch_optional(conn)
        .await
}

pub async fn list_active(conn: &mut PgConnection) -> sqlx::Result<Vec<Category>> {
    let sql = format!(
        "SELECT {CATEGORY_COLUMNS} FROM categories WHERE is_active = TRUE ORDER BY sort_order, slug"
    );

    sqlx::query_as::<_, Category>(&sql).fetch_all(conn).await
}

pub async fn exists_active(conn: &mut PgConnection, id: Uuid) -> sqlx::Result<bool> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM categories WHERE id = $1 AND is_active = TRUE)",
    )
    .bind(id)
    .fetch_one(conn)
    .await
}

pub async fn slug_taken(conn: &mut PgConnection, slug: &str) -> sqlx::Result<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM categories WHERE slug = $1)")
        .bind(slug)
        .fetch_one(conn)
        .await
}

pub async fn count(conn: &mut PgConnection) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
        .fetch_one(conn)
        .await
}

pub async fn update(
    conn: &mut PgConnection,
    id: Uuid,
    changes: &CategoryChanges,
) -> sqlx::Result<Option<Category>> {
    let sql = format!(
        r#"
        UPDATE categories
        SET parent_id = COALESCE($2, parent_id),
            slug = COALESCE($3, slug),
            name = COALESCE($4, name),
            description = COALESCE($5, description),
            kind = COALESCE($6, kind),
            is_visible = COALESCE($7, is_visible),
            is_active = COALESCE($8, is_active),
            sort_order = COALESCE($9, sort_order),
            updated_at = NOW()
        WHERE id = $1
        RETURNING {CATEGORY_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Category>(&sql)
        .bind(id)
        .bind(changes.parent_id)
        .bind(&changes.slug)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.kind)
        .bind(changes.is_visible)
        .bind(changes.is_active)
        .bind(changes.sort_order)
        .fetch_optional(conn)
        .await
}

/// All descendant ids of a category (the category itself excluded)
pub async fn collect_descendant_ids(
    conn: &mut PgConnection,
    id: Uuid,
) -> sqlx::Result<Vec<Uuid>> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        WITH RECURSIVE subtree AS (
            SELECT id FROM categories WHERE parent_id = $1
            UNION ALL
            SELECT c.id FROM categories c
            JOIN subtree s ON c.parent_id = s.id
        )
        SELECT id FROM subtree
        "#,
    )
    .bind(id)
    .fetch_all(conn)
    .await
}

pub async fn count_content_in(conn: &mut PgConnection, ids: &[Uuid]) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM content WHERE category_id = ANY($1)")
        .bind(ids)
        .fetch_one(conn)
        .await
}

pub async fn reassign_content(
    conn: &mut PgConnection,
    from_ids: &[Uuid],
    target_id: Uuid,
) -> sqlx::Result<u64> {
    let result = sqlx::query(
        "UPDATE content SET category_id = $2, updated_at = NOW() WHERE category_id = ANY($1)",
    )
    .bind(from_ids)
    .bind(target_id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

pub async fn delete_content_in(conn: &mut PgConnection, ids: &[Uuid]) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM content WHERE category_id = ANY($1)")
        .bind(ids)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

pub async fn reparent_children(
    conn: &mut PgConnection,
    of: Uuid,
    new_parent: Uuid,
) -> sqlx::Result<u64> {
    let result = sqlx::query(
        "UPDATE categories SET parent_id = $2, updated_at = NOW() WHERE parent_id = $1",
    )
    .bind(of)
    .bind(new_parent)
    .execute(conn)
    .await?;

    Ok(result.rows_affected())
}

/// Removes a whole id set in one statement; the self-referential FK is
/// NO ACTION, so parent and child rows may go together
pub async fn delete_many(conn: &mut PgConnection, ids: &[Uuid]) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM categories WHERE id = ANY($1)")
        .bind(ids)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete_one(conn: &mut PgConnection, id: Uuid) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
