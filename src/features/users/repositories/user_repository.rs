use sqlx::PgConnection;
use uuid::Uuid;

use crate::features::users::models::{NewUser, User, UserRole};

const USER_COLUMNS: &str =
    "id, username, email, password_hash, display_name, role, is_active, created_at, updated_at";

pub async fn insert(conn: &mut PgConnection, new: &NewUser) -> sqlx::Result<User> {
    let sql = format!(
        r#"
        INSERT INTO users (username, email, password_hash, display_name, role)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {USER_COLUMNS}
        "#
    );

    sqlx::query_as::<_, User>(&sql)
        .bind(&new.username)
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(&new.display_name)
        .bind(new.role)
        .fetch_one(conn)
        .await
}

pub async fn find_by_id(conn: &mut PgConnection, id: Uuid) -> sqlx::Result<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

    sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await
}

pub async fn find_by_username(
    conn: &mut PgConnection,
    username: &str,
) -> sqlx::Result<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");

    sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(conn)
        .await
}

pub async fn username_or_email_taken(
    conn: &mut PgConnection,
    username: &str,
    email: &str,
) -> sqlx::Result<bool> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM users WHERE username = $1 OR email = $2)",
    )
    .bind(username)
    .bind(email)
    .fetch_one(conn)
    .await
}

pub async fn list(conn: &mut PgConnection, limit: i64, offset: i64) -> sqlx::Result<Vec<User>> {
    let sql = format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2"
    );

    sqlx::query_as::<_, User>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(conn)
        .await
}

pub async fn count(conn: &mut PgConnection) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(conn)
        .await
}

/// Partial update: NULL binds keep the current column value
pub async fn update(
    conn: &mut PgConnection,
    id: Uuid,
    email: Option<&str>,
    display_name: Option<&str>,
    role: Option<UserRole>,
    is_active: Option<bool>,
    password_hash: Option<&str>,
) -> sqlx::Result<Option<User>> {
    let sql = format!(
        r#"
        UPDATE users
        SET email = COALESCE($2, email),
            display_name = COALESCE($3, display_name),
            role = COALESCE($4, role),
            is_active = COALESCE($5, is_active),
            password_hash = COALESCE($6, password_hash),
            updated_at = NOW()
        WHERE id = $1
        RETURNING {USER_COLUMNS}
        "#
    );

    sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .bind(email)
        .bind(display_name)
        .bind(role)
        .bind(is_active)
        .bind(password_hash)
        .fetch_optional(conn)
        .await
}

pub async fn deactivate(conn: &mut PgConnection, id: Uuid) -> sqlx::Result<u64> {
    let result =
        sqlx::query("UPDATE users SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;

    Ok(result.rows_affected())
}
