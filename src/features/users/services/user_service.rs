use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::password;
use crate::features::users::dtos::{CreateUserDto, UpdateUserDto, UserResponseDto};
use crate::features::users::models::{NewUser, User, UserRole};
use crate::features::users::repositories::user_repository;

/// Service for user account management
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, dto: CreateUserDto) -> Result<UserResponseDto> {
        let mut conn = self.pool.acquire().await?;

        if user_repository::username_or_email_taken(&mut conn, &dto.username, &dto.email).await? {
            return Err(AppError::Conflict(format!(
                "Username '{}' or email already in use",
                dto.username
            )));
        }

        let password_hash = password::hash(&dto.password)?;
        let user = user_repository::insert(
            &mut conn,
            &NewUser {
                username: dto.username,
                email: dto.email,
                password_hash,
                display_name: dto.display_name,
                role: dto.role,
            },
        )
        .await?;

        tracing::info!("User created: id={}, username={}", user.id, user.username);

        Ok(user.into())
    }

    pub async fn get(&self, id: Uuid) -> Result<UserResponseDto> {
        let mut conn = self.pool.acquire().await?;

        user_repository::find_by_id(&mut conn, id)
            .await?
            .map(|u| u.into())
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", id)))
    }

    /// Returns (users, total) for pagination metadata
    pub async fn list(&self, limit: i64, offset: i64) -> Result<(Vec<UserResponseDto>, i64)> {
        let mut conn = self.pool.acquire().await?;

        let total = user_repository::count(&mut conn).await?;
        let users = user_repository::list(&mut conn, limit, offset).await?;

        Ok((users.into_iter().map(|u| u.into()).collect(), total))
    }

    pub async fn update(&self, id: Uuid, dto: UpdateUserDto) -> Result<UserResponseDto> {
        let mut conn = self.pool.acquire().await?;

        let password_hash = match &dto.password {
            Some(plain) => Some(password::hash(plain)?),
            None => None,
        };

        let user = user_repository::update(
            &mut conn,
            id,
            dto.email.as_deref(),
            dto.display_name.as_deref(),
            dto.role,
            dto.is_active,
            password_hash.as_deref(),
        )
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", id)))?;

        Ok(user.into())
    }

    /// Soft delete: the account row stays for audit attribution
    pub async fn deactivate(&self, id: Uuid) -> Result<()> {
        let mut conn = self.pool.acquire().await?;

        let affected = user_repository::deactivate(&mut conn, id).await?;
        if affected == 0 {
            return Err(AppError::NotFound(format!("User '{}' not found", id)));
        }

        tracing::info!("User deactivated: id={}", id);
        Ok(())
    }

    /// Lookup used by the auth service; includes inactive accounts so the
    /// caller can distinguish bad credentials from a disabled login
    pub async fn find_credentials(&self, username: &str) -> Result<Option<User>> {
        let mut conn = self.pool.acquire().await?;
        Ok(user_repository::find_by_username(&mut conn, username).await?)
    }

    /// Creates the initial admin account when the users table is empty.
    /// Idempotent: a populated table makes this a no-op.
    pub async fn ensure_bootstrap_admin(&self, initial_password: &str) -> Result<bool> {
        let mut conn = self.pool.acquire().await?;

        if user_repository::count(&mut conn).await? > 0 {
            return Ok(false);
        }

        let password_hash = password::hash(initial_password)?;
        let admin = user_repository::insert(
            &mut conn,
            &NewUser {
                username: "admin".to_string(),
                email: "admin@localhost".to_string(),
                password_hash,
                display_name: Some("Administrator".to_string()),
                role: UserRole::Admin,
            },
        )
        .await?;

        tracing::info!("Bootstrap admin account created: id={}", admin.id);
        Ok(true)
    }
}
