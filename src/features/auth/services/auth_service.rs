use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::AuthResponseDto;
use crate::features::auth::password;
use crate::features::auth::services::TokenService;
use crate::features::users::services::UserService;

/// Service for credential verification and token issuance
pub struct AuthService {
    users: Arc<UserService>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<UserService>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    pub async fn login(&self, username: &str, plain_password: &str) -> Result<AuthResponseDto> {
        let user = self
            .users
            .find_credentials(username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

        if !password::verify(plain_password, &user.password_hash)? {
            return Err(AppError::Unauthorized(
                "Invalid username or password".to_string(),
            ));
        }

        if !user.is_active {
            return Err(AppError::Forbidden("Account is disabled".to_string()));
        }

        let issued = self.tokens.issue(&user)?;

        tracing::info!("Login: user={}", user.username);

        Ok(AuthResponseDto {
            access_token: issued.token,
            token_type: "Bearer".to_string(),
            expires_in: issued.expires_in,
            user: user.into(),
        })
    }
}
