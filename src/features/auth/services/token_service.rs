use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, Claims};
use crate::features::users::models::User;

/// Issued access token plus its lifetime in seconds
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: u64,
}

/// Issues and verifies locally-signed HS256 access tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl_secs: u64,
    leeway_secs: u64,
}

impl TokenService {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            token_ttl_secs: config.token_ttl.as_secs(),
            leeway_secs: config.jwt_leeway.as_secs(),
        }
    }

    pub fn issue(&self, user: &User) -> Result<IssuedToken> {
        let now = Utc::now().timestamp() as u64;
        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            role: user.role,
            iat: now,
            exp: now + self.token_ttl_secs,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))?;

        Ok(IssuedToken {
            token,
            expires_in: self.token_ttl_secs,
        })
    }

    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway_secs;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let claims = token_data.claims;
        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Auth("Invalid subject claim".to_string()))?;

        Ok(AuthenticatedUser {
            id,
            username: claims.username,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::models::UserRole;
    use std::time::Duration;

    fn test_service(ttl_secs: u64) -> TokenService {
        TokenService::new(AuthConfig {
            jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
            token_ttl: Duration::from_secs(ttl_secs),
            jwt_leeway: Duration::from_secs(0),
            bootstrap_admin_password: None,
        })
    }

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "editor".to_string(),
            email: "editor@example.com".to_string(),
            password_hash: String::new(),
            display_name: None,
            role: UserRole::Editor,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_then_verify_round_trip() {
        let service = test_service(3600);
        let user = test_user();

        let issued = service.issue(&user).unwrap();
        assert_eq!(issued.expires_in, 3600);

        let principal = service.verify(&issued.token).unwrap();
        assert_eq!(principal.id, user.id);
        assert_eq!(principal.username, "editor");
        assert_eq!(principal.role, UserRole::Editor);
    }

    #[test]
    fn test_verify_rejects_tampered_token() {
        let service = test_service(3600);
        let issued = service.issue(&test_user()).unwrap();

        let mut tampered = issued.token.clone();
        tampered.push('x');
        assert!(service.verify(&tampered).is_err());
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let issued = test_service(3600).issue(&test_user()).unwrap();

        let other = TokenService::new(AuthConfig {
            jwt_secret: "ffffffffffffffffffffffffffffffff".to_string(),
            token_ttl: Duration::from_secs(3600),
            jwt_leeway: Duration::from_secs(0),
            bootstrap_admin_password: None,
        });
        assert!(other.verify(&issued.token).is_err());
    }
}
