use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::users::models::{User, UserRole};

/// Request DTO for creating a user (admin only)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[validate(length(min = 3, max = 64, message = "Username must be 3-64 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[validate(length(max = 255, message = "Display name must not exceed 255 characters"))]
    pub display_name: Option<String>,

    pub role: UserRole,
}

/// Request DTO for updating a user (admin only)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 255, message = "Display name must not exceed 255 characters"))]
    pub display_name: Option<String>,

    pub role: Option<UserRole>,

    pub is_active: Option<bool>,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: Option<String>,
}

/// Response DTO for user (never exposes the password hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            display_name: u.display_name,
            role: u.role,
            is_active: u.is_active,
            created_at: u.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::FreeEmail;
    use fake::Fake;
    use validator::Validate;

    #[test]
    fn test_create_user_dto_accepts_generated_emails() {
        for _ in 0..10 {
            let dto = CreateUserDto {
                username: "editor-account".to_string(),
                email: FreeEmail().fake(),
                password: "long enough password".to_string(),
                display_name: None,
                role: UserRole::Editor,
            };
            assert!(dto.validate().is_ok());
        }
    }

    #[test]
    fn test_create_user_dto_rejects_short_password() {
        let dto = CreateUserDto {
            username: "editor-account".to_string(),
            email: "editor@example.com".to_string(),
            password: "short".to_string(),
            display_name: None,
            role: UserRole::Editor,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_user_dto_rejects_bad_email() {
        let dto = UpdateUserDto {
            email: Some("not-an-email".to_string()),
            display_name: None,
            role: None,
            is_active: None,
            password: None,
        };
        assert!(dto.validate().is_err());
    }
}
