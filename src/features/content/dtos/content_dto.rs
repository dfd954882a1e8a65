use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::content::models::{Content, ContentStatus};
use crate::shared::types::PaginationQuery;

/// Request DTO for creating content
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContentDto {
    #[validate(regex(
        path = *crate::shared::validation::SLUG_REGEX,
        message = "Slug must be lowercase alphanumeric with hyphens"
    ))]
    pub slug: String,

    /// Localized titles, e.g. `{"en": "Hello", "fr": "Bonjour"}`
    #[validate(custom(function = crate::shared::validation::localized_map))]
    pub title: serde_json::Value,

    /// Localized bodies, same key shape as `title`
    pub body: Option<serde_json::Value>,

    pub category_id: Uuid,

    pub series_id: Option<Uuid>,

    pub series_position: Option<i32>,

    #[serde(default = "default_status")]
    pub status: ContentStatus,
}

fn default_status() -> ContentStatus {
    ContentStatus::Draft
}

/// Request DTO for updating content; omitted fields stay unchanged
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContentDto {
    #[validate(regex(
        path = *crate::shared::validation::SLUG_REGEX,
        message = "Slug must be lowercase alphanumeric with hyphens"
    ))]
    pub slug: Option<String>,

    #[validate(custom(function = crate::shared::validation::localized_map))]
    pub title: Option<serde_json::Value>,

    pub body: Option<serde_json::Value>,

    pub category_id: Option<Uuid>,

    pub series_id: Option<Uuid>,

    pub series_position: Option<i32>,

    pub status: Option<ContentStatus>,
}

/// Query params for listing content
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ContentListQuery {
    pub category_id: Option<Uuid>,
    pub series_id: Option<Uuid>,
    /// Only honored for authenticated callers; anonymous listing is always
    /// published-only
    pub status: Option<ContentStatus>,

    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    crate::shared::constants::DEFAULT_PAGE_SIZE
}

impl ContentListQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Response DTO for content
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentResponseDto {
    pub id: Uuid,
    pub category_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<Uuid>,
    pub slug: String,
    pub title: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    pub status: ContentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_position: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Content> for ContentResponseDto {
    fn from(c: Content) -> Self {
        Self {
            id: c.id,
            category_id: c.category_id,
            series_id: c.series_id,
            author_id: c.author_id,
            slug: c.slug,
            title: c.title,
            body: c.body,
            status: c.status,
            series_position: c.series_position,
            published_at: c.published_at,
            created_at: c.created_at,
        }
    }
}
