use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::series::models::Series;

/// Request DTO for creating a series
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSeriesDto {
    #[validate(regex(
        path = *crate::shared::validation::SLUG_REGEX,
        message = "Slug must be lowercase alphanumeric with hyphens"
    ))]
    pub slug: String,

    #[validate(custom(function = crate::shared::validation::localized_map))]
    pub title: serde_json::Value,

    #[validate(custom(function = crate::shared::validation::localized_map))]
    pub description: Option<serde_json::Value>,
}

/// Request DTO for updating a series; omitted fields stay unchanged
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSeriesDto {
    #[validate(regex(
        path = *crate::shared::validation::SLUG_REGEX,
        message = "Slug must be lowercase alphanumeric with hyphens"
    ))]
    pub slug: Option<String>,

    #[validate(custom(function = crate::shared::validation::localized_map))]
    pub title: Option<serde_json::Value>,

    #[validate(custom(function = crate::shared::validation::localized_map))]
    pub description: Option<serde_json::Value>,

    pub is_active: Option<bool>,
}

/// Response DTO for a series
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeriesResponseDto {
    pub id: Uuid,
    pub slug: String,
    pub title: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<serde_json::Value>,
    pub is_active: bool,
}

impl From<Series> for SeriesResponseDto {
    fn from(s: Series) -> Self {
        Self {
            id: s.id,
            slug: s.slug,
            title: s.title,
            description: s.description,
            is_active: s.is_active,
        }
    }
}
