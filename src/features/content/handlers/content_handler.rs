use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::content::dtos::{
    ContentListQuery, ContentResponseDto, CreateContentDto, UpdateContentDto,
};
use crate::features::content::repositories::ContentFilter;
use crate::features::content::services::ContentService;
use crate::shared::types::{ApiResponse, Meta};

/// List content
///
/// Anonymous callers see published content only; authenticated callers may
/// filter by any status.
#[utoipa::path(
    get,
    path = "/api/v1/content",
    params(ContentListQuery),
    responses(
        (status = 200, description = "List of content", body = ApiResponse<Vec<ContentResponseDto>>),
    ),
    tag = "content"
)]
pub async fn list_content(
    State(service): State<Arc<ContentService>>,
    user: Option<AuthenticatedUser>,
    Query(query): Query<ContentListQuery>,
) -> Result<Json<ApiResponse<Vec<ContentResponseDto>>>> {
    let filter = ContentFilter {
        category_id: query.category_id,
        series_id: query.series_id,
        status: query.status,
    };
    let pagination = query.pagination();

    let (content, total) = service
        .list(filter, pagination.limit(), pagination.offset(), user.is_some())
        .await?;

    Ok(Json(ApiResponse::success(
        Some(content),
        None,
        Some(Meta { total }),
    )))
}

/// Get content by slug
#[utoipa::path(
    get,
    path = "/api/v1/content/slug/{slug}",
    params(
        ("slug" = String, Path, description = "Content slug")
    ),
    responses(
        (status = 200, description = "Content found", body = ApiResponse<ContentResponseDto>),
        (status = 404, description = "Content not found")
    ),
    tag = "content"
)]
pub async fn get_content(
    State(service): State<Arc<ContentService>>,
    user: Option<AuthenticatedUser>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<ContentResponseDto>>> {
    let content = service.get_by_slug(&slug, user.is_some()).await?;
    Ok(Json(ApiResponse::success(Some(content), None, None)))
}

/// Create content
#[utoipa::path(
    post,
    path = "/api/v1/content",
    request_body = CreateContentDto,
    responses(
        (status = 200, description = "Content created", body = ApiResponse<ContentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Slug already in use")
    ),
    security(("bearer_auth" = [])),
    tag = "content"
)]
pub async fn create_content(
    State(service): State<Arc<ContentService>>,
    user: AuthenticatedUser,
    AppJson(dto): AppJson<CreateContentDto>,
) -> Result<Json<ApiResponse<ContentResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let content = service.create(dto, &user).await?;
    Ok(Json(ApiResponse::success(Some(content), None, None)))
}

/// Update content
#[utoipa::path(
    put,
    path = "/api/v1/content/{id}",
    params(
        ("id" = Uuid, Path, description = "Content id")
    ),
    request_body = UpdateContentDto,
    responses(
        (status = 200, description = "Content updated", body = ApiResponse<ContentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Content not found")
    ),
    security(("bearer_auth" = [])),
    tag = "content"
)]
pub async fn update_content(
    State(service): State<Arc<ContentService>>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateContentDto>,
) -> Result<Json<ApiResponse<ContentResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let content = service.update(id, dto, &user).await?;
    Ok(Json(ApiResponse::success(Some(content), None, None)))
}

/// Delete content
#[utoipa::path(
    delete,
    path = "/api/v1/content/{id}",
    params(
        ("id" = Uuid, Path, description = "Content id")
    ),
    responses(
        (status = 200, description = "Content deleted"),
        (status = 404, description = "Content not found")
    ),
    security(("bearer_auth" = [])),
    tag = "content"
)]
pub async fn delete_content(
    State(service): State<Arc<ContentService>>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id, &user).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Content deleted".to_string()),
        None,
    )))
}
