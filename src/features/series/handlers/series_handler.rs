use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::series::dtos::{CreateSeriesDto, SeriesResponseDto, UpdateSeriesDto};
use crate::features::series::services::SeriesService;
use crate::shared::types::ApiResponse;

/// List all active series
#[utoipa::path(
    get,
    path = "/api/v1/series",
    responses(
        (status = 200, description = "List of series", body = ApiResponse<Vec<SeriesResponseDto>>),
    ),
    tag = "series"
)]
pub async fn list_series(
    State(service): State<Arc<SeriesService>>,
) -> Result<Json<ApiResponse<Vec<SeriesResponseDto>>>> {
    let series = service.list().await?;
    Ok(Json(ApiResponse::success(Some(series), None, None)))
}

/// Get series by slug
#[utoipa::path(
    get,
    path = "/api/v1/series/slug/{slug}",
    params(
        ("slug" = String, Path, description = "Series slug")
    ),
    responses(
        (status = 200, description = "Series found", body = ApiResponse<SeriesResponseDto>),
        (status = 404, description = "Series not found")
    ),
    tag = "series"
)]
pub async fn get_series(
    State(service): State<Arc<SeriesService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<SeriesResponseDto>>> {
    let series = service.get_by_slug(&slug).await?;
    Ok(Json(ApiResponse::success(Some(series), None, None)))
}

/// Create a series
#[utoipa::path(
    post,
    path = "/api/v1/series",
    request_body = CreateSeriesDto,
    responses(
        (status = 200, description = "Series created", body = ApiResponse<SeriesResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Slug already in use")
    ),
    security(("bearer_auth" = [])),
    tag = "series"
)]
pub async fn create_series(
    State(service): State<Arc<SeriesService>>,
    user: AuthenticatedUser,
    AppJson(dto): AppJson<CreateSeriesDto>,
) -> Result<Json<ApiResponse<SeriesResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let series = service.create(dto, &user).await?;
    Ok(Json(ApiResponse::success(Some(series), None, None)))
}

/// Update a series
#[utoipa::path(
    put,
    path = "/api/v1/series/{id}",
    params(
        ("id" = Uuid, Path, description = "Series id")
    ),
    request_body = UpdateSeriesDto,
    responses(
        (status = 200, description = "Series updated", body = ApiResponse<SeriesResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Series not found")
    ),
    security(("bearer_auth" = [])),
    tag = "series"
)]
pub async fn update_series(
    State(service): State<Arc<SeriesService>>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateSeriesDto>,
) -> Result<Json<ApiResponse<SeriesResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let series = service.update(id, dto, &user).await?;
    Ok(Json(ApiResponse::success(Some(series), None, None)))
}

/// Delete a series, detaching its content
#[utoipa::path(
    delete,
    path = "/api/v1/series/{id}",
    params(
        ("id" = Uuid, Path, description = "Series id")
    ),
    responses(
        (status = 200, description = "Series deleted"),
        (status = 404, description = "Series not found")
    ),
    security(("bearer_auth" = [])),
    tag = "series"
)]
pub async fn delete_series(
    State(service): State<Arc<SeriesService>>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id, &user).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Series deleted".to_string()),
        None,
    )))
}
