use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::dtos::{
    CategoryDeletionDto, CategoryResponseDto, CategoryStatisticsDto, CreateCategoryDto,
    DeleteCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::routes::CategoriesState;
use crate::shared::types::ApiResponse;

/// Query params for listing categories
#[derive(Debug, Deserialize)]
pub struct ListCategoriesQuery {
    /// If true, return tree structure. Default: false (flat list)
    #[serde(default)]
    pub tree: bool,
}

/// List all active categories
///
/// Returns categories as flat list or tree structure based on `tree` query param.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    params(
        ("tree" = Option<bool>, Query, description = "Return tree structure if true")
    ),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryResponseDto>>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(state): State<CategoriesState>,
    Query(query): Query<ListCategoriesQuery>,
) -> Result<Json<ApiResponse<serde_json::Value>>> {
    if query.tree {
        let tree = state.categories.list_tree().await?;
        let value = serde_json::to_value(tree).unwrap();
        Ok(Json(ApiResponse::success(Some(value), None, None)))
    } else {
        let categories = state.categories.list().await?;
        let value = serde_json::to_value(categories).unwrap();
        Ok(Json(ApiResponse::success(Some(value), None, None)))
    }
}

/// Get category by slug
#[utoipa::path(
    get,
    path = "/api/v1/categories/slug/{slug}",
    params(
        ("slug" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(state): State<CategoriesState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = state.categories.get_by_slug(&slug).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Get the derived counters for a category
///
/// Counters trail the source tables until the statistics task catches up.
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}/statistics",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category statistics", body = ApiResponse<CategoryStatisticsDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category_statistics(
    State(state): State<CategoriesState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CategoryStatisticsDto>>> {
    let stats = state.statistics.get(id).await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 200, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Slug already in use")
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn create_category(
    State(state): State<CategoriesState>,
    user: AuthenticatedUser,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = state.categories.create(dto, &user).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found")
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn update_category(
    State(state): State<CategoriesState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = state.categories.update(id, dto, &user).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Delete a category, resolving dependents per the caller's policies
///
/// Content and subcategories are reassigned to the target category or
/// removed, then cleanup, audit, statistics and reindex tasks are
/// scheduled. The response reports the actions taken and the number of
/// scheduled tasks.
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    request_body = DeleteCategoryDto,
    responses(
        (status = 200, description = "Category deleted", body = ApiResponse<CategoryDeletionDto>),
        (status = 400, description = "Invalid policy or target"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Destructive deletion requires force")
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn delete_category(
    State(state): State<CategoriesState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<DeleteCategoryDto>,
) -> Result<Json<ApiResponse<CategoryDeletionDto>>> {
    let result = state.deletion.delete(id, dto, &user).await?;
    let message = result.message.clone();
    Ok(Json(ApiResponse::success(Some(result), Some(message), None)))
}
