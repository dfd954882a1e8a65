use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::search::dtos::{SearchHitDto, SearchQuery};
use crate::features::search::services::SearchIndexService;
use crate::shared::types::ApiResponse;

/// Search published content and categories
///
/// Matches are accent-insensitive and tolerate typos via trigram
/// similarity. Results reflect the last index rebuild.
#[utoipa::path(
    get,
    path = "/api/v1/content/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Search hits", body = ApiResponse<Vec<SearchHitDto>>),
        (status = 400, description = "Invalid query")
    ),
    tag = "search"
)]
pub async fn search(
    State(service): State<Arc<SearchIndexService>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<SearchHitDto>>>> {
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let hits = service.search(&query.q, query.clamped_limit()).await?;
    Ok(Json(ApiResponse::success(Some(hits), None, None)))
}
