use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::search::handlers::search_handler;
use crate::features::search::services::SearchIndexService;

/// Create routes for search (public)
pub fn routes(service: Arc<SearchIndexService>) -> Router {
    Router::new()
        .route("/api/v1/content/search", get(search_handler::search))
        .with_state(service)
}
