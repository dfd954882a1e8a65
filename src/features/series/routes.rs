use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::series::handlers::series_handler;
use crate::features::series::services::SeriesService;

/// Read endpoints, no authentication required
pub fn public_routes(service: Arc<SeriesService>) -> Router {
    Router::new()
        .route("/api/v1/series", get(series_handler::list_series))
        .route("/api/v1/series/slug/{slug}", get(series_handler::get_series))
        .with_state(service)
}

/// Mutating endpoints, mounted behind the JWT middleware
pub fn protected_routes(service: Arc<SeriesService>) -> Router {
    Router::new()
        .route("/api/v1/series", post(series_handler::create_series))
        .route(
            "/api/v1/series/{id}",
            axum::routing::put(series_handler::update_series)
                .delete(series_handler::delete_series),
        )
        .with_state(service)
}
