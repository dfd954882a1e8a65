use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::core::middleware;
use crate::features::auth::services::TokenService;
use crate::features::content::handlers::content_handler;
use crate::features::content::services::ContentService;

/// Read endpoints. Anonymous access is fine; a valid bearer token widens
/// the visible statuses, so the optional auth layer runs here.
pub fn public_routes(service: Arc<ContentService>, tokens: Arc<TokenService>) -> Router {
    Router::new()
        .route("/api/v1/content", get(content_handler::list_content))
        .route(
            "/api/v1/content/slug/{slug}",
            get(content_handler::get_content),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            tokens,
            middleware::optional_auth_middleware,
        ))
        .with_state(service)
}

/// Mutating endpoints, mounted behind the JWT middleware
pub fn protected_routes(service: Arc<ContentService>) -> Router {
    Router::new()
        .route("/api/v1/content", post(content_handler::create_content))
        .route(
            "/api/v1/content/{id}",
            axum::routing::put(content_handler::update_content)
                .delete(content_handler::delete_content),
        )
        .with_state(service)
}
