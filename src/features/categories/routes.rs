use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::{
    CategoryDeletionService, CategoryService, CategoryStatisticsService,
};

/// Shared state for the category routers
#[derive(Clone)]
pub struct CategoriesState {
    pub categories: Arc<CategoryService>,
    pub statistics: Arc<CategoryStatisticsService>,
    pub deletion: Arc<CategoryDeletionService>,
}

/// Read endpoints, no authentication required
pub fn public_routes(state: CategoriesState) -> Router {
    Router::new()
        .route("/api/v1/categories", get(handlers::list_categories))
        // static "slug" segment keeps this from clashing with the {id} routes
        .route("/api/v1/categories/slug/{slug}", get(handlers::get_category))
        .route(
            "/api/v1/categories/{id}/statistics",
            get(handlers::get_category_statistics),
        )
        .with_state(state)
}

/// Mutating endpoints, mounted behind the JWT middleware
pub fn protected_routes(state: CategoriesState) -> Router {
    Router::new()
        .route("/api/v1/categories", post(handlers::create_category))
        .route(
            "/api/v1/categories/{id}",
            axum::routing::put(handlers::update_category).delete(handlers::delete_category),
        )
        .with_state(state)
}
