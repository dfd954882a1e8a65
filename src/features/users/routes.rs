use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::users::handlers::user_handler;
use crate::features::users::services::UserService;

/// Create routes for user account management (admin only, JWT protected)
pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route(
            "/api/v1/users",
            get(user_handler::list_users).post(user_handler::create_user),
        )
        .route(
            "/api/v1/users/{id}",
            get(user_handler::get_user)
                .put(user_handler::update_user)
                .delete(user_handler::deactivate_user),
        )
        .with_state(service)
}
