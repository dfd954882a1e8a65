use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::auth::handlers::auth_handler;
use crate::features::auth::services::AuthService;

/// Routes that must stay outside the JWT middleware
pub fn public_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/v1/auth/login", post(auth_handler::login))
        .with_state(service)
}

/// Routes mounted behind the JWT middleware
pub fn protected_routes() -> Router {
    Router::new().route("/api/v1/auth/me", get(auth_handler::get_me))
}
