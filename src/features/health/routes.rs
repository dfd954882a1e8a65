use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::health::handlers::health_handler;
use crate::features::health::services::HealthService;

/// Create routes for health probes (public)
pub fn routes(service: Arc<HealthService>) -> Router {
    Router::new()
        .route("/health", get(health_handler::liveness))
        .route("/api/v1/health/ready", get(health_handler::readiness))
        .route("/api/v1/health/detailed", get(health_handler::detailed))
        .with_state(service)
}
