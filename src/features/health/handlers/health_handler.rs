use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::core::error::Result;
use crate::features::health::dtos::{DetailedHealthDto, HealthStatus};
use crate::features::health::services::HealthService;
use crate::shared::types::ApiResponse;

/// Liveness probe: the process is up and serving
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Process is alive")
    ),
    tag = "health"
)]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe: the database answers a round-trip
#[utoipa::path(
    get,
    path = "/api/v1/health/ready",
    responses(
        (status = 200, description = "Ready to serve traffic"),
        (status = 503, description = "Database unreachable")
    ),
    tag = "health"
)]
pub async fn readiness(
    State(service): State<Arc<HealthService>>,
) -> Result<Json<ApiResponse<()>>> {
    service.ready().await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("ready".to_string()),
        None,
    )))
}

/// Detailed status: connectivity, query latency, pool occupancy
#[utoipa::path(
    get,
    path = "/api/v1/health/detailed",
    responses(
        (status = 200, description = "Service healthy", body = ApiResponse<DetailedHealthDto>),
        (status = 503, description = "Service unhealthy", body = ApiResponse<DetailedHealthDto>)
    ),
    tag = "health"
)]
pub async fn detailed(State(service): State<Arc<HealthService>>) -> Response {
    let report = service.detailed().await;

    let status = match report.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(ApiResponse::success(Some(report), None, None))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_liveness_returns_ok() {
        let app = Router::new().route("/health", get(liveness));
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;
        response.assert_status_ok();
    }
}
