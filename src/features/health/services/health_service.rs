use sqlx::PgPool;

use crate::core::database;
use crate::core::error::{AppError, Result};
use crate::features::health::dtos::{
    DatabaseHealthDto, DetailedHealthDto, HealthStatus, PoolStatusDto,
};

/// Service backing the health endpoints
pub struct HealthService {
    pool: PgPool,
    app_name: String,
    app_version: String,
}

impl HealthService {
    pub fn new(pool: PgPool, app_name: String, app_version: String) -> Self {
        Self {
            pool,
            app_name,
            app_version,
        }
    }

    /// Readiness: a single round-trip to the database
    pub async fn ready(&self) -> Result<()> {
        database::ping(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::ServiceUnavailable(format!("Database unreachable: {}", e)))
    }

    /// Detailed status: connectivity, measured query latency, pool
    /// occupancy. Never errors; failures are reported in the payload.
    pub async fn detailed(&self) -> DetailedHealthDto {
        let pool_status = database::pool_status(&self.pool);
        let pool = PoolStatusDto {
            size: pool_status.size,
            idle: pool_status.idle,
            max: pool_status.max,
        };

        let database = match database::ping(&self.pool).await {
            Ok(latency) => DatabaseHealthDto {
                connected: true,
                latency_ms: Some(latency.as_millis() as u64),
                error: None,
                pool,
            },
            Err(e) => {
                tracing::warn!("Health probe failed: {:?}", e);
                DatabaseHealthDto {
                    connected: false,
                    latency_ms: None,
                    error: Some(e.to_string()),
                    pool,
                }
            }
        };

        let status = if database.connected {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        DetailedHealthDto {
            status,
            app_name: self.app_name.clone(),
            app_version: self.app_version.clone(),
            database,
        }
    }
}
