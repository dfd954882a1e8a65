mod health_dto;

pub use health_dto::{DatabaseHealthDto, DetailedHealthDto, HealthStatus, PoolStatusDto};
