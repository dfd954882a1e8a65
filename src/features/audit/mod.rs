//! Audit trail: rows are materialized by the `audit_log` background task,
//! never written on the request path.

pub mod models;
pub mod repositories;
