//! Background task outbox.
//!
//! Mutating services write task rows inside their own transaction; the
//! polling worker drains them after commit. This keeps scheduling durable
//! while the effects stay asynchronous and advisory.

pub mod models;
pub mod repositories;
pub mod workers;

pub use workers::TaskWorker;
