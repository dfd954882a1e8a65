pub mod content_repository;

pub use content_repository::ContentFilter;
