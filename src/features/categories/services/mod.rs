mod category_service;
mod deletion_service;
mod statistics_service;

pub use category_service::CategoryService;
pub use deletion_service::CategoryDeletionService;
pub use statistics_service::CategoryStatisticsService;
