mod search_index_service;

pub use search_index_service::SearchIndexService;
