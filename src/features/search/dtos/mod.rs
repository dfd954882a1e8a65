mod search_dto;

pub use search_dto::{SearchHitDto, SearchQuery};
