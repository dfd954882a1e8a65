mod content_dto;

pub use content_dto::{
    ContentListQuery, ContentResponseDto, CreateContentDto, UpdateContentDto,
};
