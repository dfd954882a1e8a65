mod category_dto;
mod deletion_dto;

pub use category_dto::{
    CategoryResponseDto, CategoryStatisticsDto, CategoryTreeDto, CreateCategoryDto,
    UpdateCategoryDto,
};
pub use deletion_dto::{
    CategoryDeletionDto, ContentPolicy, DeleteCategoryDto, SubcategoryPolicy,
};
