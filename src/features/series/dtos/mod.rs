mod series_dto;

pub use series_dto::{CreateSeriesDto, SeriesResponseDto, UpdateSeriesDto};
