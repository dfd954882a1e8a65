use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{self, dtos as auth_dtos};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::content::{dtos as content_dtos, handlers::content_handler};
use crate::features::health::{dtos as health_dtos, handlers::health_handler};
use crate::features::search::{dtos as search_dtos, handlers::search_handler};
use crate::features::series::{dtos as series_dtos, handlers::series_handler};
use crate::features::users::{dtos as users_dtos, handlers::user_handler};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::auth_handler::login,
        auth::handlers::auth_handler::get_me,
        // Users (admin)
        user_handler::create_user,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::deactivate_user,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::get_category_statistics,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Content
        content_handler::list_content,
        content_handler::get_content,
        content_handler::create_content,
        content_handler::update_content,
        content_handler::delete_content,
        // Series
        series_handler::list_series,
        series_handler::get_series,
        series_handler::create_series,
        series_handler::update_series,
        series_handler::delete_series,
        // Search
        search_handler::search,
        // Health
        health_handler::liveness,
        health_handler::readiness,
        health_handler::detailed,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::AuthenticatedUser,
            auth_dtos::LoginRequestDto,
            auth_dtos::AuthResponseDto,
            ApiResponse<auth_dtos::AuthResponseDto>,
            ApiResponse<auth::model::AuthenticatedUser>,
            // Users
            users_dtos::CreateUserDto,
            users_dtos::UpdateUserDto,
            users_dtos::UserResponseDto,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryTreeDto,
            categories_dtos::CategoryStatisticsDto,
            categories_dtos::ContentPolicy,
            categories_dtos::SubcategoryPolicy,
            categories_dtos::DeleteCategoryDto,
            categories_dtos::CategoryDeletionDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<categories_dtos::CategoryStatisticsDto>,
            ApiResponse<categories_dtos::CategoryDeletionDto>,
            // Content
            content_dtos::CreateContentDto,
            content_dtos::UpdateContentDto,
            content_dtos::ContentResponseDto,
            ApiResponse<Vec<content_dtos::ContentResponseDto>>,
            ApiResponse<content_dtos::ContentResponseDto>,
            // Series
            series_dtos::CreateSeriesDto,
            series_dtos::UpdateSeriesDto,
            series_dtos::SeriesResponseDto,
            ApiResponse<Vec<series_dtos::SeriesResponseDto>>,
            ApiResponse<series_dtos::SeriesResponseDto>,
            // Search
            search_dtos::SearchHitDto,
            ApiResponse<Vec<search_dtos::SearchHitDto>>,
            // Health
            health_dtos::HealthStatus,
            health_dtos::PoolStatusDto,
            health_dtos::DatabaseHealthDto,
            health_dtos::DetailedHealthDto,
            ApiResponse<health_dtos::DetailedHealthDto>,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User account management (admin only)"),
        (name = "categories", description = "Hierarchical category tree and deletion workflow"),
        (name = "content", description = "Content items"),
        (name = "series", description = "Content series"),
        (name = "search", description = "Full-text and similarity search"),
        (name = "health", description = "Liveness, readiness and detailed status"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Lumen CMS API",
        version = "0.1.0",
        description = "Content management API",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
