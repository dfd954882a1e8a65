//! Category feature: the hierarchical classification tree and the deletion
//! workflow that resolves dependents before a node is removed.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/v1/categories` | No | List (flat or `?tree=true`) |
//! | GET | `/api/v1/categories/slug/{slug}` | No | Lookup by slug |
//! | GET | `/api/v1/categories/{id}/statistics` | No | Derived counters |
//! | POST | `/api/v1/categories` | Yes | Create |
//! | PUT | `/api/v1/categories/{id}` | Yes | Update |
//! | DELETE | `/api/v1/categories/{id}` | Yes | Policy-driven deletion |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod seed;
pub mod services;

pub use routes::CategoriesState;
pub use services::{CategoryDeletionService, CategoryService, CategoryStatisticsService};
