//! User account management feature.
//!
//! Accounts are local (username + argon2 password hash) and carry a role
//! used for authorization: admins manage accounts, editors manage content.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/v1/users` | Admin | Create account |
//! | GET | `/api/v1/users` | Admin | List accounts |
//! | GET | `/api/v1/users/{id}` | Admin | Get account |
//! | PUT | `/api/v1/users/{id}` | Admin | Update account |
//! | DELETE | `/api/v1/users/{id}` | Admin | Deactivate account |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::UserService;
