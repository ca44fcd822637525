//! HTTP surface of the Honolulu climate API.
//!
//! # Responsibility
//! - Expose the read-only climate routes as an axum `Router`.
//! - Define server configuration and the error-to-response mapping.

pub mod api;
pub mod config;
pub mod error;

pub use api::{create_router, AppState};
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult, ErrorResponse};
