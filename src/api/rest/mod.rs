//! # REST API
//!
//! axum handlers and routes for the dashboard's read endpoints.

pub mod handlers;
pub mod routes;

pub use handlers::{AppState, ErrorResponse, HealthResponse};
pub use routes::create_router;
