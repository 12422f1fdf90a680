//! # API Middleware
//!
//! Cross-cutting concerns for API requests.

pub mod auth;
pub mod logging;

pub use auth::{AuthConfig, JwtSessionProvider};
pub use logging::{LoggingConfig, LoggingState, logging_middleware};
