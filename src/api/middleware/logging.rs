//! # Request Logging
//!
//! Per-request access log with a propagated request id.
//!
//! Every request gets an `X-Request-ID`, taken from the incoming header
//! when present and generated otherwise. The id is echoed on the response
//! and recorded on the request span, and the completed request is logged
//! with method, path, status and latency. Client errors log at `warn`,
//! server errors at `error`.
//!
//! # Usage
//!
//! ```ignore
//! use pfe_dashboard::api::middleware::logging::{create_logging_state, logging_middleware};
//!
//! let app = Router::new()
//!     .route("/api/health", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(
//!         create_logging_state(),
//!         logging_middleware,
//!     ));
//! ```

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Span, debug, error, info, instrument, warn};
use uuid::Uuid;

// ============================================================================
// Configuration
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Whether to log request headers at debug level.
    pub log_headers: bool,
    /// Headers to redact from logs.
    pub redacted_headers: Vec<String>,
    /// Whether to generate request IDs.
    pub generate_request_id: bool,
    /// Header name for request ID.
    pub request_id_header: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_headers: false,
            redacted_headers: vec!["authorization".to_string(), "cookie".to_string()],
            generate_request_id: true,
            request_id_header: "X-Request-ID".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Creates a new logging config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables header logging.
    #[must_use]
    pub fn with_headers(mut self) -> Self {
        self.log_headers = true;
        self
    }

    /// Disables request ID generation.
    #[must_use]
    pub fn without_request_id(mut self) -> Self {
        self.generate_request_id = false;
        self
    }

    /// Sets a custom request ID header name.
    #[must_use]
    pub fn with_request_id_header(mut self, header: impl Into<String>) -> Self {
        self.request_id_header = header.into();
        self
    }
}

// ============================================================================
// Request ID
// ============================================================================

/// A unique request identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(pub String);

impl RequestId {
    /// Generates a new random request ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Creates a request ID from an existing string.
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the request ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Redacts sensitive values from headers.
#[must_use]
pub fn redact_headers(headers: &HeaderMap, redacted_names: &[String]) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let value_str = if redacted_names
                .iter()
                .any(|r| r.eq_ignore_ascii_case(name.as_str()))
            {
                "[REDACTED]".to_string()
            } else {
                value.to_str().unwrap_or("[invalid utf8]").to_string()
            };
            (name.as_str().to_string(), value_str)
        })
        .collect()
}

// ============================================================================
// Logging State
// ============================================================================

/// Shared state for logging middleware.
#[derive(Debug, Clone, Default)]
pub struct LoggingState {
    /// Configuration.
    pub config: LoggingConfig,
}

impl LoggingState {
    /// Creates a new logging state.
    #[must_use]
    pub fn new(config: LoggingConfig) -> Self {
        Self { config }
    }
}

/// Creates a logging state with the default config.
#[must_use]
pub fn create_logging_state() -> Arc<LoggingState> {
    Arc::new(LoggingState::default())
}

// ============================================================================
// Middleware
// ============================================================================

/// Logging middleware function.
#[instrument(skip_all, fields(request_id))]
pub async fn logging_middleware(
    State(state): State<Arc<LoggingState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let config = &state.config;

    let request_id = if config.generate_request_id {
        request
            .headers()
            .get(config.request_id_header.as_str())
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(RequestId::from_string)
            .unwrap_or_default()
    } else {
        RequestId::from_string("none")
    };

    Span::current().record("request_id", request_id.as_str());
    request.extensions_mut().insert(request_id.clone());

    let method = request.method().clone();
    let path = request.uri().path().to_string();

    if config.log_headers {
        let headers = redact_headers(request.headers(), &config.redacted_headers);
        debug!(%method, %path, headers = ?headers, "Request headers");
    }
    debug!(%method, %path, query = ?request.uri().query(), "Request started");

    let mut response = next.run(request).await;
    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    if config.generate_request_id
        && let Ok(value) = HeaderValue::from_str(request_id.as_str())
        && let Ok(name) = HeaderName::from_bytes(config.request_id_header.as_bytes())
    {
        response.headers_mut().insert(name, value);
    }

    let status = response.status();
    if status.is_client_error() {
        warn!(%method, %path, status = status.as_u16(), duration_ms, "Client error");
    } else if status.is_server_error() {
        error!(%method, %path, status = status.as_u16(), duration_ms, "Server error");
    } else {
        info!(%method, %path, status = status.as_u16(), duration_ms, "Request completed");
    }

    response
}
