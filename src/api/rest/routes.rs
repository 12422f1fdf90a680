//! # REST Routes
//!
//! Route definitions for the REST API.
//!
//! # Route Structure
//!
//! ```text
//! /api
//! ├── /health                              GET - Health check
//! └── /{engine}                            f22 | quic
//!     ├── /fxforward                       GET - Page of trades
//!     │   ├── /pfe-standalone              GET - PFE averages per horizon
//!     │   └── /trades-pfe                  GET - Trades with 5/15/30-day PFE
//!     └── /counterparties-transactions     GET - Counterparty tree
//! ```

use crate::api::middleware::logging::{LoggingState, logging_middleware};
use crate::api::rest::handlers::{
    AppState, counterparties_transactions, health_check, list_trades, pfe_standalone, trades_pfe,
};
use axum::{Router, middleware, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

fn api_routes() -> Router<Arc<AppState>> {
    let engine_routes = Router::new()
        .route("/fxforward", get(list_trades))
        .route("/fxforward/pfe-standalone", get(pfe_standalone))
        .route("/fxforward/trades-pfe", get(trades_pfe))
        .route(
            "/counterparties-transactions",
            get(counterparties_transactions),
        );

    Router::new()
        .route("/health", get(health_check))
        .nest("/{engine}", engine_routes)
}

/// Creates the REST API router with all endpoints.
///
/// Request logging, HTTP tracing and permissive CORS are layered over the
/// routes.
pub fn create_router(state: Arc<AppState>, logging: Arc<LoggingState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(middleware::from_fn_with_state(logging, logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Creates a minimal router for testing without middleware.
#[cfg(test)]
pub fn create_test_router(state: Arc<AppState>) -> Router {
    Router::new().nest("/api", api_routes()).with_state(state)
}
