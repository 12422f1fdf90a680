//! # REST Handlers
//!
//! Request handlers for REST endpoints.
//!
//! Handlers are thin: they resolve the engine from the path, hand the
//! request's credentials and query to a use case and map
//! [`ApplicationError`] to a status code and `{error}` body.
//!
//! # Endpoints
//!
//! - `GET /api/health` - Health check
//! - `GET /api/{engine}/fxforward` - Page of trades
//! - `GET /api/{engine}/fxforward/pfe-standalone` - PFE averages per horizon
//! - `GET /api/{engine}/fxforward/trades-pfe` - Page of trades with PFE
//! - `GET /api/{engine}/counterparties-transactions` - Counterparty tree

use crate::application::dto::{
    CounterpartyDto, FxForwardTradeDto, PageRequest, PagingPolicy, PfeAverageDto,
    PfeStandaloneQuery, TradeWithPfeDto,
};
use crate::application::error::ApplicationError;
use crate::application::session::{Credentials, SessionProvider};
use crate::application::use_cases::{
    AggregatePfeUseCase, JoinTradesPfeUseCase, ListCounterpartiesUseCase, ListTradesUseCase,
};
use crate::domain::value_objects::Engine;
use crate::infrastructure::persistence::traits::{PfeRepository, TradeRepository};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, instrument};

/// Error half of every handler result.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for REST handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Trade paging.
    pub list_trades: ListTradesUseCase,
    /// Standalone PFE averages.
    pub aggregate_pfe: AggregatePfeUseCase,
    /// Trades joined with snapshot PFE.
    pub join_trades_pfe: JoinTradesPfeUseCase,
    /// Counterparty directory.
    pub list_counterparties: ListCounterpartiesUseCase,
}

impl AppState {
    /// Wires every use case to the same session provider and repositories.
    #[must_use]
    pub fn new(
        sessions: Arc<dyn SessionProvider>,
        trades: Arc<dyn TradeRepository>,
        pfe: Arc<dyn PfeRepository>,
        paging: PagingPolicy,
    ) -> Self {
        Self {
            list_trades: ListTradesUseCase::new(
                Arc::clone(&sessions),
                Arc::clone(&trades),
                paging,
            ),
            aggregate_pfe: AggregatePfeUseCase::new(Arc::clone(&sessions), Arc::clone(&pfe)),
            join_trades_pfe: JoinTradesPfeUseCase::new(
                Arc::clone(&sessions),
                Arc::clone(&trades),
                pfe,
                paging,
            ),
            list_counterparties: ListCounterpartiesUseCase::new(sessions, trades),
        }
    }
}

// ============================================================================
// Error Response
// ============================================================================

/// Standard error response format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new error response.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// The operation a handler performs, used to word upstream failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Trade paging.
    FxTrades,
    /// Standalone PFE averages.
    PfeData,
    /// Trades joined with PFE.
    TradesWithPfe,
    /// Counterparty directory.
    Counterparties,
}

impl Operation {
    /// Message returned to the client when storage fails.
    #[must_use]
    pub fn failure_message(self, engine: Engine) -> String {
        match self {
            Self::FxTrades => format!("Error fetching {engine} FX trades"),
            Self::PfeData => format!("Error fetching {engine} PFE data"),
            Self::TradesWithPfe => format!("Error fetching {engine} FX trades with PFE data"),
            Self::Counterparties => "Error fetching counterparties and transactions".to_string(),
        }
    }
}

/// Maps an application error to its HTTP response.
///
/// Upstream causes are logged and replaced by the operation's generic
/// message.
#[must_use]
pub fn error_response(err: ApplicationError, engine: Engine, operation: Operation) -> ApiError {
    match err {
        ApplicationError::Unauthenticated => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Unauthorized")),
        ),
        ApplicationError::BadRequest(message) => validation_error(&message),
        ApplicationError::NotFound(message) => not_found(&message),
        ApplicationError::UpstreamFailure(cause) => {
            error!(%engine, ?operation, %cause, "upstream failure");
            internal_error(&operation.failure_message(engine))
        }
    }
}

// ============================================================================
// Pagination
// ============================================================================

/// Pagination parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PaginationParams {
    /// Page size, default 1000.
    pub limit: Option<u32>,
    /// Rows to skip, default 0.
    pub offset: Option<u32>,
}

impl From<PaginationParams> for PageRequest {
    fn from(params: PaginationParams) -> Self {
        Self::new(
            params.limit.unwrap_or(Self::DEFAULT_LIMIT),
            params.offset.unwrap_or(0),
        )
    }
}

fn page_request(
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<PageRequest, ApiError> {
    params
        .map(|Query(p)| p.into())
        .map_err(|rejection| validation_error(&rejection.body_text()))
}

// ============================================================================
// Trade Handlers
// ============================================================================

/// List a page of an engine's trades.
///
/// # Errors
///
/// 401 without a session, 404 for an unknown engine, 400 for malformed
/// paging parameters and 500 if storage fails.
#[instrument(skip(state, credentials, params))]
pub async fn list_trades(
    State(state): State<Arc<AppState>>,
    Path(engine): Path<String>,
    credentials: Credentials,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<Vec<FxForwardTradeDto>>, ApiError> {
    let engine = parse_engine(&engine)?;
    let page = page_request(params)?;

    state
        .list_trades
        .execute(engine, &credentials, page)
        .await
        .map(Json)
        .map_err(|e| error_response(e, engine, Operation::FxTrades))
}

/// List a page of an engine's trades with 5, 15 and 30-day PFE.
///
/// # Errors
///
/// 401 without a session, 404 for an unknown engine, 400 for malformed
/// paging parameters and 500 if storage fails.
#[instrument(skip(state, credentials, params))]
pub async fn trades_pfe(
    State(state): State<Arc<AppState>>,
    Path(engine): Path<String>,
    credentials: Credentials,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> Result<Json<Vec<TradeWithPfeDto>>, ApiError> {
    let engine = parse_engine(&engine)?;
    let page = page_request(params)?;

    state
        .join_trades_pfe
        .execute(engine, &credentials, page)
        .await
        .map(Json)
        .map_err(|e| error_response(e, engine, Operation::TradesWithPfe))
}

// ============================================================================
// PFE Handlers
// ============================================================================

/// Average PFE per horizon for a counterparty.
///
/// # Errors
///
/// 400 if `counterpartyId` is missing or the query string is malformed,
/// 401 without a session, 404 for an unknown engine and 500 if storage
/// fails.
#[instrument(skip(state, credentials, query))]
pub async fn pfe_standalone(
    State(state): State<Arc<AppState>>,
    Path(engine): Path<String>,
    credentials: Credentials,
    query: Result<Query<PfeStandaloneQuery>, QueryRejection>,
) -> Result<Json<Vec<PfeAverageDto>>, ApiError> {
    let engine = parse_engine(&engine)?;
    let query = query
        .map(|Query(q)| q)
        .map_err(|rejection| validation_error(&rejection.body_text()))?;

    state
        .aggregate_pfe
        .execute(engine, &credentials, query)
        .await
        .map(Json)
        .map_err(|e| error_response(e, engine, Operation::PfeData))
}

// ============================================================================
// Counterparty Handlers
// ============================================================================

/// Counterparties of an engine with their transactions.
///
/// # Errors
///
/// 401 without a session, 404 for an unknown engine and 500 if storage
/// fails.
#[instrument(skip(state, credentials))]
pub async fn counterparties_transactions(
    State(state): State<Arc<AppState>>,
    Path(engine): Path<String>,
    credentials: Credentials,
) -> Result<Json<Vec<CounterpartyDto>>, ApiError> {
    let engine = parse_engine(&engine)?;

    state
        .list_counterparties
        .execute(engine, &credentials)
        .await
        .map(Json)
        .map_err(|e| error_response(e, engine, Operation::Counterparties))
}

// ============================================================================
// Health Check
// ============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Health check endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_engine(segment: &str) -> Result<Engine, ApiError> {
    segment
        .parse()
        .map_err(|_| not_found(&format!("unknown engine: {segment}")))
}

fn validation_error(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

fn not_found(message: &str) -> ApiError {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new(message)))
}

fn internal_error(message: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(message)),
    )
}
