//! # API Layer
//!
//! HTTP surface of the PFE dashboard.
//!
//! ## REST
//!
//! Read-only JSON endpoints under `/api/{engine}` for F22 and QUIC trades,
//! PFE averages and the counterparty directory, plus `/api/health`.
//!
//! ## Middleware
//!
//! - Authentication (JWT bearer token or session cookie)
//! - Request logging with `X-Request-ID` propagation

pub mod middleware;
pub mod rest;

pub use rest as rest_api;
