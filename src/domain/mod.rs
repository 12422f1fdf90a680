//! # Domain Layer
//!
//! Core types of the trade and exposure data model.
//!
//! This layer contains:
//! - **Entities**: Trades, PFE results and derived counterparties
//! - **Value Objects**: Identifiers, engines and horizons
//! - **Errors**: Domain-specific error types
//! - **Services**: Pure reshaping of PFE rows

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
