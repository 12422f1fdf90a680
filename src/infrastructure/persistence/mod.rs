//! # Persistence Layer
//!
//! Repository ports and their implementations.
//!
//! - [`traits`]: the `TradeRepository` and `PfeRepository` ports
//! - [`engine_tables`]: per-engine table bindings
//! - [`postgres`]: sqlx implementations
//! - [`in_memory`]: implementations for tests

pub mod engine_tables;
pub mod in_memory;
pub mod postgres;
pub mod traits;

pub use engine_tables::EngineTables;
pub use traits::{PfeRepository, RepositoryError, RepositoryResult, TradeRepository};
