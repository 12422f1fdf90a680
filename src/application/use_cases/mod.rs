//! # Use Cases
//!
//! Application use cases implementing the dashboard's read paths.
//!
//! Every use case takes the [`Engine`](crate::domain::value_objects::Engine)
//! to read from and the caller's credentials, and resolves a session before
//! any repository is touched.

pub mod aggregate_pfe;
pub mod join_trades_pfe;
pub mod list_counterparties;
pub mod list_trades;

#[cfg(test)]
pub(crate) mod tests;

pub use aggregate_pfe::AggregatePfeUseCase;
pub use join_trades_pfe::JoinTradesPfeUseCase;
pub use list_counterparties::ListCounterpartiesUseCase;
pub use list_trades::ListTradesUseCase;
