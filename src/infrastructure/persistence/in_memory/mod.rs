//! # In-Memory Repositories
//!
//! In-memory implementations of repository traits for testing.

pub mod pfe_repository;
pub mod trade_repository;

pub use pfe_repository::InMemoryPfeRepository;
pub use trade_repository::InMemoryTradeRepository;
