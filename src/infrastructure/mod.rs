//! # Infrastructure Layer
//!
//! External adapters and implementations of the application's ports.
//!
//! ## Persistence
//!
//! Repository implementations:
//! - PostgreSQL repositories over the engines' trade and PFE tables
//! - In-memory repositories for testing

pub mod persistence;

pub use persistence as repos;
