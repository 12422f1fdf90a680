//! # Domain Services
//!
//! Stateless reshaping logic shared by repositories and use cases.

pub mod exposure;

pub use exposure::{average_by_horizon, index_snapshots};
