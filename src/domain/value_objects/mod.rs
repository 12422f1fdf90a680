//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`TransactionId`], [`CounterpartyId`], [`ExternalId`]: 64-bit identifiers
//!   that always cross JSON boundaries as decimal strings
//!
//! ## Engine and Horizon
//!
//! - [`Engine`]: F22 or QUIC
//! - [`Horizon`]: Days-forward exposure window
//! - [`SnapshotHorizon`]: The fixed 5/15/30-day windows

pub mod engine;
pub mod horizon;
pub mod ids;

pub use engine::Engine;
pub use horizon::{Horizon, SnapshotHorizon};
pub use ids::{CounterpartyId, ExternalId, TransactionId};
