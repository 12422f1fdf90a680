//! # Domain Entities
//!
//! Read-only records sourced from the engines' tables.
//!
//! - [`FxForwardTrade`]: An FX forward contract
//! - [`PfeResult`]: One exposure sample per (transaction, horizon)
//! - [`Counterparty`]: Derived by grouping trades

pub mod counterparty;
pub mod pfe_result;
pub mod trade;

pub use counterparty::Counterparty;
pub use pfe_result::{HorizonAverage, PfeFilter, PfeResult, PfeSnapshot};
pub use trade::FxForwardTrade;
