//! # Data Transfer Objects
//!
//! DTOs for use case input/output, decoupling API from domain.
//!
//! Output DTOs own the JSON contract: 64-bit identifiers become strings,
//! dates become ISO-8601 timestamps and the engine decides the name of the
//! external id key.

pub mod counterparty_dto;
pub mod paging;
pub mod pfe_dto;
pub mod trade_dto;

pub use counterparty_dto::{CounterpartyDto, TransactionRefDto};
pub use paging::{PageRequest, PagingPolicy};
pub use pfe_dto::{PfeAverageDto, PfeStandaloneQuery};
pub use trade_dto::{FxForwardTradeDto, TradeWithPfeDto};
