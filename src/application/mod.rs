//! # Application Layer
//!
//! Use case orchestration over the trade and PFE repositories.
//!
//! This layer resolves the caller's session, validates request parameters,
//! reads through the repository ports and shapes results into DTOs.
//!
//! ## Use Cases
//!
//! - [`ListTradesUseCase`]: Page through an engine's trades
//! - [`AggregatePfeUseCase`]: Mean PFE per horizon for a counterparty
//! - [`JoinTradesPfeUseCase`]: Trades with their 5/15/30-day PFE
//! - [`ListCounterpartiesUseCase`]: Counterparty/transaction selector tree

pub mod dto;
pub mod error;
pub mod session;
pub mod use_cases;

pub use dto::{
    CounterpartyDto, FxForwardTradeDto, PageRequest, PagingPolicy, PfeAverageDto,
    PfeStandaloneQuery, TradeWithPfeDto,
};
pub use error::{ApplicationError, ApplicationResult};
pub use session::{Credentials, Session, SessionProvider};
pub use use_cases::{
    AggregatePfeUseCase, JoinTradesPfeUseCase, ListCounterpartiesUseCase, ListTradesUseCase,
};
