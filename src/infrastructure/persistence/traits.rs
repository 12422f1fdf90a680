//! # Repository Traits
//!
//! Read-only ports over the engines' trade and PFE tables.
//!
//! Every method takes the [`Engine`] whose tables it reads, so one
//! implementation serves both engines.

use crate::domain::entities::{FxForwardTrade, HorizonAverage, PfeFilter, PfeResult};
use crate::domain::value_objects::{CounterpartyId, Engine, Horizon, TransactionId};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Repository failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Could not obtain a connection.
    #[error("connection error: {0}")]
    Connection(String),

    /// The query failed.
    #[error("query error: {0}")]
    Query(String),

    /// A row could not be converted into a domain value.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl RepositoryError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Access to FX forward trades.
#[async_trait]
pub trait TradeRepository: Send + Sync + fmt::Debug {
    /// Returns up to `limit` trades starting at `offset`, ordered by
    /// transaction id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn find_page(
        &self,
        engine: Engine,
        limit: u32,
        offset: u32,
    ) -> RepositoryResult<Vec<FxForwardTrade>>;

    /// Returns every `(counterparty, transaction)` pair of the engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn find_counterparty_transactions(
        &self,
        engine: Engine,
    ) -> RepositoryResult<Vec<(Option<CounterpartyId>, TransactionId)>>;
}

/// Access to PFE results.
#[async_trait]
pub trait PfeRepository: Send + Sync + fmt::Debug {
    /// Averages PFE per horizon over the rows selected by `filter`,
    /// ordered by horizon.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn average_by_horizon(
        &self,
        engine: Engine,
        filter: &PfeFilter,
    ) -> RepositoryResult<Vec<HorizonAverage>>;

    /// Returns the rows of the given transactions at the given horizons.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn find_for_transactions(
        &self,
        engine: Engine,
        transactions: &[TransactionId],
        horizons: &[Horizon],
    ) -> RepositoryResult<Vec<PfeResult>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_constructors() {
        assert_eq!(
            RepositoryError::query("boom").to_string(),
            "query error: boom"
        );
        assert_eq!(
            RepositoryError::connection("refused").to_string(),
            "connection error: refused"
        );
        assert!(matches!(
            RepositoryError::serialization("bad row"),
            RepositoryError::Serialization(_)
        ));
    }
}
