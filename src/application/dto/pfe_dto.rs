//! # PFE DTOs
//!
//! Request and response shapes of the standalone PFE endpoint.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::{HorizonAverage, PfeFilter};
use crate::domain::value_objects::{CounterpartyId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Query string of the standalone PFE endpoint.
///
/// Both identifiers arrive as raw strings and are validated by
/// [`PfeStandaloneQuery::into_filter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PfeStandaloneQuery {
    /// Counterparty to average over. Required.
    #[serde(rename = "counterpartyId", default)]
    pub counterparty_id: Option<String>,
    /// Single transaction to narrow to.
    #[serde(rename = "transactionId", default)]
    pub transaction_id: Option<String>,
}

impl PfeStandaloneQuery {
    /// Creates a query for a counterparty.
    #[must_use]
    pub fn for_counterparty(counterparty_id: impl Into<String>) -> Self {
        Self {
            counterparty_id: Some(counterparty_id.into()),
            transaction_id: None,
        }
    }

    /// Narrows the query to a transaction.
    #[must_use]
    pub fn with_transaction(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    /// Validates the query into a repository filter.
    ///
    /// A blank transaction id counts as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::BadRequest`] if the counterparty is
    /// missing or either identifier is not an integer.
    pub fn into_filter(self) -> ApplicationResult<PfeFilter> {
        let raw_counterparty = self
            .counterparty_id
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ApplicationError::bad_request("CounterpartyId is required"))?;

        let counterparty: CounterpartyId = raw_counterparty.parse().map_err(|_| {
            ApplicationError::bad_request(format!(
                "CounterpartyId must be an integer, got '{raw_counterparty}'"
            ))
        })?;

        let mut filter = PfeFilter::counterparty(counterparty);
        if let Some(raw) = self.transaction_id.filter(|s| !s.trim().is_empty()) {
            let transaction: TransactionId = raw.parse().map_err(|_| {
                ApplicationError::bad_request(format!(
                    "TransactionId must be an integer, got '{raw}'"
                ))
            })?;
            filter = filter.with_transaction(transaction);
        }
        Ok(filter)
    }
}

/// Mean PFE at one horizon, as charted by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PfeAverageDto {
    /// Horizon in days.
    pub day: i32,
    /// Mean uncollateralized PFE.
    #[serde(rename = "Uncollateralized_PFE", with = "rust_decimal::serde::float")]
    pub uncollateralized: Decimal,
    /// Mean collateralized PFE.
    #[serde(rename = "Collateralized_PFE", with = "rust_decimal::serde::float")]
    pub collateralized: Decimal,
}

impl From<HorizonAverage> for PfeAverageDto {
    fn from(average: HorizonAverage) -> Self {
        Self {
            day: average.horizon.days(),
            uncollateralized: average.uncollateralized,
            collateralized: average.collateralized,
        }
    }
}
