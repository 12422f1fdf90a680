//! # PFE Results
//!
//! Potential Future Exposure samples produced by the engines' risk batch.
//!
//! One [`PfeResult`] exists per (transaction, horizon) pair. Reading code
//! derives two shapes from them:
//!
//! - [`HorizonAverage`]: mean exposure per horizon for a counterparty
//! - [`PfeSnapshot`]: the 5/15/30-day values of a single transaction laid
//!   out as a fixed-width record

use crate::domain::value_objects::{CounterpartyId, Horizon, SnapshotHorizon, TransactionId};
use rust_decimal::Decimal;

/// One exposure sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PfeResult {
    /// Transaction the sample belongs to.
    pub transaction_id: TransactionId,
    /// Counterparty of the transaction.
    pub counterparty_id: Option<CounterpartyId>,
    /// Days-forward horizon.
    pub horizon: Horizon,
    /// Exposure ignoring collateral.
    pub uncollateralized: Option<Decimal>,
    /// Exposure net of collateral.
    pub collateralized: Option<Decimal>,
}

/// Selection of PFE rows for averaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PfeFilter {
    /// Required counterparty.
    pub counterparty_id: CounterpartyId,
    /// Optional single transaction.
    pub transaction_id: Option<TransactionId>,
}

impl PfeFilter {
    /// Filter on a counterparty only.
    #[must_use]
    pub fn counterparty(counterparty_id: CounterpartyId) -> Self {
        Self {
            counterparty_id,
            transaction_id: None,
        }
    }

    /// Narrows the filter to one transaction.
    #[must_use]
    pub fn with_transaction(mut self, transaction_id: TransactionId) -> Self {
        self.transaction_id = Some(transaction_id);
        self
    }

    /// Returns true if the row is selected by this filter.
    #[must_use]
    pub fn matches(&self, row: &PfeResult) -> bool {
        row.counterparty_id == Some(self.counterparty_id)
            && self
                .transaction_id
                .is_none_or(|id| row.transaction_id == id)
    }
}

/// Mean exposure at one horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorizonAverage {
    /// Horizon the means were taken at.
    pub horizon: Horizon,
    /// Mean uncollateralized PFE, zero when no value was available.
    pub uncollateralized: Decimal,
    /// Mean collateralized PFE, zero when no value was available.
    pub collateralized: Decimal,
}

/// PFE values of one transaction at the snapshot horizons.
///
/// A field is `None` when the results table holds no sample for that
/// horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PfeSnapshot {
    /// Uncollateralized PFE at 5 days.
    pub uncollateralized_5d: Option<Decimal>,
    /// Uncollateralized PFE at 15 days.
    pub uncollateralized_15d: Option<Decimal>,
    /// Uncollateralized PFE at 30 days.
    pub uncollateralized_30d: Option<Decimal>,
    /// Collateralized PFE at 5 days.
    pub collateralized_5d: Option<Decimal>,
    /// Collateralized PFE at 15 days.
    pub collateralized_15d: Option<Decimal>,
    /// Collateralized PFE at 30 days.
    pub collateralized_30d: Option<Decimal>,
}

impl PfeSnapshot {
    /// Stores a sample. Later samples for the same horizon overwrite earlier ones.
    pub fn record(
        &mut self,
        horizon: SnapshotHorizon,
        uncollateralized: Option<Decimal>,
        collateralized: Option<Decimal>,
    ) {
        let (uncollat, collat) = match horizon {
            SnapshotHorizon::Days5 => (&mut self.uncollateralized_5d, &mut self.collateralized_5d),
            SnapshotHorizon::Days15 => {
                (&mut self.uncollateralized_15d, &mut self.collateralized_15d)
            }
            SnapshotHorizon::Days30 => {
                (&mut self.uncollateralized_30d, &mut self.collateralized_30d)
            }
        };
        *uncollat = uncollateralized;
        *collat = collateralized;
    }

    /// Returns `(uncollateralized, collateralized)` at a horizon.
    #[must_use]
    pub fn at(&self, horizon: SnapshotHorizon) -> (Option<Decimal>, Option<Decimal>) {
        match horizon {
            SnapshotHorizon::Days5 => (self.uncollateralized_5d, self.collateralized_5d),
            SnapshotHorizon::Days15 => (self.uncollateralized_15d, self.collateralized_15d),
            SnapshotHorizon::Days30 => (self.uncollateralized_30d, self.collateralized_30d),
        }
    }

    /// Returns true if no horizon has a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
