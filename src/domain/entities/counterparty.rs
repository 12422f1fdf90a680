//! # Counterparty
//!
//! Counterparties are not persisted by the engines. A counterparty is the
//! set of trades sharing a counterparty id, so this module builds
//! [`Counterparty`] values by grouping trade references.

use crate::domain::value_objects::{CounterpartyId, TransactionId};
use std::collections::BTreeMap;

/// A counterparty and the transactions traded with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counterparty {
    id: CounterpartyId,
    transactions: Vec<TransactionId>,
}

impl Counterparty {
    /// Creates a counterparty with its transactions.
    #[must_use]
    pub fn new(id: CounterpartyId, transactions: Vec<TransactionId>) -> Self {
        Self { id, transactions }
    }

    /// Groups `(counterparty, transaction)` pairs into counterparties.
    ///
    /// Pairs without a counterparty are dropped. The result is ordered by
    /// counterparty id and each transaction list by transaction id.
    #[must_use]
    pub fn group<I>(pairs: I) -> Vec<Self>
    where
        I: IntoIterator<Item = (Option<CounterpartyId>, TransactionId)>,
    {
        let mut grouped: BTreeMap<CounterpartyId, Vec<TransactionId>> = BTreeMap::new();
        for (counterparty, transaction) in pairs {
            if let Some(counterparty) = counterparty {
                grouped.entry(counterparty).or_default().push(transaction);
            }
        }

        grouped
            .into_iter()
            .map(|(id, mut transactions)| {
                transactions.sort_unstable();
                transactions.dedup();
                Self { id, transactions }
            })
            .collect()
    }

    /// Returns the counterparty id.
    #[must_use]
    pub fn id(&self) -> CounterpartyId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> String {
        format!("Counterparty {}", self.id)
    }

    /// Returns the transactions traded with this counterparty.
    #[must_use]
    pub fn transactions(&self) -> &[TransactionId] {
        &self.transactions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cp(id: i64) -> Option<CounterpartyId> {
        Some(CounterpartyId::new(id))
    }

    fn tx(id: i64) -> TransactionId {
        TransactionId::new(id)
    }

    #[test]
    fn group_collects_transactions_per_counterparty() {
        let grouped = Counterparty::group(vec![
            (cp(2), tx(20)),
            (cp(1), tx(11)),
            (cp(2), tx(19)),
            (cp(1), tx(10)),
        ]);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].id(), CounterpartyId::new(1));
        assert_eq!(grouped[0].transactions(), &[tx(10), tx(11)]);
        assert_eq!(grouped[1].transactions(), &[tx(19), tx(20)]);
    }

    #[test]
    fn group_skips_missing_counterparty() {
        let grouped = Counterparty::group(vec![(None, tx(1)), (cp(3), tx(2))]);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].id(), CounterpartyId::new(3));
    }

    #[test]
    fn group_of_nothing_is_empty() {
        assert!(Counterparty::group(Vec::new()).is_empty());
    }

    #[test]
    fn name_uses_id() {
        let counterparty = Counterparty::new(CounterpartyId::new(4512), vec![]);
        assert_eq!(counterparty.name(), "Counterparty 4512");
    }
}
