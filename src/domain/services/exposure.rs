//! # Exposure Reshaping
//!
//! Pure functions turning PFE rows into the two shapes served to clients:
//! per-horizon means and per-transaction snapshot records.

use crate::domain::entities::{HorizonAverage, PfeResult, PfeSnapshot};
use crate::domain::value_objects::{Horizon, SnapshotHorizon, TransactionId};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

#[derive(Default)]
struct Accumulator {
    sum: Decimal,
    count: u32,
}

impl Accumulator {
    fn add(&mut self, value: Option<Decimal>) {
        if let Some(value) = value {
            self.sum = self.sum.saturating_add(value);
            self.count = self.count.saturating_add(1);
        }
    }

    // Absent values are ignored, as SQL AVG does. No values at all means zero.
    fn mean(&self) -> Decimal {
        if self.count == 0 {
            Decimal::ZERO
        } else {
            self.sum / Decimal::from(self.count)
        }
    }
}

/// Averages collateralized and uncollateralized PFE per horizon.
///
/// Returns one entry per distinct horizon among `rows`, ordered by horizon
/// ascending.
///
/// # Examples
///
/// ```
/// use pfe_dashboard::domain::entities::PfeResult;
/// use pfe_dashboard::domain::services::exposure::average_by_horizon;
/// use pfe_dashboard::domain::value_objects::{CounterpartyId, Horizon, TransactionId};
/// use rust_decimal::Decimal;
///
/// let row = |tx: i64, collat: i64| PfeResult {
///     transaction_id: TransactionId::new(tx),
///     counterparty_id: Some(CounterpartyId::new(1)),
///     horizon: Horizon::new(5).unwrap(),
///     uncollateralized: Some(Decimal::from(collat * 2)),
///     collateralized: Some(Decimal::from(collat)),
/// };
///
/// let averages = average_by_horizon(&[row(1, 10), row(2, 20)]);
/// assert_eq!(averages.len(), 1);
/// assert_eq!(averages[0].collateralized, Decimal::from(15));
/// assert_eq!(averages[0].uncollateralized, Decimal::from(30));
/// ```
#[must_use]
pub fn average_by_horizon<'a, I>(rows: I) -> Vec<HorizonAverage>
where
    I: IntoIterator<Item = &'a PfeResult>,
{
    let mut groups: BTreeMap<Horizon, (Accumulator, Accumulator)> = BTreeMap::new();
    for row in rows {
        let (uncollat, collat) = groups.entry(row.horizon).or_default();
        uncollat.add(row.uncollateralized);
        collat.add(row.collateralized);
    }

    groups
        .into_iter()
        .map(|(horizon, (uncollat, collat))| HorizonAverage {
            horizon,
            uncollateralized: uncollat.mean(),
            collateralized: collat.mean(),
        })
        .collect()
}

/// Indexes PFE rows by transaction into snapshot records.
///
/// Rows at horizons outside {5, 15, 30} are ignored.
#[must_use]
pub fn index_snapshots<'a, I>(rows: I) -> HashMap<TransactionId, PfeSnapshot>
where
    I: IntoIterator<Item = &'a PfeResult>,
{
    let mut index: HashMap<TransactionId, PfeSnapshot> = HashMap::new();
    for row in rows {
        let Some(horizon) = SnapshotHorizon::from_days(row.horizon.days()) else {
            continue;
        };
        index.entry(row.transaction_id).or_default().record(
            horizon,
            row.uncollateralized,
            row.collateralized,
        );
    }
    index
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::value_objects::CounterpartyId;
    use proptest::prelude::*;

    fn row(tx: i64, days: i32, uncollat: Option<i64>, collat: Option<i64>) -> PfeResult {
        PfeResult {
            transaction_id: TransactionId::new(tx),
            counterparty_id: Some(CounterpartyId::new(1)),
            horizon: Horizon::new(days).unwrap(),
            uncollateralized: uncollat.map(Decimal::from),
            collateralized: collat.map(Decimal::from),
        }
    }

    #[test]
    fn average_two_rows_at_same_horizon() {
        let rows = vec![row(1, 5, Some(100), Some(10)), row(2, 5, Some(200), Some(20))];
        let averages = average_by_horizon(&rows);

        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].horizon.days(), 5);
        assert_eq!(averages[0].collateralized, Decimal::from(15));
        assert_eq!(averages[0].uncollateralized, Decimal::from(150));
    }

    #[test]
    fn average_saturates_instead_of_overflowing() {
        let mut big = row(1, 5, None, None);
        big.uncollateralized = Some(Decimal::MAX);
        big.collateralized = Some(Decimal::MAX);
        let rows = vec![big.clone(), big];

        let averages = average_by_horizon(&rows);
        assert_eq!(averages[0].uncollateralized, Decimal::MAX / Decimal::from(2));
        assert_eq!(averages[0].collateralized, Decimal::MAX / Decimal::from(2));
    }

    #[test]
    fn average_one_entry_per_horizon_sorted() {
        let rows = vec![
            row(1, 30, Some(3), Some(3)),
            row(1, 5, Some(1), Some(1)),
            row(1, 15, Some(2), Some(2)),
            row(2, 5, Some(5), Some(5)),
        ];
        let days: Vec<i32> = average_by_horizon(&rows)
            .iter()
            .map(|a| a.horizon.days())
            .collect();
        assert_eq!(days, vec![5, 15, 30]);
    }

    #[test]
    fn average_ignores_missing_values() {
        let rows = vec![row(1, 5, None, Some(10)), row(2, 5, Some(8), None)];
        let averages = average_by_horizon(&rows);
        assert_eq!(averages[0].uncollateralized, Decimal::from(8));
        assert_eq!(averages[0].collateralized, Decimal::from(10));
    }

    #[test]
    fn average_defaults_to_zero_without_values() {
        let averages = average_by_horizon(&[row(1, 15, None, None)]);
        assert_eq!(averages[0].uncollateralized, Decimal::ZERO);
        assert_eq!(averages[0].collateralized, Decimal::ZERO);
    }

    #[test]
    fn average_of_nothing_is_empty() {
        assert!(average_by_horizon(&[]).is_empty());
    }

    #[test]
    fn index_places_values_by_horizon() {
        let rows = vec![row(7, 5, Some(50), Some(5)), row(7, 30, Some(300), Some(30))];
        let index = index_snapshots(&rows);
        let snapshot = index[&TransactionId::new(7)];

        assert_eq!(snapshot.uncollateralized_5d, Some(Decimal::from(50)));
        assert_eq!(snapshot.collateralized_30d, Some(Decimal::from(30)));
        assert_eq!(snapshot.uncollateralized_15d, None);
        assert_eq!(snapshot.collateralized_15d, None);
    }

    #[test]
    fn index_ignores_non_snapshot_horizons() {
        let index = index_snapshots(&[row(7, 10, Some(1), Some(1))]);
        assert!(index.is_empty());
    }

    proptest! {
        #[test]
        fn average_equals_arithmetic_mean(values in prop::collection::vec(-1_000_000i64..1_000_000, 1..50)) {
            let rows: Vec<PfeResult> = values
                .iter()
                .enumerate()
                .map(|(i, v)| row(i as i64, 5, Some(*v), Some(*v)))
                .collect();

            let averages = average_by_horizon(&rows);
            let expected = Decimal::from(values.iter().sum::<i64>()) / Decimal::from(values.len() as u64);

            prop_assert_eq!(averages.len(), 1);
            prop_assert_eq!(averages[0].collateralized, expected);
            prop_assert_eq!(averages[0].uncollateralized, expected);
        }

        #[test]
        fn one_average_per_distinct_horizon(days in prop::collection::vec(0i32..400, 0..60)) {
            let rows: Vec<PfeResult> = days
                .iter()
                .map(|d| row(1, *d, Some(1), Some(1)))
                .collect();

            let mut distinct = days.clone();
            distinct.sort_unstable();
            distinct.dedup();

            let got: Vec<i32> = average_by_horizon(&rows).iter().map(|a| a.horizon.days()).collect();
            prop_assert_eq!(got, distinct);
        }
    }
}
