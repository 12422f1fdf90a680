//! # PostgreSQL PFE Repository
//!
//! PostgreSQL implementation of [`PfeRepository`] using sqlx.
//!
//! Averaging runs in the database (`AVG ... GROUP BY "Days"`); absent values
//! are skipped by `AVG` and a horizon with no values at all reports zero.

use crate::domain::entities::{HorizonAverage, PfeFilter, PfeResult};
use crate::domain::value_objects::{CounterpartyId, Engine, Horizon, TransactionId};
use crate::infrastructure::persistence::engine_tables::EngineTables;
use crate::infrastructure::persistence::traits::{
    PfeRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

/// PostgreSQL implementation of [`PfeRepository`].
#[derive(Debug, Clone)]
pub struct PostgresPfeRepository {
    pool: PgPool,
}

impl PostgresPfeRepository {
    /// Creates a new PostgreSQL PFE repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn average_query(tables: EngineTables) -> String {
    format!(
        r#"
        SELECT "Days"::INTEGER AS days,
               COALESCE(AVG("Uncollateralized_PFE"::NUMERIC), 0) AS uncollateralized,
               COALESCE(AVG("Collateralized_PFE"::NUMERIC), 0) AS collateralized
        FROM {pfe}
        WHERE "CounterpartyID" = $1
          AND ($2::BIGINT IS NULL OR "TransactionID" = $2)
        GROUP BY "Days"
        ORDER BY "Days"
        "#,
        pfe = tables.pfe_results,
    )
}

fn snapshot_query(tables: EngineTables) -> String {
    format!(
        r#"
        SELECT "TransactionID"::BIGINT AS transaction_id,
               "CounterpartyID"::BIGINT AS counterparty_id,
               "Days"::INTEGER AS days,
               "Uncollateralized_PFE"::NUMERIC AS uncollateralized,
               "Collateralized_PFE"::NUMERIC AS collateralized
        FROM {pfe}
        WHERE "TransactionID" = ANY($1)
          AND "Days" = ANY($2)
        "#,
        pfe = tables.pfe_results,
    )
}

#[async_trait]
impl PfeRepository for PostgresPfeRepository {
    #[instrument(skip(self), fields(engine = %engine))]
    async fn average_by_horizon(
        &self,
        engine: Engine,
        filter: &PfeFilter,
    ) -> RepositoryResult<Vec<HorizonAverage>> {
        let sql = average_query(EngineTables::for_engine(engine));

        let rows: Vec<AverageRow> = sqlx::query_as(&sql)
            .bind(filter.counterparty_id.get())
            .bind(filter.transaction_id.map(TransactionId::get))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        rows.into_iter().map(AverageRow::try_into_average).collect()
    }

    #[instrument(skip(self, transactions, horizons), fields(engine = %engine, count = transactions.len()))]
    async fn find_for_transactions(
        &self,
        engine: Engine,
        transactions: &[TransactionId],
        horizons: &[Horizon],
    ) -> RepositoryResult<Vec<PfeResult>> {
        if transactions.is_empty() || horizons.is_empty() {
            return Ok(Vec::new());
        }

        let sql = snapshot_query(EngineTables::for_engine(engine));
        let ids: Vec<i64> = transactions.iter().map(|id| id.get()).collect();
        let days: Vec<i32> = horizons.iter().map(|h| h.days()).collect();

        let rows: Vec<PfeRow> = sqlx::query_as(&sql)
            .bind(&ids)
            .bind(&days)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        rows.into_iter().map(PfeRow::try_into_result).collect()
    }
}

fn horizon(days: i32) -> RepositoryResult<Horizon> {
    Horizon::new(days).map_err(|e| RepositoryError::serialization(e.to_string()))
}

/// Row type for averaging queries.
#[derive(Debug, sqlx::FromRow)]
struct AverageRow {
    days: i32,
    uncollateralized: Decimal,
    collateralized: Decimal,
}

impl AverageRow {
    fn try_into_average(self) -> RepositoryResult<HorizonAverage> {
        Ok(HorizonAverage {
            horizon: horizon(self.days)?,
            uncollateralized: self.uncollateralized,
            collateralized: self.collateralized,
        })
    }
}

/// Row type for per-transaction queries.
#[derive(Debug, sqlx::FromRow)]
struct PfeRow {
    transaction_id: i64,
    counterparty_id: Option<i64>,
    days: i32,
    uncollateralized: Option<Decimal>,
    collateralized: Option<Decimal>,
}

impl PfeRow {
    fn try_into_result(self) -> RepositoryResult<PfeResult> {
        Ok(PfeResult {
            transaction_id: TransactionId::new(self.transaction_id),
            counterparty_id: self.counterparty_id.map(CounterpartyId::new),
            horizon: horizon(self.days)?,
            uncollateralized: self.uncollateralized,
            collateralized: self.collateralized,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_query_groups_by_horizon() {
        let sql = average_query(EngineTables::for_engine(Engine::F22));
        assert!(sql.contains("FROM f22_pfe_results"));
        assert!(sql.contains(r#"GROUP BY "Days""#));
        assert!(sql.contains(r#"ORDER BY "Days""#));
    }

    #[test]
    fn negative_days_is_a_decoding_error() {
        let row = PfeRow {
            transaction_id: 1,
            counterparty_id: None,
            days: -5,
            uncollateralized: None,
            collateralized: None,
        };
        assert!(matches!(
            row.try_into_result(),
            Err(RepositoryError::Serialization(_))
        ));
    }
}
