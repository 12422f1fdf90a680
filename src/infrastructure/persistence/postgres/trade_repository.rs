//! # PostgreSQL Trade Repository
//!
//! PostgreSQL implementation of [`TradeRepository`] using sqlx.
//!
//! The engine tables use quoted PascalCase column names. Every query casts
//! its columns to the types the row structs decode, so `FLOAT` and `BIGINT`
//! source columns both land in [`Decimal`] and `i64` fields.

use crate::domain::entities::FxForwardTrade;
use crate::domain::value_objects::{CounterpartyId, Engine, ExternalId, TransactionId};
use crate::infrastructure::persistence::engine_tables::EngineTables;
use crate::infrastructure::persistence::traits::{
    RepositoryError, RepositoryResult, TradeRepository,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

/// PostgreSQL implementation of [`TradeRepository`].
#[derive(Debug, Clone)]
pub struct PostgresTradeRepository {
    pool: PgPool,
}

impl PostgresTradeRepository {
    /// Creates a new PostgreSQL trade repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn page_query(tables: EngineTables) -> String {
    format!(
        r#"
        SELECT "TransactionID"::BIGINT AS transaction_id,
               "{external}"::BIGINT AS external_id,
               "TradingDate"::DATE AS trading_date,
               "MaturityDate"::DATE AS maturity_date,
               "BuyCurrency" AS buy_currency,
               "SellCurrency" AS sell_currency,
               "SpotRate"::NUMERIC AS spot_rate,
               "ForwardRate"::NUMERIC AS forward_rate,
               "BuyNotional"::BIGINT AS buy_notional,
               "SellNotional"::NUMERIC AS sell_notional,
               "CounterpartyID"::BIGINT AS counterparty_id,
               "CollateralFactor"::NUMERIC AS collateral_factor
        FROM {trades}
        ORDER BY "TransactionID"
        LIMIT $1 OFFSET $2
        "#,
        external = tables.external_id_column,
        trades = tables.trades,
    )
}

fn counterparty_query(tables: EngineTables) -> String {
    format!(
        r#"
        SELECT "CounterpartyID"::BIGINT AS counterparty_id,
               "TransactionID"::BIGINT AS transaction_id
        FROM {trades}
        WHERE "CounterpartyID" IS NOT NULL
        ORDER BY "CounterpartyID", "TransactionID"
        "#,
        trades = tables.trades,
    )
}

#[async_trait]
impl TradeRepository for PostgresTradeRepository {
    #[instrument(skip(self), fields(engine = %engine))]
    async fn find_page(
        &self,
        engine: Engine,
        limit: u32,
        offset: u32,
    ) -> RepositoryResult<Vec<FxForwardTrade>> {
        let sql = page_query(EngineTables::for_engine(engine));

        let rows: Vec<TradeRow> = sqlx::query_as(&sql)
            .bind(i64::from(limit))
            .bind(i64::from(offset))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(rows.into_iter().map(TradeRow::into_trade).collect())
    }

    #[instrument(skip(self), fields(engine = %engine))]
    async fn find_counterparty_transactions(
        &self,
        engine: Engine,
    ) -> RepositoryResult<Vec<(Option<CounterpartyId>, TransactionId)>> {
        let sql = counterparty_query(EngineTables::for_engine(engine));

        let rows: Vec<(Option<i64>, i64)> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(cp, tx)| (cp.map(CounterpartyId::new), TransactionId::new(tx)))
            .collect())
    }
}

/// Row type for trade queries.
#[derive(Debug, sqlx::FromRow)]
struct TradeRow {
    transaction_id: i64,
    external_id: Option<i64>,
    trading_date: Option<NaiveDate>,
    maturity_date: Option<NaiveDate>,
    buy_currency: Option<String>,
    sell_currency: Option<String>,
    spot_rate: Option<Decimal>,
    forward_rate: Option<Decimal>,
    buy_notional: Option<i64>,
    sell_notional: Option<Decimal>,
    counterparty_id: Option<i64>,
    collateral_factor: Option<Decimal>,
}

impl TradeRow {
    fn into_trade(self) -> FxForwardTrade {
        FxForwardTrade {
            transaction_id: TransactionId::new(self.transaction_id),
            external_id: self.external_id.map(ExternalId::new),
            trading_date: self.trading_date,
            maturity_date: self.maturity_date,
            buy_currency: self.buy_currency,
            sell_currency: self.sell_currency,
            spot_rate: self.spot_rate,
            forward_rate: self.forward_rate,
            buy_notional: self.buy_notional,
            sell_notional: self.sell_notional,
            counterparty_id: self.counterparty_id.map(CounterpartyId::new),
            collateral_factor: self.collateral_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_targets_engine_tables() {
        let sql = page_query(EngineTables::for_engine(Engine::Quic));
        assert!(sql.contains("FROM quic_fx_trades"));
        assert!(sql.contains(r#""QUICID"::BIGINT AS external_id"#));
        assert!(sql.contains("LIMIT $1 OFFSET $2"));
    }

    #[test]
    fn counterparty_query_skips_null_counterparties() {
        let sql = counterparty_query(EngineTables::for_engine(Engine::F22));
        assert!(sql.contains("FROM f22_fx_trades"));
        assert!(sql.contains(r#""CounterpartyID" IS NOT NULL"#));
    }
}
