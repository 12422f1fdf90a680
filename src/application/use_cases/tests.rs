//! # Use Case Tests
//!
//! Reusable fakes and scenario tests for the application use cases.
//!
//! # Test Categories
//!
//! - **Sessions**: no session means no storage access
//! - **ListTrades**: paging, string encoding, empty pages
//! - **AggregatePfe**: means per horizon, parameter validation
//! - **JoinTradesPfe**: snapshot columns, missing horizons
//! - **ListCounterparties**: grouping
//! - **Error Handling**: storage failures

#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use std::sync::Arc;

use async_trait::async_trait;
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::application::dto::{PageRequest, PagingPolicy, PfeStandaloneQuery};
use crate::application::error::ApplicationError;
use crate::application::session::{Credentials, Session, SessionProvider};
use crate::application::use_cases::{
    AggregatePfeUseCase, JoinTradesPfeUseCase, ListCounterpartiesUseCase, ListTradesUseCase,
};
use crate::domain::entities::{FxForwardTrade, HorizonAverage, PfeFilter, PfeResult};
use crate::domain::value_objects::{
    CounterpartyId, Engine, ExternalId, Horizon, TransactionId,
};
use crate::infrastructure::persistence::in_memory::{
    InMemoryPfeRepository, InMemoryTradeRepository,
};
use crate::infrastructure::persistence::traits::{
    PfeRepository, RepositoryError, RepositoryResult, TradeRepository,
};

// ============================================================================
// Reusable Fakes
// ============================================================================

/// Session provider returning a fixed answer for any credentials.
#[derive(Debug, Clone)]
pub struct StaticSessionProvider(Option<Session>);

impl StaticSessionProvider {
    /// Always resolves to a session.
    pub fn authenticated() -> Self {
        Self(Some(Session::new("analyst", u64::MAX)))
    }

    /// Never resolves to a session.
    pub fn anonymous() -> Self {
        Self(None)
    }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    async fn resolve(&self, _credentials: &Credentials) -> Option<Session> {
        self.0.clone()
    }
}

/// Repository whose every call fails.
#[derive(Debug, Default)]
pub struct FailingRepository;

#[async_trait]
impl TradeRepository for FailingRepository {
    async fn find_page(&self, _: Engine, _: u32, _: u32) -> RepositoryResult<Vec<FxForwardTrade>> {
        Err(RepositoryError::connection("connection refused"))
    }

    async fn find_counterparty_transactions(
        &self,
        _: Engine,
    ) -> RepositoryResult<Vec<(Option<CounterpartyId>, TransactionId)>> {
        Err(RepositoryError::connection("connection refused"))
    }
}

#[async_trait]
impl PfeRepository for FailingRepository {
    async fn average_by_horizon(
        &self,
        _: Engine,
        _: &PfeFilter,
    ) -> RepositoryResult<Vec<HorizonAverage>> {
        Err(RepositoryError::query("relation does not exist"))
    }

    async fn find_for_transactions(
        &self,
        _: Engine,
        _: &[TransactionId],
        _: &[Horizon],
    ) -> RepositoryResult<Vec<PfeResult>> {
        Err(RepositoryError::query("relation does not exist"))
    }
}

/// Builds a PFE sample.
pub fn pfe(tx: i64, cp: i64, days: i32, uncollat: i64, collat: i64) -> PfeResult {
    PfeResult {
        transaction_id: TransactionId::new(tx),
        counterparty_id: Some(CounterpartyId::new(cp)),
        horizon: Horizon::new(days).unwrap(),
        uncollateralized: Some(Decimal::from(uncollat)),
        collateralized: Some(Decimal::from(collat)),
    }
}

/// Repositories seeded with a small book for both engines.
///
/// Counterparty 7 holds trades 1 and 2, counterparty 8 holds trade 3, and
/// trade 4 has no counterparty. Trade 1 has PFE at 5 and 30 days only,
/// trade 2 at 5 days only, trade 3 at 5, 15 and 30 days.
pub async fn seeded_repositories() -> (Arc<InMemoryTradeRepository>, Arc<InMemoryPfeRepository>) {
    let trades = Arc::new(InMemoryTradeRepository::new());
    let results = Arc::new(InMemoryPfeRepository::new());

    for engine in Engine::ALL {
        for (id, cp) in [(1, Some(7)), (2, Some(7)), (3, Some(8)), (4, None)] {
            let mut trade = FxForwardTrade::new(TransactionId::new(id))
                .with_external_id(ExternalId::new(9_007_199_254_740_993 + id))
                .with_currencies("EUR", "USD")
                .with_notionals(1_000_000 * id, Decimal::new(1_085_000 * id, 0));
            if let Some(cp) = cp {
                trade = trade.with_counterparty(CounterpartyId::new(cp));
            }
            trades.insert(engine, trade).await;
        }

        for row in [
            pfe(1, 7, 5, 100, 10),
            pfe(1, 7, 30, 300, 30),
            pfe(2, 7, 5, 200, 20),
            pfe(3, 8, 5, 1, 1),
            pfe(3, 8, 15, 2, 2),
            pfe(3, 8, 30, 3, 3),
            pfe(3, 8, 60, 6, 6),
        ] {
            results.insert(engine, row).await;
        }
    }

    (trades, results)
}

fn sessions(authenticated: bool) -> Arc<dyn SessionProvider> {
    if authenticated {
        Arc::new(StaticSessionProvider::authenticated())
    } else {
        Arc::new(StaticSessionProvider::anonymous())
    }
}

fn creds() -> Credentials {
    Credentials::bearer("token")
}

// ============================================================================
// Sessions
// ============================================================================

#[tokio::test]
async fn no_session_never_reaches_storage() {
    let (trades, results) = seeded_repositories().await;
    let anonymous = sessions(false);
    let policy = PagingPolicy::default();

    let list = ListTradesUseCase::new(anonymous.clone(), trades.clone(), policy);
    let aggregate = AggregatePfeUseCase::new(anonymous.clone(), results.clone());
    let join = JoinTradesPfeUseCase::new(anonymous.clone(), trades.clone(), results.clone(), policy);
    let directory = ListCounterpartiesUseCase::new(anonymous, trades.clone());

    for engine in Engine::ALL {
        let creds = Credentials::anonymous();
        assert_eq!(
            list.execute(engine, &creds, PageRequest::default()).await,
            Err(ApplicationError::Unauthenticated)
        );
        assert_eq!(
            aggregate
                .execute(engine, &creds, PfeStandaloneQuery::for_counterparty("7"))
                .await,
            Err(ApplicationError::Unauthenticated)
        );
        assert_eq!(
            join.execute(engine, &creds, PageRequest::default()).await,
            Err(ApplicationError::Unauthenticated)
        );
        assert_eq!(
            directory.execute(engine, &creds).await,
            Err(ApplicationError::Unauthenticated)
        );
    }

    assert_eq!(trades.reads(), 0);
    assert_eq!(results.reads(), 0);
}

#[tokio::test]
async fn missing_counterparty_is_checked_before_the_session() {
    let (_, results) = seeded_repositories().await;
    let aggregate = AggregatePfeUseCase::new(sessions(false), results.clone());

    let result = aggregate
        .execute(Engine::F22, &creds(), PfeStandaloneQuery::default())
        .await;
    assert_eq!(
        result,
        Err(ApplicationError::BadRequest(
            "CounterpartyId is required".to_string()
        ))
    );
    assert_eq!(results.reads(), 0);
}

// ============================================================================
// ListTrades
// ============================================================================

#[tokio::test]
async fn list_trades_pages_in_order() {
    let (trades, _) = seeded_repositories().await;
    let list = ListTradesUseCase::new(sessions(true), trades, PagingPolicy::default());

    let page = list
        .execute(Engine::Quic, &creds(), PageRequest::new(2, 1))
        .await
        .unwrap();

    let ids: Vec<i64> = page.iter().map(|t| t.trade().transaction_id.get()).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[tokio::test]
async fn list_trades_empty_page_is_empty_by_default() {
    let (trades, _) = seeded_repositories().await;
    let list = ListTradesUseCase::new(sessions(true), trades, PagingPolicy::default());

    let page = list
        .execute(Engine::F22, &creds(), PageRequest::new(10, 100))
        .await
        .unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn list_trades_empty_page_is_not_found_when_strict() {
    let (trades, _) = seeded_repositories().await;
    let policy = PagingPolicy {
        strict_empty_pages: true,
        ..PagingPolicy::default()
    };
    let list = ListTradesUseCase::new(sessions(true), trades, policy);

    let result = list
        .execute(Engine::F22, &creds(), PageRequest::new(10, 100))
        .await;
    assert_eq!(result, Err(ApplicationError::not_found("No trades found")));
}

#[tokio::test]
async fn list_trades_caps_limit() {
    let (trades, _) = seeded_repositories().await;
    let policy = PagingPolicy {
        max_page_size: 2,
        ..PagingPolicy::default()
    };
    let list = ListTradesUseCase::new(sessions(true), trades, policy);

    let page = list
        .execute(Engine::F22, &creds(), PageRequest::new(1000, 0))
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
}

proptest! {
    #[test]
    fn list_trades_respects_limit_and_encodes_ids(limit in 0u32..8, offset in 0u32..8) {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let page = rt.block_on(async {
            let (trades, _) = seeded_repositories().await;
            let list = ListTradesUseCase::new(sessions(true), trades, PagingPolicy::default());
            list.execute(Engine::F22, &creds(), PageRequest::new(limit, offset)).await.unwrap()
        });

        prop_assert!(page.len() <= limit as usize);
        for dto in &page {
            let value = serde_json::to_value(dto).unwrap();
            for key in ["TransactionID", "ACADIAID", "BuyNotional"] {
                prop_assert!(value[key].is_string(), "{} = {}", key, value[key]);
            }
            prop_assert!(value["CounterpartyID"].is_string() || value["CounterpartyID"].is_null());
        }
    }
}

// ============================================================================
// AggregatePfe
// ============================================================================

#[tokio::test]
async fn aggregate_averages_per_horizon() {
    let (_, results) = seeded_repositories().await;
    let aggregate = AggregatePfeUseCase::new(sessions(true), results);

    let averages = aggregate
        .execute(Engine::F22, &creds(), PfeStandaloneQuery::for_counterparty("7"))
        .await
        .unwrap();

    let days: Vec<i32> = averages.iter().map(|a| a.day).collect();
    assert_eq!(days, vec![5, 30]);
    assert_eq!(averages[0].collateralized, Decimal::from(15));
    assert_eq!(averages[0].uncollateralized, Decimal::from(150));
    assert_eq!(averages[1].collateralized, Decimal::from(30));
}

#[tokio::test]
async fn aggregate_narrows_to_transaction() {
    let (_, results) = seeded_repositories().await;
    let aggregate = AggregatePfeUseCase::new(sessions(true), results);

    let averages = aggregate
        .execute(
            Engine::Quic,
            &creds(),
            PfeStandaloneQuery::for_counterparty("7").with_transaction("2"),
        )
        .await
        .unwrap();

    assert_eq!(averages.len(), 1);
    assert_eq!(averages[0].collateralized, Decimal::from(20));
}

#[tokio::test]
async fn aggregate_requires_counterparty_before_reading() {
    let (_, results) = seeded_repositories().await;
    let aggregate = AggregatePfeUseCase::new(sessions(true), results.clone());

    let result = aggregate
        .execute(Engine::F22, &creds(), PfeStandaloneQuery::default())
        .await;

    assert_eq!(
        result,
        Err(ApplicationError::bad_request("CounterpartyId is required"))
    );
    assert_eq!(results.reads(), 0);
}

#[tokio::test]
async fn aggregate_unknown_counterparty_is_empty() {
    let (_, results) = seeded_repositories().await;
    let aggregate = AggregatePfeUseCase::new(sessions(true), results);

    let averages = aggregate
        .execute(Engine::F22, &creds(), PfeStandaloneQuery::for_counterparty("404"))
        .await
        .unwrap();
    assert!(averages.is_empty());
}

// ============================================================================
// JoinTradesPfe
// ============================================================================

#[tokio::test]
async fn join_attaches_snapshot_columns() {
    let (trades, results) = seeded_repositories().await;
    let join = JoinTradesPfeUseCase::new(sessions(true), trades, results, PagingPolicy::default());

    let rows = join
        .execute(Engine::Quic, &creds(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(rows.len(), 4);

    let third = serde_json::to_value(&rows[2]).unwrap();
    assert_eq!(third["UncollatPFE_15D"], serde_json::json!(2.0));
    // The 60-day sample is not a snapshot column.
    assert!(third.get("UncollatPFE_60D").is_none());
}

#[tokio::test]
async fn join_missing_15_day_sample_is_null() {
    let (trades, results) = seeded_repositories().await;
    let join = JoinTradesPfeUseCase::new(sessions(true), trades, results, PagingPolicy::default());

    let rows = join
        .execute(Engine::F22, &creds(), PageRequest::new(1, 0))
        .await
        .unwrap();
    let first = serde_json::to_value(&rows[0]).unwrap();

    assert_eq!(first["UncollatPFE_5D"], serde_json::json!(100.0));
    assert_eq!(first["CollatPFE_5D"], serde_json::json!(10.0));
    assert_eq!(first["UncollatPFE_30D"], serde_json::json!(300.0));
    assert_eq!(first["CollatPFE_30D"], serde_json::json!(30.0));
    assert_eq!(first["UncollatPFE_15D"], Value::Null);
    assert_eq!(first["CollatPFE_15D"], Value::Null);
}

#[tokio::test]
async fn join_without_pfe_rows_is_all_null() {
    let (trades, _) = seeded_repositories().await;
    let empty = Arc::new(InMemoryPfeRepository::new());
    let join = JoinTradesPfeUseCase::new(sessions(true), trades, empty, PagingPolicy::default());

    let rows = join
        .execute(Engine::F22, &creds(), PageRequest::default())
        .await
        .unwrap();

    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| r.pfe().is_empty()));
}

#[tokio::test]
async fn join_empty_page_skips_pfe_read() {
    let (trades, results) = seeded_repositories().await;
    let join = JoinTradesPfeUseCase::new(
        sessions(true),
        trades,
        results.clone(),
        PagingPolicy::default(),
    );

    let rows = join
        .execute(Engine::F22, &creds(), PageRequest::new(10, 50))
        .await
        .unwrap();
    assert!(rows.is_empty());
    assert_eq!(results.reads(), 0);
}

#[tokio::test]
async fn join_empty_page_is_not_found_when_strict() {
    let (trades, results) = seeded_repositories().await;
    let policy = PagingPolicy {
        strict_empty_pages: true,
        ..PagingPolicy::default()
    };
    let join = JoinTradesPfeUseCase::new(sessions(true), trades, results, policy);

    assert!(matches!(
        join.execute(Engine::F22, &creds(), PageRequest::new(10, 50)).await,
        Err(ApplicationError::NotFound(_))
    ));
}

// ============================================================================
// ListCounterparties
// ============================================================================

#[tokio::test]
async fn counterparties_group_transactions() {
    let (trades, _) = seeded_repositories().await;
    let directory = ListCounterpartiesUseCase::new(sessions(true), trades);

    let tree = directory.execute(Engine::F22, &creds()).await.unwrap();

    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].id, CounterpartyId::new(7));
    assert_eq!(tree[0].name, "Counterparty 7");
    let ids: Vec<TransactionId> = tree[0].transactions.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![TransactionId::new(1), TransactionId::new(2)]);
    assert_eq!(tree[1].transactions[0].name, "Transaction 3");
}

// ============================================================================
// Error Handling
// ============================================================================

#[tokio::test]
async fn storage_failures_are_upstream_failures() {
    let failing = Arc::new(FailingRepository);
    let policy = PagingPolicy::default();

    let list = ListTradesUseCase::new(sessions(true), failing.clone(), policy);
    let aggregate = AggregatePfeUseCase::new(sessions(true), failing.clone());
    let join = JoinTradesPfeUseCase::new(sessions(true), failing.clone(), failing.clone(), policy);
    let directory = ListCounterpartiesUseCase::new(sessions(true), failing);

    assert!(matches!(
        list.execute(Engine::F22, &creds(), PageRequest::default()).await,
        Err(ApplicationError::UpstreamFailure(_))
    ));
    assert!(matches!(
        aggregate
            .execute(Engine::F22, &creds(), PfeStandaloneQuery::for_counterparty("7"))
            .await,
        Err(ApplicationError::UpstreamFailure(_))
    ));
    assert!(matches!(
        join.execute(Engine::F22, &creds(), PageRequest::default()).await,
        Err(ApplicationError::UpstreamFailure(_))
    ));
    assert!(matches!(
        directory.execute(Engine::F22, &creds()).await,
        Err(ApplicationError::UpstreamFailure(_))
    ));
}
