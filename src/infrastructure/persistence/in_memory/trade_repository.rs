//! # In-Memory Trade Repository
//!
//! In-memory implementation of [`TradeRepository`] for testing.
//!
//! Trades are kept per engine in a thread-safe map. Every trait call bumps
//! a read counter so tests can assert that a code path never reached
//! storage.

use crate::domain::entities::FxForwardTrade;
use crate::domain::value_objects::{CounterpartyId, Engine, TransactionId};
use crate::infrastructure::persistence::traits::{RepositoryResult, TradeRepository};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// In-memory implementation of [`TradeRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryTradeRepository {
    storage: Arc<RwLock<HashMap<Engine, Vec<FxForwardTrade>>>>,
    reads: Arc<AtomicUsize>,
}

impl InMemoryTradeRepository {
    /// Creates a new empty in-memory trade repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a trade for an engine, replacing any trade with the same id.
    pub async fn insert(&self, engine: Engine, trade: FxForwardTrade) {
        let mut storage = self.storage.write().await;
        let trades = storage.entry(engine).or_default();
        trades.retain(|t| t.transaction_id != trade.transaction_id);
        trades.push(trade);
    }

    /// Number of trait calls served so far.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl TradeRepository for InMemoryTradeRepository {
    async fn find_page(
        &self,
        engine: Engine,
        limit: u32,
        offset: u32,
    ) -> RepositoryResult<Vec<FxForwardTrade>> {
        self.record_read();
        let storage = self.storage.read().await;

        let mut trades: Vec<&FxForwardTrade> =
            storage.get(&engine).map(|v| v.iter().collect()).unwrap_or_default();
        trades.sort_by_key(|t| t.transaction_id);

        Ok(trades
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn find_counterparty_transactions(
        &self,
        engine: Engine,
    ) -> RepositoryResult<Vec<(Option<CounterpartyId>, TransactionId)>> {
        self.record_read();
        let storage = self.storage.read().await;

        Ok(storage
            .get(&engine)
            .map(|trades| {
                trades
                    .iter()
                    .map(|t| (t.counterparty_id, t.transaction_id))
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    async fn seeded(count: i64) -> InMemoryTradeRepository {
        let repo = InMemoryTradeRepository::new();
        // Inserted in reverse so ordering is the repository's job.
        for id in (1..=count).rev() {
            repo.insert(Engine::F22, FxForwardTrade::new(TransactionId::new(id)))
                .await;
        }
        repo
    }

    #[tokio::test]
    async fn page_is_ordered_by_transaction_id() {
        let repo = seeded(5).await;
        let page = repo.find_page(Engine::F22, 3, 1).await.unwrap();
        let ids: Vec<i64> = page.iter().map(|t| t.transaction_id.get()).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn engines_are_isolated() {
        let repo = seeded(3).await;
        assert!(repo.find_page(Engine::Quic, 10, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_replaces_same_id() {
        let repo = InMemoryTradeRepository::new();
        let id = TransactionId::new(1);
        repo.insert(Engine::F22, FxForwardTrade::new(id)).await;
        repo.insert(
            Engine::F22,
            FxForwardTrade::new(id).with_counterparty(CounterpartyId::new(9)),
        )
        .await;

        let page = repo.find_page(Engine::F22, 10, 0).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].counterparty_id, Some(CounterpartyId::new(9)));
    }

    #[tokio::test]
    async fn counts_reads() {
        let repo = seeded(1).await;
        assert_eq!(repo.reads(), 0);
        let _ = repo.find_page(Engine::F22, 1, 0).await.unwrap();
        let _ = repo.find_counterparty_transactions(Engine::F22).await.unwrap();
        assert_eq!(repo.reads(), 2);
    }

    proptest! {
        #[test]
        fn page_never_exceeds_limit(total in 0i64..40, limit in 0u32..50, offset in 0u32..50) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let page = rt.block_on(async {
                seeded(total).await.find_page(Engine::F22, limit, offset).await.unwrap()
            });

            let expected = (total as usize).saturating_sub(offset as usize).min(limit as usize);
            prop_assert_eq!(page.len(), expected);
        }
    }
}
