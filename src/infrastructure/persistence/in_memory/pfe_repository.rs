//! # In-Memory PFE Repository
//!
//! In-memory implementation of [`PfeRepository`] for testing.
//!
//! Averaging goes through [`exposure::average_by_horizon`] so the results
//! follow the same rules as the database aggregate.

use crate::domain::entities::{HorizonAverage, PfeFilter, PfeResult};
use crate::domain::services::exposure;
use crate::domain::value_objects::{Engine, Horizon, TransactionId};
use crate::infrastructure::persistence::traits::{PfeRepository, RepositoryResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// In-memory implementation of [`PfeRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryPfeRepository {
    storage: Arc<RwLock<HashMap<Engine, Vec<PfeResult>>>>,
    reads: Arc<AtomicUsize>,
}

impl InMemoryPfeRepository {
    /// Creates a new empty in-memory PFE repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sample for an engine.
    pub async fn insert(&self, engine: Engine, row: PfeResult) {
        self.storage
            .write()
            .await
            .entry(engine)
            .or_default()
            .push(row);
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
impl PfeRepository for InMemoryPfeRepository {
    async fn average_by_horizon(
        &self,
        engine: Engine,
        filter: &PfeFilter,
    ) -> RepositoryResult<Vec<HorizonAverage>> {
        self.record_read();
        let storage = self.storage.read().await;

        let rows = storage.get(&engine).map(Vec::as_slice).unwrap_or_default();
        Ok(exposure::average_by_horizon(
            rows.iter().filter(|row| filter.matches(row)),
        ))
    }

    async fn find_for_transactions(
        &self,
        engine: Engine,
        transactions: &[TransactionId],
        horizons: &[Horizon],
    ) -> RepositoryResult<Vec<PfeResult>> {
        self.record_read();
        let storage = self.storage.read().await;

        let rows = storage.get(&engine).map(Vec::as_slice).unwrap_or_default();
        Ok(rows
            .iter()
            .filter(|r| transactions.contains(&r.transaction_id) && horizons.contains(&r.horizon))
            .cloned()
            .collect())
    }
}
