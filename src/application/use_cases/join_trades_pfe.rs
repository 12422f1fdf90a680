//! # Join Trades with PFE Use Case
//!
//! Attaches 5, 15 and 30-day PFE values to a page of trades.
//!
//! Two reads: the page of trades, then the PFE rows of exactly those
//! transactions at the snapshot horizons. Rows are indexed by transaction
//! and each trade picks up its own snapshot, or an empty one.

use crate::application::dto::{PageRequest, PagingPolicy, TradeWithPfeDto};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::session::{Credentials, SessionProvider, require_session};
use crate::domain::services::index_snapshots;
use crate::domain::value_objects::{Engine, SnapshotHorizon, TransactionId};
use crate::infrastructure::persistence::traits::{PfeRepository, TradeRepository};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Use case for the trades table with PFE columns.
#[derive(Debug, Clone)]
pub struct JoinTradesPfeUseCase {
    sessions: Arc<dyn SessionProvider>,
    trades: Arc<dyn TradeRepository>,
    pfe: Arc<dyn PfeRepository>,
    paging: PagingPolicy,
}

impl JoinTradesPfeUseCase {
    /// Creates a new JoinTradesPfeUseCase.
    #[must_use]
    pub fn new(
        sessions: Arc<dyn SessionProvider>,
        trades: Arc<dyn TradeRepository>,
        pfe: Arc<dyn PfeRepository>,
        paging: PagingPolicy,
    ) -> Self {
        Self {
            sessions,
            trades,
            pfe,
            paging,
        }
    }

    /// Returns a page of trades, each with its snapshot PFE values.
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::Unauthenticated`] without a session
    /// - [`ApplicationError::NotFound`] for an empty page under a strict
    ///   paging policy
    /// - [`ApplicationError::UpstreamFailure`] if storage fails
    #[instrument(skip(self, credentials), fields(engine = %engine))]
    pub async fn execute(
        &self,
        engine: Engine,
        credentials: &Credentials,
        page: PageRequest,
    ) -> ApplicationResult<Vec<TradeWithPfeDto>> {
        require_session(self.sessions.as_ref(), credentials).await?;
        let page = self.paging.clamp(page);

        let trades = self
            .trades
            .find_page(engine, page.limit, page.offset)
            .await?;

        if trades.is_empty() {
            if self.paging.strict_empty_pages {
                return Err(ApplicationError::not_found("No trades found"));
            }
            return Ok(Vec::new());
        }

        let ids: Vec<TransactionId> = trades.iter().map(|t| t.transaction_id).collect();
        let rows = self
            .pfe
            .find_for_transactions(engine, &ids, &SnapshotHorizon::horizons())
            .await?;
        debug!(trades = trades.len(), pfe_rows = rows.len(), "joining pfe");

        let snapshots = index_snapshots(&rows);
        Ok(trades
            .into_iter()
            .map(|trade| {
                let pfe = snapshots
                    .get(&trade.transaction_id)
                    .copied()
                    .unwrap_or_default();
                TradeWithPfeDto::new(engine, trade, pfe)
            })
            .collect())
    }
}
