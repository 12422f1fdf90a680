//! # List Trades Use Case
//!
//! Pages through an engine's FX forward trades.

use crate::application::dto::{FxForwardTradeDto, PageRequest, PagingPolicy};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::session::{Credentials, SessionProvider, require_session};
use crate::domain::value_objects::Engine;
use crate::infrastructure::persistence::traits::TradeRepository;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Use case for listing a page of trades.
#[derive(Debug, Clone)]
pub struct ListTradesUseCase {
    sessions: Arc<dyn SessionProvider>,
    trades: Arc<dyn TradeRepository>,
    paging: PagingPolicy,
}

impl ListTradesUseCase {
    /// Creates a new ListTradesUseCase.
    #[must_use]
    pub fn new(
        sessions: Arc<dyn SessionProvider>,
        trades: Arc<dyn TradeRepository>,
        paging: PagingPolicy,
    ) -> Self {
        Self {
            sessions,
            trades,
            paging,
        }
    }

    /// Returns up to `page.limit` trades of `engine`, skipping
    /// `page.offset`, ordered by transaction id.
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
    ) -> ApplicationResult<Vec<FxForwardTradeDto>> {
        let session = require_session(self.sessions.as_ref(), credentials).await?;
        let page = self.paging.clamp(page);
        debug!(subject = %session.subject, limit = page.limit, offset = page.offset, "listing trades");

        let trades = self
            .trades
            .find_page(engine, page.limit, page.offset)
            .await?;

        if trades.is_empty() && self.paging.strict_empty_pages {
            return Err(ApplicationError::not_found("No trades found"));
        }

        Ok(trades
            .into_iter()
            .map(|trade| FxForwardTradeDto::new(engine, trade))
            .collect())
    }
}
