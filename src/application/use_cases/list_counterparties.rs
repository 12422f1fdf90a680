//! # List Counterparties Use Case
//!
//! Builds the counterparty/transaction selector tree from a single scan of
//! an engine's trades.

use crate::application::dto::CounterpartyDto;
use crate::application::error::ApplicationResult;
use crate::application::session::{Credentials, SessionProvider, require_session};
use crate::domain::entities::Counterparty;
use crate::domain::value_objects::Engine;
use crate::infrastructure::persistence::traits::TradeRepository;
use std::sync::Arc;
use tracing::instrument;

/// Use case for the counterparty directory.
#[derive(Debug, Clone)]
pub struct ListCounterpartiesUseCase {
    sessions: Arc<dyn SessionProvider>,
    trades: Arc<dyn TradeRepository>,
}

impl ListCounterpartiesUseCase {
    /// Creates a new ListCounterpartiesUseCase.
    #[must_use]
    pub fn new(sessions: Arc<dyn SessionProvider>, trades: Arc<dyn TradeRepository>) -> Self {
        Self { sessions, trades }
    }

    /// Groups the engine's trades by counterparty.
    ///
    /// Trades without a counterparty are left out.
    ///
    /// # Errors
    ///
    /// Fails with `Unauthenticated` without a session and with
    /// `UpstreamFailure` if storage fails.
    #[instrument(skip(self, credentials), fields(engine = %engine))]
    pub async fn execute(
        &self,
        engine: Engine,
        credentials: &Credentials,
    ) -> ApplicationResult<Vec<CounterpartyDto>> {
        require_session(self.sessions.as_ref(), credentials).await?;

        let pairs = self.trades.find_counterparty_transactions(engine).await?;
        Ok(Counterparty::group(pairs)
            .iter()
            .map(CounterpartyDto::from)
            .collect())
    }
}
