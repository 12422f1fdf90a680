//! # Aggregate PFE Use Case
//!
//! Mean PFE per horizon for a counterparty, optionally narrowed to one
//! transaction.

use crate::application::dto::{PfeAverageDto, PfeStandaloneQuery};
use crate::application::error::ApplicationResult;
use crate::application::session::{Credentials, SessionProvider, require_session};
use crate::domain::value_objects::Engine;
use crate::infrastructure::persistence::traits::PfeRepository;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Use case for the standalone PFE chart.
#[derive(Debug, Clone)]
pub struct AggregatePfeUseCase {
    sessions: Arc<dyn SessionProvider>,
    pfe: Arc<dyn PfeRepository>,
}

impl AggregatePfeUseCase {
    /// Creates a new AggregatePfeUseCase.
    #[must_use]
    pub fn new(sessions: Arc<dyn SessionProvider>, pfe: Arc<dyn PfeRepository>) -> Self {
        Self { sessions, pfe }
    }

    /// Averages PFE per horizon, ordered by horizon ascending.
    ///
    /// An unknown counterparty yields an empty list.
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::BadRequest`] if the counterparty is missing or
    ///   an identifier is malformed, before the session is consulted
    /// - [`ApplicationError::Unauthenticated`] without a session
    /// - [`ApplicationError::UpstreamFailure`] if storage fails
    ///
    /// [`ApplicationError::Unauthenticated`]: crate::application::error::ApplicationError::Unauthenticated
    /// [`ApplicationError::BadRequest`]: crate::application::error::ApplicationError::BadRequest
    /// [`ApplicationError::UpstreamFailure`]: crate::application::error::ApplicationError::UpstreamFailure
    #[instrument(skip(self, credentials), fields(engine = %engine))]
    pub async fn execute(
        &self,
        engine: Engine,
        credentials: &Credentials,
        query: PfeStandaloneQuery,
    ) -> ApplicationResult<Vec<PfeAverageDto>> {
        let filter = query.into_filter()?;
        require_session(self.sessions.as_ref(), credentials).await?;
        debug!(counterparty = %filter.counterparty_id, "averaging pfe");

        let averages = self.pfe.average_by_horizon(engine, &filter).await?;
        Ok(averages.into_iter().map(PfeAverageDto::from).collect())
    }
}
