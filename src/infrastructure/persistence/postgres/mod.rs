//! # PostgreSQL Repositories
//!
//! PostgreSQL implementations of repository traits using sqlx.
//!
//! The pool is built once by [`connect`] and handed to each repository.

pub mod pfe_repository;
pub mod trade_repository;


pub use pfe_repository::PostgresPfeRepository;
pub use trade_repository::PostgresTradeRepository;

use crate::config::DatabaseConfig;
use crate::infrastructure::persistence::traits::{RepositoryError, RepositoryResult};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::info;

/// Opens a connection pool for the configured database.
///
/// # Errors
///
/// Returns [`RepositoryError::Connection`] if the database is unreachable.
pub async fn connect(config: &DatabaseConfig) -> RepositoryResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| RepositoryError::connection(e.to_string()))?;

    info!(
        max_connections = config.max_connections,
        "database pool established"
    );
    Ok(pool)
}
