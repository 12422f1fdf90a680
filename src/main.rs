//! # PFE Dashboard
//!
//! Main entry point for the PFE dashboard service.

use std::sync::Arc;

use pfe_dashboard::api::middleware::auth::JwtSessionProvider;
use pfe_dashboard::api::middleware::logging::create_logging_state;
use pfe_dashboard::api::rest::{AppState, create_router};
use pfe_dashboard::config::{AppConfig, LogConfig, LogFormat};
use pfe_dashboard::infrastructure::persistence::postgres::{
    self, PostgresPfeRepository, PostgresTradeRepository,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(log.include_target);

    match log.format {
        LogFormat::Json => builder
            .json()
            .with_current_span(log.include_spans)
            .with_span_list(log.include_spans)
            .init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for ctrl-c");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.log);

    info!("Starting PFE dashboard v{}", env!("CARGO_PKG_VERSION"));

    let pool = postgres::connect(&config.database).await?;
    let trades = Arc::new(PostgresTradeRepository::new(pool.clone()));
    let pfe = Arc::new(PostgresPfeRepository::new(pool.clone()));
    let sessions = Arc::new(JwtSessionProvider::new(config.auth.clone()));

    let state = Arc::new(AppState::new(sessions, trades, pfe, config.data));
    let router = create_router(state, create_logging_state());

    let addr = config.rest.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "REST server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down PFE dashboard");
    pool.close().await;

    Ok(())
}
