use std::sync::Arc;

use anyhow::Context;
use deadpool_postgres::Pool;
use lexiscope_core::{Analyzer, AnalyzerConfig, HttpFetcher};

use crate::config::ServerConfig;
use crate::db::{self, PgSink};
use crate::routes;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer<HttpFetcher, PgSink>>,
    pub pool: Pool,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Builds the pool and analyzer. No connection is opened until first use.
    pub fn new(config: ServerConfig) -> anyhow::Result<Self> {
        let pool = db::create_pool(&config.database_url)?;

        let analyzer_config = AnalyzerConfig::builder().timeout(config.fetch_timeout).build();
        let fetcher = HttpFetcher::new(analyzer_config.fetch.clone()).context("Failed to build HTTP client")?;
        let analyzer = Analyzer::new(fetcher, PgSink::new(pool.clone()), analyzer_config)
            .context("Invalid analyzer configuration")?;

        Ok(Self { analyzer: Arc::new(analyzer), pool, config: Arc::new(config) })
    }
}

/// Bootstraps the schema and serves until Ctrl-C.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let bind = config.bind;
    let state = AppState::new(config)?;
    db::bootstrap(&state.pool).await?;

    let app = routes::create_router(state);

    tracing::info!("Starting server at http://{}", bind);
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutting down");
}
