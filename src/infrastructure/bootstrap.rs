//! Composition root: builds the collaborators a session needs from config.
//!
//! Everything here runs before the first tick, so every failure is fatal.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::paper::PaperExecutor;
use crate::adapter::outbound::polymarket::GammaDiscovery;
use crate::adapter::outbound::sqlite::database::connection;
use crate::adapter::outbound::sqlite::SqliteRecorder;
use crate::domain::ExecutionMode;
use crate::error::Result;
use crate::infrastructure::config::Config;
use crate::port::{EventRecorder, MarketResolver, OrderExecutor};

/// Open (and migrate) the session database.
pub(crate) fn build_recorder(config: &Config) -> Result<Arc<dyn EventRecorder>> {
    let pool = connection::open(&config.database)?;
    info!(path = %config.database, "Session database ready");
    Ok(Arc::new(SqliteRecorder::new(pool)))
}

pub(crate) fn build_resolver(config: &Config) -> Arc<dyn MarketResolver> {
    Arc::new(GammaDiscovery::from_config(config))
}

/// Paper or live executor depending on the configured mode.
pub(crate) async fn build_executor(config: &Config) -> Result<Arc<dyn OrderExecutor>> {
    match config.mode {
        ExecutionMode::Paper => {
            info!(fill_epsilon = %config.paper.fill_epsilon, "Using paper execution");
            Ok(Arc::new(PaperExecutor::new(config.paper.fill_epsilon)))
        }
        ExecutionMode::Live => build_live_executor(config).await,
    }
}

#[cfg(feature = "polymarket")]
async fn build_live_executor(config: &Config) -> Result<Arc<dyn OrderExecutor>> {
    use crate::adapter::outbound::polymarket::PolymarketExecutor;
    use crate::error::ConfigError;

    let key = config
        .wallet
        .private_key
        .as_deref()
        .ok_or(ConfigError::MissingField {
            field: "WALLET_PRIVATE_KEY",
        })?;
    let executor =
        PolymarketExecutor::connect(&config.network.clob_url, key, config.network.chain_id).await?;
    info!("Using live execution");
    Ok(Arc::new(executor))
}

#[cfg(not(feature = "polymarket"))]
async fn build_live_executor(_config: &Config) -> Result<Arc<dyn OrderExecutor>> {
    Err(crate::error::ExecutionError::LiveUnavailable.into())
}
