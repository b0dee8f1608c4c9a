//! Handler for `check config`.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::domain::ExecutionMode;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Load and validate a configuration file without starting a session.
pub fn execute_config(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    output::section("Configuration check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::section("Market");
    match config.market.manual_market() {
        Some(market) => output::field("Pinned", market),
        None => output::field("Keywords", config.market.keywords.join(", ")),
    }
    output::field("Rotate every", format!("{}s", config.market.rotate_interval_seconds));
    output::field("Fallback", format!("{}s", config.market.market_discovery_fallback_seconds));

    output::section("Strategy");
    let strategy = &config.strategy;
    output::field("Edge min", strategy.edge_min);
    output::field("Max spread", strategy.max_spread);
    output::field("Windows", format!("momentum {} / vol {}", strategy.momentum_window, strategy.vol_window));
    output::field("Loop interval", format!("{}s", strategy.loop_interval_seconds));
    output::field("Profit take", format!("{} bps", strategy.profit_take_bps));
    output::field("Time stop", format!("{}s", strategy.time_stop_seconds));
    output::field("Cross-window", strategy.allow_cross_window_positions);

    output::section("Risk");
    output::field("Order size", format!("${}", config.risk.order_size_usd));
    output::field("Max position", format!("${}", config.risk.max_position_usd));
    output::field("Daily loss limit", format!("${}", config.risk.daily_loss_limit_usd));
    output::field("Cooldown", format!("{}s", config.risk.cooldown_seconds));

    output::section("Execution");
    output::field("Mode", config.mode);
    output::field("Database", &config.database);
    if config.wallet.private_key.is_some() {
        output::success("Wallet credentials detected");
    } else if config.mode == ExecutionMode::Paper {
        output::field("Wallet", "not configured (paper mode)");
    }

    Ok(())
}
