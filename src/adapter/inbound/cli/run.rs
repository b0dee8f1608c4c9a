//! Handler for the `run` command.

use std::time::Duration;

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::{Config, ConfigOverrides};
use crate::infrastructure::runtime;

pub async fn execute(args: &RunArgs) -> Result<()> {
    let overrides = ConfigOverrides {
        mode: args.mode.map(Into::into),
        log_level: args.log_level.clone(),
        json_logs: args.json_logs || output::is_json(),
    };
    let config = Config::load(&args.config)?.with_overrides(&overrides)?;
    let max_runtime = max_runtime(args.hours)?;

    config.init_logging();
    print_startup(&config, max_runtime);

    runtime::run(config, max_runtime).await?;
    Ok(())
}

/// Convert `--hours` into a runtime limit.
pub(crate) fn max_runtime(hours: Option<f64>) -> Result<Option<Duration>> {
    match hours {
        None => Ok(None),
        Some(h) if h.is_finite() && h > 0.0 => Duration::try_from_secs_f64(h * 3600.0)
            .map(Some)
            .map_err(|e| {
                ConfigError::InvalidValue {
                    field: "hours",
                    reason: format!("{h} hours is out of range: {e}"),
                }
                .into()
            }),
        Some(h) => Err(ConfigError::InvalidValue {
            field: "hours",
            reason: format!("must be a positive number of hours, got {h}"),
        }
        .into()),
    }
}

fn print_startup(config: &Config, max_runtime: Option<Duration>) {
    if output::is_quiet() && !output::is_json() {
        return;
    }
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Mode", config.mode);
    match config.market.manual_market() {
        Some(market) => output::field("Market", market),
        None => output::field("Keywords", config.market.keywords.join(" ")),
    }
    output::field("Edge min", config.strategy.edge_min);
    output::field("Order size", format!("${}", config.risk.order_size_usd));
    output::field("Database", &config.database);
    if let Some(limit) = max_runtime {
        output::field("Max runtime", format!("{}s", limit.as_secs()));
    }
    if config.mode == crate::domain::ExecutionMode::Live {
        output::warning("Live mode: orders will be sent to the venue");
    }
}
