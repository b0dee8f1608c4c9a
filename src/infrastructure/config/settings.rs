//! Top-level configuration loading and validation.
//!
//! # Example
//!
//! ```no_run
//! use driftline::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::logging::LoggingConfig;
use super::market::MarketConfig;
use super::network::NetworkConfig;
use super::reconnection::ReconnectionConfig;
use super::risk::RiskConfig;
use super::strategy::StrategyConfig;
use crate::domain::ExecutionMode;
use crate::error::{ConfigError, Result};

/// Longest accepted tick or refresh period (one day).
pub const MAX_PERIOD_SECS: u64 = 86_400;

/// Paper execution tuning.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaperConfig {
    /// Tolerance added to a buy limit (subtracted from a sell limit) before
    /// comparing it with the opposing top of book.
    #[serde(default)]
    pub fill_epsilon: Decimal,
}

/// Signing credentials. Never read from the config file.
#[derive(Clone, Default, Deserialize)]
pub struct WalletConfig {
    #[serde(skip)]
    pub private_key: Option<String>,
}

impl std::fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletConfig")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Overrides supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub mode: Option<ExecutionMode>,
    pub log_level: Option<String>,
    pub json_logs: bool,
}

/// Immutable session configuration, passed by reference into constructors.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mode: ExecutionMode,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub market: MarketConfig,
    #[serde(default)]
    pub strategy: StrategyConfig,
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default)]
    pub paper: PaperConfig,
    #[serde(default)]
    pub reconnection: ReconnectionConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
    /// SQLite database path for the event record.
    #[serde(default = "default_database_path")]
    pub database: String,
}

fn default_database_path() -> String {
    "driftline.db".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::default(),
            logging: LoggingConfig::default(),
            network: NetworkConfig::default(),
            market: MarketConfig::default(),
            strategy: StrategyConfig::default(),
            risk: RiskConfig::default(),
            paper: PaperConfig::default(),
            reconnection: ReconnectionConfig::default(),
            wallet: WalletConfig::default(),
            database: default_database_path(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML and apply environment secrets.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with_env(content, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::parse_toml`] with an injectable environment lookup.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml_with_env<F>(content: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        // Private key from environment only, never from the file.
        config.wallet.private_key = env("WALLET_PRIVATE_KEY").filter(|k| !k.is_empty());
        if let Some(up) = env("UP_TOKEN_ID").filter(|v| !v.is_empty()) {
            config.market.up_token_id = Some(up);
        }
        if let Some(down) = env("DOWN_TOKEN_ID").filter(|v| !v.is_empty()) {
            config.market.down_token_id = Some(down);
        }

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Apply command-line overrides and re-validate.
    #[allow(clippy::result_large_err)]
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Result<Self> {
        if let Some(mode) = overrides.mode {
            self.mode = mode;
        }
        if let Some(level) = &overrides.log_level {
            self.logging.level.clone_from(level);
        }
        if overrides.json_logs {
            self.logging.format = "json".into();
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are present and values are within
    /// acceptable ranges.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("binance_ws_url", &self.network.binance_ws_url),
            ("polymarket_ws_url", &self.network.polymarket_ws_url),
            ("clob_url", &self.network.clob_url),
            ("gamma_url", &self.network.gamma_url),
        ] {
            if value.is_empty() {
                return Err(ConfigError::MissingField { field }.into());
            }
            if let Err(e) = url::Url::parse(value) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: e.to_string(),
                }
                .into());
            }
        }

        let strategy = &self.strategy;
        if strategy.momentum_window == 0 || strategy.vol_window == 0 {
            return Err(ConfigError::InvalidValue {
                field: "momentum_window/vol_window",
                reason: "windows must be greater than 0".to_string(),
            }
            .into());
        }
        if strategy.history_capacity < strategy.momentum_window.max(strategy.vol_window) + 2 {
            return Err(ConfigError::InvalidValue {
                field: "history_capacity",
                reason: "must hold at least max(momentum_window, vol_window) + 2 prices"
                    .to_string(),
            }
            .into());
        }
        if !strategy.edge_min.is_finite() || strategy.edge_min < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "edge_min",
                reason: "must be a finite number >= 0".to_string(),
            }
            .into());
        }
        if !strategy.max_spread.is_finite() || strategy.max_spread < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "max_spread",
                reason: "must be a finite number >= 0".to_string(),
            }
            .into());
        }
        if !strategy.loop_interval_seconds.is_finite()
            || strategy.loop_interval_seconds <= 0.0
            || strategy.loop_interval_seconds > MAX_PERIOD_SECS as f64
        {
            return Err(ConfigError::InvalidValue {
                field: "loop_interval_seconds",
                reason: format!("must be greater than 0 and at most {MAX_PERIOD_SECS}"),
            }
            .into());
        }

        if self.risk.order_size_usd <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "order_size_usd",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.risk.max_position_usd < self.risk.order_size_usd {
            return Err(ConfigError::InvalidValue {
                field: "max_position_usd",
                reason: "must be >= order_size_usd".to_string(),
            }
            .into());
        }
        if self.paper.fill_epsilon < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "fill_epsilon",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }

        if self.market.rotate_interval_seconds == 0
            || self.market.rotate_interval_seconds > MAX_PERIOD_SECS
        {
            return Err(ConfigError::InvalidValue {
                field: "rotate_interval_seconds",
                reason: format!("must be greater than 0 and at most {MAX_PERIOD_SECS}"),
            }
            .into());
        }
        if self.market.up_token_id.is_some() != self.market.down_token_id.is_some() {
            return Err(ConfigError::InvalidValue {
                field: "up_token_id/down_token_id",
                reason: "set both token ids or neither".to_string(),
            }
            .into());
        }
        if self.market.manual_market().is_none() && self.market.keywords.is_empty() {
            return Err(ConfigError::MissingField { field: "keywords" }.into());
        }

        if self.reconnection.initial_delay_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "initial_delay_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.reconnection.max_delay_ms < self.reconnection.initial_delay_ms {
            return Err(ConfigError::InvalidValue {
                field: "max_delay_ms",
                reason: "must be >= initial_delay_ms".to_string(),
            }
            .into());
        }
        if self.reconnection.backoff_multiplier < 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "backoff_multiplier",
                reason: "must be >= 1.0".to_string(),
            }
            .into());
        }

        if self.mode == ExecutionMode::Live && self.wallet.private_key.is_none() {
            return Err(ConfigError::MissingField {
                field: "WALLET_PRIVATE_KEY",
            }
            .into());
        }

        Ok(())
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml_with_env("", no_env).unwrap();
        assert_eq!(config.mode, ExecutionMode::Paper);
        assert_eq!(config.strategy.edge_min, 0.04);
        assert_eq!(config.strategy.max_spread, 0.03);
        assert_eq!(config.strategy.momentum_window, 40);
        assert_eq!(config.strategy.vol_window, 60);
        assert_eq!(config.risk.order_size_usd, dec!(10));
        assert_eq!(config.risk.max_position_usd, dec!(30));
        assert_eq!(config.risk.daily_loss_limit_usd, dec!(20));
        assert_eq!(config.risk.cooldown_seconds, 45);
        assert_eq!(config.market.rotate_interval_seconds, 300);
        assert_eq!(config.market.market_discovery_fallback_seconds, 120);
        assert_eq!(config.database, "driftline.db");
        assert!(config.market.manual_market().is_none());
    }

    #[test]
    fn env_supplies_secrets_and_manual_market() {
        let env = |key: &str| match key {
            "WALLET_PRIVATE_KEY" => Some("0xabc".to_string()),
            "UP_TOKEN_ID" => Some("111".to_string()),
            "DOWN_TOKEN_ID" => Some("222".to_string()),
            _ => None,
        };
        let config = Config::parse_toml_with_env("mode = \"live\"", env).unwrap();

        assert_eq!(config.wallet.private_key.as_deref(), Some("0xabc"));
        let market = config.market.manual_market().unwrap();
        assert_eq!(market.slug().as_str(), "manual-config");
        assert_eq!(market.up_token_id().as_str(), "111");
        assert_eq!(market.down_token_id().as_str(), "222");
    }

    #[test]
    fn private_key_in_file_is_ignored() {
        let toml = "[wallet]\nprivate_key = \"0xdead\"\n";
        let config = Config::parse_toml_with_env(toml, no_env).unwrap();
        assert!(config.wallet.private_key.is_none());
    }

    #[test]
    fn live_mode_requires_private_key() {
        let err = Config::parse_toml_with_env("mode = \"live\"", no_env).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField {
                field: "WALLET_PRIVATE_KEY"
            })
        ));
    }

    #[test]
    fn single_manual_token_is_rejected() {
        let toml = "[market]\nup_token_id = \"111\"\n";
        let err = Config::parse_toml_with_env(toml, no_env).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "up_token_id/down_token_id",
                ..
            })
        ));
    }

    #[test]
    fn overrides_switch_mode_and_logging() {
        let config = Config::parse_toml_with_env("", no_env).unwrap();
        let overrides = ConfigOverrides {
            mode: Some(ExecutionMode::Live),
            log_level: Some("debug".into()),
            json_logs: true,
        };
        // Live without a key fails re-validation.
        assert!(config.clone().with_overrides(&overrides).is_err());

        let overrides = ConfigOverrides {
            mode: None,
            ..overrides
        };
        let config = config.with_overrides(&overrides).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.is_json());
    }

    #[test]
    fn wallet_debug_redacts_key() {
        let wallet = WalletConfig {
            private_key: Some("0xsecret".into()),
        };
        let rendered = format!("{wallet:?}");
        assert!(!rendered.contains("0xsecret"));
    }
}
