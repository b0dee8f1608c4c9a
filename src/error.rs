use thiserror::Error;

use crate::domain::position::PositionError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Order placement errors with structured variants.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("invalid token ID '{token_id}': {reason}")]
    InvalidTokenId { token_id: String, reason: String },

    #[error("order rejected: {0}")]
    OrderRejected(String),

    #[error("failed to build order: {0}")]
    OrderBuildFailed(String),

    #[error("failed to sign order: {0}")]
    SigningFailed(String),

    #[error("failed to submit order: {0}")]
    SubmissionFailed(String),

    #[error("live execution requires the `polymarket` feature")]
    LiveUnavailable,
}

/// Market discovery errors.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("no active market matches keywords {keywords:?}")]
    NoMarket { keywords: Vec<String> },

    #[error("market listing request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("malformed market listing: {0}")]
    Malformed(String),
}

/// Reasons the risk manager refuses a new entry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    #[error("daily loss limit hit: realized {realized} <= -{limit}")]
    DailyLossLimitHit {
        realized: rust_decimal::Decimal,
        limit: rust_decimal::Decimal,
    },

    #[error("max exposure hit: {current} + {additional} > {limit}")]
    MaxExposureHit {
        current: rust_decimal::Decimal,
        additional: rust_decimal::Decimal,
        limit: rust_decimal::Decimal,
    },

    #[error("cooldown active: {elapsed_secs}s of {cooldown_secs}s elapsed")]
    CooldownActive { elapsed_secs: i64, cooldown_secs: u64 },
}

impl RiskError {
    /// Stable reason code recorded alongside ticks and counted in session stats.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::DailyLossLimitHit { .. } => "daily_loss_limit_hit",
            Self::MaxExposureHit { .. } => "max_exposure_hit",
            Self::CooldownActive { .. } => "cooldown_active",
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Risk(#[from] RiskError),

    #[error(transparent)]
    Position(#[from] PositionError),

    #[error("WebSocket error: {0}")]
    WebSocket(Box<tokio_tungstenite::tungstenite::Error>),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("database error: {0}")]
    Database(String),

    #[cfg(feature = "polymarket")]
    #[error("Polymarket SDK error: {0}")]
    Polymarket(#[from] polymarket_client_sdk::error::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<tokio_tungstenite::tungstenite::Error> for Error {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Error::WebSocket(Box::new(err))
    }
}

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Error::Database(err.to_string())
    }
}

impl From<diesel::r2d2::PoolError> for Error {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        Error::Database(err.to_string())
    }
}
