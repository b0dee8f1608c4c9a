//! Gamma market listing response types.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

/// Market data from the Gamma API.
///
/// Response format: flat JSON array (no wrapper object). Outcome names and
/// CLOB token ids arrive as JSON-encoded strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaMarket {
    #[serde(default)]
    pub condition_id: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub closed: bool,
    /// ISO-8601 end of the market window.
    #[serde(default, alias = "end_date")]
    pub end_date: Option<String>,
    /// JSON-encoded outcome names (e.g., `["Up", "Down"]`).
    #[serde(default)]
    pub outcomes: Option<String>,
    /// JSON-encoded CLOB token IDs.
    #[serde(default, alias = "clob_token_ids")]
    pub clob_token_ids: Option<String>,
}

impl GammaMarket {
    /// Parse the JSON-encoded CLOB token IDs.
    pub fn token_ids(&self) -> Vec<String> {
        self.decode_list(self.clob_token_ids.as_deref(), "clob_token_ids")
    }

    /// Parse the JSON-encoded outcome names.
    pub fn outcome_names(&self) -> Vec<String> {
        self.decode_list(self.outcomes.as_deref(), "outcomes")
    }

    /// Parsed end date; `None` when missing or malformed.
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_date
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    fn decode_list(&self, raw: Option<&str>, field: &str) -> Vec<String> {
        raw.and_then(|s| {
            serde_json::from_str::<Vec<String>>(s)
                .map_err(|e| {
                    debug!(
                        error = %e,
                        raw = %s,
                        field,
                        slug = ?self.slug,
                        "Failed to parse JSON-encoded list"
                    );
                })
                .ok()
        })
        .unwrap_or_default()
    }
}
