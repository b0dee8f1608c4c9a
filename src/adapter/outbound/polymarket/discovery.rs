//! Market discovery over the Gamma listing API.
//!
//! Finds the live up/down market whose question mentions every configured
//! keyword and which ends soonest. A pinned token pair short-circuits the
//! lookup entirely.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client as HttpClient;
use tracing::{debug, info, warn};

use super::dto::response::GammaMarket;
use crate::domain::{MarketHandle, MarketSlug, TokenId};
use crate::error::{DiscoveryError, Error};
use crate::infrastructure::config::Config;
use crate::port::MarketResolver;

pub struct GammaDiscovery {
    http: HttpClient,
    gamma_url: String,
    keywords: Vec<String>,
    limit: u32,
    manual: Option<MarketHandle>,
}

impl GammaDiscovery {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let http = HttpClient::builder()
            .timeout(config.network.http_timeout())
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            gamma_url: config.network.gamma_url.trim_end_matches('/').to_string(),
            keywords: config.market.keywords.clone(),
            limit: config.market.discovery_limit,
            manual: config.market.manual_market(),
        }
    }

    /// Fetch active, unclosed markets from Gamma.
    pub async fn fetch_markets(&self) -> Result<Vec<GammaMarket>, DiscoveryError> {
        let url = format!(
            "{}/markets?active=true&closed=false&limit={}",
            self.gamma_url, self.limit
        );
        debug!(url = %url, "Fetching active markets (Gamma)");

        let markets: Vec<GammaMarket> = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!(count = markets.len(), "Fetched markets from Gamma");
        Ok(markets)
    }
}

#[async_trait]
impl MarketResolver for GammaDiscovery {
    async fn resolve(&self) -> Result<Option<MarketHandle>, Error> {
        if let Some(manual) = &self.manual {
            return Ok(Some(manual.clone()));
        }

        let markets = self.fetch_markets().await?;
        let selected = select_market(&markets, &self.keywords, Utc::now());
        match &selected {
            Some(market) => info!(
                slug = %market.slug(),
                end = ?market.end_time(),
                "Discovered market"
            ),
            None => warn!(keywords = ?self.keywords, scanned = markets.len(), "No matching market"),
        }
        Ok(selected)
    }
}

/// Pick the matching market that ends soonest.
///
/// A market matches when its question contains every keyword
/// (case-insensitive), it has not ended, it lists at least two outcomes
/// and two token ids, and its outcomes name both an up and a down side.
/// Markets without an end date sort last.
#[must_use]
pub fn select_market(
    markets: &[GammaMarket],
    keywords: &[String],
    now: DateTime<Utc>,
) -> Option<MarketHandle> {
    let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

    markets
        .iter()
        .filter_map(|market| candidate(market, &keywords, now))
        .min_by_key(|handle| (handle.end_time().is_none(), handle.end_time()))
}

fn candidate(market: &GammaMarket, keywords: &[String], now: DateTime<Utc>) -> Option<MarketHandle> {
    let question = market.question.as_deref()?.to_lowercase();
    if !keywords.iter().all(|k| question.contains(k.as_str())) {
        return None;
    }

    let end_time = market.end_time();
    if end_time.is_some_and(|end| end < now) {
        return None;
    }

    let names = market.outcome_names();
    let token_ids = market.token_ids();
    if names.len() < 2 || token_ids.len() < 2 {
        return None;
    }

    let side = |needle: &str| {
        names
            .iter()
            .zip(&token_ids)
            .find(|(name, _)| name.to_lowercase().contains(needle))
            .map(|(_, id)| TokenId::new(id.as_str()))
    };
    let up = side("up")?;
    let down = side("down")?;

    let slug = market
        .slug
        .clone()
        .or_else(|| market.condition_id.clone())
        .unwrap_or_else(|| "unknown".to_string());
    let handle = MarketHandle::new(MarketSlug::new(slug), up, down);
    Some(match end_time {
        Some(end) => handle.with_end_time(end),
        None => handle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn gamma(slug: &str, question: &str, end: Option<&str>, outcomes: &str, ids: &str) -> GammaMarket {
        GammaMarket {
            condition_id: None,
            slug: Some(slug.into()),
            question: Some(question.into()),
            active: true,
            closed: false,
            end_date: end.map(String::from),
            outcomes: Some(outcomes.into()),
            clob_token_ids: Some(ids.into()),
        }
    }

    fn keywords() -> Vec<String> {
        vec!["bitcoin".into(), "up".into(), "down".into()]
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    #[test]
    fn picks_soonest_ending_match() {
        let markets = vec![
            gamma("btc-15m", "Bitcoin Up or Down - 15m", Some("2026-10-16T12:15:00Z"), r#"["Up","Down"]"#, r#"["u15","d15"]"#),
            gamma("btc-5m", "Bitcoin Up or Down - 5m", Some("2026-10-16T12:05:00Z"), r#"["Up","Down"]"#, r#"["u5","d5"]"#),
        ];

        let handle = select_market(&markets, &keywords(), now()).unwrap();
        assert_eq!(handle.slug().as_str(), "btc-5m");
        assert_eq!(handle.up_token_id().as_str(), "u5");
        assert_eq!(handle.down_token_id().as_str(), "d5");
    }

    #[test]
    fn skips_ended_and_unrelated_markets() {
        let markets = vec![
            gamma("old", "Bitcoin Up or Down", Some("2026-10-16T11:55:00Z"), r#"["Up","Down"]"#, r#"["a","b"]"#),
            gamma("eth", "Ethereum Up or Down", Some("2026-10-16T12:05:00Z"), r#"["Up","Down"]"#, r#"["c","d"]"#),
        ];
        assert!(select_market(&markets, &keywords(), now()).is_none());
    }

    #[test]
    fn maps_outcomes_by_name_not_position() {
        let markets = vec![gamma("btc", "BITCOIN up or down?", None, r#"["Down","Up"]"#, r#"["d","u"]"#)];

        let handle = select_market(&markets, &keywords(), now()).unwrap();
        assert_eq!(handle.up_token_id().as_str(), "u");
        assert_eq!(handle.down_token_id().as_str(), "d");
    }

    #[test]
    fn requires_both_sides_and_two_tokens() {
        let markets = vec![
            gamma("yes-no", "Bitcoin up or down?", None, r#"["Yes","No"]"#, r#"["y","n"]"#),
            gamma("short", "Bitcoin up or down?", None, r#"["Up","Down"]"#, r#"["u"]"#),
        ];
        assert!(select_market(&markets, &keywords(), now()).is_none());
    }

    #[test]
    fn dated_market_beats_undated() {
        let markets = vec![
            gamma("undated", "Bitcoin up or down?", None, r#"["Up","Down"]"#, r#"["u1","d1"]"#),
            gamma("dated", "Bitcoin up or down?", Some("2026-10-16T13:00:00Z"), r#"["Up","Down"]"#, r#"["u2","d2"]"#),
        ];
        let handle = select_market(&markets, &keywords(), now()).unwrap();
        assert_eq!(handle.slug().as_str(), "dated");
    }

    #[tokio::test]
    async fn manual_pair_skips_network() {
        let mut config = Config::default();
        config.network.gamma_url = "http://127.0.0.1:9".into();
        config.market.up_token_id = Some("111".into());
        config.market.down_token_id = Some("222".into());

        let discovery = GammaDiscovery::from_config(&config);
        let handle = discovery.resolve().await.unwrap().unwrap();
        assert_eq!(handle.slug().as_str(), "manual-config");
        assert_eq!(handle.up_token_id().as_str(), "111");
    }
}
