//! The binary up/down market being traded.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{MarketSlug, TokenId};

/// Side of a binary up/down market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Up,
    Down,
}

impl Outcome {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of the currently traded market window.
///
/// Two handles are the same market when slug and both token ids match;
/// the end time is informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketHandle {
    slug: MarketSlug,
    up_token_id: TokenId,
    down_token_id: TokenId,
    end_time: Option<DateTime<Utc>>,
}

impl MarketHandle {
    pub fn new(slug: MarketSlug, up_token_id: TokenId, down_token_id: TokenId) -> Self {
        Self {
            slug,
            up_token_id,
            down_token_id,
            end_time: None,
        }
    }

    #[must_use]
    pub fn with_end_time(mut self, end_time: DateTime<Utc>) -> Self {
        self.end_time = Some(end_time);
        self
    }

    #[must_use]
    pub const fn slug(&self) -> &MarketSlug {
        &self.slug
    }

    #[must_use]
    pub const fn up_token_id(&self) -> &TokenId {
        &self.up_token_id
    }

    #[must_use]
    pub const fn down_token_id(&self) -> &TokenId {
        &self.down_token_id
    }

    #[must_use]
    pub const fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    #[must_use]
    pub fn token_for(&self, outcome: Outcome) -> &TokenId {
        match outcome {
            Outcome::Up => &self.up_token_id,
            Outcome::Down => &self.down_token_id,
        }
    }

    /// Which side of this market a token belongs to, if any.
    #[must_use]
    pub fn outcome_of(&self, token_id: &TokenId) -> Option<Outcome> {
        if token_id == &self.up_token_id {
            Some(Outcome::Up)
        } else if token_id == &self.down_token_id {
            Some(Outcome::Down)
        } else {
            None
        }
    }
}

impl PartialEq for MarketHandle {
    fn eq(&self, other: &Self) -> bool {
        self.slug == other.slug
            && self.up_token_id == other.up_token_id
            && self.down_token_id == other.down_token_id
    }
}

impl Eq for MarketHandle {}

impl fmt::Display for MarketHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (up={}, down={})",
            self.slug, self.up_token_id, self.down_token_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(slug: &str) -> MarketHandle {
        MarketHandle::new(slug.into(), "up-1".into(), "down-1".into())
    }

    #[test]
    fn equality_ignores_end_time() {
        let a = handle("btc-5m");
        let b = handle("btc-5m").with_end_time(Utc::now());
        assert_eq!(a, b);
        assert_ne!(a, handle("btc-15m"));
    }

    #[test]
    fn outcome_of_maps_tokens() {
        let market = handle("btc-5m");
        assert_eq!(market.outcome_of(&"up-1".into()), Some(Outcome::Up));
        assert_eq!(market.outcome_of(&"down-1".into()), Some(Outcome::Down));
        assert_eq!(market.outcome_of(&"other".into()), None);
    }
}
