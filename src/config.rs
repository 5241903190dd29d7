//! Runtime configuration and heuristic constants.
//!
//! Every extraction threshold lives here as a named constant so it can
//! be tuned without touching control flow in the engine or normalizer.

use anyhow::{Context, Result};
use std::time::Duration;

/// Default leaderboard page to scrape.
pub const DEFAULT_SOURCE_URL: &str = "https://www.zama.org/programs/creator-program";

/// Default REST listen port.
pub const DEFAULT_PORT: u16 = 8787;

/// Per-request fetch timeout.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Smallest rank accepted from any source.
pub const RANK_MIN: u32 = 1;

/// Ranks at or above this are discarded as page noise. The generic
/// element scan can pick up unrelated integers (years, pixel sizes,
/// follower counts) from the surrounding markup.
pub const RANK_SANITY_MAX: u32 = 10_000;

/// Cell index where leaderboard tables usually keep the score
/// (rank | name | score). When this cell is not a plausible score the
/// normalizer falls back to the last cell in the row.
pub const PREFERRED_SCORE_COLUMN: usize = 2;

/// Decimal places in the displayed score.
pub const SCORE_DISPLAY_DECIMALS: usize = 2;

/// Placeholder for an unresolved rank or score. A fixed string rather
/// than null so callers can render the payload directly.
pub const SENTINEL: &str = "---";

/// Bodies shorter than this with no match usually mean the page is
/// client-side rendered and the data never reached the static HTML.
pub const CSR_BODY_LENGTH_HINT: usize = 5_000;

/// Medal symbols leaderboards substitute for the top three ranks.
pub const MEDAL_RANKS: &[(char, u32)] = &[('\u{1F947}', 1), ('\u{1F948}', 2), ('\u{1F949}', 3)];

/// Script selectors that can carry an embedded hydration blob, in
/// probe order.
pub const STATE_BLOB_SELECTORS: &[&str] =
    &["script#__NEXT_DATA__", r#"script[type="application/json"]"#];

/// Handle-like keys in embedded state objects, in match order.
pub const HANDLE_KEYS: &[&str] = &["handle", "username", "user", "name", "alias", "twitterHandle"];

/// Rank-like keys in embedded state objects. Ordered fallback: the
/// first present key wins, later keys are never merged in.
pub const RANK_KEYS: &[&str] = &["rank", "position"];

/// Score-like keys in embedded state objects. Same ordered-fallback
/// contract as [`RANK_KEYS`].
pub const SCORE_KEYS: &[&str] = &["score", "points", "mindshare"];

/// Time-window keys a leaderboard state object may break stats into.
pub const WINDOW_KEYS: &[&str] = &["24h", "7d", "30d"];

/// Browser-like request headers. Plain library user agents get blocked
/// by basic bot protection on most leaderboard hosts.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Leaderboard page URL.
    pub source_url: String,
    /// REST listen port.
    pub port: u16,
    /// Outbound fetch timeout.
    pub fetch_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            port: DEFAULT_PORT,
            fetch_timeout: FETCH_TIMEOUT,
        }
    }
}

impl Config {
    /// Build a config from defaults plus `PODIUM_SOURCE_URL` /
    /// `PODIUM_PORT` environment overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(source_url) = std::env::var("PODIUM_SOURCE_URL") {
            config.source_url = source_url;
        }
        if let Ok(port) = std::env::var("PODIUM_PORT") {
            config.port = port
                .parse()
                .context("PODIUM_PORT must be a port number")?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the source URL is a well-formed absolute URL.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.source_url)
            .with_context(|| format!("invalid source URL: {}", self.source_url))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
    }

    #[test]
    fn test_bad_source_url_rejected() {
        let config = Config {
            source_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_medal_table_covers_podium() {
        let ranks: Vec<u32> = MEDAL_RANKS.iter().map(|(_, r)| *r).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }
}
