//! Scraper configuration
//!
//! Read-only settings shared by every fetch. Defaults match a desktop browser
//! so athletics sites serve their regular markup.

use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const USER_AGENT_ENV: &str = "ROSTER_USER_AGENT";
const TIMEOUT_ENV: &str = "ROSTER_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Global timeout for a single page fetch, in seconds
    pub timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ScraperConfig {
    /// Defaults overridden by `ROSTER_USER_AGENT` / `ROSTER_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(agent) = lookup(USER_AGENT_ENV) {
            let agent = agent.trim();
            if !agent.is_empty() {
                config.user_agent = agent.to_string();
            }
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout_secs = secs,
                _ => tracing::warn!("ignoring invalid {}={:?}", TIMEOUT_ENV, raw),
            }
        }

        config
    }
}
