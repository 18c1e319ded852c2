//! Blocking page fetcher (ureq)

use std::time::Duration;

use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};

/// Build an agent carrying the configured user agent and timeout.
pub fn build_agent(config: &ScraperConfig) -> ureq::Agent {
    ureq::Agent::new_with_config(
        ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .user_agent(config.user_agent.as_str())
            .build(),
    )
}

/// GET `url` and return the body as text. Non-2xx responses are errors.
pub fn fetch_html(agent: &ureq::Agent, url: &str) -> Result<String> {
    tracing::debug!(url, "fetching roster page");

    let resp = match agent.get(url).call() {
        Ok(resp) => resp,
        Err(ureq::Error::StatusCode(status)) => {
            tracing::warn!(url, status, "roster page returned error status");
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }
        Err(source) => {
            tracing::warn!(url, error = %source, "roster page fetch failed");
            return Err(ScrapeError::Fetch {
                url: url.to_string(),
                source,
            });
        }
    };

    // Agents built with http_status_as_error disabled still land here
    if !resp.status().is_success() {
        return Err(ScrapeError::HttpStatus {
            url: url.to_string(),
            status: resp.status().as_u16(),
        });
    }

    resp.into_body()
        .read_to_string()
        .map_err(|source| ScrapeError::Read {
            url: url.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_host_is_fetch_error() {
        let agent = build_agent(&ScraperConfig {
            timeout_secs: 2,
            ..ScraperConfig::default()
        });
        // Port 9 on localhost (discard) is not listening in test environments
        let err = fetch_html(&agent, "http://127.0.0.1:9/roster").unwrap_err();
        assert!(matches!(err, ScrapeError::Fetch { .. }));
    }

    #[test]
    fn test_invalid_url_is_fetch_error() {
        let agent = build_agent(&ScraperConfig::default());
        let err = fetch_html(&agent, "not a url").unwrap_err();
        assert!(matches!(err, ScrapeError::Fetch { .. }));
    }
}
