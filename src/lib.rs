//! Roster scraper for college athletics sites
//!
//! Extracts team name, coaching staff and players from roster pages:
//! - Sidearm Sports person cards (with generic-table fallback)
//! - PrestoSports roster tables
//! - Generic HTML tables on unrecognised sites
//!
//! and exports the result as CSV, over a C ABI or from the `roster` CLI.

pub mod config;
pub mod error;
pub mod export;
pub mod extractors;
pub mod ffi;
pub mod fetch;
pub mod model;

pub use config::ScraperConfig;
pub use error::{Result, ScrapeError};
pub use export::{export_csv, export_file_name, write_csv, ExportOptions, Sport};
pub use extractors::extract_roster;
pub use ffi::*;
pub use model::{CoachRecord, Platform, PlayerRecord, RosterRecord};

/// Extract a roster from already-downloaded HTML.
///
/// `base_url` is only used to resolve relative photo links and may be empty.
pub fn scrape_from_html(html: &str, base_url: &str) -> RosterRecord {
    extract_roster(html, base_url)
}

/// Fetch `url` with the environment-derived config and extract its roster.
pub fn scrape_from_url(url: &str) -> Result<RosterRecord> {
    scrape_from_url_with(&ScraperConfig::from_env(), url)
}

/// Fetch `url` with an explicit config and extract its roster.
pub fn scrape_from_url_with(config: &ScraperConfig, url: &str) -> Result<RosterRecord> {
    let agent = fetch::build_agent(config);
    let html = fetch::fetch_html(&agent, url)?;
    Ok(scrape_from_html(&html, url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const BASE: &str = "https://okstate.com/sports/mens-basketball/roster";

    fn assert_roster_invariants(roster: &RosterRecord) {
        assert!(roster.coaches.len() <= 3);

        let mut seen = HashSet::new();
        for p in &roster.players {
            assert!(!p.last_name.is_empty());
            assert!(seen.insert((p.first_name.to_lowercase(), p.last_name.to_lowercase())));
        }

        let mut seen = HashSet::new();
        for c in &roster.coaches {
            assert!(!c.last_name.is_empty());
            assert!(c.title.contains("COACH"));
            assert!(seen.insert((c.first_name.to_lowercase(), c.last_name.to_lowercase())));
        }
    }

    #[test]
    fn test_sidearm_page_end_to_end() {
        let html = r#"
        <html>
        <head>
          <title>2025-26 Men's Basketball Roster - Oklahoma State University Athletics</title>
          <script src="https://sidearmdev.com/roster.js"></script>
        </head>
        <body>
          <header><div class="s-person-card"><h3>Header Person</h3><p>Head Coach</p></div></header>
          <ul>
            <li class="s-person-card" data-number="23"><h3>Cade Cunningham</h3><span>Guard</span></li>
            <li class="s-person-card"><h3 class="s-person-details__personal-name">#4 John Smith</h3></li>
            <li class="s-person-card"><h3>JOHN SMITH</h3><span>#40</span></li>
            <li class="s-person-card"><img src="/images/placeholder.jpg"><h3>Mike Boynton</h3><p>Head Coach</p></li>
            <li class="s-person-card"><h3>Jane Roe</h3><p>Associate Head Coach</p></li>
            <li class="s-person-card"><h3>Sam Tate</h3><p>Assistant Coach</p></li>
            <li class="s-person-card"><h3>Lou Wade</h3><p>Assistant Coach</p></li>
            <li class="s-person-card"><h3>Mike Boynton</h3><p>Head Coach</p></li>
          </ul>
          <footer><div class="s-person-card" data-number="99"><h3>Footer Guy</h3></div></footer>
        </body>
        </html>
        "#;

        let roster = scrape_from_html(html, BASE);
        assert_roster_invariants(&roster);
        assert_eq!(roster.platform, Platform::Sidearm);
        assert_eq!(roster.team_name, "Men's Basketball");

        let names: Vec<_> = roster.players.iter().map(|p| p.full_name.as_str()).collect();
        assert_eq!(names, ["Cade Cunningham", "John Smith"]);
        assert_eq!(roster.players[0].number, "23");
        assert_eq!(roster.players[0].position, "G");
        assert_eq!(roster.players[1].number, "4");

        let titles: Vec<_> = roster.coaches.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["HEAD COACH", "ASSOCIATE HEAD COACH", "ASSISTANT COACH"]);
        assert_eq!(roster.coaches[0].photo, "");
    }

    #[test]
    fn test_presto_page_end_to_end() {
        let html = r#"
        <html><head><link rel="stylesheet" href="https://assets.prestosports.com/site.css"></head>
        <body>
          <table class="roster">
            <tr><th>No.</th><th>Name</th><th>Pos.</th></tr>
            <tr><td>5</td><td>Tia Moss</td><td>C</td></tr>
            <tr><td>5</td><td>Tia Moss</td><td>C</td></tr>
          </table>
        </body></html>
        "#;

        let roster = scrape_from_html(html, "https://example.edu/roster");
        assert_roster_invariants(&roster);
        assert_eq!(roster.platform, Platform::Presto);
        assert_eq!(roster.players.len(), 1);
        assert_eq!(roster.players[0].position, "C");
        assert_eq!(roster.team_name, "");
    }

    #[test]
    fn test_unrecognised_page_is_empty_generic() {
        let roster = scrape_from_html("<html><body><p>Coming soon</p></body></html>", "");
        assert_eq!(roster.platform, Platform::Generic);
        assert!(roster.is_empty());
    }

    #[test]
    fn test_sidearm_fallback_matches_generic() {
        let html = r#"
        <html><head><meta name="generator" content="Sidearm Sports"></head><body>
          <table>
            <tr><th>#</th><th>Name</th><th>Pos</th></tr>
            <tr><td>1</td><td>Ana Ruiz</td><td>P</td></tr>
            <tr><td>2</td><td>Lee Chan</td><td>C</td></tr>
          </table>
        </body></html>
        "#;

        let roster = scrape_from_html(html, BASE);
        let generic = extractors::extract_generic(&extractors::parse_document(html), BASE);
        assert_eq!(roster.platform, Platform::SidearmFallback);
        assert_eq!(roster.players, generic.players);
        assert_eq!(roster.coaches, generic.coaches);
        assert_eq!(roster.team_name, generic.team_name);
    }

    #[test]
    fn test_fetch_error_surfaces() {
        let config = ScraperConfig {
            timeout_secs: 2,
            ..ScraperConfig::default()
        };
        assert!(scrape_from_url_with(&config, "http://127.0.0.1:9/roster").is_err());
    }
}
