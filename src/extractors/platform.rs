//! Platform detection
//!
//! Signature tokens are checked on the raw page text, before any markup is
//! stripped, because the tokens usually live in scripts and asset URLs.

use crate::model::Platform;

/// Extraction strategy for a document, resolved once per scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Sidearm Sports card layout
    Sidearm,
    /// PrestoSports roster tables
    Presto,
    /// Any table that looks like a roster
    Generic,
}

impl Strategy {
    /// Tag recorded on a successful extraction with this strategy.
    pub fn platform(&self) -> Platform {
        match self {
            Strategy::Sidearm => Platform::Sidearm,
            Strategy::Presto => Platform::Presto,
            Strategy::Generic => Platform::Generic,
        }
    }
}

/// First match wins: Sidearm, then Presto, then Generic.
pub fn classify(raw_html: &str) -> Strategy {
    let lower = raw_html.to_lowercase();

    if raw_html.contains("sidearmdev") || lower.contains("sidearm") {
        Strategy::Sidearm
    } else if lower.contains("prestosports") {
        Strategy::Presto
    } else {
        Strategy::Generic
    }
}
