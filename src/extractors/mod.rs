//! Roster extraction modules
//!
//! Each module handles one stage of the pipeline: preprocessing, platform
//! detection, card fields, role classification, and table fallbacks.

mod card;
mod document;
mod platform;
mod roles;
mod sidearm;
mod table;

pub use card::*;
pub use document::*;
pub use platform::*;
pub use roles::*;
pub use sidearm::*;
pub use table::*;

use crate::model::RosterRecord;

/// Extract a roster from raw HTML with the built-in rules.
pub fn extract_roster(html: &str, base_url: &str) -> RosterRecord {
    extract_roster_with(html, base_url, &DEFAULT_RULES)
}

/// Extract a roster from raw HTML.
///
/// The platform is detected on the raw text; extraction then runs on the
/// stripped document. `base_url` is only used to resolve photo links.
pub fn extract_roster_with(html: &str, base_url: &str, rules: &RoleRules) -> RosterRecord {
    let strategy = classify(html);
    let document = parse_document(html);
    tracing::debug!(?strategy, bytes = html.len(), "extracting roster");

    match strategy {
        Strategy::Sidearm => extract_sidearm(&document, base_url, rules),
        Strategy::Presto => extract_presto(&document, base_url),
        Strategy::Generic => extract_generic(&document, base_url),
    }
}
