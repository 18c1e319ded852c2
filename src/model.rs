//! Roster records produced by a scrape call

use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform tag recorded on the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    Sidearm,
    /// Sidearm detected but card extraction found nobody; generic tables used.
    SidearmFallback,
    Presto,
    #[default]
    Generic,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Sidearm => "sidearm",
            Platform::SidearmFallback => "sidearm-fallback",
            Platform::Presto => "presto",
            Platform::Generic => "generic",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlayerRecord {
    pub number: String,
    pub first_name: String,
    pub last_name: String,
    /// "first last", used by the combined-name export layout
    pub full_name: String,
    pub position: String,
    /// Fr, So, Jr, Sr or empty
    pub year: String,
    pub height: String,
    pub weight: String,
    pub photo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CoachRecord {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub title: String,
    // No source field populates the droplines yet; kept for the export layout.
    pub dropline1: String,
    pub dropline2: String,
    pub photo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RosterRecord {
    pub team_name: String,
    pub coaches: Vec<CoachRecord>,
    pub players: Vec<PlayerRecord>,
    pub platform: Platform,
}

impl RosterRecord {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            ..Self::default()
        }
    }

    /// True when neither players nor coaches were found.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.coaches.is_empty()
    }
}

/// "first last" with surrounding whitespace removed.
pub fn join_name(first: &str, last: &str) -> String {
    format!("{} {}", first, last).trim().to_string()
}
