//! Player/coach classification and per-scrape deduplication
//!
//! The keyword and title lists are plain data on `RoleRules`; supporting a new
//! site layout means adding entries, not branches.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::card::PersonRecord;
use crate::model::{CoachRecord, Platform, PlayerRecord, RosterRecord};

/// Substrings that mark a "person" as navigation or page furniture.
pub const SKIP_KEYWORDS: &[&str] = &[
    "news", "schedule", "stats", "roster", "jersey", "number", "related", "more", "view",
    "profile", "bio", "back", "forward", "previous", "next", "game", "media", "social",
];

/// Positions that identify a basketball player.
pub const PLAYER_POSITIONS: &[&str] = &["G", "F", "C", "PG", "SG", "SF", "PF", "G/F", "F/G", "F/C"];

/// Coach titles searched in the card text, highest priority first.
pub const COACH_TITLE_PATTERNS: &[&str] = &[
    r"(?:ASSOCIATE\s+)?HEAD COACH",
    r"ASSISTANT COACH",
    r"ASSOCIATE.*?COACH",
    r"ASSISTANT.*?COACH",
    r".*?COACH",
];

pub const MAX_COACHES: usize = 3;

pub static DEFAULT_RULES: Lazy<RoleRules> = Lazy::new(RoleRules::default);

/// What a card turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Player(PlayerRecord),
    Coach(CoachRecord),
    /// Junk, or staff without a coaching title
    Skip,
}

#[derive(Debug, Clone)]
pub struct RoleRules {
    pub skip_keywords: &'static [&'static str],
    pub player_positions: &'static [&'static str],
    pub max_coaches: usize,
    coach_titles: Vec<Regex>,
}

impl Default for RoleRules {
    fn default() -> Self {
        Self::new(SKIP_KEYWORDS, PLAYER_POSITIONS, COACH_TITLE_PATTERNS, MAX_COACHES)
            .expect("built-in coach title patterns are valid")
    }
}

impl RoleRules {
    /// Build rules from ordered lists. Title patterns match case-insensitively.
    pub fn new(
        skip_keywords: &'static [&'static str],
        player_positions: &'static [&'static str],
        coach_title_patterns: &[&str],
        max_coaches: usize,
    ) -> Result<Self, regex::Error> {
        let coach_titles = coach_title_patterns
            .iter()
            .map(|p| Regex::new(&format!("(?i)({})", p)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            skip_keywords,
            player_positions,
            max_coaches,
            coach_titles,
        })
    }

    /// Nameless entries, navigation text and bare numbers are not people.
    pub fn is_junk(&self, person: &PersonRecord) -> bool {
        if person.last_name.is_empty() {
            return true;
        }

        let name_check = format!("{} {}", person.first_name, person.last_name).to_lowercase();
        if self.skip_keywords.iter().any(|k| name_check.contains(k)) {
            return true;
        }

        let last = person.last_name.replace('#', "");
        let last = last.trim();
        !last.is_empty() && last.chars().all(|c| c.is_ascii_digit())
    }

    /// A known position or any jersey number makes a player.
    pub fn is_player(&self, person: &PersonRecord) -> bool {
        self.player_positions.contains(&person.position.as_str())
            || !person.number.trim().is_empty()
    }

    /// First title pattern found in `container_text`, upper-cased; else `fallback`.
    pub fn coach_title(&self, container_text: &str, fallback: &str) -> String {
        self.coach_titles
            .iter()
            .find_map(|re| re.captures(container_text).and_then(|c| c.get(1)))
            .map(|m| m.as_str().trim().to_uppercase())
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Decide what `person` is. `container_text` is the card's unjoined text.
    pub fn classify(&self, person: PersonRecord, container_text: &str) -> Role {
        if self.is_junk(&person) {
            return Role::Skip;
        }

        if self.is_player(&person) {
            return Role::Player(person.into_player());
        }

        let title = self.coach_title(container_text, &person.position);
        if !title.to_uppercase().contains("COACH") {
            return Role::Skip;
        }

        Role::Coach(CoachRecord {
            first_name: person.first_name,
            last_name: person.last_name,
            full_name: person.full_name,
            title,
            dropline1: String::new(),
            dropline2: String::new(),
            photo: person.photo,
        })
    }
}

fn name_key(first: &str, last: &str) -> (String, String) {
    (first.to_lowercase(), last.to_lowercase())
}

/// Accumulates one scrape's roster. Dedup sets live and die with it.
#[derive(Debug)]
pub struct RosterBuilder {
    roster: RosterRecord,
    seen_players: HashSet<(String, String)>,
    seen_coaches: HashSet<(String, String)>,
}

impl RosterBuilder {
    pub fn new(platform: Platform) -> Self {
        Self {
            roster: RosterRecord::new(platform),
            seen_players: HashSet::new(),
            seen_coaches: HashSet::new(),
        }
    }

    pub fn set_team_name(&mut self, team_name: impl Into<String>) {
        self.roster.team_name = team_name.into();
    }

    pub fn player_count(&self) -> usize {
        self.roster.players.len()
    }

    pub fn coach_count(&self) -> usize {
        self.roster.coaches.len()
    }

    /// Add a player unless one with the same name was already added.
    pub fn push_player(&mut self, player: PlayerRecord) -> bool {
        if player.last_name.is_empty() {
            return false;
        }
        let key = name_key(&player.first_name, &player.last_name);
        if !self.seen_players.insert(key) {
            return false;
        }
        self.roster.players.push(player);
        true
    }

    /// Add a coach while the staff has room and the name is new.
    pub fn push_coach(&mut self, coach: CoachRecord, max_coaches: usize) -> bool {
        if coach.last_name.is_empty() || self.roster.coaches.len() >= max_coaches {
            return false;
        }
        let key = name_key(&coach.first_name, &coach.last_name);
        if !self.seen_coaches.insert(key) {
            return false;
        }
        self.roster.coaches.push(coach);
        true
    }

    /// Route a classified card into the roster.
    pub fn push_role(&mut self, role: Role, rules: &RoleRules) -> bool {
        match role {
            Role::Player(player) => self.push_player(player),
            Role::Coach(coach) => self.push_coach(coach, rules.max_coaches),
            Role::Skip => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    pub fn finish(self) -> RosterRecord {
        self.roster
    }
}
