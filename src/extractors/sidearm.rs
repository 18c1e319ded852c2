//! Sidearm Sports roster pages
//!
//! Players and staff share the same card markup, so every card goes through
//! the field cascades first and is classified afterwards.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};

use super::card::extract_person;
use super::document::{class_matches, find_all, raw_text, title_text};
use super::roles::{RoleRules, RosterBuilder};
use super::table::extract_generic;
use crate::model::{Platform, RosterRecord};

const CONTAINER_TAGS: &[&str] = &["div", "li", "article"];

static CARD_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(roster[-_]?player|athlete[-_]?card|player[-_]?card|roster[-_]?card|s-person-card|person[-_]?card)",
    )
    .unwrap()
});

/// Applied in order to the page title to leave just the team name. Season
/// years go first so a leading "2025-26" is not mistaken for a dash suffix.
static TITLE_CLEANUPS: Lazy<[(Regex, &'static str); 4]> = Lazy::new(|| {
    [
        (Regex::new(r"\s*\d{4}-?\d{0,2}\s*").unwrap(), " "),
        (Regex::new(r"(?i)\s*-\s*Roster.*").unwrap(), ""),
        (Regex::new(r"(?i)\s*-.*Athletics.*").unwrap(), ""),
        (Regex::new(r"(?i)\s*Roster.*").unwrap(), ""),
    ]
});

/// Team name from a title like "2025-26 Men's Basketball Roster - Oklahoma State".
pub fn team_name_from_title(title: &str) -> String {
    let cleaned = TITLE_CLEANUPS
        .iter()
        .fold(title.to_string(), |acc, (re, with)| re.replace_all(&acc, *with).into_owned());
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Person cards by class; failing that, by `data-player`, then `data-athlete`.
pub fn find_person_cards(document: &Html) -> Vec<ElementRef<'_>> {
    let root = document.root_element();

    let by_class: Vec<_> = find_all(root, CONTAINER_TAGS)
        .filter(|el| class_matches(*el, &CARD_CLASS))
        .collect();
    if !by_class.is_empty() {
        return by_class;
    }

    ["data-player", "data-athlete"]
        .iter()
        .map(|attr| {
            find_all(root, CONTAINER_TAGS)
                .filter(|el| el.value().attr(attr).is_some())
                .collect::<Vec<_>>()
        })
        .find(|cards| !cards.is_empty())
        .unwrap_or_default()
}

/// Card-based extraction, falling back to generic tables when nobody is found.
pub fn extract_sidearm(document: &Html, base_url: &str, rules: &RoleRules) -> RosterRecord {
    let mut builder = RosterBuilder::new(Platform::Sidearm);

    if let Some(title) = title_text(document) {
        builder.set_team_name(team_name_from_title(&title));
    }

    let cards = find_person_cards(document);
    tracing::debug!(cards = cards.len(), "sidearm person cards");

    for card in cards {
        let person = extract_person(card, base_url);
        let role = rules.classify(person, &raw_text(card));
        builder.push_role(role, rules);
    }

    if builder.is_empty() {
        tracing::info!("sidearm cards yielded no people, falling back to generic tables");
        let mut roster = extract_generic(document, base_url);
        roster.platform = Platform::SidearmFallback;
        return roster;
    }

    let roster = builder.finish();
    tracing::info!(
        team = %roster.team_name,
        players = roster.players.len(),
        coaches = roster.coaches.len(),
        "sidearm roster extracted"
    );
    roster
}
