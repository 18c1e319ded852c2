//! Table-based roster extraction (PrestoSports and unknown platforms)

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};

use super::card::{image_photo, split_name};
use super::document::{cell_text, class_matches, find_all};
use super::roles::RosterBuilder;
use crate::model::{join_name, Platform, PlayerRecord, RosterRecord};

const CELL_TAGS: &[&str] = &["td", "th"];

static ROSTER_TABLE_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)roster").unwrap());

fn cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    find_all(row, CELL_TAGS).collect()
}

/// Data rows of `table`: every `tr` after the first.
fn data_rows(table: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    find_all(table, &["tr"]).skip(1)
}

fn row_photo(row: ElementRef<'_>, base_url: &str) -> String {
    find_all(row, &["img"])
        .next()
        .and_then(|img| image_photo(img, base_url))
        .unwrap_or_default()
}

/// PrestoSports: `table.roster`-like tables with number, name, ..., position columns.
pub fn extract_presto(document: &Html, base_url: &str) -> RosterRecord {
    let mut builder = RosterBuilder::new(Platform::Presto);

    let tables = find_all(document.root_element(), &["table"])
        .filter(|table| class_matches(*table, &ROSTER_TABLE_CLASS));

    for table in tables {
        for row in data_rows(table) {
            let cols = cells(row);
            if cols.len() < 3 {
                continue;
            }

            let Some((first_name, last_name)) = split_name(&cell_text(cols[1])) else {
                continue;
            };

            builder.push_player(PlayerRecord {
                number: cell_text(cols[0]),
                full_name: join_name(&first_name, &last_name),
                first_name,
                last_name,
                position: cols.last().map(|c| cell_text(*c)).unwrap_or_default(),
                photo: row_photo(row, base_url),
                ..PlayerRecord::default()
            });
        }
    }

    tracing::debug!(players = builder.player_count(), "presto tables extracted");
    builder.finish()
}

fn is_jersey_number(text: &str) -> bool {
    !text.is_empty() && text.chars().count() <= 3 && text.chars().all(|c| c.is_ascii_digit())
}

/// First cell with the most characters; ties keep the earlier cell.
fn longest_cell(texts: &[String]) -> Option<&String> {
    texts.iter().fold(None, |best: Option<&String>, text| match best {
        Some(b) if b.chars().count() >= text.chars().count() => Some(b),
        _ => Some(text),
    })
}

/// Any table with more than two rows. The longest cell is taken as the name.
pub fn extract_generic(document: &Html, _base_url: &str) -> RosterRecord {
    let mut builder = RosterBuilder::new(Platform::Generic);

    for table in find_all(document.root_element(), &["table"]) {
        let rows: Vec<_> = find_all(table, &["tr"]).collect();
        if rows.len() <= 2 {
            continue;
        }

        for row in &rows[1..] {
            let cols = cells(*row);
            if cols.len() < 2 {
                continue;
            }

            let texts: Vec<String> = cols.iter().map(|c| cell_text(*c)).collect();
            let number = texts
                .iter()
                .find(|t| is_jersey_number(t))
                .cloned()
                .unwrap_or_default();

            let Some((first_name, last_name)) = longest_cell(&texts).and_then(|n| split_name(n))
            else {
                continue;
            };

            builder.push_player(PlayerRecord {
                number,
                full_name: join_name(&first_name, &last_name),
                first_name,
                last_name,
                ..PlayerRecord::default()
            });
        }
    }

    tracing::debug!(players = builder.player_count(), "generic tables extracted");
    builder.finish()
}
