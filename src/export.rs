//! CSV export of a scraped roster
//!
//! Two sheet layouts: baseball/softball use a combined name column, basketball
//! splits first and last names and supports optional player columns.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrapeError};
use crate::model::{join_name, PlayerRecord, RosterRecord};

/// Coaches listed on the sheet.
pub const EXPORT_COACH_LIMIT: usize = 3;

const COMBINED_WIDTH: usize = 7;
const COMBINED_TEAM_WIDTH: usize = 8;
const SPLIT_WIDTH: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    #[default]
    Basketball,
    Baseball,
    Softball,
}

impl Sport {
    /// Case-insensitive; anything unrecognised exports as basketball.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "baseball" => Sport::Baseball,
            "softball" => Sport::Softball,
            _ => Sport::Basketball,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sport::Basketball => "Basketball",
            Sport::Baseball => "Baseball",
            Sport::Softball => "Softball",
        }
    }

    fn combined_names(&self) -> bool {
        matches!(self, Sport::Baseball | Sport::Softball)
    }
}

/// Optional player columns. Missing keys default to included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub number: bool,
    pub position: bool,
    pub year: bool,
    pub height: bool,
    pub weight: bool,
    pub photo: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            number: true,
            position: true,
            year: true,
            height: true,
            weight: true,
            photo: true,
        }
    }
}

fn row<S: AsRef<str>>(cells: &[S], width: usize) -> Vec<String> {
    let mut out: Vec<String> = cells.iter().map(|c| c.as_ref().to_string()).collect();
    out.resize(width.max(out.len()), String::new());
    out
}

fn blank(width: usize) -> Vec<String> {
    vec![String::new(); width]
}

fn combined_name(full_name: &str, first: &str, last: &str) -> String {
    if full_name.is_empty() {
        join_name(first, last)
    } else {
        full_name.to_string()
    }
}

/// `<team>_<Sport>_roster.csv`, with "roster" standing in for a missing team.
/// Path separators in the team name become `-`.
pub fn export_file_name(roster: &RosterRecord, sport: Sport) -> String {
    let team = roster.team_name.trim();
    let team = if team.is_empty() {
        "roster".to_string()
    } else {
        team.replace(['/', '\\'], "-")
    };
    format!("{}_{}_roster.csv", team, sport.label())
}

/// Write the sheet for `sport` to `writer`.
pub fn write_csv<W: Write>(
    writer: W,
    roster: &RosterRecord,
    sport: Sport,
    options: &ExportOptions,
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    let rows = if sport.combined_names() {
        combined_layout(roster, options)
    } else {
        split_layout(roster, options)
    };

    for record in rows {
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render the sheet into a string.
pub fn export_csv(roster: &RosterRecord, sport: Sport, options: &ExportOptions) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, roster, sport, options)?;
    String::from_utf8(buf).map_err(|e| ScrapeError::InvalidInput(e.to_string()))
}

fn combined_layout(roster: &RosterRecord, options: &ExportOptions) -> Vec<Vec<String>> {
    let mut rows = vec![
        row(&["Team Name", "", "", "Record:"], COMBINED_TEAM_WIDTH),
        row(&["Mascot:", "", "", "Rank:"], COMBINED_TEAM_WIDTH),
        row(&["Color 1:", "", "", "Location:"], COMBINED_TEAM_WIDTH),
        row(&["Color 2:", "", "", "Logo:"], COMBINED_TEAM_WIDTH),
        row(&["Color 3:"], COMBINED_TEAM_WIDTH),
        blank(COMBINED_TEAM_WIDTH),
        row(&["", "Coaches"], COMBINED_WIDTH),
        row(&["Name", "Title", "Dropline 1", "", "Dropline 2"], COMBINED_WIDTH),
    ];

    for coach in roster.coaches.iter().take(EXPORT_COACH_LIMIT) {
        let name = combined_name(&coach.full_name, &coach.first_name, &coach.last_name);
        rows.push(row(
            &[
                name.as_str(),
                coach.title.as_str(),
                coach.dropline1.as_str(),
                "",
                coach.dropline2.as_str(),
            ],
            COMBINED_WIDTH,
        ));
    }

    rows.push(blank(COMBINED_WIDTH));
    rows.push(row(&["", "PLAYERS"], COMBINED_WIDTH));
    rows.push(row(&["Name", "#"], COMBINED_WIDTH));

    for player in &roster.players {
        let name = combined_name(&player.full_name, &player.first_name, &player.last_name);
        let number = if options.number { player.number.as_str() } else { "" };
        rows.push(row(&[name.as_str(), number], COMBINED_WIDTH));
    }

    rows
}

/// Header row when `player` is `None`, otherwise that player's cells.
fn player_row(player: Option<&PlayerRecord>, options: &ExportOptions) -> Vec<String> {
    let columns: [(bool, &str, fn(&PlayerRecord) -> &str); 8] = [
        (options.number, "#", |p| p.number.as_str()),
        (true, "First Name", |p| p.first_name.as_str()),
        (true, "Last Name", |p| p.last_name.as_str()),
        (options.position, "Pos", |p| p.position.as_str()),
        (options.year, "Year", |p| p.year.as_str()),
        (options.height, "Ht", |p| p.height.as_str()),
        (options.weight, "Wt", |p| p.weight.as_str()),
        (options.photo, "Photo", |p| p.photo.as_str()),
    ];

    let cells: Vec<&str> = columns
        .iter()
        .filter(|(enabled, _, _)| *enabled)
        .map(|(_, header, value)| player.map_or(*header, |p| value(p)))
        .collect();
    row(&cells, SPLIT_WIDTH)
}

fn split_layout(roster: &RosterRecord, options: &ExportOptions) -> Vec<Vec<String>> {
    let mut rows = vec![
        row(&["Team Name", roster.team_name.as_str(), "", "Location:"], SPLIT_WIDTH),
        row(&["Rank:", "", "", "Logo:"], SPLIT_WIDTH),
        row(&["Color:"], SPLIT_WIDTH),
        blank(SPLIT_WIDTH),
        row(&["", "Coaches"], SPLIT_WIDTH),
        row(
            &["Last Name", "First Name", "Title", "Dropline 1", "", "Dropline 2"],
            SPLIT_WIDTH,
        ),
    ];

    for coach in roster.coaches.iter().take(EXPORT_COACH_LIMIT) {
        rows.push(row(
            &[
                coach.last_name.as_str(),
                coach.first_name.as_str(),
                coach.title.as_str(),
                coach.dropline1.as_str(),
                "",
                coach.dropline2.as_str(),
            ],
            SPLIT_WIDTH,
        ));
    }

    rows.push(blank(SPLIT_WIDTH));
    rows.push(row(&["", "PLAYERS"], SPLIT_WIDTH));

    rows.push(player_row(None, options));
    for player in &roster.players {
        rows.push(player_row(Some(player), options));
    }

    rows
}
