//! Person card extraction
//!
//! A card is the DOM fragment for one roster entry. Every field is recovered
//! by an ordered list of strategies; the first one returning `Some` wins and
//! the remaining strategies for that field are not tried.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;

use super::document::{class_matches, descendants, find_all, resolve_url, text_with};
use crate::model::{join_name, PlayerRecord};

/// One way of recovering a field from a card.
pub type FieldStrategy = fn(&Card<'_>) -> Option<String>;

/// A card fragment plus what every strategy needs from it.
pub struct Card<'a> {
    pub element: ElementRef<'a>,
    /// Text nodes trimmed and joined with single spaces
    pub full_text: String,
    pub base_url: &'a str,
}

impl<'a> Card<'a> {
    pub fn new(element: ElementRef<'a>, base_url: &'a str) -> Self {
        Self {
            element,
            full_text: text_with(element, " "),
            base_url,
        }
    }
}

/// Fields recovered from a single card, before role classification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonRecord {
    pub number: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub position: String,
    pub photo: String,
    pub height: String,
    pub weight: String,
    pub year: Option<String>,
}

impl PersonRecord {
    pub fn into_player(self) -> PlayerRecord {
        PlayerRecord {
            number: self.number,
            first_name: self.first_name,
            last_name: self.last_name,
            full_name: self.full_name,
            position: self.position,
            year: self.year.unwrap_or_default(),
            height: self.height,
            weight: self.weight,
            photo: self.photo,
        }
    }
}

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#?\d{1,3}\s*").unwrap());
static NAME_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)name").unwrap());
static PROFILE_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)/player/|/athlete/|/roster/").unwrap());

static STAMP_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"s-stamp").unwrap());
static STAMP_TEXT_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"s-stamp__text").unwrap());
static JERSEY_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Jersey Number\s*").unwrap());
static NUMBER_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(^|\s)number($|\s)|(^|\s)jersey($|\s)").unwrap()
});
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{1,3}").unwrap());
static TEXT_NUMBER: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"#(\d{1,3})\b").unwrap(),
        Regex::new(r"No\.?\s*(\d{1,3})\b").unwrap(),
        Regex::new(r"Jersey\s*(\d{1,3})\b").unwrap(),
    ]
});

static LABELED_POSITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Position\s+([A-Z]{1,3}(?:/[A-Z]{1,3})?)\b").unwrap());
// Compound codes first so "G/F" is not read as "G"
static POSITION_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(G/F|F/G|F/C|PG|SG|SF|PF|G|F|C)\b").unwrap());
static POSITION_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(Guard|Forward|Center)\b").unwrap());

static LABELED_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Academic Year\s+(Fr\.?|So\.?|Jr\.?|Sr\.?)\b").unwrap());
static YEAR_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(Freshman|Sophomore|Junior|Senior)\b").unwrap());
static YEAR_ABBR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(Fr\.?|So\.?|Jr\.?|Sr\.?)\b").unwrap());

static LABELED_HEIGHT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"Height\s+(\d+\s*['’]\s*-?\s*\d{1,2}\s*(?:''|"|['’]{1,2}|”)?)"#).unwrap()
});
static BARE_HEIGHT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(\b\d\s*['’]\s*-?\s*\d{1,2}(?:''|"|['’]{1,2}|”)?|\b\d-\d{1,2}\b)"#).unwrap()
});

static LABELED_WEIGHT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Weight\s+(\d+)\s*lbs?").unwrap());
static BARE_WEIGHT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{3})\s*lbs?").unwrap());

static PLACEHOLDER_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)placeholder|default").unwrap());

pub const NAME_STRATEGIES: &[FieldStrategy] =
    &[name_from_class, name_from_heading, name_from_profile_link];

pub const NUMBER_STRATEGIES: &[FieldStrategy] = &[
    number_from_data_number,
    number_from_data_jersey,
    number_from_stamp,
    number_from_number_class,
    number_from_span_class,
    number_from_text,
];

pub const POSITION_STRATEGIES: &[FieldStrategy] =
    &[position_from_label, position_from_code, position_from_word];

pub const YEAR_STRATEGIES: &[FieldStrategy] = &[year_from_label, year_from_word, year_from_abbr];

pub const HEIGHT_STRATEGIES: &[FieldStrategy] = &[height_from_label, height_from_text];

pub const WEIGHT_STRATEGIES: &[FieldStrategy] = &[weight_from_label, weight_from_text];

pub const PHOTO_STRATEGIES: &[FieldStrategy] = &[photo_from_image];

/// Apply `strategies` in order and keep the first hit.
pub fn first_match(card: &Card<'_>, strategies: &[FieldStrategy]) -> Option<String> {
    strategies.iter().find_map(|strategy| strategy(card))
}

/// Run every field cascade over one card.
pub fn extract_person(element: ElementRef<'_>, base_url: &str) -> PersonRecord {
    let card = Card::new(element, base_url);

    let (first_name, last_name) = first_match(&card, NAME_STRATEGIES)
        .and_then(|name| split_name(&name))
        .unwrap_or_default();
    let full_name = if last_name.is_empty() {
        String::new()
    } else {
        join_name(&first_name, &last_name)
    };

    PersonRecord {
        number: first_match(&card, NUMBER_STRATEGIES).unwrap_or_default(),
        first_name,
        last_name,
        full_name,
        position: first_match(&card, POSITION_STRATEGIES).unwrap_or_default(),
        photo: first_match(&card, PHOTO_STRATEGIES).unwrap_or_default(),
        height: first_match(&card, HEIGHT_STRATEGIES).unwrap_or_default(),
        weight: first_match(&card, WEIGHT_STRATEGIES).unwrap_or_default(),
        year: first_match(&card, YEAR_STRATEGIES),
    }
}

/// First token is the first name, the rest is the last name. Needs two tokens.
pub fn split_name(text: &str) -> Option<(String, String)> {
    let mut parts = text.split_whitespace();
    let first = parts.next()?;
    let rest: Vec<&str> = parts.collect();
    if rest.is_empty() {
        return None;
    }
    Some((first.to_string(), rest.join(" ")))
}

fn non_empty(text: String) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn clean_name(element: ElementRef<'_>) -> Option<String> {
    let text = text_with(element, " ");
    non_empty(LEADING_NUMBER.replace(&text, "").into_owned())
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

// ---- name ----

fn name_from_class(card: &Card<'_>) -> Option<String> {
    find_all(card.element, &["h2", "h3", "h4", "h5", "a", "span"])
        .find(|el| class_matches(*el, &NAME_CLASS))
        .and_then(clean_name)
}

fn name_from_heading(card: &Card<'_>) -> Option<String> {
    find_all(card.element, &["h3", "h4", "h5", "strong"])
        .next()
        .and_then(clean_name)
}

fn name_from_profile_link(card: &Card<'_>) -> Option<String> {
    find_all(card.element, &["a"])
        .find(|a| {
            a.value()
                .attr("href")
                .is_some_and(|href| PROFILE_LINK.is_match(href))
        })
        .and_then(clean_name)
}

// ---- number ----

fn number_from_data_number(card: &Card<'_>) -> Option<String> {
    card.element
        .value()
        .attr("data-number")
        .and_then(|v| non_empty(v.to_string()))
}

fn number_from_data_jersey(card: &Card<'_>) -> Option<String> {
    card.element
        .value()
        .attr("data-jersey")
        .and_then(|v| non_empty(v.to_string()))
}

/// Sidearm "stamp" badge, where newer templates put the jersey number.
fn number_from_stamp(card: &Card<'_>) -> Option<String> {
    let stamp = find_all(card.element, &["div"])
        .find(|div| div.value().attr("data-test-id") == Some("s-stamp__root"))
        .or_else(|| {
            find_all(card.element, &["div"]).find(|div| class_matches(*div, &STAMP_CLASS))
        })?;

    let label = find_all(stamp, &["span"]).find(|span| class_matches(*span, &STAMP_TEXT_CLASS))?;
    let text = text_with(label, "");
    let text = JERSEY_LABEL.replace_all(&text, "");
    DIGITS.find(&text).map(|m| m.as_str().to_string())
}

fn number_from_number_class(card: &Card<'_>) -> Option<String> {
    let element = descendants(card.element).find(|el| class_matches(*el, &NUMBER_CLASS))?;
    let text = text_with(element, "");
    DIGITS.find(&text).map(|m| m.as_str().to_string())
}

fn number_from_span_class(card: &Card<'_>) -> Option<String> {
    find_all(card.element, &["span"])
        .filter(|span| {
            let classes = span.value().classes().collect::<Vec<_>>().join(" ").to_lowercase();
            classes.contains("number") || classes.contains("jersey")
        })
        .find_map(|span| {
            let text: String = span.text().collect();
            DIGITS.find(&text).map(|m| m.as_str().to_string())
        })
}

fn number_from_text(card: &Card<'_>) -> Option<String> {
    TEXT_NUMBER
        .iter()
        .find_map(|re| capture(re, &card.full_text))
}

// ---- position ----

fn position_from_label(card: &Card<'_>) -> Option<String> {
    capture(&LABELED_POSITION, &card.full_text)
}

fn position_from_code(card: &Card<'_>) -> Option<String> {
    capture(&POSITION_CODE, &card.full_text)
}

fn position_from_word(card: &Card<'_>) -> Option<String> {
    let word = capture(&POSITION_WORD, &card.full_text)?;
    let code = match word.as_str() {
        "Guard" => "G",
        "Forward" => "F",
        "Center" => "C",
        other => other,
    };
    Some(code.to_string())
}

// ---- academic year ----

/// Fr/So/Jr/Sr for known words and abbreviations; anything else unchanged.
pub fn normalize_year(raw: &str) -> String {
    let key = raw.trim().trim_end_matches('.').to_lowercase();
    let abbr = match key.as_str() {
        "fr" | "freshman" => "Fr",
        "so" | "sophomore" => "So",
        "jr" | "junior" => "Jr",
        "sr" | "senior" => "Sr",
        _ => return raw.to_string(),
    };
    abbr.to_string()
}

fn year_from_label(card: &Card<'_>) -> Option<String> {
    capture(&LABELED_YEAR, &card.full_text).map(|y| normalize_year(&y))
}

fn year_from_word(card: &Card<'_>) -> Option<String> {
    capture(&YEAR_WORD, &card.full_text).map(|y| normalize_year(&y))
}

fn year_from_abbr(card: &Card<'_>) -> Option<String> {
    capture(&YEAR_ABBR, &card.full_text).map(|y| normalize_year(&y))
}

// ---- measurements ----

fn height_from_label(card: &Card<'_>) -> Option<String> {
    capture(&LABELED_HEIGHT, &card.full_text)
}

fn height_from_text(card: &Card<'_>) -> Option<String> {
    capture(&BARE_HEIGHT, &card.full_text)
}

fn weight_from_label(card: &Card<'_>) -> Option<String> {
    capture(&LABELED_WEIGHT, &card.full_text)
}

fn weight_from_text(card: &Card<'_>) -> Option<String> {
    capture(&BARE_WEIGHT, &card.full_text)
}

// ---- photo ----

/// Absolute photo URL for `img`; empty and placeholder sources are not photos.
pub fn image_photo(img: ElementRef<'_>, base_url: &str) -> Option<String> {
    let src = img.value().attr("src")?.trim();
    if src.is_empty() || PLACEHOLDER_IMAGE.is_match(src) {
        return None;
    }
    Some(resolve_url(base_url, src))
}

fn photo_from_image(card: &Card<'_>) -> Option<String> {
    let img = find_all(card.element, &["img"]).next()?;
    image_photo(img, card.base_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    const BASE: &str = "https://okstate.com/sports/mens-basketball/roster";

    fn person(html: &str) -> PersonRecord {
        let document = Html::parse_fragment(html);
        let selector = Selector::parse(".card").unwrap();
        let card = document.select(&selector).next().unwrap();
        extract_person(card, BASE)
    }

    fn with_card<T>(html: &str, f: impl FnOnce(&Card<'_>) -> T) -> T {
        let document = Html::parse_fragment(html);
        let selector = Selector::parse(".card").unwrap();
        let element = document.select(&selector).next().unwrap();
        let card = Card::new(element, BASE);
        f(&card)
    }

    #[test]
    fn test_data_number_only() {
        let p = person(r#"<div class="card" data-number="23"><h3>Cade Cunningham</h3></div>"#);
        assert_eq!(p.number, "23");
        assert_eq!(p.first_name, "Cade");
        assert_eq!(p.last_name, "Cunningham");
        assert_eq!(p.full_name, "Cade Cunningham");
    }

    #[test]
    fn test_name_with_jersey_prefix() {
        let p = person(r#"<div class="card"><span class="name">#4 John Smith</span></div>"#);
        assert_eq!(p.first_name, "John");
        assert_eq!(p.last_name, "Smith");
        assert_eq!(p.number, "4");
    }

    #[test]
    fn test_name_class_on_h2_and_span() {
        let p = person(
            r#"<div class="card"><h3>Roster Spotlight</h3><h2 class="player-name">Ada Nwosu</h2></div>"#,
        );
        assert_eq!(p.full_name, "Ada Nwosu");

        let p = person(
            r#"<div class="card"><h4>Staff</h4>
                <span class="s-person-details__personal-name">Bea Kline</span></div>"#,
        );
        assert_eq!(p.full_name, "Bea Kline");
    }

    #[test]
    fn test_multi_word_last_name() {
        let p = person(r#"<div class="card"><h4>Juan Carlos de la Cruz</h4></div>"#);
        assert_eq!(p.first_name, "Juan");
        assert_eq!(p.last_name, "Carlos de la Cruz");
    }

    #[test]
    fn test_single_token_name_is_empty() {
        let p = person(r#"<div class="card"><h3>Smith</h3></div>"#);
        assert_eq!(p.first_name, "");
        assert_eq!(p.last_name, "");
        assert_eq!(p.full_name, "");
    }

    #[test]
    fn test_name_strategies_in_order() {
        let html = r#"<div class="card">
            <strong>Bold Heading</strong>
            <a href="/sports/roster/jane-doe/12">Jane Doe</a>
            <h5 class="person-name">Real Name</h5>
        </div>"#;
        with_card(html, |card| {
            assert_eq!(name_from_class(card).as_deref(), Some("Real Name"));
            assert_eq!(name_from_heading(card).as_deref(), Some("Bold Heading"));
            assert_eq!(name_from_profile_link(card).as_deref(), Some("Jane Doe"));
            assert_eq!(first_match(card, NAME_STRATEGIES).as_deref(), Some("Real Name"));
        });

        let p = person(r#"<div class="card"><a href="/athlete/77">Mia Lopez</a></div>"#);
        assert_eq!(p.full_name, "Mia Lopez");
    }

    #[test]
    fn test_stamp_number() {
        let html = r#"<div class="card">
            <div data-test-id="s-stamp__root" class="s-stamp">
                <span class="s-stamp__text"><span class="sr-only">Jersey Number</span> 11</span>
            </div>
            <h3>Bryce Thompson</h3>
        </div>"#;
        assert_eq!(person(html).number, "11");
    }

    #[test]
    fn test_number_class_strategies() {
        with_card(
            r#"<div class="card"><div class="Jersey">No 5</div></div>"#,
            |card| assert_eq!(number_from_number_class(card).as_deref(), Some("5")),
        );
        with_card(
            r#"<div class="card"><span class="roster-player-number-badge">#30</span></div>"#,
            |card| {
                assert_eq!(number_from_number_class(card), None);
                assert_eq!(number_from_span_class(card).as_deref(), Some("30"));
            },
        );
        with_card(
            r#"<div class="card"><p>Jersey 2</p></div>"#,
            |card| assert_eq!(number_from_text(card).as_deref(), Some("2")),
        );
    }

    #[test]
    fn test_position_normalization() {
        let p = person(r#"<div class="card"><h3>Ty Jones</h3><span>Guard</span></div>"#);
        assert_eq!(p.position, "G");

        let p = person(r#"<div class="card"><h3>Ty Jones</h3><span>Position F/C</span></div>"#);
        assert_eq!(p.position, "F/C");

        let p = person(r#"<div class="card"><h3>Ty Jones</h3><span>G/F</span></div>"#);
        assert_eq!(p.position, "G/F");
    }

    #[test]
    fn test_year_cascade() {
        let p = person(r#"<div class="card"><h3>A B</h3><span>Academic Year Jr.</span></div>"#);
        assert_eq!(p.year.as_deref(), Some("Jr"));

        let p = person(r#"<div class="card"><h3>A B</h3><span>Sophomore</span></div>"#);
        assert_eq!(p.year.as_deref(), Some("So"));

        let p = person(r#"<div class="card"><h3>A B</h3><span>Sr.</span></div>"#);
        assert_eq!(p.year.as_deref(), Some("Sr"));

        let p = person(r#"<div class="card"><h3>A B</h3></div>"#);
        assert_eq!(p.year, None);

        assert_eq!(normalize_year("Gr."), "Gr.");
    }

    #[test]
    fn test_measurements() {
        let p = person(
            r#"<div class="card" data-number="1"><h3>A B</h3>
               <span>Height 6' 1''</span><span>Weight 185 lbs</span></div>"#,
        );
        assert_eq!(p.height, "6' 1''");
        assert_eq!(p.weight, "185");

        let p = person(r#"<div class="card"><h3>A B</h3><span>6-4</span><span>210 lbs</span></div>"#);
        assert_eq!(p.height, "6-4");
        assert_eq!(p.weight, "210");
    }

    #[test]
    fn test_jersey_number_is_not_height() {
        let p = person(r#"<div class="card" data-number="23"><h3>A B</h3><span>#23</span></div>"#);
        assert_eq!(p.height, "");
    }

    #[test]
    fn test_photo() {
        let p = person(r#"<div class="card"><img src="/images/roster/ab.jpg"><h3>A B</h3></div>"#);
        assert_eq!(p.photo, "https://okstate.com/images/roster/ab.jpg");

        let p = person(r#"<div class="card"><img src="/images/Placeholder.png"><h3>A B</h3></div>"#);
        assert_eq!(p.photo, "");

        let p = person(r#"<div class="card"><img src="/img/default-headshot.jpg"><h3>A B</h3></div>"#);
        assert_eq!(p.photo, "");
    }

    #[test]
    fn test_into_player() {
        let p = person(r#"<div class="card" data-jersey="0"><h3>A B</h3><span>Fr.</span></div>"#);
        let player = p.into_player();
        assert_eq!(player.number, "0");
        assert_eq!(player.year, "Fr");
    }
}
