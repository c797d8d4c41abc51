use std::cmp::Ordering;

use chrono::{DateTime, Local, Utc};
use dialoguer::Confirm;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::types::{DecadeFilter, MAX_RATING, SortKey};

/// Extracts the release year from a catalog release date.
///
/// Spotify reports dates with `year`, `month` or `day` precision
/// (`1969`, `1969-09`, `1969-09-26`). Unparseable input yields 0.
pub fn year_from_release_date(release_date: &str) -> i32 {
    release_date
        .trim()
        .split('-')
        .next()
        .and_then(|year| year.parse::<i32>().ok())
        .unwrap_or(0)
}

/// Decade bucket of a year: `floor(year / 10) * 10`.
pub fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

/// Compares display strings the way a user expects an A-Z listing.
///
/// Accents and case are ignored first, so `Émilie Simon` sorts between
/// `Blur` and `Zz Top`. Names that only differ in accents are ordered by
/// their lowercase form, and exact comparison breaks any remaining tie.
///
/// # Example
///
/// ```
/// assert_eq!(locale_cmp("Björk", "Blur"), Ordering::Less);
/// assert_eq!(locale_cmp("Émilie Simon", "Zz Top"), Ordering::Less);
/// ```
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Lowercase text with diacritics stripped (canonical decomposition, then
/// combining marks dropped).
pub fn collation_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

pub fn stars(rating: u8) -> String {
    "★".repeat(rating.min(MAX_RATING) as usize)
}

pub fn format_added(added_at: &DateTime<Utc>) -> String {
    added_at.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

pub fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    s.parse()
}

pub fn parse_decade_filter(s: &str) -> Result<DecadeFilter, String> {
    s.parse()
}

pub fn parse_rating(s: &str) -> Result<u8, String> {
    match s.trim().parse::<u8>() {
        Ok(rating) if rating <= MAX_RATING => Ok(rating),
        _ => Err(format!("Invalid rating: {}. Use 0 (unrated) to 5", s)),
    }
}

/// Asks a yes/no question on the terminal, defaulting to no.
///
/// Without an interactive terminal the question counts as declined.
pub fn confirm(prompt: &str) -> bool {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .unwrap_or(false)
}
