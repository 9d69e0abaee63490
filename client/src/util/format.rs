//! Display formatting for timestamps and message previews.
//!
//! Server timestamps arrive as strings in a few shapes (RFC 3339, or naive
//! `YYYY-MM-DD HH:MM:SS` assumed UTC). Anything unparseable is shown verbatim.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDateTime, Utc};

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Total order: parseable timestamps first in chronological order, then
/// unparseable ones by raw string. Equal instants tie-break on the raw text.
pub fn compare_timestamps(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

fn sort_key(raw: &str) -> (bool, Option<DateTime<Utc>>, &str) {
    let parsed = parse_timestamp(raw);
    (parsed.is_none(), parsed, raw)
}

/// `YYYY-MM-DD HH:MM` in UTC, or the raw value when unparseable.
pub fn format_timestamp(raw: &str) -> String {
    parse_timestamp(raw).map_or_else(|| raw.to_owned(), |ts| ts.format("%Y-%m-%d %H:%M").to_string())
}

/// Calendar day only, for the account-creation column.
pub fn format_day(raw: &str) -> String {
    parse_timestamp(raw).map_or_else(|| raw.to_owned(), |ts| ts.format("%Y-%m-%d").to_string())
}

/// Collapse whitespace and cut to `max_chars`, appending `…` when cut.
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut cut = collapsed.chars().take(max_chars).collect::<String>();
    cut.push('…');
    cut
}
