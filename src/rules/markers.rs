//! Marker tokens and text patterns shared by the rules.
//!
//! Style names are free text, so every concept the rules look for in them is
//! a closed set of lowercase tokens matched by substring containment against
//! the lowercased style name.

use regex::Regex;
use std::sync::OnceLock;

/// Style-name tokens marking a table or table caption paragraph.
pub const TABLE_CAPTION_STYLE_TOKENS: &[&str] = &[
    "таблица",
    "table",
    "название таблицы",
    "table title",
    "таблица-название",
    "table-title",
];

/// Style-name tokens marking a heading.
pub const HEADING_STYLE_TOKENS: &[&str] = &["heading", "заголовок", "h1", "h2", "h3", "h4"];

/// Tokens the title paragraph's style must contain one of.
pub const TITLE_STYLE_TOKENS: &[&str] = &["таблица", "table"];

/// Table tokens required in the header row style.
pub const HEADER_ROW_TABLE_TOKENS: &[&str] = &["таблица", "table"];

/// Heading tokens required in the header row style.
pub const HEADER_ROW_HEADING_TOKENS: &[&str] = &["заголовок", "heading"];

/// "Таблица <N> -- <description>", case-insensitive.
const TABLE_TITLE_PATTERN: &str = r"(?i)^Таблица\s+\d+\s*--\s*.+$";

/// Check if `haystack` contains any of `tokens`, ignoring case.
pub fn contains_any(haystack: &str, tokens: &[&str]) -> bool {
    let lower = haystack.to_lowercase();
    tokens.iter().any(|token| lower.contains(token))
}

/// Compiled table title pattern.
pub fn table_title_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TABLE_TITLE_PATTERN).expect("table title pattern is valid"))
}

/// Check if text reads like a table caption ("Таблица 3 -- Итоги").
pub fn is_table_title_text(text: &str) -> bool {
    table_title_regex().is_match(text)
}

/// First run of ASCII digits in a style name ("Heading 2" -> Some(2)).
///
/// A run too long for `u64` saturates to `u64::MAX`.
pub fn first_integer(text: &str) -> Option<u64> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"));
    re.find(text)
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
}
