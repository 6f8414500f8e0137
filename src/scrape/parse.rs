//! Text normalization for detail-panel fragments.
//!
//! These functions never fail: a fragment that does not match yields `None` (or the
//! field default), leaving the fallback decision to the record assembler.

use regex::Regex;
use std::sync::LazyLock;

/// One digit, a point, one digit. Ratings of "10.0" or more are outside this pattern.
static RATING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d\.\d)").expect("valid rating regex"));

/// A parenthesized integer, optionally grouped with commas ("(1,234)")
static REVIEWS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d{1,3}(?:,\d{3})+|\d+)\)").expect("valid reviews regex"));

/// Strip a fixed label prefix ("Address: ") from an accessible name.
///
/// Labels without the prefix are kept as-is; blank results count as absent.
pub fn strip_label(raw: &str, prefix: &str) -> Option<String> {
    let trimmed = raw.trim();
    let value = trimmed.strip_prefix(prefix.trim_end()).unwrap_or(trimmed).trim();

    if value.is_empty() { None } else { Some(value.to_string()) }
}

/// Rating from a combined rating/review fragment such as "4.8(150)"
pub fn parse_rating(fragment: &str) -> Option<f64> {
    RATING_RE
        .captures(fragment)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Review count from the same fragment; 0 when no parenthesized integer is present
pub fn parse_review_count(fragment: &str) -> u32 {
    let joined = fragment.replace(['\n', '\r'], "");

    REVIEWS_RE
        .captures(&joined)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().replace(',', "").parse().ok())
        .unwrap_or(0)
}

/// Trimmed text, or `None` when blank
pub fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}
