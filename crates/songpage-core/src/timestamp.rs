//! `minutes:seconds` timestamp handling.
//!
//! Normalization is deliberately lenient: anything that is not a two-part
//! `m:s` value normalizes to offset 0 instead of failing. Front-ends that want
//! strict input check [`is_strict_timestamp`] before accepting a marker.

use std::sync::OnceLock;

use regex::Regex;

// ASCII digits only: `to_seconds` parses with `u32::from_str`.
const STRICT_PATTERN: &str = r"^[0-9]+:[0-5][0-9]$";

static STRICT_REGEX: OnceLock<Regex> = OnceLock::new();

fn strict_regex() -> &'static Regex {
    STRICT_REGEX.get_or_init(|| Regex::new(STRICT_PATTERN).expect("invalid regex pattern"))
}

/// Convert a `minutes:seconds` string to a seconds offset.
///
/// An empty part counts as 0 (`":30"` is 30, `"2:"` is 120). Input without
/// exactly one `:`, or with a part that is not a non-negative integer,
/// yields 0.
pub fn to_seconds(time: &str) -> u32 {
    let parts: Vec<&str> = time.split(':').collect();
    let [minutes, seconds] = parts.as_slice() else {
        return 0;
    };

    match (parse_part(minutes), parse_part(seconds)) {
        (Some(m), Some(s)) => m
            .checked_mul(60)
            .and_then(|m| m.checked_add(s))
            .unwrap_or(0),
        _ => 0,
    }
}

fn parse_part(part: &str) -> Option<u32> {
    let part = part.trim();
    if part.is_empty() {
        return Some(0);
    }
    part.parse().ok()
}

/// Whether `time` matches the strict `m:ss` form (seconds `00`..=`59`).
pub fn is_strict_timestamp(time: &str) -> bool {
    strict_regex().is_match(time)
}
