//! Date prefixes: `created` values to `YYYY-MM-DD`, and detection of names
//! that already start with a date.
//!
//! Values are treated as opaque strings. Nothing here parses calendar dates,
//! so `2023-13-45` passes through unchanged.

use regex::Regex;
use std::sync::LazyLock;

/// ISO date at the start of a value, optionally followed by a time
static ISO_DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").unwrap());

/// German style `DD.MM.YYYY`, nothing else on the line
static DOTTED_DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2})\.([0-9]{2})\.([0-9]{4})$").unwrap());

/// File names already prefixed with `YYYY-MM-DD ` or `YYYYMMDD `
static DATED_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2}|[0-9]{8})\s").unwrap());

/// Turn a raw `created` value into a `YYYY-MM-DD` prefix.
///
/// Returns an empty string when neither shape matches.
pub fn normalize_date(raw: &str) -> String {
    let value = raw.trim();

    if ISO_DATE_PATTERN.is_match(value) {
        // The pattern is ten ASCII bytes, so slicing is on a char boundary
        return value[..10].to_string();
    }

    if let Some(caps) = DOTTED_DATE_PATTERN.captures(value) {
        return format!("{}-{}-{}", &caps[3], &caps[2], &caps[1]);
    }

    String::new()
}

/// Whether a base name already starts with a date prefix
pub fn has_date_prefix(basename: &str) -> bool {
    DATED_NAME_PATTERN.is_match(basename)
}
