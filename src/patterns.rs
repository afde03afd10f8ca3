//! Compiled regex patterns for labelling field examples.
//!
//! All patterns are compiled once using `LazyLock` and match a whole,
//! trimmed example.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Building blocks
// =============================================================================

/// English month names and abbreviations.
const MONTH: &str = r"(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?";

/// Optional leading weekday, e.g. `Tuesday, ` or `Tue `.
const WEEKDAY: &str = r"(?:(?:mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?,?\s+)?";

/// Clock time with optional seconds and meridiem.
const TIME: &str = r"(?:\d{1,2}:\d{2}(?::\d{2})?(?:\s*[ap]\.?m\.?)?(?:\s*(?:h|uhr))?|\d{1,2}\s*[ap]\.?m\.?)";

fn full_date() -> String {
    [
        r"\d{4}-\d{1,2}-\d{1,2}".to_string(),
        r"\d{1,2}[./]\d{1,2}[./]\d{4}".to_string(),
        format!(r"{WEEKDAY}\d{{1,2}}(?:st|nd|rd|th)?\.?\s+{MONTH},?\s+\d{{4}}"),
        format!(r"{WEEKDAY}{MONTH}\s+\d{{1,2}}(?:st|nd|rd|th)?,?\s+\d{{4}}"),
    ]
    .join("|")
}

fn day_month() -> String {
    format!(r"{WEEKDAY}\d{{1,2}}(?:st|nd|rd|th)?\.?\s+{MONTH}|{WEEKDAY}{MONTH}\s+\d{{1,2}}(?:st|nd|rd|th)?")
}

// =============================================================================
// Date and time
// =============================================================================

/// Day, month and year.
pub static DATE_DAY_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^(?:{})$", full_date())).expect("DATE_DAY_MONTH_YEAR regex")
});

/// Day, month, year and time of day.
pub static DATE_DAY_MONTH_YEAR_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^(?:{}),?\s+(?:at\s+)?{TIME}$", full_date()))
        .expect("DATE_DAY_MONTH_YEAR_TIME regex")
});

/// Day and month without a year.
pub static DATE_DAY_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^(?:{})$", day_month())).expect("DATE_DAY_MONTH regex")
});

/// Time of day, optionally a range such as `19:00 - 21:00`.
pub static TIME_OF_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^{TIME}(?:\s*[-–]\s*{TIME})?$")).expect("TIME_OF_DAY regex")
});

// =============================================================================
// Other value shapes
// =============================================================================

/// Absolute or root-relative URL, or a bare file reference.
pub static URL_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:(?:https?:)?//\S+|\.{0,2}/\S*|[\w\-./]+\.(?:html?|php|aspx?|png|jpe?g|gif|webp|svg)(?:[?#]\S*)?)$")
        .expect("URL_LIKE regex")
});

/// Amount with a currency symbol on either side.
pub static PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[$€£¥]\s?\d[\d,.]*|\d[\d,.]*\s?(?:[$€£¥]|eur|usd|chf))$").expect("PRICE regex")
});

/// Integer or decimal number.
pub static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?\d+(?:[.,']\d+)*$").expect("NUMBER regex"));
