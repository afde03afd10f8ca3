//! Date layout detection for date components.

use chrono::format::{parse, Parsed, StrftimeItems};

use crate::config::DateCovers;

/// Layouts and language found for a set of date examples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateFormat {
    /// Layouts (strftime syntax) that parse every example.
    pub layouts: Vec<String>,
    /// Language of month or weekday names, if the layouts use any.
    pub language: Option<String>,
}

/// Detects the layout of date component examples.
pub trait DateFormatDetector: Send + Sync {
    /// Layouts matching all of `examples` for a component covering `covers`.
    fn detect(&self, examples: &[String], covers: DateCovers) -> DateFormat;
}

const DAY_MONTH_YEAR_LAYOUTS: &[&str] = &[
    "%Y-%m-%d",
    "%d.%m.%Y",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d %B %Y",
    "%d. %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%A, %d %B %Y",
    "%A, %B %d, %Y",
    "%a %d %b %Y",
];

const TIME_LAYOUTS: &[&str] = &["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p", "%I %p", "%I%p"];

const DAY_MONTH_LAYOUTS: &[&str] = &["%d %B", "%d. %B", "%B %d", "%a %d %b", "%d.%m."];

/// Detector that tries a fixed set of layouts with `chrono`'s parser.
///
/// Layouts are matched against the whole, trimmed example. Month and
/// weekday names are English.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoLayoutDetector;

impl ChronoLayoutDetector {
    /// Creates the detector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn candidate_layouts(covers: DateCovers) -> Vec<String> {
        let dates: &[&str] = if covers.year {
            DAY_MONTH_YEAR_LAYOUTS
        } else if covers.day || covers.month {
            DAY_MONTH_LAYOUTS
        } else {
            &[]
        };

        match (dates.is_empty(), covers.time) {
            (true, true) => TIME_LAYOUTS.iter().map(|t| (*t).to_string()).collect(),
            (false, true) => dates
                .iter()
                .flat_map(|d| TIME_LAYOUTS.iter().map(move |t| format!("{d} {t}")))
                .collect(),
            (false, false) => dates.iter().map(|d| (*d).to_string()).collect(),
            (true, false) => Vec::new(),
        }
    }
}

/// Whether `layout` parses all of `value`.
fn layout_matches(layout: &str, value: &str) -> bool {
    let mut parsed = Parsed::new();
    parse(&mut parsed, value.trim(), StrftimeItems::new(layout)).is_ok()
}

fn uses_names(layout: &str) -> bool {
    ["%B", "%b", "%A", "%a"].iter().any(|spec| layout.contains(spec))
}

impl DateFormatDetector for ChronoLayoutDetector {
    fn detect(&self, examples: &[String], covers: DateCovers) -> DateFormat {
        let values: Vec<&str> = examples
            .iter()
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .collect();
        if values.is_empty() {
            return DateFormat::default();
        }

        let layouts: Vec<String> = Self::candidate_layouts(covers)
            .into_iter()
            .filter(|layout| values.iter().all(|v| layout_matches(layout, v)))
            .collect();
        let language = layouts
            .iter()
            .any(|l| uses_names(l))
            .then(|| "en".to_string());

        DateFormat { layouts, language }
    }
}
