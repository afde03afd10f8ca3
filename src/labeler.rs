//! Semantic labelling of field locations.
//!
//! A [`Labeler`] looks at the example values of a location and predicts a
//! name for it. Date parts get a label of the form
//! `date-component-<part>-<part>...` so that field materialization can
//! assemble them into a single date field.

use crate::config::DateCovers;
use crate::error::Result;
use crate::patterns::{
    DATE_DAY_MONTH, DATE_DAY_MONTH_YEAR, DATE_DAY_MONTH_YEAR_TIME, NUMBER, PRICE, TIME_OF_DAY,
    URL_LIKE,
};

/// Prefix marking labels of date components.
pub const DATE_COMPONENT_PREFIX: &str = "date-component";

/// Predicts a semantic name from example values.
pub trait Labeler: Send + Sync {
    /// Predict the label for a location observed with `examples`.
    ///
    /// # Errors
    ///
    /// Implementations backed by an external model may fail; the error is
    /// reported against the field being labelled.
    fn predict_label(&self, examples: &[String]) -> Result<String>;
}

/// Whether `label` names a date component.
#[must_use]
pub fn is_date_component(label: &str) -> bool {
    label.starts_with(DATE_COMPONENT_PREFIX)
}

/// Date parts encoded in a `date-component-...` label.
#[must_use]
pub fn date_covers(label: &str) -> DateCovers {
    let mut covers = DateCovers::default();
    let Some(parts) = label.strip_prefix(DATE_COMPONENT_PREFIX) else {
        return covers;
    };
    for part in parts.split('-') {
        match part {
            "day" => covers.day = true,
            "month" => covers.month = true,
            "year" => covers.year = true,
            "time" => covers.time = true,
            _ => {}
        }
    }
    covers
}

/// Regex-based labeler.
///
/// Every example is classified on its own; the location gets the shared
/// class, or `text` when the examples disagree.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternLabeler;

impl PatternLabeler {
    /// Creates the labeler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn classify(example: &str) -> &'static str {
        let example = example.trim();
        if DATE_DAY_MONTH_YEAR_TIME.is_match(example) {
            "date-component-day-month-year-time"
        } else if DATE_DAY_MONTH_YEAR.is_match(example) {
            "date-component-day-month-year"
        } else if DATE_DAY_MONTH.is_match(example) {
            "date-component-day-month"
        } else if TIME_OF_DAY.is_match(example) {
            "date-component-time"
        } else if URL_LIKE.is_match(example) {
            "url"
        } else if PRICE.is_match(example) {
            "price"
        } else if NUMBER.is_match(example) {
            "number"
        } else {
            "text"
        }
    }
}

impl Labeler for PatternLabeler {
    fn predict_label(&self, examples: &[String]) -> Result<String> {
        let mut labels = examples.iter().map(|e| Self::classify(e));
        let Some(first) = labels.next() else {
            return Ok("text".to_string());
        };
        let label = if labels.all(|l| l == first) { first } else { "text" };
        Ok(label.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(examples: &[&str]) -> String {
        let examples: Vec<String> = examples.iter().map(|s| (*s).to_string()).collect();
        PatternLabeler::new().predict_label(&examples).expect("label")
    }

    #[test]
    fn test_labels_by_shape() {
        assert_eq!(label(&["Event 1", "Event 2"]), "text");
        assert_eq!(label(&["/e/1", "/e/2"]), "url");
        assert_eq!(label(&["12", "7"]), "number");
        assert_eq!(label(&["$10", "$12.50"]), "price");
        assert_eq!(label(&["2024-03-05", "2024-03-06"]), "date-component-day-month-year");
        assert_eq!(label(&["19:00", "8:30 pm"]), "date-component-time");
        assert_eq!(label(&["Mar 5", "Apr 12"]), "date-component-day-month");
    }

    #[test]
    fn test_disagreeing_examples_are_text() {
        assert_eq!(label(&["2024-03-05", "tomorrow"]), "text");
        assert_eq!(label(&[]), "text");
    }

    #[test]
    fn test_date_covers_from_label() {
        let covers = date_covers("date-component-day-month-year-time");
        assert!(covers.day && covers.month && covers.year && covers.time);

        let time = date_covers("date-component-time");
        assert!(time.time && !time.day);

        assert!(date_covers("title").is_empty());
        assert!(is_date_component("date-component-time"));
        assert!(!is_date_component("text"));
    }
}
