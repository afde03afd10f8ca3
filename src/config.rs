//! Generated scraper configuration.
//!
//! This is the declarative artifact produced by discovery and replayed by
//! an [`ExtractionEngine`](crate::extract::ExtractionEngine): an item
//! selector plus an ordered list of fields, each located relative to the
//! item.

use serde::{Deserialize, Serialize};

/// Semantic type of an extracted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Plain text content.
    Text,
    /// A link or image URL, resolved against the page URL.
    Url,
    /// A date assembled from one or more components.
    Date,
}

/// Where a value lives relative to the item element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementLocation {
    /// Relative selector. Empty means the item element itself.
    pub selector: String,
    /// Index among the element's non-empty direct text children.
    #[serde(default)]
    pub child_index: usize,
    /// Attribute to read instead of text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr: Option<String>,
}

/// Which parts of a date a component carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct DateCovers {
    /// Day of month.
    #[serde(default)]
    pub day: bool,
    /// Month.
    #[serde(default)]
    pub month: bool,
    /// Year.
    #[serde(default)]
    pub year: bool,
    /// Time of day.
    #[serde(default)]
    pub time: bool,
}

impl DateCovers {
    /// Whether no part is covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.day || self.month || self.year || self.time)
    }
}

/// One element contributing to a date field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateComponent {
    /// Parts of the date found at this location.
    pub covers: DateCovers,
    /// Where the component lives.
    pub location: ElementLocation,
    /// Candidate layouts (strftime syntax) matching every example.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layout: Vec<String>,
}

/// One output field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name, unique within a config.
    pub name: String,
    /// Semantic type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Location for text and url fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ElementLocation>,
    /// Components of a date field.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<DateComponent>,
    /// Language of month/day names in a date field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_language: Option<String>,
    /// Whether an item may lack this field.
    #[serde(default)]
    pub can_be_empty: bool,
}

impl Field {
    /// Whether this field links to a subpage.
    #[must_use]
    pub fn is_subpage_link(&self) -> bool {
        self.field_type == FieldType::Url
            && self
                .location
                .as_ref()
                .is_some_and(|loc| loc.attr.as_deref() == Some("href"))
    }
}

/// A complete scraper configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Configuration name.
    pub name: String,
    /// Page the configuration was generated from.
    #[serde(default)]
    pub url: String,
    /// Item selector.
    pub item: String,
    /// Ordered field list.
    pub fields: Vec<Field>,
}

impl ScraperConfig {
    /// Whether any field links to a subpage.
    #[must_use]
    pub fn has_subpage_link(&self) -> bool {
        self.fields.iter().any(Field::is_subpage_link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url_field(attr: &str) -> Field {
        Field {
            name: "link".to_string(),
            field_type: FieldType::Url,
            location: Some(ElementLocation {
                selector: "a".to_string(),
                child_index: 0,
                attr: Some(attr.to_string()),
            }),
            components: Vec::new(),
            date_language: None,
            can_be_empty: true,
        }
    }

    #[test]
    fn test_subpage_link_detection() {
        let mut config = ScraperConfig {
            name: "t".to_string(),
            url: String::new(),
            item: "li".to_string(),
            fields: vec![url_field("src")],
        };
        assert!(!config.has_subpage_link());
        config.fields.push(url_field("href"));
        assert!(config.has_subpage_link());
    }

    #[test]
    fn test_serialization_shape() {
        let config = ScraperConfig {
            name: "t".to_string(),
            url: "https://example.com".to_string(),
            item: "body > ul > li".to_string(),
            fields: vec![url_field("href")],
        };
        let json = serde_json::to_value(&config).expect("serializable");
        assert_eq!(json["fields"][0]["type"], "url");
        assert_eq!(json["fields"][0]["location"]["attr"], "href");
        assert!(json["fields"][0].get("components").is_none());

        let back: ScraperConfig = serde_json::from_value(json).expect("deserializable");
        assert_eq!(back, config);
    }

    #[test]
    fn test_date_covers_empty() {
        assert!(DateCovers::default().is_empty());
        assert!(!DateCovers { time: true, ..DateCovers::default() }.is_empty());
    }
}
