//! Extraction engine.
//!
//! Replays a [`ScraperConfig`] against a document. Discovery uses it to
//! validate every candidate configuration it generates, so the engine parses
//! with the same `dom_query` normalization the tree walk sees.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::{ElementLocation, Field, FieldType, ScraperConfig};
use crate::dom::{self, Matcher, Selection};
use crate::error::Result;
use crate::url_utils;

/// One extracted item: field name to value.
pub type Item = BTreeMap<String, String>;

/// Evaluates a configuration against HTML.
pub trait ExtractionEngine: Send + Sync {
    /// Extract all items `config` describes in `html`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelector`](crate::Error::InvalidSelector) if
    /// the item selector or a field selector does not compile.
    fn evaluate(&self, config: &ScraperConfig, html: &str) -> Result<Vec<Item>>;
}

/// Default engine built on `dom_query` selectors.
///
/// Field selectors are matched against the item's descendants and the first
/// match is used; an empty selector denotes the item itself. Items where
/// every field comes out empty are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorEngine;

impl SelectorEngine {
    /// Creates the engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// A location with its selector compiled.
struct CompiledLocation<'a> {
    location: &'a ElementLocation,
    matcher: Option<Matcher>,
}

impl<'a> CompiledLocation<'a> {
    fn new(location: &'a ElementLocation) -> Result<Self> {
        let matcher = if location.selector.is_empty() {
            None
        } else {
            Some(dom::matcher(&location.selector)?)
        };
        Ok(Self { location, matcher })
    }

    /// Raw value inside `item`, trimmed. Empty when nothing matches.
    fn value(&self, item: &Selection) -> String {
        let target = match &self.matcher {
            Some(matcher) => item.select_matcher(matcher),
            None => item.clone(),
        };
        let Some(node) = target.nodes().first() else {
            return String::new();
        };
        let element = Selection::from(*node);

        match &self.location.attr {
            Some(attr) => element
                .attr(attr)
                .map(|v| v.trim().to_string())
                .unwrap_or_default(),
            None => dom::direct_texts(&element)
                .into_iter()
                .nth(self.location.child_index)
                .unwrap_or_default(),
        }
    }
}

/// A field with its locations compiled.
struct CompiledField<'a> {
    field: &'a Field,
    locations: Vec<CompiledLocation<'a>>,
}

impl<'a> CompiledField<'a> {
    fn new(field: &'a Field) -> Result<Self> {
        let locations = match field.field_type {
            FieldType::Date => field
                .components
                .iter()
                .map(|c| CompiledLocation::new(&c.location))
                .collect::<Result<Vec<_>>>()?,
            FieldType::Text | FieldType::Url => field
                .location
                .iter()
                .map(CompiledLocation::new)
                .collect::<Result<Vec<_>>>()?,
        };
        Ok(Self { field, locations })
    }

    fn value(&self, item: &Selection, base: Option<&url::Url>) -> String {
        let parts: Vec<String> = self
            .locations
            .iter()
            .map(|loc| loc.value(item))
            .filter(|v| !v.is_empty())
            .collect();
        let value = parts.join(" ");

        match (self.field.field_type, base) {
            (FieldType::Url, Some(base)) if !value.is_empty() => url_utils::resolve_link(&value, base),
            _ => value,
        }
    }
}

impl ExtractionEngine for SelectorEngine {
    fn evaluate(&self, config: &ScraperConfig, html: &str) -> Result<Vec<Item>> {
        let item_matcher = dom::matcher(&config.item)?;
        let fields = config
            .fields
            .iter()
            .map(CompiledField::new)
            .collect::<Result<Vec<_>>>()?;
        let base = url_utils::parse_absolute(&config.url);

        let doc = dom::parse(html);
        let mut items = Vec::new();
        for node in doc.select_matcher(&item_matcher).nodes() {
            let item_sel = Selection::from(*node);
            let item: Item = fields
                .iter()
                .filter_map(|f| {
                    let value = f.value(&item_sel, base.as_ref());
                    (!value.is_empty()).then(|| (f.field.name.clone(), value))
                })
                .collect();
            if !item.is_empty() {
                items.push(item);
            }
        }

        debug!(item = %config.item, items = items.len(), "evaluated config");
        Ok(items)
    }
}
