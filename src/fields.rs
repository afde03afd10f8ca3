//! Field materialization.
//!
//! Turns the surviving locations into the ordered field list of a
//! [`ScraperConfig`](crate::config::ScraperConfig). Selectors are relative
//! to the item root; all date components collapse into one `date` field.

use std::collections::HashSet;

use crate::config::{DateComponent, ElementLocation, Field, FieldType};
use crate::date::DateFormatDetector;
use crate::labeler::{date_covers, is_date_component};
use crate::location::FieldLocation;
use crate::path::TreePath;

/// Name of the merged date field.
pub const DATE_FIELD_NAME: &str = "date";

/// Relative element location of `loc` below `root`.
#[must_use]
pub fn relative_location(loc: &FieldLocation, root: &TreePath) -> ElementLocation {
    ElementLocation {
        selector: loc.path.suffix(root.len()).to_string(),
        child_index: loc.text_index,
        attr: loc.attribute.clone(),
    }
}

/// Builds the field list for `locations` relative to `root`.
///
/// Fields keep location order; the date field takes the place of its first
/// component.
#[must_use]
pub fn materialize_fields(
    locations: &[FieldLocation],
    root: &TreePath,
    dates: &dyn DateFormatDetector,
) -> Vec<Field> {
    let mut fields: Vec<Field> = Vec::new();
    let mut used: HashSet<String> = HashSet::new();
    let mut date_slot: Option<usize> = None;

    for (i, loc) in locations.iter().enumerate() {
        let name = loc.name.clone().unwrap_or_else(|| format!("field-{i}"));
        let location = relative_location(loc, root);

        if loc.attribute.is_none() && is_date_component(&name) {
            let covers = date_covers(&name);
            let format = dates.detect(&loc.examples, covers);
            let component = DateComponent {
                covers,
                location,
                layout: format.layouts,
            };

            let slot = *date_slot.get_or_insert_with(|| {
                used.insert(DATE_FIELD_NAME.to_string());
                fields.push(Field {
                    name: DATE_FIELD_NAME.to_string(),
                    field_type: FieldType::Date,
                    location: None,
                    components: Vec::new(),
                    date_language: None,
                    can_be_empty: true,
                });
                fields.len() - 1
            });
            let date_field = &mut fields[slot];
            date_field.components.push(component);
            if date_field.date_language.is_none() {
                date_field.date_language = format.language;
            }
            continue;
        }

        let field_type = if loc.is_link() {
            FieldType::Url
        } else {
            FieldType::Text
        };
        fields.push(Field {
            name: unique_name(&name, &mut used),
            field_type,
            location: Some(location),
            components: Vec::new(),
            date_language: None,
            can_be_empty: true,
        });
    }

    fields
}

/// `name`, or `name-N` with the smallest free `N >= 2`.
fn unique_name(name: &str, used: &mut HashSet<String>) -> String {
    let mut candidate = name.to_string();
    let mut n = 2;
    while used.contains(&candidate) {
        candidate = format!("{name}-{n}");
        n += 1;
    }
    used.insert(candidate.clone());
    candidate
}
