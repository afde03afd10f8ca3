//! Field locations discovered by the tree walk.

use crate::path::TreePath;

/// Attributes whose values are extracted as links.
pub const LINK_ATTRIBUTES: &[&str] = &["href", "src"];

/// A candidate extraction point.
///
/// Created once per observed text node or allow-listed attribute, then
/// merged destructively during squashing: the surviving instance absorbs the
/// count and examples of every location folded into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLocation {
    /// Owned path from `<body>` to the element.
    pub path: TreePath,
    /// Attribute name, or `None` for text content.
    pub attribute: Option<String>,
    /// Index among the element's non-empty direct text children.
    pub text_index: usize,
    /// Number of raw locations represented, including this one.
    pub count: usize,
    /// Observed values, newest-discovered first after merging.
    pub examples: Vec<String>,
    /// Highest path index whose `nth-child` was stripped.
    pub strip_index: usize,
    /// Semantic name assigned by the labeler.
    pub name: Option<String>,
    /// Whether the field is part of the user's selection.
    pub selected: bool,
    /// Display colour, as `#rrggbb`.
    pub color: Option<String>,
}

impl FieldLocation {
    fn new(path: TreePath, attribute: Option<String>, text_index: usize, example: String) -> Self {
        Self {
            path,
            attribute,
            text_index,
            count: 1,
            examples: vec![example],
            strip_index: 0,
            name: None,
            selected: true,
            color: None,
        }
    }

    /// A text-content location.
    #[must_use]
    pub fn text(path: TreePath, text_index: usize, example: impl Into<String>) -> Self {
        Self::new(path, None, text_index, example.into())
    }

    /// An attribute location.
    #[must_use]
    pub fn attribute(path: TreePath, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(path, Some(attribute.into()), 0, value.into())
    }

    /// Whether every example is identical.
    ///
    /// A location with a single example carries no per-item variation and
    /// counts as static.
    #[must_use]
    pub fn is_static(&self) -> bool {
        match self.examples.split_first() {
            Some((first, rest)) => rest.iter().all(|e| e == first),
            None => true,
        }
    }

    /// Whether the location extracts a link or image URL.
    #[must_use]
    pub fn is_link(&self) -> bool {
        self.attribute
            .as_deref()
            .is_some_and(|attr| LINK_ATTRIBUTES.contains(&attr))
    }

    /// Whether the location is an anchor `href`, i.e. a link to a subpage.
    #[must_use]
    pub fn is_subpage_link(&self) -> bool {
        self.attribute.as_deref() == Some("href")
    }

    /// Short human-readable key used in logs and errors.
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.attribute {
            Some(attr) => format!("{}@{attr}", self.path),
            None => format!("{}#{}", self.path, self.text_index),
        }
    }
}

/// Marks the locations kept by `keep` as selected and returns them.
///
/// # Errors
///
/// Returns [`Error::NoFieldsSelected`](crate::Error::NoFieldsSelected) when
/// the predicate keeps nothing.
pub fn select_fields<F>(locations: Vec<FieldLocation>, mut keep: F) -> crate::Result<Vec<FieldLocation>>
where
    F: FnMut(&FieldLocation) -> bool,
{
    let selected: Vec<FieldLocation> = locations
        .into_iter()
        .filter_map(|mut loc| {
            loc.selected = keep(&loc);
            loc.selected.then_some(loc)
        })
        .collect();

    if selected.is_empty() {
        return Err(crate::Error::NoFieldsSelected);
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::TagDescriptor;

    fn path() -> TreePath {
        TreePath::from(vec![
            TagDescriptor::new("body", vec![], vec![]),
            TagDescriptor::new("a", vec![], vec![]),
        ])
    }

    #[test]
    fn test_new_locations_start_with_count_one() {
        let loc = FieldLocation::text(path(), 0, "hello");
        assert_eq!(loc.count, 1);
        assert_eq!(loc.examples, vec!["hello".to_string()]);
        assert!(loc.attribute.is_none());

        let link = FieldLocation::attribute(path(), "href", "/x");
        assert!(link.is_link());
        assert!(link.is_subpage_link());
        assert_eq!(link.describe(), "body > a@href");
    }

    #[test]
    fn test_is_static() {
        let mut loc = FieldLocation::text(path(), 0, "NEW");
        assert!(loc.is_static());
        loc.examples.push("NEW".to_string());
        assert!(loc.is_static());
        loc.examples.push("OLD".to_string());
        assert!(!loc.is_static());
    }

    #[test]
    fn test_image_source_is_link_but_not_subpage() {
        let img = FieldLocation::attribute(path(), "src", "/img.png");
        assert!(img.is_link());
        assert!(!img.is_subpage_link());
    }

    #[test]
    fn test_select_fields() {
        let locs = vec![
            FieldLocation::text(path(), 0, "a"),
            FieldLocation::attribute(path(), "href", "/x"),
        ];
        let kept = select_fields(locs.clone(), FieldLocation::is_link).expect("one selected");
        assert_eq!(kept.len(), 1);
        assert!(kept[0].selected);

        let none = select_fields(locs, |_| false);
        assert!(matches!(none, Err(crate::Error::NoFieldsSelected)));
    }
}
