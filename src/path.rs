//! Tree path model.
//!
//! A [`TreePath`] is the chain of [`TagDescriptor`]s from `<body>` (inclusive)
//! down to a node. Its string form doubles as a CSS selector: segments are
//! joined with the child combinator and each segment renders as
//! `tag.class1.class2:nth-child(N)`.

use std::collections::HashSet;
use std::fmt;

/// One element's identity at a tree position.
#[derive(Debug, Clone, Default)]
pub struct TagDescriptor {
    /// Lowercase tag name.
    pub tag_name: String,
    /// Class names in document order. Compared as a set.
    pub classes: Vec<String>,
    /// Structural pseudo-classes, currently at most one `nth-child(N)`.
    pub pseudo_classes: Vec<String>,
}

impl TagDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(tag_name: impl Into<String>, classes: Vec<String>, pseudo_classes: Vec<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            classes,
            pseudo_classes,
        }
    }

    /// Whether both descriptors carry the same set of classes.
    #[must_use]
    pub fn same_class_set(&self, other: &Self) -> bool {
        let a: HashSet<&str> = self.classes.iter().map(String::as_str).collect();
        let b: HashSet<&str> = other.classes.iter().map(String::as_str).collect();
        a == b
    }

    /// Index of the `nth-child(N)` pseudo-class, if any.
    #[must_use]
    pub fn nth_child(&self) -> Option<usize> {
        self.pseudo_classes.first().and_then(|pc| parse_nth_child(pc))
    }
}

impl PartialEq for TagDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.tag_name == other.tag_name
            && self.same_class_set(other)
            && self.pseudo_classes == other.pseudo_classes
    }
}

impl Eq for TagDescriptor {}

impl fmt::Display for TagDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag_name)?;
        for class in &self.classes {
            write!(f, ".{}", escape_class(class))?;
        }
        for pseudo in &self.pseudo_classes {
            write!(f, ":{pseudo}")?;
        }
        Ok(())
    }
}

/// Formats an `nth-child` pseudo-class token.
#[must_use]
pub fn nth_child(index: usize) -> String {
    format!("nth-child({index})")
}

/// Parses the index out of an `nth-child(N)` token.
#[must_use]
pub fn parse_nth_child(token: &str) -> Option<usize> {
    token
        .strip_prefix("nth-child(")?
        .strip_suffix(')')?
        .trim()
        .parse()
        .ok()
}

/// Escapes a class name for use in a selector.
///
/// `:`, `>` and `<` are backslash-escaped. A leading digit becomes a CSS hex
/// escape (`2col` renders as `\32 col`).
#[must_use]
pub fn escape_class(class: &str) -> String {
    let mut escaped = String::with_capacity(class.len() + 4);
    for (i, c) in class.chars().enumerate() {
        match c {
            ':' | '>' | '<' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '0'..='9' if i == 0 => {
                escaped.push_str("\\3");
                escaped.push(c);
                escaped.push(' ');
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Ordered sequence of descriptors from `<body>` to a node.
///
/// Clones are deep: no two paths share storage, so a location's path can be
/// narrowed or stripped without affecting any other location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreePath {
    segments: Vec<TagDescriptor>,
}

impl TreePath {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Appends a segment.
    pub fn push(&mut self, descriptor: TagDescriptor) {
        self.segments.push(descriptor);
    }

    /// Removes and returns the last segment.
    pub fn pop(&mut self) -> Option<TagDescriptor> {
        self.segments.pop()
    }

    /// Last segment.
    #[must_use]
    pub fn last(&self) -> Option<&TagDescriptor> {
        self.segments.last()
    }

    /// Segment at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TagDescriptor> {
        self.segments.get(index)
    }

    /// Mutable segment at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut TagDescriptor> {
        self.segments.get_mut(index)
    }

    /// All segments.
    #[must_use]
    pub fn segments(&self) -> &[TagDescriptor] {
        &self.segments
    }

    /// Whether any segment has the given tag name.
    #[must_use]
    pub fn contains_tag(&self, tag_name: &str) -> bool {
        self.segments.iter().any(|s| s.tag_name == tag_name)
    }

    /// Copy of the first `len` segments.
    #[must_use]
    pub fn truncated(&self, len: usize) -> Self {
        Self {
            segments: self.segments[..len.min(self.segments.len())].to_vec(),
        }
    }

    /// Copy of the segments after the first `prefix_len`.
    #[must_use]
    pub fn suffix(&self, prefix_len: usize) -> Self {
        Self {
            segments: self.segments[prefix_len.min(self.segments.len())..].to_vec(),
        }
    }

    /// Whether `self` is a strict, order-preserving prefix of `other`.
    #[must_use]
    pub fn is_strict_prefix_of(&self, other: &Self) -> bool {
        self.len() < other.len() && self.segments.iter().zip(&other.segments).all(|(a, b)| a == b)
    }

    /// Total number of classes over all segments.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.segments.iter().map(|s| s.classes.len()).sum()
    }

    /// Character-level Levenshtein distance between the string forms.
    ///
    /// A coarse proxy for structural similarity.
    #[must_use]
    pub fn distance(&self, other: &Self) -> usize {
        levenshtein(&self.to_string(), &other.to_string())
    }
}

impl From<Vec<TagDescriptor>> for TreePath {
    fn from(segments: Vec<TagDescriptor>) -> Self {
        Self { segments }
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
