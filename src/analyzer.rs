//! Tree walker.
//!
//! A single sequential pass over the token stream that records a
//! [`FieldLocation`] for every non-empty text node and every allow-listed
//! attribute inside `<body>`. Per-path scope records (text-child counter and
//! the sibling descriptors seen so far) drive the text index and the
//! `nth-child` disambiguation; they live only as long as their element is
//! open.

use std::collections::HashMap;

use tracing::debug;

use crate::dom::{is_void_element, Tag, Token};
use crate::location::FieldLocation;
use crate::path::{nth_child, TagDescriptor, TreePath};

/// `(tag, attribute)` pairs whose values become attribute locations.
pub const ATTRIBUTE_ALLOW_LIST: &[(&str, &str)] = &[("a", "href"), ("img", "src")];

#[derive(Debug, Default)]
struct ScopeState {
    text_children: usize,
    siblings: Vec<TagDescriptor>,
}

/// Walker state for one discovery run.
#[derive(Debug, Default)]
pub struct Analyzer {
    path: TreePath,
    in_body: bool,
    finished: bool,
    scopes: HashMap<String, ScopeState>,
    locations: Vec<FieldLocation>,
}

impl Analyzer {
    /// Creates a walker positioned before `<body>`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one token.
    pub fn feed(&mut self, token: Token) {
        if self.finished {
            return;
        }
        match token {
            Token::Text(text) => self.handle_text(&text),
            Token::StartTag(tag) => self.handle_start(tag, false),
            Token::SelfClosingTag(tag) => self.handle_start(tag, true),
            Token::EndTag(name) => self.handle_end(&name),
        }
    }

    /// Consumes the walker and returns locations in discovery order.
    #[must_use]
    pub fn into_locations(self) -> Vec<FieldLocation> {
        self.locations
    }

    fn handle_text(&mut self, text: &str) {
        if !self.in_body {
            return;
        }
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let scope = self.scopes.entry(self.path.to_string()).or_default();
        let index = scope.text_children;
        scope.text_children += 1;
        self.locations
            .push(FieldLocation::text(self.path.clone(), index, text));
    }

    fn handle_start(&mut self, tag: Tag, self_closing: bool) {
        if tag.name == "body" && !self.in_body {
            self.in_body = true;
        } else if !self.in_body {
            return;
        }

        let descriptor = self.descriptor_for(&tag);
        let void = self_closing || is_void_element(&tag.name);

        if void {
            // The node never becomes current; its attributes hang off a
            // transient path.
            let mut transient = self.path.clone();
            transient.push(descriptor);
            self.emit_attributes(&tag, &transient);
        } else {
            self.path.push(descriptor);
            let path = self.path.clone();
            self.emit_attributes(&tag, &path);
        }
    }

    fn handle_end(&mut self, name: &str) {
        if !self.in_body || is_void_element(name) {
            return;
        }

        let matched = self.path.contains_tag(name);
        if !matched && self.path.len() <= 1 {
            // Nothing but <body> is open; a stray end tag must not close it.
            return;
        }

        loop {
            self.scopes.remove(&self.path.to_string());
            let Some(popped) = self.path.pop() else {
                break;
            };
            if !matched || popped.tag_name == name {
                break;
            }
        }

        if name == "body" && matched {
            self.in_body = false;
            self.finished = true;
        }
    }

    /// Builds the descriptor for a new child of the current element and
    /// records it as a sibling.
    fn descriptor_for(&mut self, tag: &Tag) -> TagDescriptor {
        let classes = class_list(tag);
        let scope = self.scopes.entry(self.path.to_string()).or_default();

        let candidate = TagDescriptor::new(tag.name.clone(), classes, Vec::new());
        let repeated = scope
            .siblings
            .iter()
            .any(|sib| sib.tag_name == candidate.tag_name && sib.same_class_set(&candidate));
        let pseudo_classes = if repeated {
            vec![nth_child(scope.siblings.len() + 1)]
        } else {
            Vec::new()
        };
        scope.siblings.push(candidate.clone());

        TagDescriptor {
            pseudo_classes,
            ..candidate
        }
    }

    fn emit_attributes(&mut self, tag: &Tag, path: &TreePath) {
        for (attr_name, value) in &tag.attributes {
            let allowed = ATTRIBUTE_ALLOW_LIST
                .iter()
                .any(|(t, a)| *t == tag.name && a == attr_name);
            let value = value.trim();
            if allowed && !value.is_empty() {
                self.locations
                    .push(FieldLocation::attribute(path.clone(), attr_name.as_str(), value));
            }
        }
    }
}

/// Splits the `class` attribute; classes containing a dot are unusable in
/// the path grammar and are dropped.
fn class_list(tag: &Tag) -> Vec<String> {
    tag.attr("class")
        .map(|value| {
            value
                .split_whitespace()
                .filter(|class| !class.contains('.'))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Walks `tokens` and returns the raw locations in discovery order.
pub fn analyze<I>(tokens: I) -> Vec<FieldLocation>
where
    I: IntoIterator<Item = Token>,
{
    let mut analyzer = Analyzer::new();
    for token in tokens {
        analyzer.feed(token);
    }
    let locations = analyzer.into_locations();
    debug!(raw_locations = locations.len(), "tree walk finished");
    locations
}
