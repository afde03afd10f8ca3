//! DOM Adapter
//!
//! Thin layer over `dom_query` used by both sides of the system: the
//! discovery walk consumes the normalized document as a linear token stream,
//! and the extraction engine replays selectors against the same parse.
//! Both must see the same normalized tree (e.g. auto-inserted `<tbody>`),
//! otherwise generated selectors silently stop matching.

pub use dom_query::{Document, Matcher, NodeRef, Selection};

use crate::error::{Error, Result};

/// Void elements: no children, no end tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text content is never page content.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

// === Tokens ===

/// An element tag with its attributes in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Lowercase tag name.
    pub name: String,
    /// `(name, value)` pairs.
    pub attributes: Vec<(String, String)>,
}

impl Tag {
    /// Creates a tag.
    #[must_use]
    pub fn new(name: impl Into<String>, attributes: Vec<(String, String)>) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    /// Value of the attribute `name`, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// One token of the linear document stream.
///
/// The end of the stream is the end of the token sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An opening tag of an element with content.
    StartTag(Tag),
    /// A closing tag.
    EndTag(String),
    /// A void element.
    SelfClosingTag(Tag),
    /// A text node, untrimmed.
    Text(String),
}

// === Parsing ===

/// Parse HTML string into document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Whether `tag` is a void element.
#[must_use]
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Normalize `html` and flatten it into a token stream.
///
/// # Errors
///
/// Returns [`Error::ParseError`] for an empty document.
pub fn tokenize(html: &str) -> Result<Vec<Token>> {
    if html.trim().is_empty() {
        return Err(Error::ParseError("empty document".to_string()));
    }
    Ok(tokenize_document(&parse(html)))
}

/// Flatten an already parsed document into a token stream.
///
/// Uses an explicit work stack so arbitrarily deep documents cannot
/// overflow the call stack.
#[must_use]
pub fn tokenize_document(doc: &Document) -> Vec<Token> {
    enum Step<'a> {
        Enter(NodeRef<'a>),
        Exit(String),
    }

    let mut tokens = Vec::new();
    let mut stack = vec![Step::Enter(doc.root())];

    while let Some(step) = stack.pop() {
        let node = match step {
            Step::Exit(name) => {
                tokens.push(Token::EndTag(name));
                continue;
            }
            Step::Enter(node) => node,
        };

        if node.is_text() {
            let in_raw_text = node
                .parent()
                .and_then(|p| p.node_name())
                .is_some_and(|name| RAW_TEXT_ELEMENTS.contains(&name.to_ascii_lowercase().as_str()));
            if !in_raw_text {
                tokens.push(Token::Text(node.text().to_string()));
            }
            continue;
        }

        let children = node.children();
        if node.is_element() {
            let name = node
                .node_name()
                .map(|n| n.to_ascii_lowercase())
                .unwrap_or_default();
            let attributes = node
                .attrs()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();
            let tag = Tag::new(name.clone(), attributes);

            if is_void_element(&name) {
                tokens.push(Token::SelfClosingTag(tag));
                continue;
            }
            tokens.push(Token::StartTag(tag));
            stack.push(Step::Exit(name));
        }

        // Document, fragment and other container nodes only contribute children.
        for child in children.into_iter().rev() {
            stack.push(Step::Enter(child));
        }
    }

    tokens
}

// === Querying ===

/// Compile a selector.
///
/// # Errors
///
/// Returns [`Error::InvalidSelector`] if `selector` does not parse.
pub fn matcher(selector: &str) -> Result<Matcher> {
    Matcher::new(selector).map_err(|_| Error::InvalidSelector {
        selector: selector.to_string(),
    })
}

/// Non-empty direct text children of the first node in `sel`, trimmed.
#[must_use]
pub fn direct_texts(sel: &Selection) -> Vec<String> {
    sel.nodes()
        .first()
        .map(|node| {
            node.children()
                .into_iter()
                .filter(NodeRef::is_text)
                .map(|child| child.text().trim().to_string())
                .filter(|text| !text.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(name: &str) -> Token {
        Token::StartTag(Tag::new(name, vec![]))
    }

    fn end(name: &str) -> Token {
        Token::EndTag(name.to_string())
    }

    #[test]
    fn test_tokenize_normalizes_document() {
        let tokens = tokenize("<p>hi</p>").expect("tokens");
        assert_eq!(
            tokens,
            vec![
                start("html"),
                start("head"),
                end("head"),
                start("body"),
                start("p"),
                Token::Text("hi".to_string()),
                end("p"),
                end("body"),
                end("html"),
            ]
        );
    }

    #[test]
    fn test_tokenize_void_and_attributes() {
        let tokens = tokenize(r#"<body><a href="/x" class="l">go</a><br><img src="i.png"></body>"#)
            .expect("tokens");
        assert!(tokens.contains(&Token::StartTag(Tag::new(
            "a",
            vec![
                ("href".to_string(), "/x".to_string()),
                ("class".to_string(), "l".to_string())
            ]
        ))));
        assert!(tokens.contains(&Token::SelfClosingTag(Tag::new("br", vec![]))));
        assert!(!tokens.contains(&end("br")));
        assert!(!tokens.contains(&end("img")));
    }

    #[test]
    fn test_tokenize_skips_script_text() {
        let tokens = tokenize("<body><script>var x = 1;</script><p>t</p></body>").expect("tokens");
        assert!(tokens.contains(&start("script")));
        assert!(!tokens.iter().any(|t| matches!(t, Token::Text(s) if s.contains("var x"))));
    }

    #[test]
    fn test_tokenize_inserts_tbody() {
        let tokens = tokenize("<table><tr><td>x</td></tr></table>").expect("tokens");
        assert!(tokens.contains(&start("tbody")));
    }

    #[test]
    fn test_tokenize_empty_document_fails() {
        assert!(matches!(tokenize("   "), Err(Error::ParseError(_))));
    }

    #[test]
    fn test_direct_texts() {
        let doc = parse("<p>one <b>bold</b> two</p>");
        assert_eq!(direct_texts(&doc.select("p")), vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_matcher_rejects_bad_selector() {
        assert!(matcher("li.item:nth-child(2)").is_ok());
        assert!(matcher("li..").is_err());
    }
}
