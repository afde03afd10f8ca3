//! # rs-autoscrape
//!
//! Automatic scraper-configuration discovery for list-like web pages.
//!
//! Given a rendered HTML page, the library finds the repeated DOM
//! substructures that make up "items", works out which child elements carry
//! which field (title, date, link, image), and emits a declarative
//! [`ScraperConfig`] that a simple extraction engine can replay against later
//! fetches of the same site. No CSS selectors are written by hand.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_autoscrape::{discover_with_options, Options};
//!
//! let rows: String = (1..=8)
//!     .map(|i| format!(r#"<li class="event"><span class="title">Concert {i}</span><a href="/e/{i}">Details</a></li>"#))
//!     .collect();
//! let html = format!("<html><body><ul>{rows}</ul></body></html>");
//!
//! let options = Options {
//!     min_occurrence: 6,
//!     url: Some("https://example.com/events".to_string()),
//!     ..Options::default()
//! };
//! let discovery = discover_with_options(&html, &options)?;
//! let top = &discovery.candidates["a"];
//! assert_eq!(top.config.item, "body > ul > li.event");
//! assert_eq!(top.items.len(), 8);
//! # Ok::<(), rs_autoscrape::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! - **Tree walk**: every non-empty text node and every `a@href` / `img@src`
//!   inside `<body>` becomes a raw field location with its full tag path.
//! - **Merge**: locations that differ only in sibling position collapse into
//!   one canonical location with an occurrence count and example values.
//! - **Filter**: rare and, optionally, never-varying locations are dropped.
//! - **Root**: the deepest path prefix shared by all survivors is the item
//!   selector.
//! - **Expansion**: nested repeating groups are explored recursively; every
//!   resulting configuration is validated by replaying it.

mod error;
mod options;
mod patterns;

/// Tree path model: tag descriptors and selector paths.
pub mod path;

/// DOM adapter: parsing, tokenizing and selector matching via `dom_query`.
pub mod dom;

/// Field locations discovered by the tree walk.
pub mod location;

/// Single-pass tree walker producing raw field locations.
pub mod analyzer;

/// Similarity-based merging of field locations.
pub mod merge;

/// Occurrence and static-value filters.
pub mod filter;

/// Shared root selector discovery.
pub mod root;

/// Generated scraper configuration types.
pub mod config;

/// Semantic labelling of field locations.
pub mod labeler;

/// Date layout detection.
pub mod date;

/// Conversion of locations into configuration fields.
pub mod fields;

/// Extraction engine replaying configurations.
pub mod extract;

/// Recursive cluster expansion into candidate configurations.
pub mod expand;

/// Page fetching.
pub mod fetch;

/// Discovery driver.
pub mod discover;

/// URL utilities for link resolution and config naming.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

// Public API - re-exports
pub use config::{DateComponent, DateCovers, ElementLocation, Field, FieldType, ScraperConfig};
pub use discover::{Discoverer, Discovery};
pub use error::{Error, Result};
pub use expand::Candidate;
pub use extract::{ExtractionEngine, Item, SelectorEngine};
pub use fetch::{FetchOptions, FetchResponse, Fetcher, FileFetcher};
pub use labeler::{Labeler, PatternLabeler};
pub use location::{select_fields, FieldLocation};
pub use options::Options;
pub use path::{TagDescriptor, TreePath};

/// Discovers scraper configurations in an HTML document using default options.
///
/// # Example
///
/// ```rust
/// use rs_autoscrape::{discover, Error};
///
/// let result = discover("<html><body><p>Nothing repeats here</p></body></html>");
/// assert!(matches!(result, Err(Error::NoFieldsFound)));
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn discover(html: &str) -> Result<Discovery> {
    discover_with_options(html, &Options::default())
}

/// Discovers scraper configurations in an HTML document with custom options.
///
/// Uses the built-in labeler, extraction engine and date detector; build a
/// [`Discoverer`] to swap any of them.
#[allow(clippy::missing_errors_doc)]
pub fn discover_with_options(html: &str, options: &Options) -> Result<Discovery> {
    Discoverer::new(options.clone()).discover(html)
}

/// Discovers scraper configurations in raw HTML bytes.
///
/// The charset is detected from a byte-order mark or a `<meta>`
/// declaration; undecodable bytes are replaced rather than rejected.
///
/// # Example
///
/// ```rust
/// use rs_autoscrape::{discover_bytes, Options};
///
/// let mut html = b"<html><head><meta charset=\"windows-1252\"></head><body><ul>".to_vec();
/// for i in 1..=6 {
///     html.extend_from_slice(b"<li><p><b>Caf\xe9 ");
///     html.extend_from_slice(i.to_string().as_bytes());
///     html.extend_from_slice(b"</b></p></li>");
/// }
/// html.extend_from_slice(b"</ul></body></html>");
///
/// let discovery = discover_bytes(&html, &Options::default())?;
/// assert!(discovery.locations[0].examples.iter().all(|e| e.starts_with("Café")));
/// # Ok::<(), rs_autoscrape::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn discover_bytes(html: &[u8], options: &Options) -> Result<Discovery> {
    let html_str = encoding::transcode_to_utf8(html, None);
    discover_with_options(&html_str, options)
}
