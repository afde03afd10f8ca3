//! Configuration options for discovery.
//!
//! The `Options` struct controls how aggressively locations are merged and
//! filtered, and which candidate configurations are accepted.

/// Configuration options for a discovery run.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_autoscrape::Options;
///
/// let options = Options {
///     min_occurrence: 6,
///     require_subpage_link: true,
///     ..Options::default()
/// };
/// assert!(options.only_varying_fields);
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Minimum number of occurrences a field location needs to survive.
    ///
    /// Also drives `nth-child` stripping during merging: pseudo-classes
    /// whose index is at least this value are removed.
    ///
    /// Default: `5`
    pub min_occurrence: usize,

    /// Drop fields whose examples are all identical.
    ///
    /// Default: `true`
    pub only_varying_fields: bool,

    /// Reject candidates without an `href` field.
    ///
    /// Rejected candidates are not returned, but their sub-clusters are
    /// still explored.
    ///
    /// Default: `false`
    pub require_subpage_link: bool,

    /// Use the shortened root selector as item selector.
    ///
    /// The full root path is always available on the `Discovery` result.
    ///
    /// Default: `false`
    pub shorten_root_selector: bool,

    /// Threshold below which merging keeps the last two path segments
    /// untouched when stripping `nth-child`; at or above it only the last
    /// segment is kept.
    ///
    /// Default: `6`
    pub strip_policy_threshold: usize,

    /// URL the document was fetched from.
    ///
    /// Used as base for resolving extracted links and to name the config.
    ///
    /// Default: `None`
    pub url: Option<String>,

    /// Name of the generated configuration.
    ///
    /// Falls back to the URL's hostname, then to `"autoconfig"`.
    ///
    /// Default: `None`
    pub name: Option<String>,

    /// Keep the squashed, unfiltered locations on the result.
    ///
    /// Default: `false`
    pub debug: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_occurrence: 5,
            only_varying_fields: true,
            require_subpage_link: false,
            shorten_root_selector: false,
            strip_policy_threshold: 6,
            url: None,
            name: None,
            debug: false,
        }
    }
}

impl Options {
    /// Name used for generated configurations.
    #[must_use]
    pub fn config_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        self.url
            .as_deref()
            .map(crate::url_utils::get_domain_url)
            .filter(|host| !host.is_empty())
            .unwrap_or_else(|| "autoconfig".to_string())
    }
}
