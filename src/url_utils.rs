//! URL helpers.
//!
//! Used to name configurations after their site and to resolve the
//! relative links the extraction engine pulls out of `href`/`src`
//! attributes.

use url::Url;

/// Parse `s` as an absolute http(s) URL with a host.
#[must_use]
pub fn parse_absolute(s: &str) -> Option<Url> {
    let s = s.trim();
    if !s.starts_with("http://") && !s.starts_with("https://") {
        return None;
    }
    Url::parse(s).ok().filter(|url| url.host().is_some())
}

/// Resolve a link value against a page URL.
///
/// Special schemes (`mailto:`, `javascript:`, ...) and values that are
/// already absolute are returned unchanged, as is anything that fails to
/// join.
#[must_use]
pub fn resolve_link(value: &str, base: &Url) -> String {
    let value = value.trim();

    if value.is_empty()
        || value.starts_with("data:")
        || value.starts_with("javascript:")
        || value.starts_with("mailto:")
        || value.starts_with("tel:")
        || parse_absolute(value).is_some()
    {
        return value.to_string();
    }

    match base.join(value) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => value.to_string(),
    }
}

/// Extract the hostname from a URL, or an empty string.
#[must_use]
pub fn get_domain_url(url_str: &str) -> String {
    parse_absolute(url_str)
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_default()
}
