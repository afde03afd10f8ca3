//! Character encoding detection for fetched pages.
//!
//! Saved pages and HTTP bodies arrive as bytes. The charset is taken from,
//! in order: a byte-order mark, the `Content-Type` header, a `<meta>`
//! declaration in the first kilobyte. UTF-8 otherwise.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// `charset=...` inside a header value or a `<meta http-equiv>` content.
#[allow(clippy::expect_used)]
static CHARSET_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;>]+)"#).expect("valid regex"));

/// `<meta charset>` or `<meta http-equiv="Content-Type" content="...; charset=...">`.
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s;>]+)"#).expect("valid regex")
});

const SNIFF_LEN: usize = 1024;

fn label_to_encoding(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// Charset named by a `Content-Type` header value.
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    CHARSET_PARAM_RE
        .captures(content_type)
        .and_then(|c| c.get(1))
        .and_then(|m| label_to_encoding(m.as_str()))
}

/// Charset declared by a `<meta>` tag near the top of `html`.
#[must_use]
pub fn charset_from_meta(html: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);
    META_CHARSET_RE
        .captures(&head)
        .and_then(|c| c.get(1))
        .and_then(|m| label_to_encoding(m.as_str()))
}

/// Encoding of `body`, honouring a `Content-Type` header if given.
#[must_use]
pub fn detect_encoding(body: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(body) {
        return encoding;
    }
    content_type
        .and_then(charset_from_content_type)
        .or_else(|| charset_from_meta(body))
        .unwrap_or(UTF_8)
}

/// Decode `body` to UTF-8; undecodable bytes become U+FFFD.
///
/// # Examples
///
/// ```
/// use rs_autoscrape::encoding::transcode_to_utf8;
///
/// let page = b"<html><head><meta charset=\"windows-1252\"></head><body>Caf\xe9</body></html>";
/// assert!(transcode_to_utf8(page, None).contains("Café"));
/// ```
#[must_use]
pub fn transcode_to_utf8(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(body, content_type);
    // `decode` strips a matching BOM and replaces malformed sequences.
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_16LE, WINDOWS_1252};

    #[test]
    fn meta_charset_is_detected() {
        let page = br#"<html><head><meta charset="ISO-8859-1"></head></html>"#;
        // WHATWG maps latin1 onto windows-1252.
        assert_eq!(detect_encoding(page, None), WINDOWS_1252);

        let http_equiv =
            br#"<META HTTP-EQUIV="content-type" CONTENT="text/html; CHARSET=windows-1252">"#;
        assert_eq!(detect_encoding(http_equiv, None), WINDOWS_1252);
    }

    #[test]
    fn header_wins_over_meta() {
        let page = br#"<meta charset="windows-1252"><p>x</p>"#;
        assert_eq!(detect_encoding(page, Some("text/html; charset=utf-8")), UTF_8);
        assert_eq!(detect_encoding(page, Some("text/html")), WINDOWS_1252);
    }

    #[test]
    fn bom_wins_over_everything() {
        let page = [0xFF, 0xFE, b'<', 0, b'p', 0, b'>', 0];
        assert_eq!(detect_encoding(&page, Some("text/html; charset=utf-8")), UTF_16LE);
        assert_eq!(transcode_to_utf8(&page, None), "<p>");
    }

    #[test]
    fn defaults_to_utf8() {
        assert_eq!(detect_encoding(b"<p>plain</p>", None), UTF_8);
        assert_eq!(detect_encoding(b"<p>x</p>", Some("text/html; charset=bogus")), UTF_8);
    }

    #[test]
    fn invalid_bytes_are_replaced() {
        let out = transcode_to_utf8(b"<p>ok \xFF\xFE still</p>", None);
        assert!(out.contains("ok"));
        assert!(out.contains("still"));
        assert!(out.contains('\u{FFFD}'));
    }
}
