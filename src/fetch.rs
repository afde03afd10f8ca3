//! Page fetching.
//!
//! Discovery only needs the bytes of one rendered page. The [`Fetcher`]
//! trait is the seam for HTTP clients or headless browsers; the crate ships
//! a [`FileFetcher`] for saved pages.

use std::path::PathBuf;

use tracing::debug;
use url::Url;

use crate::encoding::transcode_to_utf8;
use crate::error::{Error, Result};

/// Default `User-Agent` announced by fetchers.
pub const DEFAULT_USER_AGENT: &str = concat!("rs-autoscrape/", env!("CARGO_PKG_VERSION"));

/// Per-request options.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// `User-Agent` header value.
    ///
    /// Default: `rs-autoscrape/<version>`
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// A fetched page.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// Raw body bytes.
    pub body: Vec<u8>,
    /// Final URL after redirects.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// `Content-Type` header, if any.
    pub content_type: Option<String>,
}

impl FetchResponse {
    /// Body decoded to UTF-8 using the charset from the header or the page.
    #[must_use]
    pub fn html(&self) -> String {
        transcode_to_utf8(&self.body, self.content_type.as_deref())
    }
}

/// Retrieves a page.
pub trait Fetcher: Send + Sync {
    /// Fetch `url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] or [`Error::Io`] when the page cannot be
    /// retrieved.
    fn fetch(&self, url: &str, options: &FetchOptions) -> Result<FetchResponse>;
}

/// Fetcher for `file://` URLs and plain filesystem paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

impl FileFetcher {
    /// Creates the fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn resolve_path(url: &str) -> Result<PathBuf> {
        if !url.starts_with("file:") {
            return Ok(PathBuf::from(url));
        }
        Url::parse(url)
            .ok()
            .and_then(|u| u.to_file_path().ok())
            .ok_or_else(|| Error::Fetch {
                url: url.to_string(),
                message: "not a valid file URL".to_string(),
            })
    }
}

impl Fetcher for FileFetcher {
    fn fetch(&self, url: &str, _options: &FetchOptions) -> Result<FetchResponse> {
        let path = Self::resolve_path(url)?;
        let body = std::fs::read(&path)?;
        debug!(path = %path.display(), bytes = body.len(), "read local page");
        Ok(FetchResponse {
            body,
            url: url.to_string(),
            status: 200,
            content_type: Some("text/html".to_string()),
        })
    }
}
