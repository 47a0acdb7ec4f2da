//! HTTP client for the file server: directory listings and text previews.

mod error;
mod lister;
mod preview;

pub use error::ClientError;
pub use lister::{FileDescriptor, LISTING_ENDPOINT};
pub use preview::{
    truncate_preview, Preview, PreviewOutcome, PreviewRequest, DEFAULT_DISPLAY_TARGET,
    DEFAULT_MAX_CHARS, TRUNCATION_MARKER,
};

use crate::config::ClientConfig;
use std::time::Duration;
use url::Url;

/// Issues listing and preview requests against one file server.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct FileClient {
    http: reqwest::Client,
    base_url: Url,
}

impl FileClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: normalize_base(base_url)?,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a locator against the base URL; absolute URLs pass through.
    fn resolve(&self, locator: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(locator)?)
    }
}

/// Give the base a trailing slash so relative joins keep its path prefix.
fn normalize_base(base_url: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base_url)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_keeps_its_path_prefix() {
        let client = FileClient::new("http://localhost:8088/browser", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8088/browser/");
        assert_eq!(
            client.resolve("notes/a.txt").unwrap().as_str(),
            "http://localhost:8088/browser/notes/a.txt"
        );
    }

    #[test]
    fn rooted_and_absolute_locators() {
        let client = FileClient::new("http://localhost:8088", Duration::from_secs(1)).unwrap();
        assert_eq!(client.resolve("/f.txt").unwrap().as_str(), "http://localhost:8088/f.txt");
        assert_eq!(
            client.resolve("https://example.com/x.txt").unwrap().as_str(),
            "https://example.com/x.txt"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = FileClient::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }
}
