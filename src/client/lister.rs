use super::{ClientError, FileClient};
use serde::Deserialize;
use url::Url;

/// Listing endpoint, relative to the client's base URL.
pub const LISTING_ENDPOINT: &str = "api/files/list";

/// A listing entry exactly as the server sent it.
pub type FileDescriptor = serde_json::Value;

#[derive(Deserialize)]
struct ListingEnvelope {
    files: Vec<FileDescriptor>,
}

impl FileClient {
    /// URL of the listing request for `path`, percent-encoded into `?path=`.
    pub fn listing_url(&self, path: &str) -> Result<Url, ClientError> {
        let mut url = self.base_url.join(LISTING_ENDPOINT)?;
        url.set_query(Some(&format!("path={}", urlencoding::encode(path))));
        Ok(url)
    }

    /// Fetch the entries of the remote directory at `path`.
    ///
    /// Makes exactly one request. Failures are logged and returned unchanged.
    pub async fn fetch_directory_contents(
        &self,
        path: &str,
    ) -> Result<Vec<FileDescriptor>, ClientError> {
        match self.request_listing(path).await {
            Ok(files) => {
                tracing::debug!(path, count = files.len(), "Fetched directory contents");
                Ok(files)
            }
            Err(e) => {
                tracing::error!(path, error = %e, "Error fetching directory contents");
                Err(e)
            }
        }
    }

    async fn request_listing(&self, path: &str) -> Result<Vec<FileDescriptor>, ClientError> {
        let url = self.listing_url(path)?;
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::from_status(status));
        }

        let body = response.bytes().await?;
        let envelope: ListingEnvelope = serde_json::from_slice(&body)?;
        Ok(envelope.files)
    }
}
