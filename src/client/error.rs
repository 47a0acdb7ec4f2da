use reqwest::StatusCode;
use thiserror::Error;

/// Failures of a single listing or preview request.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("HTTP error! Status: {status}{}", reason_suffix(.status_text))]
    Transport { status: u16, status_text: String },

    /// The listing body was not the expected JSON envelope.
    #[error("Malformed listing response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The request could not complete.
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// A locator or base URL could not be turned into a request URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    pub fn from_status(status: StatusCode) -> Self {
        ClientError::Transport {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }

    /// Status code of a transport failure, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Transport { status, .. } => Some(*status),
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub(super) fn reason_suffix(status_text: &str) -> String {
    if status_text.is_empty() {
        String::new()
    } else {
        format!(" {status_text}")
    }
}
