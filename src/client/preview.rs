use super::error::reason_suffix;
use super::{ClientError, FileClient};
use crate::render::{Notice, Renderer};

pub const DEFAULT_DISPLAY_TARGET: &str = "text-content";
pub const DEFAULT_MAX_CHARS: usize = 100_000;

/// Appended to text that was cut at the character limit.
pub const TRUNCATION_MARKER: &str =
    "\n\n[File truncated due to size. Download the file to see the full content.]";

/// One fetch-and-render cycle: what to fetch, where to show it, how much.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    pub locator: String,
    pub target: String,
    pub max_chars: usize,
}

impl PreviewRequest {
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            target: DEFAULT_DISPLAY_TARGET.to_string(),
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }
}

/// Text ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub text: String,
    pub truncated: bool,
}

/// What a preview call ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewOutcome {
    Rendered { truncated: bool },
    /// The fetch failed. The message was rendered if the target exists.
    Failed { message: String },
    /// The text was fetched but there was nowhere to put it.
    TargetMissing,
}

/// Keep at most `max_chars` characters, marking the text if anything was cut.
pub fn truncate_preview(text: String, max_chars: usize) -> Preview {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let mut text = text;
            text.truncate(cut);
            text.push_str(TRUNCATION_MARKER);
            Preview {
                text,
                truncated: true,
            }
        }
        None => Preview {
            text,
            truncated: false,
        },
    }
}

/// Status failures read as a failed text load; everything else keeps its own message.
fn failure_message(error: &ClientError) -> String {
    match error {
        ClientError::Transport {
            status,
            status_text,
        } => format!("Failed to load text: {status}{}", reason_suffix(status_text)),
        other => other.to_string(),
    }
}

impl FileClient {
    /// Fetch a text resource and render it into the request's display target.
    ///
    /// Never fails: transport and network errors are logged and rendered in
    /// place of the text. A missing target is a no-op.
    pub async fn load_text_preview<R>(&self, request: &PreviewRequest, renderer: &mut R) -> PreviewOutcome
    where
        R: Renderer + ?Sized,
    {
        let target = request.target.as_str();

        match self.fetch_preview(request).await {
            Ok(preview) => {
                if !renderer.has_target(target) {
                    tracing::debug!(display_target = target, "Display target not found, skipping render");
                    return PreviewOutcome::TargetMissing;
                }

                renderer.set_text(target, &preview.text);
                if preview.truncated {
                    renderer.insert_sibling_notice(target, &Notice::truncation());
                }
                PreviewOutcome::Rendered {
                    truncated: preview.truncated,
                }
            }
            Err(e) => {
                tracing::error!(locator = %request.locator, error = %e, "Error loading text preview");

                let message = format!("Error loading text preview: {}", failure_message(&e));
                if renderer.has_target(target) {
                    renderer.set_error_content(target, &message);
                }
                PreviewOutcome::Failed { message }
            }
        }
    }

    async fn fetch_preview(&self, request: &PreviewRequest) -> Result<Preview, ClientError> {
        let url = self.resolve(&request.locator)?;
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::from_status(status));
        }

        let text = response.text().await?;
        let preview = truncate_preview(text, request.max_chars);
        if preview.truncated {
            tracing::debug!(
                locator = %request.locator,
                max_chars = request.max_chars,
                "Preview truncated"
            );
        }
        Ok(preview)
    }
}
