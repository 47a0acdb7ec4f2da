//! Display targets for text previews.
//!
//! The previewer only talks to the [`Renderer`] capability, so the same fetch
//! and truncation logic drives an in-memory [`Page`] or a terminal.

mod page;
mod terminal;

pub use page::{error_block, escape_html, Content, Node, Page};
pub use terminal::TerminalRenderer;

pub const NOTICE_CLASS: &str = "bg-yellow-100 p-2 mt-4 rounded text-yellow-800 text-sm";
pub const TRUNCATION_NOTICE: &str =
    "This file is too large to preview completely. Download the file to see all content.";

/// A short message shown next to a display target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub class: String,
    pub text: String,
}

impl Notice {
    pub fn truncation() -> Self {
        Self {
            class: NOTICE_CLASS.to_string(),
            text: TRUNCATION_NOTICE.to_string(),
        }
    }
}

/// Something the previewer can render into, addressed by target id.
pub trait Renderer {
    fn has_target(&self, target: &str) -> bool;

    /// Replace the target's content with plain text.
    fn set_text(&mut self, target: &str, text: &str);

    /// Place `notice` directly after the target.
    fn insert_sibling_notice(&mut self, target: &str, notice: &Notice);

    /// Replace the target's content with an error block showing `message`.
    fn set_error_content(&mut self, target: &str, message: &str);
}
