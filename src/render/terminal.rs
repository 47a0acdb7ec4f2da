use super::{Notice, Renderer};
use console::style;
use std::io::Write;

/// Renders a single target to a writer, usually stdout.
pub struct TerminalRenderer<W: Write> {
    target: String,
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(target: impl Into<String>, out: W) -> Self {
        Self {
            target: target.into(),
            out,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: impl std::fmt::Display) {
        if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            tracing::warn!(error = %e, "Failed to write preview output");
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn has_target(&self, target: &str) -> bool {
        self.target == target
    }

    fn set_text(&mut self, _target: &str, text: &str) {
        self.write_line(text);
    }

    fn insert_sibling_notice(&mut self, _target: &str, notice: &Notice) {
        self.write_line(style(&notice.text).yellow());
    }

    fn set_error_content(&mut self, _target: &str, message: &str) {
        self.write_line(style(message).red().bold());
    }
}
