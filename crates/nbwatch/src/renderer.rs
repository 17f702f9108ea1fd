use std::fmt;
use std::io::{self, Write};

use nbwatch_core::Renderer;
use tracing::warn;

pub const EMPTY_PLACEHOLDER: &str = "You currently have no notebooks.";

/// Prints one line per change to the notebook list.
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalRenderer<W> {
    #[cfg(test)]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = self
            .out
            .write_fmt(args)
            .and_then(|()| self.out.write_all(b"\n"))
            .and_then(|()| self.out.flush())
        {
            warn!(event = "cli.render.write_failed", error = %e);
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render_status_text(&mut self, row_id: &str, text: &str) {
        self.line(format_args!("{:<24} {}", row_id, text));
    }

    fn render_as_ready_link(&mut self, row_id: &str, url: &str, label: &str) {
        self.line(format_args!("{:<24} {} is ready: {}", row_id, label, url));
    }

    fn remove_row(&mut self, row_id: &str) {
        self.line(format_args!("{:<24} removed", row_id));
    }

    fn render_empty_placeholder(&mut self) {
        self.line(format_args!("{}", EMPTY_PLACEHOLDER));
    }

    fn render_removal_pending(&mut self, row_id: &str, label: &str) {
        self.line(format_args!("{:<24} removing {}", row_id, label));
    }

    fn render_poll_exhausted(&mut self, row_id: &str, attempts: u32) {
        self.line(format_args!(
            "{:<24} gave up after {} status checks, run `nbwatch watch` to keep following it",
            row_id, attempts
        ));
    }
}
