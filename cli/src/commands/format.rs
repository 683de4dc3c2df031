//! Plain-text and JSON rendering of command results.

use anyhow::Result as AnyhowResult;
use serde_json::Value;
use std::fmt::{Display, Write};
use unicode_segmentation::UnicodeSegmentation;

/// Character used for the lines around a text block.
pub const BORDER_CHAR: char = '─';

/// Builder for the human-readable report a command prints.
#[derive(Debug, Default)]
pub struct Report {
    out: String,
}

impl Report {
    /// Start a report with a title followed by a blank line.
    pub fn titled(title: &str) -> Self {
        let mut out = String::new();
        let _ = write!(out, "{}\n\n", title);
        Self { out }
    }

    /// Add a `Label: value` line.
    pub fn label(mut self, label: &str, value: impl Display) -> Self {
        let _ = writeln!(self.out, "{}: {}", label, value);
        self
    }

    /// Add a `Label: value` line only when `show` is set.
    pub fn verbose_label(self, show: bool, label: &str, value: impl Display) -> Self {
        if show {
            self.label(label, value)
        } else {
            self
        }
    }

    /// Add a labelled block of free text between two borders.
    pub fn block(mut self, label: &str, text: &str) -> Self {
        let line = border(text.graphemes(true).count());
        let _ = write!(self.out, "{}:\n{}\n{}\n{}\n", label, line, text, line);
        self
    }

    /// Finish the report.
    pub fn finish(self) -> String {
        self.out
    }
}

/// A line of [`BORDER_CHAR`] `width` characters long.
pub fn border(width: usize) -> String {
    std::iter::repeat(BORDER_CHAR).take(width).collect()
}

/// Render a JSON value on one line, or indented by two spaces when `pretty`.
pub fn json(value: &Value, pretty: bool) -> AnyhowResult<String> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');
    Ok(text)
}
