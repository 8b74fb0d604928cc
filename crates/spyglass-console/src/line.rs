//! Rendered lines and their color hints.

use colored::{ColoredString, Colorize};

/// Color hint for a rendered line. Hosts are free to ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Actions.
    Blue,
    /// Transactions, computations and timings.
    Gray,
    /// Reactions.
    Green,
    /// Errors.
    Red,
}

impl Style {
    /// Apply the style to `text` for a terminal.
    pub fn paint(&self, text: &str) -> ColoredString {
        match self {
            Style::Blue => text.blue(),
            Style::Gray => text.dimmed(),
            Style::Green => text.green(),
            Style::Red => text.red(),
        }
    }
}

/// One line of console output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// The message text.
    pub text: String,
    /// Optional color hint.
    pub style: Option<Style>,
}

impl Line {
    /// Create an unstyled line.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    /// Create a line with a color hint.
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }

    /// Drop the color hint.
    pub fn without_style(mut self) -> Self {
        self.style = None;
        self
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
