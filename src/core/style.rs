//! Terminal styling for labels, timestamps and trace markers
//!
//! The logger never emits escape codes directly. It asks a [`Style`] to
//! decorate each fragment, so colors can be switched off for pipes, files
//! and tests without touching the formatting logic.

use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Semantic colors used by the logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Gray,
    Cyan,
    Yellow,
    Magenta,
    Red,
    Green,
}

impl Color {
    fn to_colored(self) -> colored::Color {
        match self {
            Color::Gray => colored::Color::BrightBlack,
            Color::Cyan => colored::Color::Cyan,
            Color::Yellow => colored::Color::Yellow,
            Color::Magenta => colored::Color::Magenta,
            Color::Red => colored::Color::Red,
            Color::Green => colored::Color::Green,
        }
    }
}

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Let `colored` decide from the terminal, `NO_COLOR` and `CLICOLOR`
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Build the style matching this mode
    pub fn style(self) -> Box<dyn Style> {
        match self {
            ColorMode::Auto => Box::new(AnsiStyle::new()),
            ColorMode::Always => Box::new(AnsiStyle::forced()),
            ColorMode::Never => Box::new(PlainStyle),
        }
    }
}

pub trait Style: Send + Sync {
    fn paint(&self, text: &str, color: Color) -> String;
}

/// ANSI styling backed by the `colored` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiStyle {
    force: bool,
}

impl AnsiStyle {
    pub fn new() -> Self {
        Self { force: false }
    }

    /// Always emit escape codes, ignoring terminal detection.
    pub fn forced() -> Self {
        Self { force: true }
    }
}

impl Style for AnsiStyle {
    fn paint(&self, text: &str, color: Color) -> String {
        if self.force {
            format!("\x1b[{}m{}\x1b[0m", color.to_colored().to_fg_str(), text)
        } else {
            text.color(color.to_colored()).to_string()
        }
    }
}

/// No decoration at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyle;

impl Style for PlainStyle {
    fn paint(&self, text: &str, _color: Color) -> String {
        text.to_string()
    }
}
