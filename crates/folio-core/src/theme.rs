//! Color themes for page chrome and text.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Accent palette for headings, highlights and the typewriter line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Matrix,
    Cyan,
    Amber,
    Mono,
}

impl ColorTheme {
    /// Cycle to the next color theme.
    pub fn next(self) -> Self {
        match self {
            ColorTheme::Matrix => ColorTheme::Cyan,
            ColorTheme::Cyan => ColorTheme::Amber,
            ColorTheme::Amber => ColorTheme::Mono,
            ColorTheme::Mono => ColorTheme::Matrix,
        }
    }

    /// Primary accent (headings, typed text, counters).
    pub fn accent(self) -> Color {
        match self {
            ColorTheme::Matrix => Color::Rgb(0, 255, 65),
            ColorTheme::Cyan => Color::Rgb(0, 212, 255),
            ColorTheme::Amber => Color::Rgb(255, 176, 0),
            ColorTheme::Mono => Color::White,
        }
    }

    /// Secondary accent (cursor, progress fill, selected tabs).
    pub fn highlight(self) -> Color {
        match self {
            ColorTheme::Matrix => Color::Rgb(0, 212, 255),
            ColorTheme::Cyan => Color::Rgb(79, 172, 254),
            ColorTheme::Amber => Color::Rgb(255, 120, 60),
            ColorTheme::Mono => Color::Gray,
        }
    }

    /// Body text.
    pub fn text(self) -> Color {
        Color::Rgb(204, 204, 204)
    }

    /// Labels and help text.
    pub fn muted(self) -> Color {
        Color::Rgb(136, 136, 136)
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorTheme::Matrix => "matrix",
            ColorTheme::Cyan => "cyan",
            ColorTheme::Amber => "amber",
            ColorTheme::Mono => "mono",
        }
    }
}
