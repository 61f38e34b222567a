//! Semantic color palette for terminal output.

use std::fmt::Display;

use owo_colors::{OwoColorize, Style};

/// Style for error markers (red bold).
pub fn error_style() -> Style {
    Style::new().red().bold()
}

/// Style for secondary text (dimmed).
pub fn muted_style() -> Style {
    Style::new().dimmed()
}

/// Style for headings (bold).
pub fn header_style() -> Style {
    Style::new().bold()
}

/// Style for commands and stage specs (blue).
pub fn code_style() -> Style {
    Style::new().blue()
}

fn paint(value: &impl Display, style: Style) -> String {
    if super::no_color() {
        value.to_string()
    } else {
        value.style(style).to_string()
    }
}

/// Trait extension to apply semantic styles.
pub trait SemanticStyle {
    /// Apply error styling.
    fn error(&self) -> String;
    /// Apply muted styling.
    fn muted(&self) -> String;
    /// Apply header styling.
    fn header(&self) -> String;
    /// Apply code styling.
    fn code(&self) -> String;
}

impl<T: Display> SemanticStyle for T {
    fn error(&self) -> String {
        paint(self, error_style())
    }

    fn muted(&self) -> String {
        paint(self, muted_style())
    }

    fn header(&self) -> String {
        paint(self, header_style())
    }

    fn code(&self) -> String {
        paint(self, code_style())
    }
}
