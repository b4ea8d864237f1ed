//! Color palette and styling for CLI output.
//!
//! Field names are the primary identifier in the summary; filled-in values are
//! green, untouched values are dimmed, and fallbacks are yellow.

use owo_colors::{OwoColorize, Style};

/// Style for catalog field names.
pub fn field() -> Style {
    Style::new().cyan().bold()
}

/// Style for section headings.
pub fn heading() -> Style {
    Style::new().white().bold()
}

/// Style for path values.
pub fn path() -> Style {
    Style::new().white()
}

/// Style for values the run filled in.
pub fn filled() -> Style {
    Style::new().green()
}

/// Style for values the run left alone.
pub fn kept() -> Style {
    Style::new().dimmed()
}

/// Style for fallbacks worth a second look.
pub fn warning() -> Style {
    Style::new().yellow()
}

/// Apply a style when color is enabled.
pub fn paint(text: &str, style: Style, use_color: bool) -> String {
    if use_color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{field, paint};

    #[test]
    fn plain_text_without_color() {
        assert_eq!(paint("id", field(), false), "id");
    }

    #[test]
    fn escapes_with_color() {
        let painted = paint("id", field(), true);
        assert!(painted.contains("id"));
        assert!(painted.starts_with('\u{1b}'));
    }
}
