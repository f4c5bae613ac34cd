//! Color theme for the TUI.
//!
//! One [`Theme`] value is built at startup and handed to every render call.
//! The dark palette uses 256-color indices so it looks the same in any
//! terminal that supports them.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeVariant;

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Current theme variant.
    pub variant: ThemeVariant,

    // Panes
    pub border_active: Style,
    pub border_inactive: Style,
    pub cursor: Style,
    pub selection: Style,
    pub directory: Style,
    pub file: Style,
    pub muted: Style,

    // Status and hints
    pub status_bar: Style,
    pub status_mode: Style,
    pub hint_key: Style,
    pub hint_desc: Style,
    pub error: Style,
    pub info: Style,

    // Prompts
    pub input_prompt: Style,
    pub confirm_prompt: Style,
    pub overwrite_prompt: Style,

    // Preview and progress
    pub preview_border: Style,
    pub progress_bar: Style,
    pub progress_bg: Style,
}

impl Theme {
    /// Dark theme.
    pub fn dark() -> Self {
        let accent = Color::Indexed(63);
        let gray = Color::Indexed(240);
        let white = Color::Indexed(255);
        let light = Color::Indexed(250);
        let panel = Color::Indexed(235);

        Self {
            variant: ThemeVariant::Dark,

            border_active: Style::new().fg(accent),
            border_inactive: Style::new().fg(gray),
            cursor: Style::new().bg(accent).fg(white),
            selection: Style::new().bg(Color::Indexed(220)).fg(Color::Indexed(0)),
            directory: Style::new().fg(Color::Indexed(33)),
            file: Style::new().fg(white),
            muted: Style::new().fg(gray),

            status_bar: Style::new().bg(panel).fg(light),
            status_mode: Style::new().bg(accent).fg(white),
            hint_key: Style::new().fg(accent).add_modifier(Modifier::BOLD),
            hint_desc: Style::new().fg(light),
            error: Style::new().fg(Color::Indexed(196)).add_modifier(Modifier::BOLD),
            info: Style::new().fg(Color::Indexed(114)),

            input_prompt: Style::new().bg(panel).fg(white),
            confirm_prompt: Style::new().bg(Color::Indexed(166)).fg(white),
            overwrite_prompt: Style::new().bg(Color::Indexed(202)).fg(Color::Indexed(0)),

            preview_border: Style::new().fg(Color::Indexed(205)),
            progress_bar: Style::new().fg(accent),
            progress_bg: Style::new().fg(gray),
        }
    }

    /// Light theme.
    pub fn light() -> Self {
        let accent = Color::Indexed(25);
        let gray = Color::Indexed(245);
        let ink = Color::Indexed(235);
        let paper = Color::Indexed(254);

        Self {
            variant: ThemeVariant::Light,

            border_active: Style::new().fg(accent),
            border_inactive: Style::new().fg(gray),
            cursor: Style::new().bg(accent).fg(Color::Indexed(255)),
            selection: Style::new().bg(Color::Indexed(222)).fg(Color::Indexed(0)),
            directory: Style::new().fg(Color::Indexed(26)).add_modifier(Modifier::BOLD),
            file: Style::new().fg(ink),
            muted: Style::new().fg(gray),

            status_bar: Style::new().bg(paper).fg(ink),
            status_mode: Style::new().bg(accent).fg(Color::Indexed(255)),
            hint_key: Style::new().fg(accent).add_modifier(Modifier::BOLD),
            hint_desc: Style::new().fg(ink),
            error: Style::new().fg(Color::Indexed(160)).add_modifier(Modifier::BOLD),
            info: Style::new().fg(Color::Indexed(28)),

            input_prompt: Style::new().bg(paper).fg(ink),
            confirm_prompt: Style::new().bg(Color::Indexed(166)).fg(Color::Indexed(255)),
            overwrite_prompt: Style::new().bg(Color::Indexed(208)).fg(Color::Indexed(0)),

            preview_border: Style::new().fg(Color::Indexed(162)),
            progress_bar: Style::new().fg(accent),
            progress_bg: Style::new().fg(gray),
        }
    }

    /// Build the theme for a variant.
    pub fn for_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::dark(),
            ThemeVariant::Light => Self::light(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_variant() {
        assert_eq!(Theme::for_variant(ThemeVariant::Light).variant, ThemeVariant::Light);
        assert_eq!(Theme::default().variant, ThemeVariant::Dark);
    }
}
