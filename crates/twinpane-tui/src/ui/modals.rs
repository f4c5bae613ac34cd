//! Modal dialog widgets.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};
use twinpane_core::Entry;

use crate::app::input::InputState;
use crate::app::overwrite::OverwriteSession;
use crate::theme::Theme;
use crate::ui::{format_size, truncate};

/// Centered popup of at most `width` x `height` inside `area`.
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(2));

    let popup_x = (area.width.saturating_sub(popup_width)) / 2 + area.x;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2 + area.y;

    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

/// Clear the popup, draw its frame and return the inner area.
fn frame(area: Rect, buf: &mut Buffer, title: &str, style: Style) -> Rect {
    Clear.render(area, buf);
    let block = Block::default()
        .title(format!(" {title} "))
        .title_style(style.add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(style)
        .style(style);
    let inner = block.inner(area);
    block.render(area, buf);
    inner
}

/// Prompt for a new folder name.
pub struct InputModal<'a> {
    theme: &'a Theme,
    input: &'a InputState,
}

impl<'a> InputModal<'a> {
    pub fn new(theme: &'a Theme, input: &'a InputState) -> Self {
        Self { theme, input }
    }
}

impl Widget for InputModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = popup_area(area, 60, 7);
        let inner = frame(popup, buf, "New Folder", self.theme.input_prompt);

        // Show input with cursor
        let buffer = self.input.buffer();
        let split = buffer
            .char_indices()
            .nth(self.input.cursor())
            .map_or(buffer.len(), |(i, _)| i);
        let (before, after) = buffer.split_at(split);
        let mut chars = after.chars();
        let cursor_char = chars.next().map_or(" ".to_string(), |c| c.to_string());
        let rest: String = chars.collect();

        let mut lines = vec![
            Line::raw("Create folder:"),
            Line::from(vec![
                Span::raw(before.to_string()),
                Span::styled(cursor_char, Style::default().add_modifier(Modifier::REVERSED)),
                Span::raw(rest),
            ]),
        ];
        match self.input.error() {
            Some(error) => lines.push(Line::styled(error.to_string(), self.theme.error)),
            None => lines.push(Line::raw("")),
        }
        lines.push(Line::from(vec![
            Span::styled(" Enter ", self.theme.hint_key),
            Span::raw("Create  "),
            Span::styled(" Esc ", self.theme.hint_key),
            Span::raw("Cancel"),
        ]));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Confirmation dialog for deletion.
pub struct DeleteConfirmModal<'a> {
    theme: &'a Theme,
    target: &'a Entry,
}

impl<'a> DeleteConfirmModal<'a> {
    pub fn new(theme: &'a Theme, target: &'a Entry) -> Self {
        Self { theme, target }
    }
}

impl Widget for DeleteConfirmModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = popup_area(area, 60, 7);
        let inner = frame(popup, buf, "Delete", self.theme.confirm_prompt);
        let width = inner.width as usize;

        let detail = if self.target.is_dir() {
            "Directory and all of its contents".to_string()
        } else {
            format!("File, {}", format_size(self.target.size))
        };
        let lines = vec![
            Line::raw(truncate(&format!("Delete {}? (y/n)", self.target.name), width)),
            Line::raw(detail),
            Line::raw(""),
            Line::from(vec![
                Span::styled(" y ", self.theme.hint_key),
                Span::raw("Delete  "),
                Span::styled(" n/Esc ", self.theme.hint_key),
                Span::raw("Cancel"),
            ]),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}

/// Overwrite question for the head of an [`OverwriteSession`].
pub struct OverwriteModal<'a> {
    theme: &'a Theme,
    session: &'a OverwriteSession,
}

impl<'a> OverwriteModal<'a> {
    pub fn new(theme: &'a Theme, session: &'a OverwriteSession) -> Self {
        Self { theme, session }
    }
}

impl Widget for OverwriteModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(conflict) = self.session.current() else {
            return;
        };
        let popup = popup_area(area, 64, 8);
        let inner = frame(popup, buf, "File Exists", self.theme.overwrite_prompt);
        let width = inner.width as usize;

        let remaining = self.session.remaining();
        let mut lines = vec![
            Line::raw(truncate(
                &format!("Overwrite {}? (y/n/A/s)", conflict.name()),
                width,
            )),
            Line::raw(truncate(&format!("already exists at {}", conflict.destination.display()), width)),
        ];
        if remaining > 1 {
            lines.push(Line::raw(format!("{} conflicts remaining", remaining)));
        } else {
            lines.push(Line::raw(""));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled(" y ", self.theme.hint_key),
            Span::raw("Yes "),
            Span::styled(" n ", self.theme.hint_key),
            Span::raw("No "),
            Span::styled(" a ", self.theme.hint_key),
            Span::raw("All "),
            Span::styled(" s ", self.theme.hint_key),
            Span::raw("Skip all "),
            Span::styled(" Esc ", self.theme.hint_key),
            Span::raw("Cancel"),
        ]));
        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = popup_area(area, 60, 7);
        assert_eq!(popup, Rect::new(20, 16, 60, 7));

        let tiny = popup_area(Rect::new(0, 0, 20, 5), 60, 7);
        assert_eq!(tiny.width, 16);
        assert_eq!(tiny.height, 3);
    }
}
