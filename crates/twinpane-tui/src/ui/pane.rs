//! Directory pane widget.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use twinpane_core::{Entry, EntryKind};

use crate::app::pane::Pane;
use crate::theme::Theme;
use crate::ui::{fit, format_size, truncate};

const SIZE_WIDTH: usize = 10;
const DATE_WIDTH: usize = 16;
const MODE_WIDTH: usize = 10;
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Renders one pane: path in the border, one row per entry.
pub struct PaneView<'a> {
    pane: &'a Pane,
    theme: &'a Theme,
}

impl<'a> PaneView<'a> {
    pub fn new(pane: &'a Pane, theme: &'a Theme) -> Self {
        Self { pane, theme }
    }

    fn row(&self, entry: &Entry, width: usize) -> String {
        let show_date = width >= 40;
        let show_mode = width >= 70;
        let mut fixed = SIZE_WIDTH + 1;
        if show_date {
            fixed += DATE_WIDTH + 1;
        }
        if show_mode {
            fixed += MODE_WIDTH + 1;
        }

        let marker = if self.pane.is_selected(&entry.path) { '*' } else { ' ' };
        let name = if entry.is_dir() && !entry.is_parent() {
            format!("{}/", entry.name)
        } else {
            entry.name.to_string()
        };
        let size = match entry.kind {
            EntryKind::Parent => "<UP>".to_string(),
            EntryKind::Directory => "<DIR>".to_string(),
            EntryKind::File => format_size(entry.size),
        };

        let mut row = String::with_capacity(width);
        row.push(marker);
        row.push_str(&fit(&name, width.saturating_sub(fixed + 1)));
        row.push(' ');
        row.push_str(&format!("{size:>width$}", width = SIZE_WIDTH));
        if show_date {
            row.push(' ');
            if entry.is_parent() {
                row.push_str(&" ".repeat(DATE_WIDTH));
            } else {
                row.push_str(&entry.modified_local().format(DATE_FORMAT).to_string());
            }
        }
        if show_mode {
            row.push(' ');
            row.push_str(&entry.mode_string());
        }
        truncate(&row, width)
    }

    fn entry_style(&self, idx: usize, entry: &Entry) -> Style {
        let base = if entry.is_parent() {
            self.theme.muted
        } else if entry.is_dir() {
            self.theme.directory
        } else {
            self.theme.file
        };
        let base = if self.pane.is_selected(&entry.path) {
            base.patch(self.theme.selection)
        } else {
            base
        };
        if self.pane.active && idx == self.pane.cursor() {
            base.patch(self.theme.cursor)
        } else {
            base
        }
    }
}

impl Widget for PaneView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.pane.active {
            self.theme.border_active
        } else {
            self.theme.border_inactive
        };
        let title_width = (area.width as usize).saturating_sub(4);
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(
                " {} ",
                truncate(&self.pane.path().display().to_string(), title_width)
            ));

        let footer = if !self.pane.search().is_empty() {
            Some(format!(" search: {} ", self.pane.search()))
        } else if self.pane.selection_len() > 0 {
            Some(format!(" {} selected ", self.pane.selection_len()))
        } else {
            None
        };
        if let Some(footer) = footer {
            block = block.title_bottom(Line::styled(footer, self.theme.hint_key));
        }

        let inner = block.inner(area);
        block.render(area, buf);

        if let Some(error) = self.pane.error() {
            Paragraph::new(Line::styled(error.to_string(), self.theme.error)).render(inner, buf);
            return;
        }

        let width = inner.width as usize;
        let lines: Vec<Line> = self
            .pane
            .visible()
            .map(|(idx, entry)| {
                Line::from(Span::styled(
                    fit(&self.row(entry, width), width),
                    self.entry_style(idx, entry),
                ))
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    use crate::app::pane::PaneId;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_path_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "0123456789").unwrap();
        std::fs::create_dir(dir.path().join("b")).unwrap();

        let entries = twinpane_core::list_directory(dir.path(), &Default::default()).unwrap();
        let mut pane = Pane::new(PaneId::Left, dir.path().to_path_buf(), true);
        pane.set_height(6);
        pane.apply_listing(dir.path(), Ok(entries));

        let area = Rect::new(0, 0, 60, 8);
        let mut buf = Buffer::empty(area);
        PaneView::new(&pane, &Theme::default()).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains(".."));
        assert!(text.contains("<UP>"));
        assert!(text.contains("b/"));
        assert!(text.contains("<DIR>"));
        assert!(text.contains("a.txt"));
        assert!(text.contains("10 B"));
    }

    #[test]
    fn test_renders_listing_error() {
        let mut pane = Pane::new(PaneId::Right, PathBuf::from("/nope"), false);
        pane.apply_listing(Path::new("/nope"), Err("Path not found: /nope".into()));

        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        PaneView::new(&pane, &Theme::default()).render(area, &mut buf);
        assert!(buffer_text(&buf).contains("Path not found"));
    }
}
