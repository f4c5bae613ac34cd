//! UI components and widgets.

pub mod modals;
mod pane;
mod preview;
mod status;

pub use pane::PaneView;
pub use preview::PreviewView;
pub use status::{HintsBar, ProgressLine, StatusBar};

use ratatui::layout::{Constraint, Layout, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Layout areas for the application.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub left: Rect,
    pub right: Rect,
    /// Both panes together; the preview covers this.
    pub panes: Rect,
    pub status: Rect,
    pub footer: Rect,
}

impl AppLayout {
    /// Compute layout from terminal area.
    pub fn new(area: Rect) -> Self {
        let [panes, status, footer] = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let [left, right] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(panes);

        Self {
            left,
            right,
            panes,
            status,
            footer,
        }
    }
}

/// Format a byte size in human-readable form.
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Cut `text` to at most `width` display columns, marking the cut with `~`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('~');
    out
}

/// Pad `text` with spaces to exactly `width` display columns, truncating if needed.
pub fn fit(text: &str, width: usize) -> String {
    let mut out = truncate(text, width);
    let w = out.width();
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(w)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefgh", 5), "abcd~");
        assert_eq!(truncate("日本語です", 5), "日本~");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_fit_pads() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("日本語", 5), "日本~");
        assert_eq!(fit("日本語", 5).width(), 5);
    }

    #[test]
    fn test_layout_reserves_two_lines() {
        let layout = AppLayout::new(Rect::new(0, 0, 100, 30));
        assert_eq!(layout.panes.height, 28);
        assert_eq!(layout.left.width + layout.right.width, 100);
        assert_eq!(layout.footer.y, 29);
    }
}
