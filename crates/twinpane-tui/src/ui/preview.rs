//! File preview widget.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget};

use crate::preview::PreviewState;
use crate::theme::Theme;
use crate::ui::truncate;

/// Full-area view of a [`PreviewState`].
pub struct PreviewView<'a> {
    state: &'a PreviewState,
    theme: &'a Theme,
}

impl<'a> PreviewView<'a> {
    pub fn new(state: &'a PreviewState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for PreviewView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let position = if self.state.is_loading() {
            " loading... ".to_string()
        } else {
            let total = self.state.lines().len();
            let first = if total == 0 { 0 } else { self.state.scroll() + 1 };
            format!(" {first}/{total} ")
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(self.theme.preview_border)
            .title(format!(
                " {} ",
                truncate(&self.state.name, (area.width as usize).saturating_sub(4))
            ))
            .title_bottom(Line::from(position).right_aligned());

        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .state
            .visible_lines()
            .iter()
            .map(|l| Line::styled(l.as_str(), self.theme.file))
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}
