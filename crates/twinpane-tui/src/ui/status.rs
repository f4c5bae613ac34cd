//! Status line, shortcut hints and the operation progress line.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::app::RunningOperation;
use crate::app::state::StatusMessage;
use crate::event::SHORTCUTS;
use crate::theme::Theme;
use crate::ui::{format_size, truncate};

/// Bottom status line: mode, entry under the cursor, last message, clock.
pub struct StatusBar<'a> {
    pub theme: &'a Theme,
    pub mode: &'a str,
    pub current: Option<&'a str>,
    pub message: Option<&'a StatusMessage>,
    pub clock: String,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.theme.status_bar);

        let clock_width = self.clock.width() as u16 + 2;
        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(clock_width)]).areas(area);

        let mut spans = vec![
            Span::styled(format!(" {} ", self.mode), self.theme.status_mode),
            Span::raw(" "),
        ];
        if let Some(name) = self.current {
            spans.push(Span::raw(name.to_string()));
        }
        if let Some(message) = self.message {
            let style = if message.is_error() {
                self.theme.error
            } else {
                self.theme.info
            };
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(message.text.clone(), style));
        }
        Paragraph::new(Line::from(spans))
            .style(self.theme.status_bar)
            .render(left, buf);

        Paragraph::new(Line::from(format!(" {} ", self.clock)).right_aligned())
            .style(self.theme.status_bar)
            .render(right, buf);
    }
}

/// Shortcut hints shown when nothing is running.
pub struct HintsBar<'a> {
    pub theme: &'a Theme,
}

impl Widget for HintsBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spans: Vec<Span> = SHORTCUTS
            .iter()
            .flat_map(|s| {
                let key = match s.fkey {
                    Some(fkey) => format!(" {fkey}/M-{} ", s.key),
                    None => format!(" M-{} ", s.key),
                };
                [
                    Span::styled(key, self.theme.hint_key),
                    Span::styled(format!("{} ", s.action), self.theme.hint_desc),
                ]
            })
            .collect();
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// One-line progress for the running copy/move, replacing the hints.
pub struct ProgressLine<'a> {
    pub theme: &'a Theme,
    pub operation: &'a RunningOperation,
    pub queued: usize,
}

impl ProgressLine<'_> {
    /// Text part, e.g. `Copying 3/10 files (1.5 MiB/s) - photo.jpg`.
    pub fn label(&self) -> String {
        let verb = self.operation.request.mode.progressive();
        let mut label = match &self.operation.progress {
            Some(p) => format!(
                "{verb} {}/{} files ({}/s) - {}",
                p.files_done,
                p.files_total,
                format_size(self.operation.speed() as u64),
                p.current
            ),
            None => format!("{verb}..."),
        };
        if self.queued > 0 {
            label.push_str(&format!(" (+{} queued)", self.queued));
        }
        label
    }
}

impl Widget for ProgressLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (ratio, percent) = self
            .operation
            .progress
            .as_ref()
            .map_or((0.0, 0.0), |p| (p.ratio(), p.percentage()));
        let bar_width = (area.width as usize / 3).max(10).min(area.width as usize);
        let label_width = (area.width as usize).saturating_sub(bar_width + 8);

        let filled = ((ratio * bar_width as f64) as usize).min(bar_width);
        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled("\u{2588}".repeat(filled), self.theme.progress_bar),
            Span::styled("\u{2591}".repeat(bar_width - filled), self.theme.progress_bg),
            Span::raw(format!(" {percent:>3.0}% ")),
            Span::styled(truncate(&self.label(), label_width), self.theme.hint_desc),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}
