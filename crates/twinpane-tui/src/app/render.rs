//! Application rendering.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use crate::theme::Theme;
use crate::ui::modals::{DeleteConfirmModal, InputModal, OverwriteModal};
use crate::ui::{AppLayout, HintsBar, PaneView, PreviewView, ProgressLine, StatusBar};

use super::RunningOperation;
use super::constants::CLOCK_FORMAT;
use super::pane::{Pane, PaneId};
use super::state::{InteractionMode, StatusMessage};

/// Render context containing all the state needed for rendering.
pub struct RenderContext<'a> {
    pub mode: &'a InteractionMode,
    pub theme: &'a Theme,
    pub left: &'a Pane,
    pub right: &'a Pane,
    pub active: PaneId,
    pub status: Option<&'a StatusMessage>,
    pub operation: Option<&'a RunningOperation>,
    pub queued: usize,
}

impl RenderContext<'_> {
    fn active_pane(&self) -> &Pane {
        match self.active {
            PaneId::Left => self.left,
            PaneId::Right => self.right,
        }
    }
}

/// Main render function for the application.
pub fn render_app(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let layout = AppLayout::new(area);

    if let InteractionMode::Previewing(preview) = ctx.mode {
        PreviewView::new(preview, ctx.theme).render(layout.panes, buf);
    } else {
        PaneView::new(ctx.left, ctx.theme).render(layout.left, buf);
        PaneView::new(ctx.right, ctx.theme).render(layout.right, buf);
    }

    let current = ctx.active_pane().current().map(|e| e.name.as_str());
    StatusBar {
        theme: ctx.theme,
        mode: ctx.mode.label(),
        current,
        message: ctx.status,
        clock: chrono::Local::now().format(CLOCK_FORMAT).to_string(),
    }
    .render(layout.status, buf);

    match ctx.operation {
        Some(operation) => ProgressLine {
            theme: ctx.theme,
            operation,
            queued: ctx.queued,
        }
        .render(layout.footer, buf),
        None => HintsBar { theme: ctx.theme }.render(layout.footer, buf),
    }

    // Render overlays
    match ctx.mode {
        InteractionMode::CreatingFolder(input) => {
            InputModal::new(ctx.theme, input).render(layout.panes, buf);
        }
        InteractionMode::ConfirmingDelete { target } => {
            DeleteConfirmModal::new(ctx.theme, target).render(layout.panes, buf);
        }
        InteractionMode::ConfirmingOverwrite(session) => {
            OverwriteModal::new(ctx.theme, session).render(layout.panes, buf);
        }
        InteractionMode::Normal | InteractionMode::Previewing(_) => {}
    }
}
