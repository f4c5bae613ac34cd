//! Scroll state for the file preview.

use std::path::PathBuf;

use crate::event::PreviewAction;

const TAB_WIDTH: usize = 4;

/// A loaded (or loading) preview and its viewport.
#[derive(Debug, Clone)]
pub struct PreviewState {
    /// File being previewed.
    pub path: PathBuf,
    /// Display name of the file.
    pub name: String,
    text: Option<String>,
    lines: Vec<String>,
    width: usize,
    height: usize,
    scroll: usize,
}

impl PreviewState {
    /// Start a preview; content arrives later via [`Self::set_text`].
    pub fn new(path: PathBuf, name: impl Into<String>, width: usize, height: usize) -> Self {
        Self {
            path,
            name: name.into(),
            text: None,
            lines: Vec::new(),
            width: width.max(1),
            height: height.max(1),
            scroll: 0,
        }
    }

    /// Check if content is still being read.
    pub fn is_loading(&self) -> bool {
        self.text.is_none()
    }

    /// Install the loaded text and scroll to the top.
    pub fn set_text(&mut self, text: String) {
        self.text = Some(text.replace('\t', &" ".repeat(TAB_WIDTH)));
        self.scroll = 0;
        self.rewrap();
    }

    /// Adapt to a new viewport size, keeping the scroll position in range.
    pub fn resize(&mut self, width: usize, height: usize) {
        let width = width.max(1);
        self.height = height.max(1);
        if width != self.width {
            self.width = width;
            self.rewrap();
        }
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn rewrap(&mut self) {
        let Some(text) = &self.text else {
            return;
        };
        let options = textwrap::Options::new(self.width).break_words(true);
        self.lines = text
            .lines()
            .flat_map(|line| {
                textwrap::wrap(line, &options)
                    .into_iter()
                    .map(|l| l.into_owned())
                    .collect::<Vec<_>>()
            })
            .collect();
    }

    /// All wrapped lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines currently in the viewport.
    pub fn visible_lines(&self) -> &[String] {
        let end = (self.scroll + self.height).min(self.lines.len());
        &self.lines[self.scroll.min(end)..end]
    }

    /// Index of the first visible wrapped line.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Largest scroll offset that still fills the viewport.
    pub fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.height)
    }

    /// Apply a scroll action. Returns false when the preview should close.
    pub fn apply(&mut self, action: PreviewAction) -> bool {
        let max = self.max_scroll();
        self.scroll = match action {
            PreviewAction::Close => return false,
            PreviewAction::LineUp => self.scroll.saturating_sub(1),
            PreviewAction::LineDown => (self.scroll + 1).min(max),
            PreviewAction::PageUp => self.scroll.saturating_sub(self.height),
            PreviewAction::PageDown => (self.scroll + self.height).min(max),
            PreviewAction::Top => 0,
            PreviewAction::Bottom => max,
            PreviewAction::None => self.scroll,
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(text: &str, width: usize, height: usize) -> PreviewState {
        let mut state = PreviewState::new(PathBuf::from("/tmp/f"), "f", width, height);
        state.set_text(text.to_string());
        state
    }

    #[test]
    fn test_wrapping_counts_lines() {
        let state = state_with("short\nabcdefghij\n\nend", 4, 10);
        // "short" -> 2, "abcdefghij" -> 3, "" -> 1, "end" -> 1
        assert_eq!(state.lines().len(), 7);
        assert!(state.lines().iter().all(|l| l.chars().count() <= 4));
    }

    #[test]
    fn test_scroll_bounds() {
        let text = (0..20).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let mut state = state_with(&text, 10, 5);
        assert_eq!(state.max_scroll(), 15);

        assert!(state.apply(PreviewAction::LineUp));
        assert_eq!(state.scroll(), 0);

        state.apply(PreviewAction::PageDown);
        assert_eq!(state.scroll(), 5);
        state.apply(PreviewAction::Bottom);
        assert_eq!(state.scroll(), 15);
        state.apply(PreviewAction::LineDown);
        assert_eq!(state.scroll(), 15);
        assert_eq!(state.visible_lines().first().map(String::as_str), Some("15"));

        state.apply(PreviewAction::PageUp);
        assert_eq!(state.scroll(), 10);
        state.apply(PreviewAction::Top);
        assert_eq!(state.scroll(), 0);

        assert!(!state.apply(PreviewAction::Close));
    }

    #[test]
    fn test_resize_rewraps_and_clamps() {
        let mut state = state_with(&"x".repeat(100), 10, 2);
        assert_eq!(state.lines().len(), 10);
        state.apply(PreviewAction::Bottom);
        assert_eq!(state.scroll(), 8);

        state.resize(50, 2);
        assert_eq!(state.lines().len(), 2);
        assert_eq!(state.scroll(), 0);
    }

    #[test]
    fn test_loading_until_text_arrives() {
        let mut state = PreviewState::new(PathBuf::from("/tmp/f"), "f", 20, 10);
        assert!(state.is_loading());
        assert!(state.visible_lines().is_empty());
        state.set_text("tab\there".into());
        assert!(!state.is_loading());
        assert_eq!(state.lines()[0], "tab    here");
    }
}
