//! Single-line text input used by the new-folder prompt.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Outcome of feeding one key to an [`InputState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// Keep editing.
    Continue,
    /// Discard the input.
    Cancel,
    /// Accept the input.
    Submit(String),
}

/// Editable line with a cursor measured in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    buffer: String,
    cursor: usize,
    error: Option<String>,
}

impl InputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current buffer contents.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Get the current error message (if any).
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Show a validation error under the input.
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Byte offset of character index `idx`.
    fn byte_at(&self, idx: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(idx)
            .map_or(self.buffer.len(), |(i, _)| i)
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputResult {
        self.error = None;

        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => return InputResult::Submit(self.buffer.clone()),
            (KeyCode::Esc, _) => return InputResult::Cancel,

            (KeyCode::Backspace, _) if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_at(self.cursor);
                self.buffer.remove(at);
            }
            (KeyCode::Delete, _) if self.cursor < self.char_count() => {
                let at = self.byte_at(self.cursor);
                self.buffer.remove(at);
            }
            (KeyCode::Left, _) => self.cursor = self.cursor.saturating_sub(1),
            (KeyCode::Right, _) => self.cursor = (self.cursor + 1).min(self.char_count()),
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => self.cursor = 0,
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.char_count()
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                let at = self.byte_at(self.cursor);
                self.buffer.replace_range(..at, "");
                self.cursor = 0;
            }
            (KeyCode::Char('k'), KeyModifiers::CONTROL) => {
                let at = self.byte_at(self.cursor);
                self.buffer.truncate(at);
            }
            (KeyCode::Char('w'), KeyModifiers::CONTROL) if self.cursor > 0 => {
                let end = self.byte_at(self.cursor);
                let before = self.buffer[..end].trim_end();
                let start = before
                    .rfind(char::is_whitespace)
                    .map_or(0, |i| i + 1);
                let removed = self.buffer[start..end].chars().count();
                self.buffer.replace_range(start..end, "");
                self.cursor -= removed;
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let at = self.byte_at(self.cursor);
                self.buffer.insert(at, c);
                self.cursor += 1;
            }
            _ => {}
        }
        InputResult::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(input: &mut InputState, s: &str) {
        for c in s.chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_and_submit() {
        let mut input = InputState::new();
        type_str(&mut input, "docs");
        assert_eq!(input.cursor(), 4);
        assert_eq!(
            input.handle_key(key(KeyCode::Enter)),
            InputResult::Submit("docs".into())
        );
    }

    #[test]
    fn test_cancel() {
        let mut input = InputState::new();
        type_str(&mut input, "x");
        assert_eq!(input.handle_key(key(KeyCode::Esc)), InputResult::Cancel);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = InputState::new();
        type_str(&mut input, "héllo");
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.buffer(), "hllo");
        assert_eq!(input.cursor(), 1);

        input.handle_key(key(KeyCode::Delete));
        assert_eq!(input.buffer(), "hlo");
        type_str(&mut input, "ü");
        assert_eq!(input.buffer(), "hülo");
    }

    #[test]
    fn test_ctrl_shortcuts() {
        let mut input = InputState::new();
        type_str(&mut input, "new folder");
        input.handle_key(ctrl('w'));
        assert_eq!(input.buffer(), "new ");

        input.handle_key(ctrl('a'));
        input.handle_key(ctrl('k'));
        assert_eq!(input.buffer(), "");

        type_str(&mut input, "abc");
        input.handle_key(key(KeyCode::Left));
        input.handle_key(ctrl('u'));
        assert_eq!(input.buffer(), "c");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_error_cleared_on_key() {
        let mut input = InputState::new();
        input.set_error("Name cannot be empty");
        assert!(input.error().is_some());
        input.handle_key(key(KeyCode::Char('a')));
        assert!(input.error().is_none());
    }
}
