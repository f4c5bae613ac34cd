//! Key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Action for a key pressed while browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Navigation
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    JumpToTop,
    JumpToBottom,
    /// Enter a directory or open a file with the system handler.
    Open,
    NavigateBack,
    /// Toggle selection of the entry under the cursor and advance.
    ToggleSelection,
    /// Extend the type-ahead prefix.
    Search(char),
    ClearSearch,
    SwitchPane,

    // Operations
    Preview,
    Copy,
    Move,
    NewFolder,
    Delete,
    CopyPath,

    // Application
    Quit,
    ForceQuit,

    None,
}

impl KeyAction {
    /// Convert a key event to an action.
    pub fn from_key_event(event: KeyEvent) -> Self {
        match (event.code, event.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::ForceQuit,
            (KeyCode::Char('q'), KeyModifiers::ALT) | (KeyCode::F(10), _) => KeyAction::Quit,

            (KeyCode::Char('v'), KeyModifiers::ALT) | (KeyCode::F(3), _) => KeyAction::Preview,
            (KeyCode::Char('c'), KeyModifiers::ALT) | (KeyCode::F(5), _) => KeyAction::Copy,
            (KeyCode::Char('m'), KeyModifiers::ALT) | (KeyCode::F(6), _) => KeyAction::Move,
            (KeyCode::Char('n'), KeyModifiers::ALT) | (KeyCode::F(7), _) => KeyAction::NewFolder,
            (KeyCode::Char('d'), KeyModifiers::ALT) | (KeyCode::F(8), _) => KeyAction::Delete,
            (KeyCode::Char('p'), KeyModifiers::ALT) | (KeyCode::F(9), _) => KeyAction::CopyPath,
            (KeyCode::Char('i'), KeyModifiers::ALT) | (KeyCode::Insert, _) => {
                KeyAction::ToggleSelection
            }

            (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::MoveUp,
            (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::MoveDown,
            (KeyCode::PageUp, _) => KeyAction::PageUp,
            (KeyCode::PageDown, _) => KeyAction::PageDown,
            (KeyCode::Home, _) => KeyAction::JumpToTop,
            (KeyCode::End, _) => KeyAction::JumpToBottom,
            (KeyCode::Enter, _) => KeyAction::Open,
            (KeyCode::Backspace, _) | (KeyCode::Char('h'), KeyModifiers::NONE) => {
                KeyAction::NavigateBack
            }
            (KeyCode::Tab, _) => KeyAction::SwitchPane,
            (KeyCode::Esc, _) => KeyAction::ClearSearch,

            // Other plain characters feed the type-ahead search.
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => KeyAction::Search(c),

            _ => KeyAction::None,
        }
    }
}

/// Action for a key pressed while previewing a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewAction {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    Close,
    None,
}

impl PreviewAction {
    /// Convert a key event to a preview action.
    pub fn from_key_event(event: KeyEvent) -> Self {
        match (event.code, event.modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Char('q'), KeyModifiers::NONE) => Self::Close,
            (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => Self::LineUp,
            (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => Self::LineDown,
            (KeyCode::PageUp, _) => Self::PageUp,
            (KeyCode::PageDown, _) | (KeyCode::Char(' '), KeyModifiers::NONE) => Self::PageDown,
            (KeyCode::Home, _) | (KeyCode::Char('g'), KeyModifiers::NONE) => Self::Top,
            (KeyCode::End, _) | (KeyCode::Char('G'), _) => Self::Bottom,
            _ => Self::None,
        }
    }
}

/// A shortcut shown in the hints bar.
#[derive(Debug, Clone, Copy)]
pub struct Shortcut {
    /// Letter pressed together with Alt.
    pub key: &'static str,
    /// Function key alias, if any.
    pub fkey: Option<&'static str>,
    /// Short description.
    pub action: &'static str,
}

/// Shortcuts in the order they appear in the hints bar.
pub const SHORTCUTS: &[Shortcut] = &[
    Shortcut { key: "v", fkey: Some("F3"), action: "View" },
    Shortcut { key: "c", fkey: Some("F5"), action: "Copy" },
    Shortcut { key: "m", fkey: Some("F6"), action: "Move" },
    Shortcut { key: "n", fkey: Some("F7"), action: "MkDir" },
    Shortcut { key: "d", fkey: Some("F8"), action: "Delete" },
    Shortcut { key: "p", fkey: Some("F9"), action: "Copy Path" },
    Shortcut { key: "i", fkey: Some("Ins"), action: "Select" },
    Shortcut { key: "q", fkey: Some("F10"), action: "Quit" },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_alt_and_function_keys_agree() {
        let pairs = [
            ('v', 3, KeyAction::Preview),
            ('c', 5, KeyAction::Copy),
            ('m', 6, KeyAction::Move),
            ('n', 7, KeyAction::NewFolder),
            ('d', 8, KeyAction::Delete),
            ('p', 9, KeyAction::CopyPath),
            ('q', 10, KeyAction::Quit),
        ];
        for (letter, f, action) in pairs {
            assert_eq!(
                KeyAction::from_key_event(key(KeyCode::Char(letter), KeyModifiers::ALT)),
                action
            );
            assert_eq!(
                KeyAction::from_key_event(key(KeyCode::F(f), KeyModifiers::NONE)),
                action
            );
        }
    }

    #[test]
    fn test_plain_letters_search() {
        assert_eq!(
            KeyAction::from_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            KeyAction::Search('q')
        );
        assert_eq!(
            KeyAction::from_key_event(key(KeyCode::Char('R'), KeyModifiers::SHIFT)),
            KeyAction::Search('R')
        );
        assert_eq!(
            KeyAction::from_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::ForceQuit
        );
    }

    #[test]
    fn test_vi_keys_navigate() {
        let plain = |c| KeyAction::from_key_event(key(KeyCode::Char(c), KeyModifiers::NONE));
        assert_eq!(plain('j'), KeyAction::MoveDown);
        assert_eq!(plain('k'), KeyAction::MoveUp);
        assert_eq!(plain('h'), KeyAction::NavigateBack);
        assert_eq!(plain('l'), KeyAction::Search('l'));
        assert_eq!(
            KeyAction::from_key_event(key(KeyCode::Char('J'), KeyModifiers::SHIFT)),
            KeyAction::Search('J')
        );
    }

    #[test]
    fn test_preview_keys() {
        assert_eq!(
            PreviewAction::from_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            PreviewAction::Close
        );
        assert_eq!(
            PreviewAction::from_key_event(key(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            PreviewAction::Bottom
        );
        assert_eq!(
            PreviewAction::from_key_event(key(KeyCode::Tab, KeyModifiers::NONE)),
            PreviewAction::None
        );
    }
}
