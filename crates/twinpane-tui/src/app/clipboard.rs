//! Clipboard access: system clipboard first, OSC 52 escape sequence otherwise.

use std::io::{self, Write};

use base64::Engine;
use base64::engine::general_purpose;

/// How text reached the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardMethod {
    System,
    Osc52,
    Osc52Tmux,
}

impl ClipboardMethod {
    /// Status line text after a successful copy.
    pub fn describe(self) -> &'static str {
        match self {
            Self::System => "Copied to clipboard",
            Self::Osc52 => "Copied to clipboard (OSC 52)",
            Self::Osc52Tmux => "Copied to clipboard (OSC 52/tmux)",
        }
    }
}

/// Put `text` on the clipboard.
///
/// Falls back to writing an OSC 52 sequence to stderr when no system
/// clipboard is reachable (headless sessions, SSH).
pub fn copy_to_clipboard(text: &str) -> io::Result<ClipboardMethod> {
    match set_system_clipboard(text) {
        Ok(()) => Ok(ClipboardMethod::System),
        Err(e) => {
            tracing::debug!("system clipboard unavailable: {e}");
            let tmux = in_tmux();
            let mut stderr = io::stderr().lock();
            stderr.write_all(osc52_payload(text, tmux).as_bytes())?;
            stderr.flush()?;
            Ok(if tmux {
                ClipboardMethod::Osc52Tmux
            } else {
                ClipboardMethod::Osc52
            })
        }
    }
}

fn set_system_clipboard(text: &str) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())
}

fn in_tmux() -> bool {
    std::env::var_os("TMUX").is_some()
        || std::env::var_os("TERM").is_some_and(|t| t.to_string_lossy().starts_with("tmux"))
}

/// OSC 52 "set clipboard" sequence, wrapped for tmux when requested.
fn osc52_payload(text: &str, tmux: bool) -> String {
    let encoded = general_purpose::STANDARD.encode(text.as_bytes());
    let seq = format!("\x1b]52;c;{encoded}\x07");
    if tmux {
        format!("\x1bPtmux;{}\x1b\\", seq.replace('\x1b', "\x1b\x1b"))
    } else {
        seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_plain() {
        assert_eq!(osc52_payload("hi", false), "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_osc52_tmux_doubles_escapes() {
        assert_eq!(
            osc52_payload("hi", true),
            "\x1bPtmux;\x1b\x1b]52;c;aGk=\x07\x1b\\"
        );
    }
}
