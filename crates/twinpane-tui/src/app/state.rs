//! Application state types.

use std::fmt;
use std::io;
use std::path::PathBuf;

use twinpane_core::{CoreError, Entry};
use twinpane_ops::{OperationEvent, OpsError};

use super::clipboard::ClipboardMethod;
use super::input::InputState;
use super::overwrite::OverwriteSession;
use super::pane::PaneId;
use crate::preview::{PreviewContent, PreviewError, PreviewState};

/// What the keyboard currently drives. Only the active mode sees keys.
#[derive(Debug, Clone, Default)]
pub enum InteractionMode {
    /// Browsing the panes.
    #[default]
    Normal,
    /// Typing a name for a new folder in the active pane.
    CreatingFolder(InputState),
    /// Waiting for y/n before deleting `target`.
    ConfirmingDelete { target: Entry },
    /// Asking how to handle existing destination files.
    ConfirmingOverwrite(OverwriteSession),
    /// Full-screen file preview.
    Previewing(PreviewState),
}

impl InteractionMode {
    /// Short label for the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::CreatingFolder(_) => "MKDIR",
            Self::ConfirmingDelete { .. } => "DELETE",
            Self::ConfirmingOverwrite(_) => "OVERWRITE",
            Self::Previewing(_) => "VIEW",
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, Self::Normal)
    }
}

/// Severity of a status line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Message shown in the status line until a newer one replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Results reported by background tasks.
#[derive(Debug)]
pub enum AppMessage {
    /// A pane listing finished.
    DirectoryLoaded {
        pane: PaneId,
        path: PathBuf,
        result: Result<Vec<Entry>, CoreError>,
    },
    /// Event from the running copy/move.
    Operation(OperationEvent),
    /// Folder creation finished.
    FolderCreated {
        pane: PaneId,
        result: Result<PathBuf, OpsError>,
    },
    /// Deletion finished.
    Deleted {
        pane: PaneId,
        name: String,
        result: Result<(), OpsError>,
    },
    /// Preview content was read.
    PreviewReady {
        path: PathBuf,
        result: Result<PreviewContent, PreviewError>,
    },
    /// The system handler was launched for a file.
    Opened {
        path: PathBuf,
        result: io::Result<()>,
    },
    /// A clipboard write finished.
    ClipboardCopied(io::Result<ClipboardMethod>),
}
