//! Operation request types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use twinpane_core::Entry;

use crate::OpsError;

/// Identifies one engine invocation; every event it emits carries this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OperationId(pub u64);

impl OperationId {
    /// Create a new OperationId from a u64.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The id following this one.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for OperationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether sources are duplicated or relocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationMode {
    Copy,
    Move,
}

impl OperationMode {
    /// Bare verb, as in "Nothing to copy".
    pub fn verb(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Move => "move",
        }
    }

    /// Present participle used in progress lines.
    pub fn progressive(self) -> &'static str {
        match self {
            Self::Copy => "Copying",
            Self::Move => "Moving",
        }
    }

    /// Past tense used in completion messages.
    pub fn past(self) -> &'static str {
        match self {
            Self::Copy => "Copied",
            Self::Move => "Moved",
        }
    }
}

impl std::fmt::Display for OperationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Copy => write!(f, "Copy"),
            Self::Move => write!(f, "Move"),
        }
    }
}

/// A copy or move of an ordered set of entries into one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    /// Sources, processed in this order.
    pub sources: Vec<Entry>,
    /// Destination directory.
    pub destination: PathBuf,
    /// Copy or move.
    pub mode: OperationMode,
    /// Skip the collision check.
    pub force: bool,
}

impl OperationRequest {
    /// Create a request. Parent rows are dropped from `sources`.
    pub fn new(
        sources: Vec<Entry>,
        destination: impl Into<PathBuf>,
        mode: OperationMode,
        force: bool,
    ) -> Self {
        Self {
            sources: sources.into_iter().filter(|e| !e.is_parent()).collect(),
            destination: destination.into(),
            mode,
            force,
        }
    }

    /// Create a copy request.
    pub fn copy(sources: Vec<Entry>, destination: impl Into<PathBuf>) -> Self {
        Self::new(sources, destination, OperationMode::Copy, false)
    }

    /// Create a move request.
    pub fn move_to(sources: Vec<Entry>, destination: impl Into<PathBuf>) -> Self {
        Self::new(sources, destination, OperationMode::Move, false)
    }

    /// Same request with the collision check disabled.
    pub fn forced(mut self) -> Self {
        self.force = true;
        self
    }

    /// Where `source` lands inside the destination directory.
    pub fn target_for(&self, source: &Entry) -> PathBuf {
        self.destination.join(source.name.as_str())
    }
}

/// The failure that ended an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationError {
    /// Name of the top-level source item being processed.
    pub item: String,
    /// The path that caused the error.
    pub path: PathBuf,
    /// A human-readable error message.
    pub message: String,
}

impl OperationError {
    /// Create a new operation error.
    pub fn new(item: impl Into<String>, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            path: path.into(),
            message: message.into(),
        }
    }

    /// Wrap an [`OpsError`] raised while processing `item`.
    pub fn from_ops(item: impl Into<String>, path: impl Into<PathBuf>, err: &OpsError) -> Self {
        Self::new(item, path, err.to_string())
    }
}

impl std::fmt::Display for OperationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.item, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_drops_parent_entry() {
        let mut file = Entry::parent_of("/src");
        file.kind = twinpane_core::EntryKind::File;
        file.name = "a.txt".into();
        file.path = PathBuf::from("/src/a.txt");

        let request = OperationRequest::copy(vec![Entry::parent_of("/"), file.clone()], "/dst");
        assert_eq!(request.sources, vec![file.clone()]);
        assert_eq!(request.target_for(&file), PathBuf::from("/dst/a.txt"));
        assert!(!request.force);
        assert!(request.forced().force);
    }

    #[test]
    fn test_operation_id_next() {
        let id = OperationId::new(41);
        assert_eq!(id.next(), OperationId(42));
        assert_eq!(id.to_string(), "#41");
    }

    #[test]
    fn test_mode_wording() {
        assert_eq!(OperationMode::Copy.verb(), "copy");
        assert_eq!(OperationMode::Move.progressive(), "Moving");
        assert_eq!(OperationMode::Move.past(), "Moved");
    }
}
