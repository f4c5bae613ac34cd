//! Progress reporting types for file operations.

use crate::{Conflict, OperationError, OperationId, OperationMode};

/// Snapshot of a running operation.
///
/// Counters never decrease within one operation id, and only the last event
/// of a stream has `terminal` set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// The operation this event belongs to.
    pub id: OperationId,
    /// Copy or move.
    pub mode: OperationMode,
    /// Total bytes to process.
    pub bytes_total: u64,
    /// Bytes processed so far.
    pub bytes_done: u64,
    /// Total number of files to process.
    pub files_total: usize,
    /// Files completed so far.
    pub files_done: usize,
    /// Name of the file currently being processed.
    pub current: String,
    /// Set on the final event of the stream.
    pub terminal: bool,
    /// Failure that ended the operation (terminal events only).
    pub error: Option<OperationError>,
}

impl ProgressEvent {
    /// Create the initial event for an operation.
    pub fn new(id: OperationId, mode: OperationMode, files_total: usize, bytes_total: u64) -> Self {
        Self {
            id,
            mode,
            bytes_total,
            bytes_done: 0,
            files_total,
            files_done: 0,
            current: String::new(),
            terminal: false,
            error: None,
        }
    }

    /// Progress as a fraction in `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        let ratio = if self.bytes_total > 0 {
            self.bytes_done as f64 / self.bytes_total as f64
        } else if self.files_total > 0 {
            self.files_done as f64 / self.files_total as f64
        } else if self.terminal {
            1.0
        } else {
            0.0
        };
        ratio.clamp(0.0, 1.0)
    }

    /// Progress as a percentage (0.0 to 100.0).
    pub fn percentage(&self) -> f64 {
        self.ratio() * 100.0
    }

    /// How the operation ended, for terminal events.
    pub fn outcome(&self) -> Option<OperationOutcome> {
        if !self.terminal {
            return None;
        }
        Some(match &self.error {
            None => OperationOutcome::Success,
            Some(error) => OperationOutcome::PartialFailure {
                item: error.item.clone(),
                error: error.clone(),
            },
        })
    }

    /// Human-readable summary of a terminal event.
    pub fn summary(&self) -> String {
        match &self.error {
            None => format!(
                "{} {} of {} files",
                self.mode.past(),
                self.files_done,
                self.files_total
            ),
            Some(error) => format!("{} failed at {}", self.mode, error),
        }
    }
}

/// Final result of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    /// Every source was processed.
    Success,
    /// Processing stopped at `item`; earlier items stay on disk.
    PartialFailure {
        error: OperationError,
        item: String,
    },
}

impl OperationOutcome {
    /// Check if the operation was fully successful.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Messages sent through the operation channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationEvent {
    /// Progress update, the last one terminal.
    Progress(ProgressEvent),
    /// The request was not forced and these targets already exist.
    /// Nothing was written and no other event follows.
    ConflictsFound {
        id: OperationId,
        conflicts: Vec<Conflict>,
    },
}

impl OperationEvent {
    /// The operation this event belongs to.
    pub fn id(&self) -> OperationId {
        match self {
            Self::Progress(p) => p.id,
            Self::ConflictsFound { id, .. } => *id,
        }
    }

    /// Check if no further events follow this one.
    pub fn is_final(&self) -> bool {
        match self {
            Self::Progress(p) => p.terminal,
            Self::ConflictsFound { .. } => true,
        }
    }
}
