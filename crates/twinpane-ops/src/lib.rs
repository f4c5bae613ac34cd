//! File operations engine for twinpane.
//!
//! Copy and move run on a blocking worker and stream [`OperationEvent`]s
//! through a bounded channel. A request that is not forced is checked for
//! destination collisions first and either reports every conflict or starts
//! mutating, never both. Folder creation and deletion are one-shot helpers.

mod conflict;
mod engine;
mod error;
mod fs_ops;
mod operation;
mod progress;

pub use conflict::{Conflict, find_conflicts};
pub use engine::{execute, start_operation};
pub use error::OpsError;
pub use fs_ops::{create_directory, delete_entry, validate_folder_name};
pub use operation::{OperationError, OperationId, OperationMode, OperationRequest};
pub use progress::{OperationEvent, OperationOutcome, ProgressEvent};

/// Default channel buffer size for operation progress updates.
pub const OPERATION_CHANNEL_SIZE: usize = 100;

/// Bytes copied between two incremental progress events.
pub const PROGRESS_GRANULARITY: u64 = 256 * 1024;

/// Read/write buffer used when streaming file contents.
pub const COPY_BUFFER_SIZE: usize = 64 * 1024;
