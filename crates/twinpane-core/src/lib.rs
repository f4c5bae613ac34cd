//! Core types for twinpane.
//!
//! This crate provides the directory entry snapshot shared by the panes and
//! the operation engine, plus the directory lister that produces it.

mod config;
mod entry;
mod error;
mod listing;

pub use config::{ListConfig, ListConfigBuilder};
pub use entry::{Entry, EntryKind, PARENT_NAME};
pub use error::CoreError;
pub use listing::list_directory;
