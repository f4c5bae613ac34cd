//! Directory entry snapshots.

use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Display name of the synthetic parent-directory entry.
pub const PARENT_NAME: &str = "..";

/// What an entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// Regular file (or anything that is not a directory).
    File,
    /// Directory.
    Directory,
    /// The synthetic `..` row pointing at the parent directory.
    Parent,
}

/// An immutable snapshot of one directory row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// File name (not full path).
    pub name: CompactString,
    /// Absolute path.
    pub path: PathBuf,
    /// Size in bytes (0 for directories).
    pub size: u64,
    /// Permission bits.
    pub mode: u32,
    /// Last modification time.
    pub modified: SystemTime,
    /// Entry kind.
    pub kind: EntryKind,
}

impl Entry {
    /// Build an entry from already-fetched metadata.
    pub fn from_metadata(
        name: impl Into<CompactString>,
        path: impl Into<PathBuf>,
        metadata: &Metadata,
    ) -> Self {
        let kind = if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        Self {
            name: name.into(),
            path: path.into(),
            size: if metadata.is_dir() { 0 } else { metadata.len() },
            mode: mode_bits(metadata),
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            kind,
        }
    }

    /// Stat a path and build an entry for it.
    ///
    /// Symlinks are followed; a dangling link is described by the link itself.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)
            .or_else(|_| std::fs::symlink_metadata(path))
            .map_err(|e| CoreError::io(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::from_metadata(name, path, &metadata))
    }

    /// Create the synthetic `..` entry for `parent`.
    pub fn parent_of(parent: impl Into<PathBuf>) -> Self {
        Self {
            name: CompactString::from(PARENT_NAME),
            path: parent.into(),
            size: 0,
            mode: 0o755,
            modified: SystemTime::UNIX_EPOCH,
            kind: EntryKind::Parent,
        }
    }

    /// Directories and the parent row both count as directories.
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Directory | EntryKind::Parent)
    }

    /// Check if this is the synthetic `..` row.
    pub fn is_parent(&self) -> bool {
        self.kind == EntryKind::Parent
    }

    /// Hidden by the dot-file convention.
    pub fn is_hidden(&self) -> bool {
        !self.is_parent() && self.name.starts_with('.')
    }

    /// Modification time in the local timezone.
    pub fn modified_local(&self) -> DateTime<Local> {
        DateTime::<Local>::from(self.modified)
    }

    /// Permission bits rendered as `rwxr-xr-x`, prefixed with `d` for directories.
    pub fn mode_string(&self) -> String {
        let mut out = String::with_capacity(10);
        out.push(if self.is_dir() { 'd' } else { '-' });
        for shift in [6u32, 3, 0] {
            let bits = (self.mode >> shift) & 0o7;
            out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
            out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
            out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
        }
        out
    }
}

#[cfg(unix)]
fn mode_bits(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn mode_bits(metadata: &Metadata) -> u32 {
    match (metadata.is_dir(), metadata.permissions().readonly()) {
        (true, _) => 0o755,
        (false, true) => 0o444,
        (false, false) => 0o644,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_entry() {
        let entry = Entry::parent_of("/tmp");
        assert!(entry.is_parent());
        assert!(entry.is_dir());
        assert!(!entry.is_hidden());
        assert_eq!(entry.name.as_str(), PARENT_NAME);
        assert_eq!(entry.path, PathBuf::from("/tmp"));
    }

    #[test]
    fn test_mode_string() {
        let mut entry = Entry::parent_of("/");
        entry.kind = EntryKind::File;
        entry.mode = 0o640;
        assert_eq!(entry.mode_string(), "-rw-r-----");

        entry.kind = EntryKind::Directory;
        entry.mode = 0o755;
        assert_eq!(entry.mode_string(), "drwxr-xr-x");
    }

    #[test]
    fn test_from_path_missing() {
        let err = Entry::from_path("/definitely/not/here/twinpane").unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }
}
