//! Directory enumeration.

use std::cmp::Ordering;
use std::path::Path;

use itertools::Itertools;
use tracing::{debug, warn};

use crate::{CoreError, Entry, ListConfig};

/// Read `path` and return its entries ordered for display.
///
/// Directories come before files and each group is sorted by name. Unless
/// `path` is the filesystem root, a `..` entry pointing at the parent is
/// prepended. Rows whose metadata cannot be read are skipped.
pub fn list_directory(path: &Path, config: &ListConfig) -> Result<Vec<Entry>, CoreError> {
    let read_dir = std::fs::read_dir(path).map_err(|e| CoreError::io(path, e))?;

    let mut rows = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let child = dir_entry.path();
        // Follow symlinks so linked directories can be entered; fall back to
        // the link itself when the target is gone.
        let metadata = match std::fs::metadata(&child).or_else(|_| dir_entry.metadata()) {
            Ok(m) => m,
            Err(e) => {
                warn!(path = %child.display(), error = %e, "skipping entry without metadata");
                continue;
            }
        };
        let name = dir_entry.file_name().to_string_lossy().into_owned();
        let entry = Entry::from_metadata(name, child, &metadata);
        if !config.show_hidden && entry.is_hidden() {
            continue;
        }
        rows.push(entry);
    }

    let parent = config
        .include_parent
        .then(|| path.parent().map(Entry::parent_of))
        .flatten();

    let entries: Vec<Entry> = parent
        .into_iter()
        .chain(rows.into_iter().sorted_by(display_order))
        .collect();

    debug!(path = %path.display(), count = entries.len(), "listed directory");
    Ok(entries)
}

fn display_order(a: &Entry, b: &Entry) -> Ordering {
    b.is_dir()
        .cmp(&a.is_dir())
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntryKind;

    fn entry(name: &str, kind: EntryKind) -> Entry {
        let mut e = Entry::parent_of("/");
        e.name = name.into();
        e.kind = kind;
        e
    }

    #[test]
    fn test_display_order_dirs_first() {
        let dir = entry("zeta", EntryKind::Directory);
        let file = entry("alpha", EntryKind::File);
        assert_eq!(display_order(&dir, &file), Ordering::Less);
        assert_eq!(display_order(&file, &dir), Ordering::Greater);
    }

    #[test]
    fn test_display_order_by_name() {
        let a = entry("A", EntryKind::File);
        let b = entry("a", EntryKind::File);
        // Byte order: uppercase sorts first.
        assert_eq!(display_order(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_root_has_no_parent_entry() {
        let entries = list_directory(Path::new("/"), &ListConfig::default()).unwrap();
        assert!(entries.iter().all(|e| !e.is_parent()));
    }
}
