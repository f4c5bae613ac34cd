//! Destination collision detection.

use std::path::PathBuf;

use twinpane_core::Entry;

use crate::OperationRequest;

/// A source whose destination path already exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// The source entry being copied or moved.
    pub source: Entry,
    /// The existing destination path.
    pub destination: PathBuf,
}

impl Conflict {
    /// Create a new conflict.
    pub fn new(source: Entry, destination: PathBuf) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Display name of the colliding item.
    pub fn name(&self) -> &str {
        self.source.name.as_str()
    }
}

/// Every source of `request` whose target already exists, in source order.
///
/// This is a point-in-time check; the filesystem can change before the
/// operation writes anything.
pub fn find_conflicts(request: &OperationRequest) -> Vec<Conflict> {
    request
        .sources
        .iter()
        .filter_map(|source| {
            let target = request.target_for(source);
            // symlink_metadata also catches dangling links at the target.
            std::fs::symlink_metadata(&target)
                .is_ok()
                .then(|| Conflict::new(source.clone(), target))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find_conflicts_in_source_order() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        for name in ["a", "b", "c"] {
            fs::write(src.path().join(name), name).unwrap();
        }
        fs::write(dst.path().join("c"), "old").unwrap();
        fs::write(dst.path().join("a"), "old").unwrap();

        let sources = ["a", "b", "c"]
            .iter()
            .map(|n| Entry::from_path(src.path().join(n)).unwrap())
            .collect();
        let request = OperationRequest::copy(sources, dst.path());

        let conflicts = find_conflicts(&request);
        let names: Vec<_> = conflicts.iter().map(Conflict::name).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert_eq!(conflicts[0].destination, dst.path().join("a"));
    }

    #[test]
    fn test_no_conflicts_in_empty_destination() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::write(src.path().join("x"), "x").unwrap();

        let request =
            OperationRequest::copy(vec![Entry::from_path(src.path().join("x")).unwrap()], dst.path());
        assert!(find_conflicts(&request).is_empty());
    }
}
