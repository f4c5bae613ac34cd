//! One-shot folder creation and deletion.

use std::path::{Path, PathBuf};

use tracing::info;
use twinpane_core::Entry;

use crate::OpsError;
use crate::engine::remove_path;

/// Validate a folder name typed by the user.
pub fn validate_folder_name(name: &str) -> Result<(), OpsError> {
    if name.is_empty() {
        return Err(OpsError::invalid_name(name, "Name cannot be empty"));
    }
    if name == "." || name == ".." {
        return Err(OpsError::invalid_name(name, "Name is reserved"));
    }
    if name.len() > 255 {
        return Err(OpsError::invalid_name(
            name,
            "Name is too long (max 255 bytes)",
        ));
    }
    for c in ['/', '\0'] {
        if name.contains(c) {
            return Err(OpsError::invalid_name(
                name,
                format!("Name cannot contain {c:?}"),
            ));
        }
    }
    Ok(())
}

/// Create exactly one directory named `name` inside `parent`.
///
/// Fails if the name is invalid or the directory already exists. Returns the
/// path of the new directory.
pub async fn create_directory(parent: PathBuf, name: String) -> Result<PathBuf, OpsError> {
    validate_folder_name(&name)?;
    let path = parent.join(&name);
    let created = path.clone();

    tokio::task::spawn_blocking(move || make_dir(&path)).await??;

    info!(path = %created.display(), "created directory");
    Ok(created)
}

#[cfg(unix)]
fn make_dir(path: &Path) -> Result<(), OpsError> {
    use std::os::unix::fs::DirBuilderExt;
    std::fs::DirBuilder::new()
        .mode(0o755)
        .create(path)
        .map_err(|e| OpsError::io(path, e))
}

#[cfg(not(unix))]
fn make_dir(path: &Path) -> Result<(), OpsError> {
    std::fs::create_dir(path).map_err(|e| OpsError::io(path, e))
}

/// Remove `entry` from disk, recursively for directories.
pub async fn delete_entry(entry: Entry) -> Result<(), OpsError> {
    if entry.is_parent() {
        return Err(OpsError::ParentEntry);
    }
    let path = entry.path.clone();
    tokio::task::spawn_blocking(move || remove_path(&path)).await??;

    info!(path = %entry.path.display(), "deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_folder_name() {
        assert!(validate_folder_name("projects").is_ok());
        assert!(validate_folder_name("with space").is_ok());
        assert!(validate_folder_name("").is_err());
        assert!(validate_folder_name("..").is_err());
        assert!(validate_folder_name("a/b").is_err());
        assert!(validate_folder_name("nul\0").is_err());
        assert!(validate_folder_name(&"x".repeat(256)).is_err());
    }

    #[tokio::test]
    async fn test_create_directory_twice_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_directory(dir.path().to_path_buf(), "new".into())
            .await
            .unwrap();
        assert!(path.is_dir());

        let err = create_directory(dir.path().to_path_buf(), "new".into())
            .await
            .unwrap_err();
        assert!(matches!(err, OpsError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_delete_directory_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("f.txt"), b"data").unwrap();

        let entry = Entry::from_path(dir.path().join("a")).unwrap();
        delete_entry(entry).await.unwrap();
        assert!(!dir.path().join("a").exists());
    }

    #[tokio::test]
    async fn test_delete_parent_entry_refused() {
        let err = delete_entry(Entry::parent_of("/")).await.unwrap_err();
        assert!(matches!(err, OpsError::ParentEntry));
    }
}
