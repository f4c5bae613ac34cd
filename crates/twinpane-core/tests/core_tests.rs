use std::fs;

use twinpane_core::{Entry, EntryKind, ListConfig, list_directory};

fn names(entries: &[Entry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

#[test]
fn test_listing_orders_directories_first() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b.txt"), b"b").unwrap();
    fs::write(dir.path().join("a.txt"), b"aa").unwrap();
    fs::create_dir(dir.path().join("zdir")).unwrap();
    fs::create_dir(dir.path().join("adir")).unwrap();

    let entries = list_directory(dir.path(), &ListConfig::default()).unwrap();

    assert_eq!(names(&entries), vec!["..", "adir", "zdir", "a.txt", "b.txt"]);
    assert_eq!(entries[0].kind, EntryKind::Parent);
    assert_eq!(entries[0].path, dir.path().parent().unwrap());

    // Everything after the parent row: directories strictly before files.
    let first_file = entries.iter().position(|e| !e.is_dir()).unwrap();
    assert!(entries[first_file..].iter().all(|e| !e.is_dir()));
}

#[test]
fn test_listing_entry_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("ten.bin");
    fs::write(&file, [0u8; 10]).unwrap();

    let entries = list_directory(dir.path(), &ListConfig::default()).unwrap();
    let entry = entries.iter().find(|e| e.name.as_str() == "ten.bin").unwrap();

    assert_eq!(entry.size, 10);
    assert_eq!(entry.path, file);
    assert_eq!(entry.kind, EntryKind::File);
    assert!(!entry.is_parent());
}

#[test]
fn test_listing_hides_dotfiles_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".hidden"), b"").unwrap();
    fs::write(dir.path().join("shown"), b"").unwrap();

    let all = list_directory(dir.path(), &ListConfig::default()).unwrap();
    assert!(all.iter().any(|e| e.name.as_str() == ".hidden"));

    let config = ListConfig::builder().show_hidden(false).build().unwrap();
    let visible = list_directory(dir.path(), &config).unwrap();
    assert_eq!(names(&visible), vec!["..", "shown"]);
}

#[test]
fn test_listing_without_parent_row() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("only"), b"").unwrap();

    let config = ListConfig::builder().include_parent(false).build().unwrap();
    let entries = list_directory(dir.path(), &config).unwrap();
    assert_eq!(names(&entries), vec!["only"]);
}

#[test]
fn test_listing_missing_directory_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("gone");
    let err = list_directory(&missing, &ListConfig::default()).unwrap_err();
    assert_eq!(err.path(), missing.as_path());
}

#[cfg(unix)]
#[test]
fn test_entry_captures_mode_bits() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("script.sh");
    fs::write(&file, b"#!/bin/sh\n").unwrap();
    fs::set_permissions(&file, fs::Permissions::from_mode(0o750)).unwrap();

    let entry = Entry::from_path(&file).unwrap();
    assert_eq!(entry.mode, 0o750);
    assert_eq!(entry.mode_string(), "-rwxr-x---");
}
