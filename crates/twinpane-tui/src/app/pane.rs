//! Pane navigation state.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use twinpane_core::Entry;

/// Which of the two panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneId {
    Left,
    Right,
}

impl PaneId {
    /// The opposite pane.
    pub fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// One directory view: listing, cursor, selection, and type-ahead prefix.
#[derive(Debug, Clone)]
pub struct Pane {
    pub id: PaneId,
    pub active: bool,
    path: PathBuf,
    entries: Vec<Entry>,
    selected: HashSet<PathBuf>,
    cursor: usize,
    offset: usize,
    height: usize,
    search: String,
    error: Option<String>,
    /// Entry to put the cursor on once the next listing arrives.
    focus: Option<PathBuf>,
}

impl Pane {
    /// Create an empty pane showing `path`; entries arrive via [`Self::apply_listing`].
    pub fn new(id: PaneId, path: PathBuf, active: bool) -> Self {
        Self {
            id,
            active,
            path,
            entries: Vec::new(),
            selected: HashSet::new(),
            cursor: 0,
            offset: 0,
            height: 1,
            search: String::new(),
            error: None,
            focus: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index of the first visible row.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Error from the last listing attempt.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_selected(&self, path: &Path) -> bool {
        self.selected.contains(path)
    }

    pub fn selection_len(&self) -> usize {
        self.selected.len()
    }

    /// Entry under the cursor.
    pub fn current(&self) -> Option<&Entry> {
        self.entries.get(self.cursor)
    }

    /// Visible rows for the current viewport.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &Entry)> {
        self.entries
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(self.height)
    }

    /// Number of list rows the pane can show.
    pub fn set_height(&mut self, height: usize) {
        self.height = height.max(1);
        self.ensure_visible();
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Install a listing for `path`. Listings for a directory the pane has
    /// since left are ignored; returns whether it was applied.
    pub fn apply_listing(&mut self, path: &Path, result: Result<Vec<Entry>, String>) -> bool {
        if path != self.path {
            return false;
        }
        match result {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
                let present: HashSet<&Path> = self.entries.iter().map(|e| e.path.as_path()).collect();
                self.selected.retain(|p| present.contains(p.as_path()));
            }
            Err(message) => {
                self.entries.clear();
                self.selected.clear();
                self.error = Some(message);
            }
        }
        if let Some(focus) = self.focus.take() {
            if let Some(idx) = self
                .entries
                .iter()
                .position(|e| e.path == focus && !e.is_parent())
            {
                self.cursor = idx;
            }
        }
        self.clamp_cursor();
        true
    }

    /// Switch to another directory. The caller loads its listing.
    pub fn navigate_to(&mut self, path: PathBuf, focus: Option<PathBuf>) {
        self.path = path;
        self.entries.clear();
        self.selected.clear();
        self.search.clear();
        self.error = None;
        self.cursor = 0;
        self.offset = 0;
        self.focus = focus;
    }

    /// Descend into the directory under the cursor. Returns the new path, or
    /// `None` if the cursor is not on a directory.
    pub fn enter(&mut self) -> Option<PathBuf> {
        let entry = self.current().filter(|e| e.is_dir())?;
        if entry.is_parent() {
            return self.ascend();
        }
        let target = entry.path.clone();
        self.navigate_to(target.clone(), None);
        Some(target)
    }

    /// Go to the parent directory, keeping the cursor on the directory just
    /// left. Returns the new path, or `None` at the filesystem root.
    pub fn ascend(&mut self) -> Option<PathBuf> {
        let parent = self.path.parent()?.to_path_buf();
        let came_from = self.path.clone();
        self.navigate_to(parent.clone(), Some(came_from));
        Some(parent)
    }

    pub fn move_up(&mut self) {
        self.move_to(self.cursor.saturating_sub(1));
    }

    pub fn move_down(&mut self) {
        self.move_to(self.cursor + 1);
    }

    pub fn page_up(&mut self) {
        self.move_to(self.cursor.saturating_sub(self.height));
    }

    pub fn page_down(&mut self) {
        self.move_to(self.cursor + self.height);
    }

    pub fn jump_to_top(&mut self) {
        self.move_to(0);
    }

    pub fn jump_to_bottom(&mut self) {
        self.move_to(self.entries.len().saturating_sub(1));
    }

    fn move_to(&mut self, idx: usize) {
        self.search.clear();
        self.cursor = idx;
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.entries.len().saturating_sub(1));
        self.ensure_visible();
    }

    fn ensure_visible(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.height {
            self.offset = self.cursor + 1 - self.height;
        }
        let max_offset = self.entries.len().saturating_sub(self.height);
        self.offset = self.offset.min(max_offset);
    }

    /// Toggle selection of the cursor entry and advance.
    pub fn toggle_selection(&mut self) {
        let Some(entry) = self.current() else {
            return;
        };
        if !entry.is_parent() {
            let path = entry.path.clone();
            if !self.selected.remove(&path) {
                self.selected.insert(path);
            }
        }
        self.move_down();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// The selected entries in listing order, or the entry under the cursor
    /// when nothing is selected. Never includes the parent row.
    pub fn selection_or_current(&self) -> Vec<Entry> {
        if self.selected.is_empty() {
            return self
                .current()
                .filter(|e| !e.is_parent())
                .cloned()
                .into_iter()
                .collect();
        }
        self.entries
            .iter()
            .filter(|e| self.selected.contains(&e.path))
            .cloned()
            .collect()
    }

    /// Extend the type-ahead prefix and jump to the first name starting
    /// with it, ignoring case.
    pub fn push_search(&mut self, c: char) {
        self.search.push(c);
        let needle = self.search.to_lowercase();
        if let Some(idx) = self
            .entries
            .iter()
            .position(|e| !e.is_parent() && e.name.to_lowercase().starts_with(&needle))
        {
            self.cursor = idx;
            self.ensure_visible();
        }
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// Step the cursor back when it sits on the last row, ahead of that row
    /// disappearing.
    pub fn retreat_from_end(&mut self) {
        if self.cursor > 0 && self.cursor + 1 >= self.entries.len() {
            self.cursor -= 1;
            self.ensure_visible();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinpane_core::EntryKind;

    fn entry(dir: &str, name: &str, kind: EntryKind) -> Entry {
        let mut e = Entry::parent_of(dir);
        e.name = name.into();
        e.path = Path::new(dir).join(name);
        e.kind = kind;
        e
    }

    fn loaded(names: &[&str]) -> Pane {
        let mut pane = Pane::new(PaneId::Left, PathBuf::from("/data"), true);
        let mut entries = vec![Entry::parent_of("/")];
        entries.extend(names.iter().map(|n| {
            let kind = if n.ends_with('/') {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            entry("/data", n.trim_end_matches('/'), kind)
        }));
        assert!(pane.apply_listing(Path::new("/data"), Ok(entries)));
        pane
    }

    #[test]
    fn test_cursor_clamps() {
        let mut pane = loaded(&["a", "b"]);
        pane.move_up();
        assert_eq!(pane.cursor(), 0);
        pane.jump_to_bottom();
        assert_eq!(pane.cursor(), 2);
        pane.move_down();
        assert_eq!(pane.cursor(), 2);
    }

    #[test]
    fn test_viewport_follows_cursor() {
        let names: Vec<String> = (0..20).map(|i| format!("f{i:02}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut pane = loaded(&refs);
        pane.set_height(5);

        pane.page_down();
        assert_eq!(pane.cursor(), 5);
        assert_eq!(pane.offset(), 1);
        pane.jump_to_bottom();
        assert_eq!(pane.offset(), 16);
        assert_eq!(pane.visible().count(), 5);
        pane.jump_to_top();
        assert_eq!(pane.offset(), 0);
    }

    #[test]
    fn test_stale_listing_ignored() {
        let mut pane = loaded(&["a"]);
        pane.navigate_to(PathBuf::from("/other"), None);
        assert!(!pane.apply_listing(Path::new("/data"), Ok(vec![])));
        assert_eq!(pane.path(), Path::new("/other"));
    }

    #[test]
    fn test_selection_or_current() {
        let mut pane = loaded(&["a", "b", "c"]);
        // Cursor on the parent row: nothing to operate on.
        assert!(pane.selection_or_current().is_empty());

        pane.toggle_selection();
        assert_eq!(pane.selection_len(), 0);
        assert_eq!(pane.cursor(), 1);

        pane.move_down();
        assert_eq!(pane.selection_or_current()[0].name.as_str(), "b");

        pane.jump_to_bottom();
        pane.toggle_selection();
        pane.move_to(1);
        pane.toggle_selection();
        let names: Vec<_> = pane
            .selection_or_current()
            .iter()
            .map(|e| e.name.to_string())
            .collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_type_ahead_case_insensitive() {
        let mut pane = loaded(&["Music/", "alpha", "beta", "Bravo"]);
        pane.push_search('b');
        assert_eq!(pane.current().unwrap().name.as_str(), "beta");
        pane.push_search('R');
        assert_eq!(pane.current().unwrap().name.as_str(), "Bravo");
        assert_eq!(pane.search(), "bR");

        pane.push_search('z');
        assert_eq!(pane.current().unwrap().name.as_str(), "Bravo");
        pane.clear_search();
        assert_eq!(pane.search(), "");
    }

    #[test]
    fn test_enter_and_ascend_focus() {
        let mut pane = loaded(&["sub/", "file"]);
        pane.move_down();
        assert_eq!(pane.enter(), Some(PathBuf::from("/data/sub")));
        assert!(pane.entries().is_empty());

        assert_eq!(pane.ascend(), Some(PathBuf::from("/data")));
        let listing = vec![
            Entry::parent_of("/"),
            entry("/data", "file", EntryKind::File),
            entry("/data", "sub", EntryKind::Directory),
        ];
        pane.apply_listing(Path::new("/data"), Ok(listing));
        assert_eq!(pane.current().unwrap().name.as_str(), "sub");
    }

    #[test]
    fn test_enter_on_file_is_noop() {
        let mut pane = loaded(&["file"]);
        pane.move_down();
        assert_eq!(pane.enter(), None);
        assert_eq!(pane.path(), Path::new("/data"));
    }

    #[test]
    fn test_listing_error_kept_on_pane() {
        let mut pane = loaded(&["a"]);
        pane.apply_listing(Path::new("/data"), Err("Permission denied: /data".into()));
        assert_eq!(pane.error(), Some("Permission denied: /data"));
        assert!(pane.entries().is_empty());
        assert_eq!(pane.cursor(), 0);
    }

    #[test]
    fn test_delete_last_keeps_cursor_in_bounds() {
        let mut pane = loaded(&["a", "b", "c"]);
        pane.jump_to_bottom();
        assert_eq!(pane.cursor(), 3);

        pane.retreat_from_end();
        let listing = vec![
            Entry::parent_of("/"),
            entry("/data", "a", EntryKind::File),
            entry("/data", "b", EntryKind::File),
        ];
        pane.apply_listing(Path::new("/data"), Ok(listing));
        assert_eq!(pane.cursor(), 2);
        assert_eq!(pane.current().unwrap().name.as_str(), "b");
    }
}
