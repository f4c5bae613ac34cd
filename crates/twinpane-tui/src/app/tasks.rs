//! Background tasks. Each reports back through the app message channel.

use std::io;
use std::path::PathBuf;

use tokio::sync::mpsc;
use tokio::task::spawn_blocking;
use twinpane_core::{CoreError, Entry, ListConfig, list_directory};
use twinpane_ops::{OperationId, OperationRequest, start_operation};

use super::clipboard::copy_to_clipboard;
use super::pane::PaneId;
use super::state::AppMessage;
use crate::preview::{PreviewError, PreviewLoader};

fn join_error(e: tokio::task::JoinError) -> io::Error {
    io::Error::other(e.to_string())
}

/// Read a directory for `pane`.
pub fn load_directory(
    tx: mpsc::Sender<AppMessage>,
    pane: PaneId,
    path: PathBuf,
    config: ListConfig,
) {
    tokio::spawn(async move {
        let dir = path.clone();
        let result = spawn_blocking(move || list_directory(&dir, &config))
            .await
            .unwrap_or_else(|e| Err(CoreError::io(&path, join_error(e))));
        let _ = tx
            .send(AppMessage::DirectoryLoaded { pane, path, result })
            .await;
    });
}

/// Start a copy/move and relay its events into the app channel.
pub fn run_operation(tx: mpsc::Sender<AppMessage>, id: OperationId, request: OperationRequest) {
    let mut rx = start_operation(id, request);
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if tx.send(AppMessage::Operation(event)).await.is_err() {
                break;
            }
        }
    });
}

/// Create folder `name` inside `parent`.
pub fn create_folder(tx: mpsc::Sender<AppMessage>, pane: PaneId, parent: PathBuf, name: String) {
    tokio::spawn(async move {
        let result = twinpane_ops::create_directory(parent, name).await;
        let _ = tx.send(AppMessage::FolderCreated { pane, result }).await;
    });
}

/// Delete `entry`, recursively for directories.
pub fn delete(tx: mpsc::Sender<AppMessage>, pane: PaneId, entry: Entry) {
    tokio::spawn(async move {
        let name = entry.name.to_string();
        let result = twinpane_ops::delete_entry(entry).await;
        let _ = tx.send(AppMessage::Deleted { pane, name, result }).await;
    });
}

/// Read preview content for `path`.
pub fn load_preview(tx: mpsc::Sender<AppMessage>, path: PathBuf, max_bytes: u64) {
    tokio::spawn(async move {
        let file = path.clone();
        let result = spawn_blocking(move || PreviewLoader::load(&file, max_bytes))
            .await
            .unwrap_or_else(|e| {
                Err(PreviewError::Io {
                    path: path.clone(),
                    source: join_error(e),
                })
            });
        let _ = tx.send(AppMessage::PreviewReady { path, result }).await;
    });
}

/// Open `path` with the system's default application.
pub fn open_file(tx: mpsc::Sender<AppMessage>, path: PathBuf) {
    tokio::spawn(async move {
        let target = path.clone();
        let result = spawn_blocking(move || open::that_detached(&target))
            .await
            .unwrap_or_else(|e| Err(join_error(e)));
        let _ = tx.send(AppMessage::Opened { path, result }).await;
    });
}

/// Put `text` on the clipboard.
pub fn copy_text(tx: mpsc::Sender<AppMessage>, text: String) {
    tokio::spawn(async move {
        let result = spawn_blocking(move || copy_to_clipboard(&text))
            .await
            .unwrap_or_else(|e| Err(join_error(e)));
        let _ = tx.send(AppMessage::ClipboardCopied(result)).await;
    });
}

