//! Copy and move execution with progress reporting.

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use twinpane_core::Entry;

use crate::conflict::find_conflicts;
use crate::progress::{OperationEvent, ProgressEvent};
use crate::{
    COPY_BUFFER_SIZE, OPERATION_CHANNEL_SIZE, OperationError, OperationId, OperationMode,
    OperationRequest, OpsError, PROGRESS_GRANULARITY,
};

/// Start an operation on a blocking worker.
///
/// Returns a receiver for the operation's events. The stream ends with either
/// a single [`OperationEvent::ConflictsFound`] or a terminal progress event.
pub fn start_operation(id: OperationId, request: OperationRequest) -> mpsc::Receiver<OperationEvent> {
    let (tx, rx) = mpsc::channel(OPERATION_CHANNEL_SIZE);

    tokio::task::spawn_blocking(move || {
        execute(id, &request, |event| {
            // A closed receiver only means nobody is watching; finish anyway.
            let _ = tx.blocking_send(event);
        });
    });

    rx
}

/// Run an operation to completion on the current thread, handing each event
/// to `emit` as it happens.
pub fn execute(id: OperationId, request: &OperationRequest, mut emit: impl FnMut(OperationEvent)) {
    if !request.force {
        let conflicts = find_conflicts(request);
        if !conflicts.is_empty() {
            debug!(%id, count = conflicts.len(), "destination conflicts, nothing written");
            emit(OperationEvent::ConflictsFound { id, conflicts });
            return;
        }
    }

    let sizes = match measure(request) {
        Ok(sizes) => sizes,
        Err(error) => {
            warn!(%id, %error, "pre-pass failed, nothing written");
            let mut event = ProgressEvent::new(id, request.mode, 0, 0);
            event.terminal = true;
            event.error = Some(error);
            emit(OperationEvent::Progress(event));
            return;
        }
    };

    let files_total = sizes.iter().map(|s| s.files).sum();
    let bytes_total = sizes.iter().map(|s| s.bytes).sum();
    let mut tracker = Tracker::new(
        ProgressEvent::new(id, request.mode, files_total, bytes_total),
        &mut emit,
    );

    for (source, size) in request.sources.iter().zip(&sizes) {
        let target = request.target_for(source);
        tracker.begin_item(source.name.as_str());

        let result = match request.mode {
            OperationMode::Copy => copy_entry(source, &target, &mut tracker),
            OperationMode::Move => move_entry(source, &target, *size, &mut tracker),
        };

        if let Err(err) = result {
            warn!(%id, item = %source.name, error = %err, "operation aborted");
            tracker.finish(Some(OperationError::from_ops(
                source.name.as_str(),
                &source.path,
                &err,
            )));
            return;
        }
    }

    info!(
        %id,
        mode = %request.mode,
        files = files_total,
        bytes = bytes_total,
        "operation complete"
    );
    tracker.finish(None);
}

/// File and byte counts for one top-level source.
#[derive(Debug, Clone, Copy, Default)]
struct Size {
    files: usize,
    bytes: u64,
}

/// Stat every source (recursively) before anything is touched.
fn measure(request: &OperationRequest) -> Result<Vec<Size>, OperationError> {
    let dest = &request.destination;
    let dest_name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dest.display().to_string());
    match fs::metadata(dest) {
        Ok(m) if m.is_dir() => {}
        Ok(_) => {
            let err = OpsError::NotADirectory { path: dest.clone() };
            return Err(OperationError::from_ops(dest_name, dest, &err));
        }
        Err(e) => {
            let err = OpsError::io(dest, e);
            return Err(OperationError::from_ops(dest_name, dest, &err));
        }
    }

    request
        .sources
        .iter()
        .map(|source| {
            measure_path(&source.path)
                .map_err(|err| OperationError::from_ops(source.name.as_str(), &source.path, &err))
        })
        .collect()
}

fn measure_path(path: &Path) -> Result<Size, OpsError> {
    let metadata = fs::metadata(path).map_err(|e| OpsError::io(path, e))?;
    if !metadata.is_dir() {
        return Ok(Size {
            files: 1,
            bytes: metadata.len(),
        });
    }

    let mut total = Size::default();
    for child in fs::read_dir(path).map_err(|e| OpsError::io(path, e))? {
        let child = child.map_err(|e| OpsError::io(path, e))?;
        let size = measure_path(&child.path())?;
        total.files += size.files;
        total.bytes += size.bytes;
    }
    Ok(total)
}

/// Accumulates counters and decides when an event is worth sending.
struct Tracker<'a> {
    event: ProgressEvent,
    emit: &'a mut dyn FnMut(OperationEvent),
    last_emitted_bytes: u64,
}

impl<'a> Tracker<'a> {
    fn new(event: ProgressEvent, emit: &'a mut dyn FnMut(OperationEvent)) -> Self {
        Self {
            event,
            emit,
            last_emitted_bytes: 0,
        }
    }

    fn send(&mut self) {
        self.last_emitted_bytes = self.event.bytes_done;
        (self.emit)(OperationEvent::Progress(self.event.clone()));
    }

    /// Announce the next top-level source.
    fn begin_item(&mut self, name: &str) {
        self.event.current = name.to_string();
        self.send();
    }

    fn set_current(&mut self, name: String) {
        self.event.current = name;
    }

    fn add_bytes(&mut self, bytes: u64) {
        self.event.bytes_done += bytes;
        if self.event.bytes_done - self.last_emitted_bytes >= PROGRESS_GRANULARITY {
            self.send();
        }
    }

    fn file_done(&mut self) {
        self.event.files_done += 1;
        self.send();
    }

    /// Count a whole item at once (renames move no bytes themselves).
    fn credit(&mut self, size: Size) {
        self.event.files_done += size.files;
        self.event.bytes_done += size.bytes;
        self.send();
    }

    fn finish(mut self, error: Option<OperationError>) {
        self.event.terminal = true;
        self.event.error = error;
        self.send();
    }
}

/// `path` with symlinks resolved. A path that does not exist yet resolves
/// through its parent directory.
fn resolve(path: &Path) -> PathBuf {
    if let Ok(real) = fs::canonicalize(path) {
        return real;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => match fs::canonicalize(parent) {
            Ok(parent) => parent.join(name),
            Err(_) => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Refuse to write `target` when it is `source` under another name.
fn check_distinct(source: &Path, target: &Path) -> Result<(), OpsError> {
    if source == target || resolve(source) == resolve(target) {
        return Err(OpsError::SamePath {
            path: source.to_path_buf(),
        });
    }
    Ok(())
}

fn copy_entry(source: &Entry, target: &Path, tracker: &mut Tracker<'_>) -> Result<(), OpsError> {
    check_distinct(&source.path, target)?;
    let metadata = fs::metadata(&source.path).map_err(|e| OpsError::io(&source.path, e))?;
    if metadata.is_dir() {
        if resolve(target).starts_with(resolve(&source.path)) {
            return Err(OpsError::IntoItself {
                path: source.path.clone(),
            });
        }
        copy_dir(&source.path, target, Path::new(source.name.as_str()), tracker)
    } else {
        copy_file(&source.path, target, Path::new(source.name.as_str()), tracker)
    }
}

/// Mirror `src` into `dst` depth-first. An existing destination directory is
/// merged into.
fn copy_dir(src: &Path, dst: &Path, rel: &Path, tracker: &mut Tracker<'_>) -> Result<(), OpsError> {
    let metadata = fs::metadata(src).map_err(|e| OpsError::io(src, e))?;
    match fs::create_dir(dst) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::AlreadyExists && dst.is_dir() => {}
        Err(e) => return Err(OpsError::io(dst, e)),
    }

    let mut children = fs::read_dir(src)
        .map_err(|e| OpsError::io(src, e))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| OpsError::io(src, e))?;
    children.sort_by_key(|c| c.file_name());

    for child in children {
        let name = child.file_name();
        let child_src = child.path();
        let child_dst = dst.join(&name);
        let child_rel = rel.join(&name);
        let is_dir = fs::metadata(&child_src)
            .map_err(|e| OpsError::io(&child_src, e))?
            .is_dir();
        if is_dir {
            copy_dir(&child_src, &child_dst, &child_rel, tracker)?;
        } else {
            copy_file(&child_src, &child_dst, &child_rel, tracker)?;
        }
    }

    // Applied last so read-only source directories can still be filled.
    fs::set_permissions(dst, metadata.permissions()).map_err(|e| OpsError::io(dst, e))
}

/// Stream one file's bytes and then copy its permission bits.
fn copy_file(src: &Path, dst: &Path, rel: &Path, tracker: &mut Tracker<'_>) -> Result<(), OpsError> {
    tracker.set_current(rel.display().to_string());
    check_distinct(src, dst)?;

    let mut reader = File::open(src).map_err(|e| OpsError::io(src, e))?;
    let permissions = reader
        .metadata()
        .map_err(|e| OpsError::io(src, e))?
        .permissions();
    let mut writer = File::create(dst).map_err(|e| OpsError::io(dst, e))?;

    let mut buf = vec![0u8; COPY_BUFFER_SIZE];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(OpsError::io(src, e)),
        };
        writer
            .write_all(&buf[..n])
            .map_err(|e| OpsError::io(dst, e))?;
        tracker.add_bytes(n as u64);
    }
    writer.flush().map_err(|e| OpsError::io(dst, e))?;
    drop(writer);

    fs::set_permissions(dst, permissions).map_err(|e| OpsError::io(dst, e))?;
    tracker.file_done();
    Ok(())
}

fn move_entry(
    source: &Entry,
    target: &Path,
    size: Size,
    tracker: &mut Tracker<'_>,
) -> Result<(), OpsError> {
    check_distinct(&source.path, target)?;
    if source.is_dir() && resolve(target).starts_with(resolve(&source.path)) {
        return Err(OpsError::IntoItself {
            path: source.path.clone(),
        });
    }

    match fs::rename(&source.path, target) {
        Ok(()) => {
            tracker.credit(size);
            Ok(())
        }
        Err(e) if needs_copy_fallback(&e) => {
            debug!(
                source = %source.path.display(),
                error = %e,
                "rename not possible, copying then removing source"
            );
            copy_entry(source, target, tracker)?;
            remove_path(&source.path)
        }
        Err(e) => Err(OpsError::io(&source.path, e)),
    }
}

/// Renames that fail only because of where the target lives: another
/// filesystem, or a non-empty directory to merge into.
fn needs_copy_fallback(err: &std::io::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::CrossesDevices | ErrorKind::DirectoryNotEmpty | ErrorKind::AlreadyExists
    )
}

pub(crate) fn remove_path(path: &Path) -> Result<(), OpsError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| OpsError::io(path, e))?;
    if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
    .map_err(|e| OpsError::io(path, e))
}
