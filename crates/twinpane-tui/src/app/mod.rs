//! Main application state and logic.

mod clipboard;
mod constants;
pub mod input;
pub mod overwrite;
pub mod pane;
mod render;
pub mod state;
mod tasks;

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use twinpane_core::ListConfig;
use twinpane_ops::{
    OperationEvent, OperationId, OperationMode, OperationRequest, OpsError, ProgressEvent,
    validate_folder_name,
};

use crate::config::{TuiConfig, UserSettings};
use crate::event::{KeyAction, PreviewAction};
use crate::preview::{PreviewContent, PreviewError, PreviewState};
use crate::theme::Theme;

use self::constants::{CHROME_ROWS, MESSAGE_CHANNEL_SIZE, TICK_INTERVAL_MS};
use self::input::{InputResult, InputState};
use self::overwrite::{Decision, OverwriteSession};
use self::pane::{Pane, PaneId};
use self::render::{RenderContext, render_app};
use self::state::{AppMessage, InteractionMode, StatusMessage};

/// Application result type.
pub type AppResult<T> = color_eyre::Result<T>;

/// The copy/move currently owned by the engine.
#[derive(Debug, Clone)]
pub struct RunningOperation {
    pub id: OperationId,
    pub request: OperationRequest,
    pub started: Instant,
    /// Latest progress snapshot, if any arrived yet.
    pub progress: Option<ProgressEvent>,
}

impl RunningOperation {
    /// Bytes per second since the operation started.
    pub fn speed(&self) -> f64 {
        let done = self.progress.as_ref().map_or(0, |p| p.bytes_done);
        let secs = self.started.elapsed().as_secs_f64();
        if secs > 0.0 { done as f64 / secs } else { 0.0 }
    }
}

/// Main application state.
pub struct App {
    /// Current interaction mode.
    mode: InteractionMode,
    /// Color theme.
    theme: Theme,
    /// Persisted user settings.
    settings: UserSettings,
    /// Options for directory listings.
    list_config: ListConfig,
    left: Pane,
    right: Pane,
    active: PaneId,
    /// Last status or error message.
    status: Option<StatusMessage>,
    /// Sender handed to background tasks.
    msg_tx: mpsc::Sender<AppMessage>,
    /// Results from background tasks.
    msg_rx: mpsc::Receiver<AppMessage>,
    next_id: OperationId,
    /// Operation the engine is working on.
    in_flight: Option<RunningOperation>,
    /// Requests waiting for the engine, in order.
    queue: VecDeque<OperationRequest>,
    /// Conflicts reported while another prompt was open.
    pending_session: Option<OverwriteSession>,
    /// Terminal size (width, height).
    size: (u16, u16),
    should_quit: bool,
    /// Flag indicating UI needs redraw.
    needs_redraw: bool,
    /// Second shown by the status-line clock at the last draw.
    clock_second: i64,
}

impl App {
    /// Create the application. Panes start empty; call [`Self::load_panes`]
    /// (done by [`Self::run`]) to read them.
    pub fn new(config: TuiConfig) -> AppResult<Self> {
        let start = match &config.start_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        let start = std::fs::canonicalize(&start)?;
        if !start.is_dir() {
            color_eyre::eyre::bail!("not a directory: {}", start.display());
        }

        let settings = config.resolved_settings();
        let list_config = ListConfig::builder()
            .show_hidden(settings.show_hidden)
            .build()?;
        let (msg_tx, msg_rx) = mpsc::channel(MESSAGE_CHANNEL_SIZE);

        debug!(start = %start.display(), ?settings, "starting");
        Ok(Self {
            mode: InteractionMode::Normal,
            theme: Theme::for_variant(settings.theme),
            settings,
            list_config,
            left: Pane::new(PaneId::Left, start.clone(), true),
            right: Pane::new(PaneId::Right, start, false),
            active: PaneId::Left,
            status: None,
            msg_tx,
            msg_rx,
            next_id: OperationId::new(1),
            in_flight: None,
            queue: VecDeque::new(),
            pending_session: None,
            size: (80, 24),
            should_quit: false,
            needs_redraw: true,
            clock_second: 0,
        })
    }

    /// Run the application with async event loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<()> {
        let area = terminal.size()?;
        self.resize(area.width, area.height);
        self.load_panes();

        let period = Duration::from_millis(TICK_INTERVAL_MS);
        let mut interval = tokio::time::interval(period);
        let mut events = EventStream::new();

        while !self.should_quit {
            if self.needs_redraw {
                terminal.draw(|frame| self.render(frame))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased;

                Some(event) = events.next() => {
                    match event? {
                        Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                        Event::Resize(width, height) => self.resize(width, height),
                        _ => {}
                    }
                    self.needs_redraw = true;
                }

                Some(message) = self.msg_rx.recv() => {
                    self.handle_message(message);
                    self.needs_redraw = true;
                }

                _ = interval.tick() => {
                    let second = chrono::Local::now().timestamp();
                    if second != self.clock_second || self.in_flight.is_some() {
                        self.clock_second = second;
                        self.needs_redraw = true;
                    }
                }
            }
        }

        info!("quit");
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }

    /// Start reading both panes.
    pub fn load_panes(&mut self) {
        self.reload(PaneId::Left);
        self.reload(PaneId::Right);
    }

    /// Wait for the next background result.
    pub async fn next_message(&mut self) -> Option<AppMessage> {
        self.msg_rx.recv().await
    }

    pub fn mode(&self) -> &InteractionMode {
        &self.mode
    }

    pub fn pane(&self, id: PaneId) -> &Pane {
        match id {
            PaneId::Left => &self.left,
            PaneId::Right => &self.right,
        }
    }

    pub fn pane_mut(&mut self, id: PaneId) -> &mut Pane {
        match id {
            PaneId::Left => &mut self.left,
            PaneId::Right => &mut self.right,
        }
    }

    /// Which pane receives navigation keys.
    pub fn active(&self) -> PaneId {
        self.active
    }

    pub fn active_pane(&self) -> &Pane {
        self.pane(self.active)
    }

    fn active_pane_mut(&mut self) -> &mut Pane {
        self.pane_mut(self.active)
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn in_flight(&self) -> Option<&RunningOperation> {
        self.in_flight.as_ref()
    }

    /// Requests waiting behind the running operation.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// An operation is running or waiting.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some() || !self.queue.is_empty()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn set_status(&mut self, status: StatusMessage) {
        if status.is_error() {
            warn!("{}", status.text);
        }
        self.status = Some(status);
    }

    fn set_mode(&mut self, mode: InteractionMode) {
        debug!(from = self.mode.label(), to = mode.label(), "mode change");
        self.mode = mode;
    }

    /// Leave a prompt. Conflicts that arrived meanwhile take over.
    fn return_to_normal(&mut self) {
        self.set_mode(InteractionMode::Normal);
        if let Some(session) = self.pending_session.take() {
            self.set_mode(InteractionMode::ConfirmingOverwrite(session));
        }
    }

    /// Inner size of the preview area.
    fn preview_viewport(&self) -> (usize, usize) {
        let (width, height) = self.size;
        (
            width.saturating_sub(2) as usize,
            height.saturating_sub(CHROME_ROWS) as usize,
        )
    }

    /// Adapt pane heights and the preview viewport to a new terminal size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        let rows = height.saturating_sub(CHROME_ROWS) as usize;
        self.left.set_height(rows);
        self.right.set_height(rows);
        let (w, h) = self.preview_viewport();
        if let InteractionMode::Previewing(preview) = &mut self.mode {
            preview.resize(w, h);
        }
    }

    fn reload(&mut self, id: PaneId) {
        let path = self.pane(id).path().to_path_buf();
        tasks::load_directory(self.msg_tx.clone(), id, path, self.list_config.clone());
    }

    /// Route a key press to the current mode.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match &mut self.mode {
            InteractionMode::Normal => self.handle_action(KeyAction::from_key_event(key)),
            InteractionMode::CreatingFolder(input) => match input.handle_key(key) {
                InputResult::Continue => {}
                InputResult::Cancel => self.return_to_normal(),
                InputResult::Submit(name) => self.submit_folder(name),
            },
            InteractionMode::ConfirmingDelete { .. } => self.handle_delete_key(key),
            InteractionMode::ConfirmingOverwrite(_) => self.handle_overwrite_key(key),
            InteractionMode::Previewing(preview) => {
                if !preview.apply(PreviewAction::from_key_event(key)) {
                    self.return_to_normal();
                }
            }
        }
    }

    /// Handle a key action in normal mode.
    fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::MoveUp => self.active_pane_mut().move_up(),
            KeyAction::MoveDown => self.active_pane_mut().move_down(),
            KeyAction::PageUp => self.active_pane_mut().page_up(),
            KeyAction::PageDown => self.active_pane_mut().page_down(),
            KeyAction::JumpToTop => self.active_pane_mut().jump_to_top(),
            KeyAction::JumpToBottom => self.active_pane_mut().jump_to_bottom(),
            KeyAction::Open => self.open_current(),
            KeyAction::NavigateBack => {
                if self.active_pane_mut().ascend().is_some() {
                    self.reload(self.active);
                }
            }
            KeyAction::ToggleSelection => self.active_pane_mut().toggle_selection(),
            KeyAction::Search(c) => self.active_pane_mut().push_search(c),
            KeyAction::ClearSearch => self.active_pane_mut().clear_search(),
            KeyAction::SwitchPane => self.switch_pane(),
            KeyAction::Preview => self.start_preview(),
            KeyAction::Copy => self.start_transfer(OperationMode::Copy),
            KeyAction::Move => self.start_transfer(OperationMode::Move),
            KeyAction::NewFolder => self.set_mode(InteractionMode::CreatingFolder(InputState::new())),
            KeyAction::Delete => self.confirm_delete(),
            KeyAction::CopyPath => self.copy_path(),
            KeyAction::Quit | KeyAction::ForceQuit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn switch_pane(&mut self) {
        self.active = self.active.other();
        self.left.active = self.active == PaneId::Left;
        self.right.active = self.active == PaneId::Right;
    }

    /// Enter the directory under the cursor, or open a file with the system
    /// handler.
    fn open_current(&mut self) {
        let Some(entry) = self.active_pane().current() else {
            return;
        };
        if entry.is_dir() {
            if self.active_pane_mut().enter().is_some() {
                self.reload(self.active);
            }
        } else {
            let path = entry.path.clone();
            debug!(path = %path.display(), "opening with system handler");
            tasks::open_file(self.msg_tx.clone(), path);
        }
    }

    fn start_preview(&mut self) {
        let Some(entry) = self.active_pane().current() else {
            return;
        };
        if entry.is_dir() {
            self.set_status(StatusMessage::info("Only files can be previewed"));
            return;
        }
        let (path, name) = (entry.path.clone(), entry.name.to_string());
        let (width, height) = self.preview_viewport();
        tasks::load_preview(
            self.msg_tx.clone(),
            path.clone(),
            self.settings.preview_max_bytes,
        );
        self.set_mode(InteractionMode::Previewing(PreviewState::new(
            path, name, width, height,
        )));
    }

    /// Copy or move the selection (or the cursor entry) into the other pane.
    fn start_transfer(&mut self, mode: OperationMode) {
        if self.is_busy() {
            self.set_status(StatusMessage::error(format!(
                "Cannot {}: another operation is in progress",
                mode.verb()
            )));
            return;
        }
        let sources = self.active_pane().selection_or_current();
        if sources.is_empty() {
            self.set_status(StatusMessage::info(format!("Nothing to {}", mode.verb())));
            return;
        }
        let destination = self.pane(self.active.other()).path().to_path_buf();
        if same_directory(&destination, self.active_pane().path()) {
            self.set_status(StatusMessage::error(
                "Source and destination are the same directory",
            ));
            return;
        }

        self.active_pane_mut().clear_selection();
        self.enqueue(OperationRequest::new(sources, destination, mode, false));
    }

    /// Queue a request and start it if the engine is idle.
    fn enqueue(&mut self, request: OperationRequest) {
        self.queue.push_back(request);
        self.pump();
    }

    fn pump(&mut self) {
        if self.in_flight.is_some() {
            return;
        }
        let Some(request) = self.queue.pop_front() else {
            return;
        };
        let id = self.next_id;
        self.next_id = id.next();
        info!(
            %id,
            mode = %request.mode,
            items = request.sources.len(),
            destination = %request.destination.display(),
            force = request.force,
            "starting operation"
        );
        tasks::run_operation(self.msg_tx.clone(), id, request.clone());
        self.in_flight = Some(RunningOperation {
            id,
            request,
            started: Instant::now(),
            progress: None,
        });
    }

    fn submit_folder(&mut self, name: String) {
        if let Err(e) = validate_folder_name(&name) {
            let reason = match e {
                OpsError::InvalidName { reason, .. } => reason,
                other => other.to_string(),
            };
            if let InteractionMode::CreatingFolder(input) = &mut self.mode {
                input.set_error(reason);
            }
            return;
        }
        let parent = self.active_pane().path().to_path_buf();
        tasks::create_folder(self.msg_tx.clone(), self.active, parent, name);
        self.return_to_normal();
    }

    fn confirm_delete(&mut self) {
        let Some(target) = self.active_pane().current().filter(|e| !e.is_parent()) else {
            return;
        };
        let target = target.clone();
        self.set_mode(InteractionMode::ConfirmingDelete { target });
    }

    fn handle_delete_key(&mut self, key: KeyEvent) {
        use crossterm::event::KeyCode;
        match key.code {
            KeyCode::Char('y' | 'Y') => {
                if let InteractionMode::ConfirmingDelete { target } =
                    std::mem::take(&mut self.mode)
                {
                    tasks::delete(self.msg_tx.clone(), self.active, target);
                }
                self.return_to_normal();
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => self.return_to_normal(),
            _ => {}
        }
    }

    fn handle_overwrite_key(&mut self, key: KeyEvent) {
        let Some(decision) = Decision::from_key_event(key) else {
            return;
        };
        let InteractionMode::ConfirmingOverwrite(session) = &mut self.mode else {
            return;
        };
        let name = session.current().map(|c| c.name().to_string());
        let resolution = session.decide(decision);
        debug!(?decision, item = ?name, "overwrite decision");

        if let Some(request) = resolution.request {
            self.enqueue(request);
        }
        if resolution.finished {
            if decision == Decision::Cancel {
                self.set_status(StatusMessage::info("Overwrite cancelled"));
            }
            self.return_to_normal();
        }
    }

    fn copy_path(&mut self) {
        let pane = self.active_pane();
        let path = match pane.current() {
            Some(entry) if !entry.is_parent() => entry.path.clone(),
            _ => pane.path().to_path_buf(),
        };
        tasks::copy_text(self.msg_tx.clone(), path.display().to_string());
    }

    /// Apply a background result. Only conflicts change the mode.
    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::DirectoryLoaded { pane, path, result } => {
                let result = result.map_err(|e| {
                    warn!(path = %path.display(), error = %e, "listing failed");
                    e.to_string()
                });
                if !self.pane_mut(pane).apply_listing(&path, result) {
                    debug!(path = %path.display(), "discarding stale listing");
                }
            }
            AppMessage::Operation(event) => self.handle_operation_event(event),
            AppMessage::FolderCreated { pane, result } => {
                match result {
                    Ok(path) => {
                        let name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        self.set_status(StatusMessage::info(format!("Created {name}")));
                    }
                    Err(e) => self.set_status(StatusMessage::error(e.to_string())),
                }
                self.reload(pane);
            }
            AppMessage::Deleted { pane, name, result } => {
                match result {
                    Ok(()) => {
                        self.set_status(StatusMessage::info(format!("Deleted {name}")));
                        self.pane_mut(pane).retreat_from_end();
                    }
                    Err(e) => self.set_status(StatusMessage::error(e.to_string())),
                }
                self.reload(pane);
                if self.pane(pane.other()).path() == self.pane(pane).path() {
                    self.reload(pane.other());
                }
            }
            AppMessage::PreviewReady { path, result } => self.handle_preview_ready(path, result),
            AppMessage::Opened { path, result } => match result {
                Ok(()) => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    self.set_status(StatusMessage::info(format!("Opened {name}")));
                }
                Err(e) => self.set_status(StatusMessage::error(format!(
                    "Cannot open {}: {e}",
                    path.display()
                ))),
            },
            AppMessage::ClipboardCopied(result) => match result {
                Ok(method) => self.set_status(StatusMessage::info(method.describe())),
                Err(e) => {
                    self.set_status(StatusMessage::error(format!("Clipboard error: {e}")))
                }
            },
        }
    }

    fn handle_preview_ready(
        &mut self,
        path: PathBuf,
        result: Result<PreviewContent, PreviewError>,
    ) {
        let InteractionMode::Previewing(preview) = &mut self.mode else {
            debug!(path = %path.display(), "preview closed before content arrived");
            return;
        };
        if preview.path != path {
            return;
        }
        match result {
            Ok(content) => {
                let text = content.display_text(&preview.name);
                preview.set_text(text);
            }
            Err(e) => {
                self.set_status(StatusMessage::error(e.to_string()));
                self.return_to_normal();
            }
        }
    }

    fn handle_operation_event(&mut self, event: OperationEvent) {
        let Some(running) = self.in_flight.as_mut() else {
            debug!(id = %event.id(), "event for unknown operation");
            return;
        };
        if running.id != event.id() {
            debug!(id = %event.id(), "event for stale operation");
            return;
        }

        match event {
            OperationEvent::Progress(progress) if !progress.terminal => {
                running.progress = Some(progress);
            }
            OperationEvent::Progress(progress) => {
                self.in_flight = None;
                let summary = progress.summary();
                match progress.outcome() {
                    Some(outcome) if outcome.is_success() => {
                        info!(id = %progress.id, "{summary}");
                        self.set_status(StatusMessage::info(summary));
                    }
                    _ => self.set_status(StatusMessage::error(summary)),
                }
                self.load_panes();
                self.pump();
            }
            OperationEvent::ConflictsFound { id, conflicts } => {
                let Some(running) = self.in_flight.take() else {
                    return;
                };
                info!(%id, count = conflicts.len(), "destination conflicts");
                self.set_status(StatusMessage::info(format!(
                    "{} item(s) already exist in {}",
                    conflicts.len(),
                    running.request.destination.display()
                )));
                let session = OverwriteSession::new(
                    conflicts,
                    running.request.destination,
                    running.request.mode,
                );
                if self.mode.is_normal() {
                    self.set_mode(InteractionMode::ConfirmingOverwrite(session));
                } else {
                    self.pending_session = Some(session);
                }
                self.pump();
            }
        }
    }
}

/// Both paths name the same directory once symlinks are resolved.
fn same_directory(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ctx = RenderContext {
            mode: &self.mode,
            theme: &self.theme,
            left: &self.left,
            right: &self.right,
            active: self.active,
            status: self.status.as_ref(),
            operation: self.in_flight.as_ref(),
            queued: self.queue.len(),
        };
        render_app(&ctx, area, buf);
    }
}
