//! Terminal user interface for twinpane.
//!
//! Two directory panes side by side, with copy and move running in the
//! background and a prompt for every existing destination file.
//!
//! # Usage
//!
//! ```rust,no_run
//! use twinpane_tui::TuiConfig;
//!
//! twinpane_tui::run(TuiConfig::new().with_start_dir("/tmp")).unwrap();
//! ```
//!
//! # Keyboard
//!
//! - `Up`/`Down` (or `k`/`j`), `PgUp`/`PgDn`/`Home`/`End` - Move the cursor
//! - `Enter` - Enter a directory or open a file
//! - `Backspace` or `h` - Parent directory
//! - `Tab` - Switch pane
//! - `Insert` or `Alt-i` - Toggle selection
//! - `F3`/`F5`/`F6`/`F7`/`F8`/`F9` or `Alt-v/c/m/n/d/p` - View, copy, move,
//!   new folder, delete, copy path
//! - `F10`, `Alt-q` or `Ctrl-c` - Quit
//!
//! Typing other letters jumps to the first matching name; `Esc` clears the search.

pub mod app;
pub mod config;
mod event;
pub mod preview;
mod theme;
mod ui;

pub use app::{App, AppResult};
pub use config::{ThemeVariant, TuiConfig, UserSettings};
pub use event::{KeyAction, PreviewAction};
pub use theme::Theme;

/// Run the TUI application.
pub fn run(config: TuiConfig) -> AppResult<()> {
    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()?;

    // Fail before taking over the terminal if the start directory is bad.
    let app = App::new(config)?;

    let terminal = ratatui::init();
    let result = rt.block_on(app.run(terminal));
    ratatui::restore();

    // A running copy/move is not waited for.
    rt.shutdown_timeout(std::time::Duration::from_millis(100));

    result
}
