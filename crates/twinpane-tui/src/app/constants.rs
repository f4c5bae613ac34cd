//! Application constants.

/// Event loop tick interval in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 50;

/// Channel buffer size for background task results.
pub const MESSAGE_CHANNEL_SIZE: usize = 100;

/// Rows taken by chrome around the pane lists: two borders, the status line
/// and the hints line.
pub const CHROME_ROWS: u16 = 4;

/// Status-line timestamp format.
pub const CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
