//! File preview: one-shot content loading plus wrapped-line scrolling.

mod content;
mod state;

pub use content::{DEFAULT_PREVIEW_BYTES, PreviewContent, PreviewError, PreviewLoader};
pub use state::PreviewState;
