//! Preview content loading.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default number of bytes shown before a file is truncated (100 KiB).
pub const DEFAULT_PREVIEW_BYTES: u64 = 100 * 1024;

/// Error that can occur during preview loading.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// Directories have no content preview.
    #[error("Is a directory: {0}")]
    IsDirectory(PathBuf),

    /// File could not be read.
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What the preview shows for a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewContent {
    /// The whole file as text.
    Text(String),
    /// The first `limit` bytes of a larger text file.
    Truncated { text: String, limit: u64 },
    /// Not valid UTF-8 or contains NUL bytes.
    Binary,
}

impl PreviewContent {
    /// Text to display for a file called `name`.
    pub fn display_text(&self, name: &str) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Truncated { text, limit } => format!(
                "--- File too large for preview ({name}), showing first {limit} bytes ---\n{text}"
            ),
            Self::Binary => format!("--- Binary file: {name} ---"),
        }
    }
}

/// Loads preview content for files.
pub struct PreviewLoader;

impl PreviewLoader {
    /// Read at most `max_bytes` of `path` and classify it.
    pub fn load(path: &Path, max_bytes: u64) -> Result<PreviewContent, PreviewError> {
        let io_err = |source| PreviewError::Io {
            path: path.to_path_buf(),
            source,
        };
        if path.is_dir() {
            return Err(PreviewError::IsDirectory(path.to_path_buf()));
        }

        let file = File::open(path).map_err(io_err)?;
        // One extra byte tells us whether there is more.
        let mut bytes = Vec::new();
        file.take(max_bytes.saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(io_err)?;

        let truncated = bytes.len() as u64 > max_bytes;
        if truncated {
            bytes.truncate(max_bytes as usize);
        }

        let Some(text) = decode_text(&bytes, truncated) else {
            return Ok(PreviewContent::Binary);
        };

        Ok(if truncated {
            PreviewContent::Truncated {
                text,
                limit: max_bytes,
            }
        } else {
            PreviewContent::Text(text)
        })
    }
}

/// UTF-8 text without NUL bytes. When the buffer was cut short, a multi-byte
/// character split at the end is dropped rather than counted as binary.
fn decode_text(bytes: &[u8], truncated: bool) -> Option<String> {
    if bytes.contains(&0) {
        return None;
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => Some(text.to_string()),
        Err(e) if truncated && e.error_len().is_none() => {
            Some(String::from_utf8_lossy(&bytes[..e.valid_up_to()]).into_owned())
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_small_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "line one\nline two\n").unwrap();

        let content = PreviewLoader::load(&path, DEFAULT_PREVIEW_BYTES).unwrap();
        assert_eq!(content, PreviewContent::Text("line one\nline two\n".into()));
    }

    #[test]
    fn test_load_binary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, [b'a', 0, b'b']).unwrap();

        let content = PreviewLoader::load(&path, DEFAULT_PREVIEW_BYTES).unwrap();
        assert_eq!(content, PreviewContent::Binary);
        assert_eq!(content.display_text("blob.bin"), "--- Binary file: blob.bin ---");

        std::fs::write(&path, [0xff, 0xfe, 0xfd]).unwrap();
        assert_eq!(
            PreviewLoader::load(&path, DEFAULT_PREVIEW_BYTES).unwrap(),
            PreviewContent::Binary
        );
    }

    #[test]
    fn test_load_truncates_large_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.txt");
        std::fs::write(&path, "x".repeat(20)).unwrap();

        let content = PreviewLoader::load(&path, 8).unwrap();
        assert_eq!(
            content,
            PreviewContent::Truncated {
                text: "x".repeat(8),
                limit: 8
            }
        );
        let shown = content.display_text("big.txt");
        assert!(shown.starts_with("--- File too large for preview (big.txt), showing first 8 bytes ---\n"));
    }

    #[test]
    fn test_truncation_inside_multibyte_char() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("utf8.txt");
        // "aé" is 3 bytes; cutting at 2 splits the é.
        std::fs::write(&path, "aéb").unwrap();

        let content = PreviewLoader::load(&path, 2).unwrap();
        assert_eq!(
            content,
            PreviewContent::Truncated {
                text: "a".into(),
                limit: 2
            }
        );
    }

    #[test]
    fn test_exact_limit_is_not_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exact.txt");
        std::fs::write(&path, "12345678").unwrap();

        assert_eq!(
            PreviewLoader::load(&path, 8).unwrap(),
            PreviewContent::Text("12345678".into())
        );
    }

    #[test]
    fn test_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            PreviewLoader::load(dir.path(), 10),
            Err(PreviewError::IsDirectory(_))
        ));
    }
}
