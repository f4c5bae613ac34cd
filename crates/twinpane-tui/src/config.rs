//! Startup configuration and persisted user settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::warn;

use crate::preview::DEFAULT_PREVIEW_BYTES;

/// Theme variant (dark or light).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

/// Settings read from `settings.toml` in the user config directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Color theme.
    pub theme: ThemeVariant,
    /// List dot-files in the panes.
    pub show_hidden: bool,
    /// Files larger than this are truncated in the preview.
    pub preview_max_bytes: u64,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: ThemeVariant::Dark,
            show_hidden: true,
            preview_max_bytes: DEFAULT_PREVIEW_BYTES,
        }
    }
}

impl UserSettings {
    /// Get the config file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("twinpane").join("settings.toml"))
    }

    /// Load settings from disk, or return defaults.
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from `path`. A missing file yields defaults silently;
    /// an unreadable or malformed one yields defaults with a warning.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read settings");
                return Self::default();
            }
        };
        toml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "invalid settings, using defaults");
            Self::default()
        })
    }
}

/// Options passed from the command line into the TUI.
#[derive(Debug, Clone, Default)]
pub struct TuiConfig {
    /// Directory both panes start in (defaults to the working directory).
    pub start_dir: Option<PathBuf>,
    /// Settings override; loaded from disk when absent.
    pub settings: Option<UserSettings>,
    /// Theme override taking precedence over the settings file.
    pub theme: Option<ThemeVariant>,
}

impl TuiConfig {
    /// Create a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start browsing from `dir`.
    pub fn with_start_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start_dir = Some(dir.into());
        self
    }

    /// Use these settings instead of reading the settings file.
    pub fn with_settings(mut self, settings: UserSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Force a theme.
    pub fn with_theme(mut self, theme: ThemeVariant) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Settings with overrides applied.
    pub fn resolved_settings(&self) -> UserSettings {
        let mut settings = self.settings.clone().unwrap_or_else(UserSettings::load);
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
        settings
    }
}
