//! Listing configuration.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Options applied by [`crate::list_directory`].
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct ListConfig {
    /// Include dot-files.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub show_hidden: bool,

    /// Prepend the synthetic `..` row (never added at the filesystem root).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_parent: bool,
}

fn default_true() -> bool {
    true
}

impl ListConfig {
    /// Create a new list config builder.
    pub fn builder() -> ListConfigBuilder {
        ListConfigBuilder::default()
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            show_hidden: true,
            include_parent: true,
        }
    }
}
