//! Local status cache settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// File name of the status cache inside the data directory.
pub const STATUS_CACHE_FILE: &str = "kanban-task-statuses.json";

const fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Persist the status cache to disk. When disabled the cache lives in
    /// memory for the duration of the process.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Explicit cache file path. Empty means `<data_dir>/tasksync/kanban-task-statuses.json`.
    #[serde(default)]
    pub path: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            path: String::new(),
        }
    }
}

impl CacheConfig {
    /// Resolve the cache file path, or `None` if no data directory exists.
    #[must_use]
    pub fn resolved_path(&self) -> Option<PathBuf> {
        if !self.path.trim().is_empty() {
            return Some(PathBuf::from(self.path.trim()));
        }
        dirs::data_dir().map(|dir| dir.join("tasksync").join(STATUS_CACHE_FILE))
    }
}
