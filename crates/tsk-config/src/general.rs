//! General application configuration.

use serde::{Deserialize, Serialize};
use tsk_core::scope::Scope;

/// Default number of recent tasks on the dashboard summary.
const fn default_recent_limit() -> u32 {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default workspace. Empty means personal tasks.
    #[serde(default)]
    pub workspace_id: String,

    /// Number of recent tasks listed by `tsk summary`.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            workspace_id: String::new(),
            recent_limit: default_recent_limit(),
        }
    }
}

impl GeneralConfig {
    #[must_use]
    pub fn scope(&self) -> Scope {
        Scope::from_workspace_id(Some(self.workspace_id.as_str()))
    }
}
