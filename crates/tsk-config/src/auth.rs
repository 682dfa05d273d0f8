//! Static credentials.
//!
//! When both fields are set they take precedence over credentials stored by
//! `tsk auth login`. Intended for CI and scripted use.

use serde::{Deserialize, Serialize};
use tsk_core::identity::Identity;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// User ID for personal task routes.
    #[serde(default)]
    pub user_id: String,

    /// Bearer token.
    #[serde(default)]
    pub token: String,
}

impl AuthConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.user_id.trim().is_empty() && !self.token.trim().is_empty()
    }

    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.is_configured()
            .then(|| Identity::new(self.user_id.trim(), self.token.trim()))
    }
}
