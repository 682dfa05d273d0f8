use std::fmt;

use serde::{Deserialize, Serialize};

/// Authenticated caller identity for task API requests.
///
/// Produced by `tsk-auth`, consumed by `tsk-client`. Contains only data
/// fields, no resolution logic.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User ID used to build personal task routes (`/api/{user_id}/tasks`).
    pub user_id: String,
    /// Bearer token sent with every request.
    pub token: String,
}

impl Identity {
    #[must_use]
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            token: token.into(),
        }
    }

    /// Both fields are required for any API call.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.user_id.trim().is_empty() && !self.token.trim().is_empty()
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("user_id", &self.user_id)
            .field("token", &"<redacted>")
            .finish()
    }
}
