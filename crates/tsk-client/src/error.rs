//! Task store error types.

use thiserror::Error;

/// Errors that can occur when talking to the task API.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No identity could be resolved; raised before any request is sent.
    #[error("not authenticated; run `tsk auth login` or set TASKSYNC_AUTH__TOKEN")]
    NotAuthenticated,

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The task API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Failed to parse a task API response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The API returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },
}

impl StoreError {
    /// HTTP status of an API error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }
}
