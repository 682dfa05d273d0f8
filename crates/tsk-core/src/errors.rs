//! Cross-cutting error types for tasksync.
//!
//! Domain-specific errors (`StoreError`, `SyncError`, ...) live in their
//! respective crates. The CLI converges everything through `anyhow`.

use thiserror::Error;

/// Errors that can be raised while building or parsing core types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Input failed validation (empty title, unknown enum value, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A timestamp string matched none of the accepted formats.
    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },
}
