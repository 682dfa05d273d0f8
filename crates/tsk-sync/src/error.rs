use thiserror::Error;
use tsk_client::StoreError;
use tsk_core::errors::CoreError;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("not authenticated; run `tsk auth login` or set TASKSYNC_AUTH__TOKEN")]
    NotAuthenticated,

    #[error("task not found: {id}")]
    NotFound { id: String },

    #[error("task {id} has not been confirmed by the server yet")]
    NotConfirmed { id: String },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("create of {temp_id} was cancelled before the server confirmed it")]
    Cancelled { temp_id: String },

    #[error(transparent)]
    Store(StoreError),
}

impl SyncError {
    /// Precondition failures are raised before any optimistic change or
    /// network call, so nothing was rolled back.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated
                | Self::NotFound { .. }
                | Self::NotConfirmed { .. }
                | Self::Validation(_)
        )
    }
}

impl From<StoreError> for SyncError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotAuthenticated => Self::NotAuthenticated,
            other => Self::Store(other),
        }
    }
}

impl From<CoreError> for SyncError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(message) => Self::Validation(message),
            other => Self::Validation(other.to_string()),
        }
    }
}
