//! The remote task store boundary.

use async_trait::async_trait;
use tsk_core::entities::{TaskCreate, TaskRecord, TaskUpdate};
use tsk_core::enums::TaskStatus;
use tsk_core::identity::Identity;
use tsk_core::scope::Scope;

use crate::error::StoreError;

/// Remote CRUD over tasks, scoped to a workspace or to the current user.
///
/// Every operation resolves an identity first and fails with
/// [`StoreError::NotAuthenticated`] before any network call when there is
/// none. Records come back exactly as reported; display status resolution
/// is the caller's job.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Resolve the caller identity or fail with `NotAuthenticated`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotAuthenticated`] when no identity is available.
    fn ensure_identity(&self) -> Result<Identity, StoreError>;

    /// Fetch the full task set for a scope.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on missing identity, transport failure,
    /// non-success status, or an unparseable payload.
    async fn try_list(&self, scope: &Scope) -> Result<Vec<TaskRecord>, StoreError>;

    /// Fetch the full task set for a scope, treating any failure as empty.
    async fn list(&self, scope: &Scope) -> Vec<TaskRecord> {
        self.try_list(scope).await.unwrap_or_else(|e| {
            tracing::warn!(%scope, error = %e, "task list failed; returning empty set");
            Vec::new()
        })
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] on missing identity or request failure.
    async fn create(&self, input: &TaskCreate, scope: &Scope) -> Result<TaskRecord, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] on missing identity or request failure.
    async fn get(&self, scope: &Scope, id: &str) -> Result<TaskRecord, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] on missing identity or request failure.
    async fn update(
        &self,
        scope: &Scope,
        id: &str,
        patch: &TaskUpdate,
    ) -> Result<TaskRecord, StoreError>;

    /// Flip completion server-side.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on missing identity or request failure.
    async fn toggle_complete(&self, scope: &Scope, id: &str) -> Result<TaskRecord, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] on missing identity or request failure.
    async fn update_status(
        &self,
        scope: &Scope,
        id: &str,
        status: TaskStatus,
    ) -> Result<TaskRecord, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] on missing identity or request failure.
    async fn delete(&self, scope: &Scope, id: &str) -> Result<(), StoreError>;
}
