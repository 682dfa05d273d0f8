//! Kanban board view.
//!
//! The board is the second writer of display status: it always writes the
//! status cache, and for workspace tasks also patches the server status.
//! Personal tasks are only moved in the cache.

use tsk_cache::StatusCache;
use tsk_client::TaskStore;
use tsk_core::entities::Task;
use tsk_core::enums::TaskStatus;
use tsk_core::responses::BoardColumn;

use crate::error::SyncError;

/// Group tasks into the four status columns in workflow order.
#[must_use]
pub fn columns(tasks: &[Task]) -> Vec<BoardColumn> {
    TaskStatus::ALL
        .iter()
        .map(|&status| BoardColumn {
            status,
            tasks: tasks
                .iter()
                .filter(|task| task.status == status)
                .cloned()
                .collect(),
        })
        .collect()
}

/// Move a task to another column.
///
/// # Errors
///
/// Returns [`SyncError::NotConfirmed`] for placeholders, and for workspace
/// tasks any failure of the status patch. The cache is only written once the
/// patch succeeds.
pub async fn move_task(
    store: &dyn TaskStore,
    cache: &dyn StatusCache,
    task: &Task,
    status: TaskStatus,
) -> Result<Task, SyncError> {
    if task.is_temporary() {
        return Err(SyncError::NotConfirmed {
            id: task.id.clone(),
        });
    }
    let scope = task.scope();
    let moved = if scope.is_personal() {
        let mut moved = task.clone();
        moved.status = status;
        moved
    } else {
        store
            .update_status(&scope, &task.id, status)
            .await?
            .into_task(status)
    };
    cache.write_one(&task.id, status);
    tracing::info!(id = %task.id, %scope, %status, "task moved");
    Ok(moved)
}
