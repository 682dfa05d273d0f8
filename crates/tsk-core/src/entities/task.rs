use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::TaskCreate;
use crate::enums::{TaskPriority, TaskStatus};
use crate::ids;
use crate::scope::Scope;

/// A task as held in the in-memory collection, with its display status
/// already resolved.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    /// Legacy mirror of `status == DONE`, maintained by the completion toggle.
    pub is_completed: bool,
    /// `None` for personal tasks.
    pub workspace_id: Option<String>,
    pub project_id: Option<String>,
    pub created_by: String,
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Build the optimistic placeholder shown while a create is in flight.
    ///
    /// Scope and provenance fields are left for the server to assign.
    #[must_use]
    pub fn placeholder(id: String, input: &TaskCreate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title.clone(),
            description: input.description.clone(),
            priority: input.priority.unwrap_or_default(),
            status: input.status.unwrap_or(TaskStatus::ToDo),
            is_completed: false,
            workspace_id: None,
            project_id: input.project_id.clone(),
            created_by: String::new(),
            assigned_to: input.assigned_to.clone(),
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// The scope every mutation on this task must use.
    #[must_use]
    pub fn scope(&self) -> Scope {
        Scope::from_workspace_id(self.workspace_id.as_deref())
    }

    /// Whether this is an unconfirmed placeholder.
    #[must_use]
    pub fn is_temporary(&self) -> bool {
        ids::is_temporary(&self.id)
    }
}
