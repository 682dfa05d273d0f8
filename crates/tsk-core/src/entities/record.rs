use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::entities::Task;
use crate::enums::{TaskPriority, TaskStatus};
use crate::timestamp;

/// A task exactly as the task API reports it.
///
/// The API predates the four-state status field, so `status` may be absent,
/// empty, or a value this client does not know; all of those deserialize to
/// `None` and the caller resolves a display status. `is_completed` and
/// `user_id` are legacy fields some endpoints still send.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "priority_or_default")]
    pub priority: TaskPriority,
    #[serde(default, deserialize_with = "reported_status")]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub is_completed: Option<bool>,
    #[serde(default)]
    pub workspace_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskRecord {
    /// Completion flag as reported, treating an absent flag as `false`.
    #[must_use]
    pub fn reported_completion(&self) -> bool {
        self.is_completed.unwrap_or(false)
    }

    /// Convert into a [`Task`] carrying the given display status.
    ///
    /// When the API omitted `is_completed`, the flag mirrors `status`.
    #[must_use]
    pub fn into_task(self, status: TaskStatus) -> Task {
        Task {
            is_completed: self.is_completed.unwrap_or(status.is_done()),
            created_by: self.created_by.or(self.user_id).unwrap_or_default(),
            id: self.id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            status,
            workspace_id: self.workspace_id.filter(|id| !id.is_empty()),
            project_id: self.project_id,
            assigned_to: self.assigned_to,
            created_at: self.created_at,
            updated_at: self.updated_at,
            completed_at: self.completed_at,
        }
    }
}

fn reported_status<'de, D>(deserializer: D) -> Result<Option<TaskStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| value.parse().ok()))
}

fn priority_or_default<'de, D>(deserializer: D) -> Result<TaskPriority, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|value| value.parse().ok())
        .unwrap_or_default())
}
