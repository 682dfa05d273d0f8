//! Response types returned by synchronizer read models and `tsk` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Task;
use crate::enums::TaskStatus;

/// Dashboard counts over the current task collection (`tsk summary`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub to_do: usize,
    pub review: usize,
    /// `HIGH` or `URGENT` tasks that are not done.
    pub high_priority: usize,
    /// Most recently created tasks, newest first.
    pub recent: Vec<Task>,
}

/// One column of the kanban board (`tsk board show`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BoardColumn {
    pub status: TaskStatus,
    pub tasks: Vec<Task>,
}
