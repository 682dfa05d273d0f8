//! Dashboard counts over the task collection.

use tsk_core::entities::Task;
use tsk_core::enums::TaskStatus;
use tsk_core::responses::TaskSummary;

#[must_use]
pub fn summarize(tasks: &[Task], recent_limit: usize) -> TaskSummary {
    let count = |status: TaskStatus| tasks.iter().filter(|task| task.status == status).count();

    let mut recent = tasks.to_vec();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(recent_limit);

    TaskSummary {
        total: tasks.len(),
        completed: count(TaskStatus::Done),
        in_progress: count(TaskStatus::InProgress),
        to_do: count(TaskStatus::ToDo),
        review: count(TaskStatus::Review),
        high_priority: tasks
            .iter()
            .filter(|task| task.priority.is_high() && !task.status.is_done())
            .count(),
        recent,
    }
}
