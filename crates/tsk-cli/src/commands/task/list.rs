use tsk_core::entities::Task;
use tsk_core::enums::{TaskPriority, TaskStatus};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ListArgs;
use crate::commands::shared::parse::parse_optional;
use crate::context::AppContext;
use crate::output::output;

pub fn run(args: &ListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = parse_optional::<TaskStatus>(args.status.as_deref(), "status")?;
    let priority = parse_optional::<TaskPriority>(args.priority.as_deref(), "priority")?;
    let tasks = filter(ctx.sync.tasks(), status, priority);
    output(&tasks, flags.format)
}

fn filter(
    mut tasks: Vec<Task>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
) -> Vec<Task> {
    if let Some(status) = status {
        tasks.retain(|task| task.status == status);
    }
    if let Some(priority) = priority {
        tasks.retain(|task| task.priority == priority);
    }
    tasks
}
