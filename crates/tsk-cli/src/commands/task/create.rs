use tsk_core::entities::TaskCreate;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CreateArgs;
use crate::commands::shared::parse::parse_optional;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(args: CreateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let input = TaskCreate {
        priority: parse_optional(args.priority.as_deref(), "priority")?,
        status: parse_optional(args.status.as_deref(), "status")?,
        title: args.title,
        description: args.description,
        project_id: args.project,
        assigned_to: args.assignee,
    };
    let task = ctx.sync.create(input).await?;
    output(&task, flags.format)
}
