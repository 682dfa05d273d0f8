use tsk_core::entities::TaskUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::UpdateArgs;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(args: UpdateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    validate_update_args(&args)?;

    let mut builder = TaskUpdateBuilder::new();
    if let Some(title) = args.title {
        builder = builder.title(title);
    }
    if let Some(description) = args.description {
        builder = builder.description(Some(description));
    }
    if let Some(priority) = args.priority.as_deref() {
        builder = builder.priority(parse_enum(priority, "priority")?);
    }
    if let Some(status) = args.status.as_deref() {
        builder = builder.status(parse_enum(status, "status")?);
    }
    if let Some(assignee) = args.assignee {
        builder = builder.assigned_to(Some(assignee));
    }

    let task = ctx.sync.update(&args.id, builder.build()).await?;
    output(&task, flags.format)
}

fn validate_update_args(args: &UpdateArgs) -> anyhow::Result<()> {
    if args.title.is_none()
        && args.description.is_none()
        && args.priority.is_none()
        && args.status.is_none()
        && args.assignee.is_none()
    {
        anyhow::bail!(
            "At least one of --title, --description, --priority, --status, or --assignee must be provided"
        );
    }
    Ok(())
}
