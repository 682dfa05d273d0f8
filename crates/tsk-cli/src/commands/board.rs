use serde::Serialize;
use tsk_core::enums::{TaskPriority, TaskStatus};
use tsk_core::responses::BoardColumn;
use tsk_sync::board;

use crate::cli::subcommands::BoardCommands;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Flattened board for table output: one row per task, in column order.
#[derive(Serialize)]
struct BoardRow<'a> {
    status: TaskStatus,
    id: &'a str,
    title: &'a str,
    priority: TaskPriority,
}

/// Handle `tsk board <subcommand>`.
pub async fn handle(
    action: &BoardCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        BoardCommands::Show => {
            let columns = board::columns(&ctx.sync.tasks());
            if flags.format == OutputFormat::Table {
                output(&rows(&columns), flags.format)
            } else {
                output(&columns, flags.format)
            }
        }
        BoardCommands::Move { id, status } => {
            let status = parse_enum::<TaskStatus>(status, "status")?;
            let task = ctx.sync.move_task(id, status).await?;
            output(&task, flags.format)
        }
    }
}

fn rows(columns: &[BoardColumn]) -> Vec<BoardRow<'_>> {
    columns
        .iter()
        .flat_map(|column| {
            column.tasks.iter().map(|task| BoardRow {
                status: column.status,
                id: &task.id,
                title: &task.title,
                priority: task.priority,
            })
        })
        .collect()
}
