use schemars::schema_for;
use tsk_core::entities::{Task, TaskCreate, TaskUpdate};
use tsk_core::responses::{BoardColumn, TaskSummary};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `tsk schema <type>`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema(&args.type_name)?, flags.format)
}

fn schema(type_name: &str) -> anyhow::Result<schemars::Schema> {
    let schema = match type_name {
        "task" => schema_for!(Task),
        "task-create" => schema_for!(TaskCreate),
        "task-update" => schema_for!(TaskUpdate),
        "summary" => schema_for!(TaskSummary),
        "board-column" => schema_for!(BoardColumn),
        other => anyhow::bail!(
            "unknown schema type '{other}' (expected task, task-create, task-update, summary, board-column)"
        ),
    };
    Ok(schema)
}
