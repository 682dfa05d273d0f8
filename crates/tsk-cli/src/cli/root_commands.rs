use clap::{Args, Subcommand};

use crate::cli::subcommands::{AuthCommands, BoardCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List tasks in the current scope.
    List(ListArgs),
    /// Create a task.
    Create(CreateArgs),
    /// Update a task.
    Update(UpdateArgs),
    /// Flip a task between done and to do.
    Toggle { id: String },
    /// Delete a task.
    Delete { id: String },
    /// Dashboard counts and recent tasks.
    Summary,
    /// Kanban board view.
    Board {
        #[command(subcommand)]
        action: BoardCommands,
    },
    /// Authentication.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Print the JSON schema of an output type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    /// Only tasks with this status (to-do, in-progress, review, done).
    #[arg(long)]
    pub status: Option<String>,
    /// Only tasks with this priority (low, medium, high, urgent).
    #[arg(long)]
    pub priority: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub project: Option<String>,
    #[arg(long)]
    pub assignee: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct UpdateArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub assignee: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// One of: task, task-create, task-update, summary, board-column.
    pub type_name: String,
}
