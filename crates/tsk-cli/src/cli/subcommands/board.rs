use clap::Subcommand;

/// Kanban board commands.
#[derive(Clone, Debug, Subcommand)]
pub enum BoardCommands {
    /// Show tasks grouped by status column.
    Show,
    /// Move a task to another column.
    Move { id: String, status: String },
}
