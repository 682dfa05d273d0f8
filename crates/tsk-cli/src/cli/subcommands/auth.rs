use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Store credentials for the task API.
    Login(AuthLoginArgs),
    /// Clear stored credentials.
    Logout,
    /// Show current auth status.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    /// User ID that owns personal tasks.
    #[arg(long)]
    pub user_id: String,
    /// Bearer token for the task API.
    #[arg(long)]
    pub token: String,
}
