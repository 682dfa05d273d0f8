mod login;
mod logout;
mod status;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;

/// Handle `tsk auth <subcommand>`.
pub fn handle(
    action: &AuthCommands,
    flags: &GlobalFlags,
    config: &tsk_config::TskConfig,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login::handle(args, flags),
        AuthCommands::Logout => logout::handle(flags),
        AuthCommands::Status => status::handle(flags, config),
    }
}
