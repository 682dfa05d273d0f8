use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::List(args) => commands::task::list::run(&args, ctx, flags),
        Commands::Create(args) => commands::task::create::run(args, ctx, flags).await,
        Commands::Update(args) => commands::task::update::run(args, ctx, flags).await,
        Commands::Toggle { id } => commands::task::toggle::run(&id, ctx, flags).await,
        Commands::Delete { id } => commands::task::delete::run(&id, ctx, flags).await,
        Commands::Summary => commands::summary::handle(ctx, flags),
        Commands::Board { action } => commands::board::handle(&action, ctx, flags).await,
        Commands::Schema(_) | Commands::Auth { .. } => {
            unreachable!("schema/auth are pre-dispatched in main")
        }
    }
}
