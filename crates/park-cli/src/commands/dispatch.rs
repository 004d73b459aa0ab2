use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Enter(args) => commands::enter::handle(&args, ctx, flags).await,
        Commands::Exit(args) => commands::exit::handle(&args, ctx, flags).await,
        Commands::Spots(args) => commands::spots::handle(&args, ctx, flags).await,
        Commands::History(args) => commands::history::handle(&args, ctx, flags).await,
        Commands::Reset(args) => commands::reset::handle(&args, ctx, flags).await,
        Commands::Shell => commands::shell::handle(ctx).await,
    }
}
