use crate::cli::{Commands, GlobalFlags};
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command that needs the entry file.
pub async fn dispatch(command: Commands, ctx: AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Entries(args) => commands::entries::handle(&args, &ctx, flags),
        Commands::Questions(args) => commands::questions::handle(&args, &ctx, flags),
        Commands::Facets => commands::facets::handle(&ctx, flags),
        Commands::Render(args) => commands::render::handle(&args, ctx, flags).await,
        Commands::Views(_) | Commands::Schema(_) => {
            unreachable!("views/schema are pre-dispatched in main")
        }
    }
}
