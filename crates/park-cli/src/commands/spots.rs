use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SpotsArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `parkit spots`.
pub async fn handle(args: &SpotsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut spots = ctx
        .db
        .list_spots(args.category)
        .await
        .context("failed to list parking spots")?;
    if args.available {
        spots.retain(|spot| spot.available);
    }
    output(&spots, flags.format)
}
