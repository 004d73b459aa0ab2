use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::HistoryArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `parkit history`.
pub async fn handle(
    args: &HistoryArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let tickets = ctx
        .db
        .ticket_history(args.plate.trim(), args.limit)
        .await
        .with_context(|| format!("failed to load ticket history for {}", args.plate))?;
    output(&tickets, flags.format)
}
