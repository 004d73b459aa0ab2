use anyhow::{Context, bail};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ResetArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ResetResponse {
    reset: bool,
}

/// Handle `parkit reset`.
pub async fn handle(args: &ResetArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !args.yes {
        bail!("reset deletes every ticket; re-run with --yes to confirm");
    }
    ctx.db.reset().await.context("failed to reset parking database")?;
    tracing::info!("parking database reset");
    output(&ResetResponse { reset: true }, flags.format)
}
