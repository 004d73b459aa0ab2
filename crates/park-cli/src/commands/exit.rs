use chrono::Utc;
use serde::Serialize;

use park_core::workflow::ExitReceipt;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExitArgs;
use crate::commands::workflow_error;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ExitResponse {
    #[serde(flatten)]
    receipt: ExitReceipt,
    duration_minutes: Option<i64>,
}

/// Handle `parkit exit`.
pub async fn handle(args: &ExitArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let receipt = ctx
        .workflow()
        .exit(&args.plate, Utc::now())
        .await
        .map_err(workflow_error)?;

    let duration_minutes = receipt.ticket.duration().map(|d| d.num_minutes());
    output(
        &ExitResponse {
            receipt,
            duration_minutes,
        },
        flags.format,
    )
}
