use chrono::Utc;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EnterArgs;
use crate::commands::workflow_error;
use crate::context::AppContext;
use crate::output::output;
use crate::ui;

/// Handle `parkit enter`.
pub async fn handle(args: &EnterArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let receipt = ctx
        .workflow()
        .enter(&args.plate, args.category, Utc::now())
        .await
        .map_err(workflow_error)?;

    if receipt.recurring_user {
        ui::notice(&welcome_back(ctx.discount_percent()));
    }
    output(&receipt, flags.format)
}

pub fn welcome_back(discount_percent: f64) -> String {
    format!(
        "Welcome back! As a recurring user of our parking lot, you'll benefit from a \
         {discount_percent}% discount."
    )
}
