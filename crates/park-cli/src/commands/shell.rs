use std::io;

use crate::context::AppContext;
use crate::shell::{LineInput, Shell};

/// Handle `parkit shell`: run the attendant menu on stdin/stdout.
pub async fn handle(ctx: &AppContext) -> anyhow::Result<()> {
    let workflow = ctx.workflow();
    let mut shell = Shell::new(
        &workflow,
        LineInput::new(io::stdin().lock()),
        io::stdout(),
        ctx.discount_percent(),
    );
    shell.run().await
}
