pub mod dispatch;
pub mod enter;
pub mod exit;
pub mod history;
pub mod reset;
pub mod shell;
pub mod spots;

use park_core::workflow::WorkflowError;
use park_db::error::DatabaseError;

/// Surface business refusals as bare `ParkingError`s so `main` can report them
/// without storage context; everything else keeps its source chain.
pub fn workflow_error(error: WorkflowError<DatabaseError>) -> anyhow::Error {
    match error {
        WorkflowError::Refused(refusal) => anyhow::Error::new(refusal),
        other => anyhow::Error::new(other).context("parking workflow failed"),
    }
}
