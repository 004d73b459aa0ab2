//! Storage contracts consumed by the allocator and the workflow.
//!
//! Methods return `Ok(false)` when the store declined a write (no matching
//! row, constraint rejected) and `Err` when the store itself failed. The
//! workflow treats both as fatal for the current operation but reports them
//! differently.

use crate::entities::{Spot, Ticket};
use crate::enums::VehicleCategory;

/// Persistence for the fixed spot inventory.
#[allow(async_fn_in_trait)]
pub trait SpotStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Id of the next free spot of `category`, or `None` when all are taken.
    ///
    /// Implementations may signal "none" with a sentinel id `<= 0`; the
    /// allocator treats it the same as `None`.
    async fn next_available_spot(
        &self,
        category: VehicleCategory,
    ) -> Result<Option<i64>, Self::Error>;

    /// Persist the spot's availability flag.
    async fn update_spot(&self, spot: &Spot) -> Result<bool, Self::Error>;
}

/// Persistence for parking tickets, including history used for loyalty.
#[allow(async_fn_in_trait)]
pub trait TicketStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Generate a fresh ticket id (`tkt-xxxxxxxx`).
    async fn new_ticket_id(&self) -> Result<String, Self::Error>;

    /// The ticket for `vehicle_reg_number` that has no exit time yet.
    async fn open_ticket(&self, vehicle_reg_number: &str) -> Result<Option<Ticket>, Self::Error>;

    /// Insert a new ticket.
    async fn save_ticket(&self, ticket: &Ticket) -> Result<bool, Self::Error>;

    /// Persist exit time and price of an existing ticket.
    async fn update_ticket(&self, ticket: &Ticket) -> Result<bool, Self::Error>;

    /// Number of tickets ever recorded for `vehicle_reg_number`.
    async fn count_tickets(&self, vehicle_reg_number: &str) -> Result<i64, Self::Error>;
}
