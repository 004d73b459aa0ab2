//! Ticket repository.
//!
//! Tickets are joined with `parking` on read so the returned [`Ticket`]
//! carries its spot's category and current availability.

use park_core::entities::{Spot, Ticket};
use park_core::ids::PREFIX_TICKET;
use park_core::store::TicketStore;
use tracing::debug;

use crate::ParkDb;
use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, get_flag, get_opt_string, parse_datetime, parse_enum, parse_optional_datetime,
};

const SELECT_COLS: &str = "t.id, t.vehicle_reg_number, t.entry_time, t.exit_time, t.price, \
     p.id, p.category, p.available";

fn row_to_ticket(row: &libsql::Row) -> Result<Ticket, DatabaseError> {
    let exit = get_opt_string(row, 3)?;
    Ok(Ticket {
        id: row.get::<String>(0)?,
        vehicle_reg_number: row.get::<String>(1)?,
        entry_time: parse_datetime(&row.get::<String>(2)?)?,
        exit_time: parse_optional_datetime(exit.as_deref())?,
        price: row.get::<f64>(4)?,
        spot: Spot {
            id: row.get::<i64>(5)?,
            category: parse_enum(&row.get::<String>(6)?)?,
            available: get_flag(row, 7)?,
        },
    })
}

impl ParkDb {
    /// Get a ticket by ID.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the ticket does not exist.
    #[cfg(test)]
    pub async fn get_ticket(&self, id: &str) -> Result<Ticket, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM tickets t JOIN parking p ON p.id = t.spot_id
                     WHERE t.id = ?1"
                ),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_ticket(&row)
    }

    /// Visits for a registration, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn ticket_history(
        &self,
        vehicle_reg_number: &str,
        limit: u32,
    ) -> Result<Vec<Ticket>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM tickets t JOIN parking p ON p.id = t.spot_id
                     WHERE t.vehicle_reg_number = ?1
                     ORDER BY t.entry_time DESC LIMIT ?2"
                ),
                libsql::params![vehicle_reg_number, i64::from(limit)],
            )
            .await?;

        let mut tickets = Vec::new();
        while let Some(row) = rows.next().await? {
            tickets.push(row_to_ticket(&row)?);
        }
        Ok(tickets)
    }
}

impl TicketStore for ParkDb {
    type Error = DatabaseError;

    async fn new_ticket_id(&self) -> Result<String, DatabaseError> {
        self.generate_id(PREFIX_TICKET).await
    }

    async fn open_ticket(&self, vehicle_reg_number: &str) -> Result<Option<Ticket>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM tickets t JOIN parking p ON p.id = t.spot_id
                     WHERE t.vehicle_reg_number = ?1 AND t.exit_time IS NULL
                     ORDER BY t.entry_time DESC LIMIT 1"
                ),
                [vehicle_reg_number],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_ticket(&row)?)),
            None => Ok(None),
        }
    }

    async fn save_ticket(&self, ticket: &Ticket) -> Result<bool, DatabaseError> {
        let changed = self
            .conn()
            .execute(
                "INSERT INTO tickets (id, spot_id, vehicle_reg_number, price, entry_time, exit_time)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    ticket.id.as_str(),
                    ticket.spot.id,
                    ticket.vehicle_reg_number.as_str(),
                    ticket.price,
                    format_datetime(&ticket.entry_time),
                    ticket.exit_time.as_ref().map(format_datetime)
                ],
            )
            .await?;
        debug!(ticket_id = %ticket.id, changed, "save ticket");
        Ok(changed == 1)
    }

    async fn update_ticket(&self, ticket: &Ticket) -> Result<bool, DatabaseError> {
        let changed = self
            .conn()
            .execute(
                "UPDATE tickets SET exit_time = ?1, price = ?2 WHERE id = ?3",
                libsql::params![
                    ticket.exit_time.as_ref().map(format_datetime),
                    ticket.price,
                    ticket.id.as_str()
                ],
            )
            .await?;
        debug!(ticket_id = %ticket.id, changed, "update ticket");
        Ok(changed == 1)
    }

    async fn count_tickets(&self, vehicle_reg_number: &str) -> Result<i64, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT COUNT(*) FROM tickets WHERE vehicle_reg_number = ?1",
                [vehicle_reg_number],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }
}
