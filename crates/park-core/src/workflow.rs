//! Entry and exit orchestration.
//!
//! Each call is one self-contained transaction for one vehicle visit:
//!
//! ```text
//! idle ──enter──▶ parked ──exit──▶ idle
//! ```
//!
//! The caller supplies the registration and the current time; the workflow
//! keeps no state between calls. Store calls are awaited strictly in order and
//! are never retried or rolled back. If the ticket update succeeds but the
//! spot release write fails, the ticket is closed while the spot still reads
//! as taken; that window is reported as an error and left for the operator.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::allocator::SpotAllocator;
use crate::entities::Ticket;
use crate::enums::VehicleCategory;
use crate::errors::ParkingError;
use crate::fare::FareEngine;
use crate::store::{SpotStore, TicketStore};

/// A vehicle is a loyalty member once it has more than this many tickets.
const LOYALTY_TICKET_THRESHOLD: i64 = 1;

/// Why a workflow step did not complete.
#[derive(Debug, Error)]
pub enum WorkflowError<E> {
    /// A business rule refused the request. Nothing was written.
    #[error(transparent)]
    Refused(#[from] ParkingError),

    /// The store answered but declined the write.
    #[error("Storage rejected the {record} write for {key}")]
    WriteRejected { record: &'static str, key: String },

    /// The store itself failed.
    #[error("Storage failure: {0}")]
    Store(#[source] E),
}

impl<E> WorkflowError<E> {
    /// `true` for business refusals, `false` for storage problems.
    #[must_use]
    pub const fn is_refusal(&self) -> bool {
        matches!(self, Self::Refused(_))
    }

    #[must_use]
    pub const fn refusal(&self) -> Option<&ParkingError> {
        match self {
            Self::Refused(err) => Some(err),
            _ => None,
        }
    }
}

/// Result of a successful entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryReceipt {
    pub ticket: Ticket,
    /// The vehicle already has history; the discount applies at exit.
    pub recurring_user: bool,
}

/// Result of a successful exit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExitReceipt {
    pub ticket: Ticket,
    pub loyalty_discount_applied: bool,
}

pub struct ParkingWorkflow<'a, S, T> {
    allocator: SpotAllocator<'a, S>,
    spots: &'a S,
    tickets: &'a T,
    fares: FareEngine,
}

impl<'a, S, T> ParkingWorkflow<'a, S, T>
where
    S: SpotStore,
    T: TicketStore<Error = S::Error>,
{
    #[must_use]
    pub const fn new(spots: &'a S, tickets: &'a T, fares: FareEngine) -> Self {
        Self {
            allocator: SpotAllocator::new(spots),
            spots,
            tickets,
            fares,
        }
    }

    /// Park a vehicle: reserve a spot, persist it, then open a ticket.
    ///
    /// # Errors
    ///
    /// - `Refused(InvalidRegistration)` for a blank registration.
    /// - `Refused(AlreadyParked)` if the vehicle holds an open ticket.
    /// - `Refused(NoAvailableSpot)` if the category is full; no store write
    ///   is issued.
    /// - `WriteRejected` / `Store` on persistence problems. A rejected ticket
    ///   save leaves the spot reserved.
    pub async fn enter(
        &self,
        vehicle_reg_number: &str,
        category: VehicleCategory,
        at: DateTime<Utc>,
    ) -> Result<EntryReceipt, WorkflowError<S::Error>> {
        let reg = normalize_registration(vehicle_reg_number)?;

        if let Some(open) = self
            .tickets
            .open_ticket(reg)
            .await
            .map_err(WorkflowError::Store)?
        {
            warn!(vehicle = reg, spot_id = open.spot.id, "entry refused: already parked");
            return Err(ParkingError::AlreadyParked {
                vehicle_reg_number: reg.to_string(),
                spot_id: open.spot.id,
            }
            .into());
        }

        let Some(spot) = self
            .allocator
            .find_and_reserve_spot(category)
            .await
            .map_err(WorkflowError::Store)?
        else {
            warn!(vehicle = reg, %category, "entry refused: no available spot");
            return Err(ParkingError::NoAvailableSpot(category).into());
        };

        if !self
            .spots
            .update_spot(&spot)
            .await
            .map_err(WorkflowError::Store)?
        {
            return Err(WorkflowError::WriteRejected {
                record: "spot",
                key: spot.id.to_string(),
            });
        }

        let recurring_user = self.is_loyalty_member(reg).await?;

        let id = self
            .tickets
            .new_ticket_id()
            .await
            .map_err(WorkflowError::Store)?;
        let ticket = Ticket::open(id, reg, spot, at);

        if !self
            .tickets
            .save_ticket(&ticket)
            .await
            .map_err(WorkflowError::Store)?
        {
            warn!(
                vehicle = reg,
                spot_id = spot.id,
                "ticket save rejected after spot was reserved"
            );
            return Err(WorkflowError::WriteRejected {
                record: "ticket",
                key: ticket.id,
            });
        }

        info!(
            vehicle = reg,
            spot_id = spot.id,
            ticket_id = %ticket.id,
            recurring_user,
            "vehicle parked"
        );
        Ok(EntryReceipt {
            ticket,
            recurring_user,
        })
    }

    /// Release a vehicle: close its ticket with a fare, then free the spot.
    ///
    /// # Errors
    ///
    /// - `Refused(InvalidRegistration)` for a blank registration.
    /// - `Refused(TicketNotFound)` if no open ticket exists; nothing is written.
    /// - `Refused(InvalidDuration)` if `at` precedes the entry time.
    /// - `WriteRejected { record: "ticket" }` if the ticket update is declined;
    ///   the spot is not released.
    /// - `WriteRejected { record: "spot" }` / `Store` for later failures.
    pub async fn exit(
        &self,
        vehicle_reg_number: &str,
        at: DateTime<Utc>,
    ) -> Result<ExitReceipt, WorkflowError<S::Error>> {
        let reg = normalize_registration(vehicle_reg_number)?;

        let mut ticket = self
            .tickets
            .open_ticket(reg)
            .await
            .map_err(WorkflowError::Store)?
            .ok_or_else(|| ParkingError::TicketNotFound(reg.to_string()))?;

        let loyalty_member = self.is_loyalty_member(reg).await?;
        // Local copy only; the store is not touched until the fare is known.
        ticket.exit_time = Some(at);
        let price = self.fares.price_ticket(&ticket, loyalty_member)?;
        ticket.price = price;

        if !self
            .tickets
            .update_ticket(&ticket)
            .await
            .map_err(WorkflowError::Store)?
        {
            warn!(vehicle = reg, ticket_id = %ticket.id, "ticket update rejected, spot kept");
            return Err(WorkflowError::WriteRejected {
                record: "ticket",
                key: ticket.id,
            });
        }

        ticket.spot = self.allocator.release_spot(ticket.spot);
        if !self
            .spots
            .update_spot(&ticket.spot)
            .await
            .map_err(WorkflowError::Store)?
        {
            warn!(
                vehicle = reg,
                spot_id = ticket.spot.id,
                "ticket closed but spot release was rejected"
            );
            return Err(WorkflowError::WriteRejected {
                record: "spot",
                key: ticket.spot.id.to_string(),
            });
        }

        info!(
            vehicle = reg,
            spot_id = ticket.spot.id,
            ticket_id = %ticket.id,
            price,
            loyalty_member,
            "vehicle exited"
        );
        Ok(ExitReceipt {
            ticket,
            loyalty_discount_applied: loyalty_member && price > 0.0,
        })
    }

    /// A registration with more than one recorded ticket is a loyalty member.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn is_loyalty_member(
        &self,
        vehicle_reg_number: &str,
    ) -> Result<bool, WorkflowError<S::Error>> {
        let count = self
            .tickets
            .count_tickets(vehicle_reg_number)
            .await
            .map_err(WorkflowError::Store)?;
        Ok(count > LOYALTY_TICKET_THRESHOLD)
    }
}

fn normalize_registration(raw: &str) -> Result<&str, ParkingError> {
    let reg = raw.trim();
    if reg.is_empty() {
        return Err(ParkingError::InvalidRegistration);
    }
    Ok(reg)
}
