//! Business-rule refusals raised by the parking core.
//!
//! These are expected outcomes an attendant must be told about (facility full,
//! unknown plate, bad timestamps). Infrastructure faults are not represented
//! here: they travel as the store's own error type inside
//! [`crate::workflow::WorkflowError::Store`].

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::enums::VehicleCategory;

/// A refusal that leaves tickets and spots untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParkingError {
    /// Exit time is absent or earlier than the entry time.
    #[error("Invalid parking duration: {}", describe_duration(.entry, .exit.as_ref()))]
    InvalidDuration {
        entry: DateTime<Utc>,
        exit: Option<DateTime<Utc>>,
    },

    /// Category input does not name a known vehicle category, or no rate is
    /// configured for it.
    #[error("Unsupported vehicle category: {0}")]
    UnsupportedCategory(String),

    /// Every spot of the requested category is taken.
    #[error("No available {0} spot, the facility is full for this category")]
    NoAvailableSpot(VehicleCategory),

    /// No open ticket exists for the registration.
    #[error("No open ticket found for vehicle {0}")]
    TicketNotFound(String),

    /// The vehicle already holds an open ticket.
    #[error("Vehicle {vehicle_reg_number} is already parked at spot {spot_id}")]
    AlreadyParked {
        vehicle_reg_number: String,
        spot_id: i64,
    },

    /// Registration number is blank.
    #[error("Vehicle registration number must not be empty")]
    InvalidRegistration,
}

fn describe_duration(entry: &DateTime<Utc>, exit: Option<&DateTime<Utc>>) -> String {
    match exit {
        Some(exit) => format!(
            "exit time {} precedes entry time {}",
            exit.to_rfc3339(),
            entry.to_rfc3339()
        ),
        None => format!("exit time is missing (entry time {})", entry.to_rfc3339()),
    }
}
