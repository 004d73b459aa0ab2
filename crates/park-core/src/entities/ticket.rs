use chrono::{DateTime, TimeDelta, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Spot;

/// One parking visit. Created on entry, closed once on exit.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Ticket {
    pub id: String,
    pub vehicle_reg_number: String,
    pub spot: Spot,
    pub entry_time: DateTime<Utc>,
    pub exit_time: Option<DateTime<Utc>>,
    /// Zero until the exit has been processed.
    pub price: f64,
}

impl Ticket {
    /// Open a new ticket: no exit time, price zero.
    #[must_use]
    pub fn open(
        id: impl Into<String>,
        vehicle_reg_number: impl Into<String>,
        spot: Spot,
        entry_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            vehicle_reg_number: vehicle_reg_number.into(),
            spot,
            entry_time,
            exit_time: None,
            price: 0.0,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.exit_time.is_none()
    }

    /// Time spent parked, if the ticket has been closed.
    #[must_use]
    pub fn duration(&self) -> Option<TimeDelta> {
        self.exit_time.map(|exit| exit - self.entry_time)
    }
}
