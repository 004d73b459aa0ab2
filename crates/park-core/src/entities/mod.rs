//! Entity structs for the parking domain.
//!
//! Each entity maps to a table in the libSQL database (`parking`, `tickets`).
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! output and schema validation.

mod spot;
mod ticket;

pub use spot::Spot;
pub use ticket::Ticket;
