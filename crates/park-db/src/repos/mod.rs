//! Repository modules implementing the core store contracts for `ParkDb`.
//!
//! Each module adds methods to `ParkDb` via `impl` blocks.

pub mod spot;
pub mod ticket;
