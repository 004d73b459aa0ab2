//! # park-core
//!
//! Core types and business rules for the parking facility.
//!
//! This crate provides the foundational types shared across all crates:
//! - Entity structs for spots and tickets
//! - The vehicle category enum
//! - The refusal error taxonomy
//! - Fare calculation (grace period, hourly rates, loyalty discount)
//! - Spot allocation against an abstract spot store
//! - Store contracts consumed by the workflow
//! - The entry/exit workflow that ties everything together
//!
//! Nothing in here performs I/O directly. Persistence lives behind the
//! [`store::SpotStore`] and [`store::TicketStore`] traits, implemented by
//! `park-db`.

pub mod allocator;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod fare;
pub mod ids;
pub mod store;
pub mod workflow;

#[cfg(test)]
pub(crate) mod test_support;
