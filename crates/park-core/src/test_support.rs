//! In-memory stores for unit tests.
//!
//! They record every write so tests can assert which persistence calls the
//! workflow issued, and can be told to reject or fail writes.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use thiserror::Error;

use crate::entities::{Spot, Ticket};
use crate::enums::VehicleCategory;
use crate::store::{SpotStore, TicketStore};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("memory store unavailable")]
pub struct MemoryStoreError;

#[derive(Default)]
pub struct MemorySpotStore {
    spots: Mutex<Vec<Spot>>,
    forced_next: Mutex<Option<Option<i64>>>,
    updates: Mutex<Vec<Spot>>,
    reject_updates: AtomicBool,
    fail_updates: AtomicBool,
}

impl MemorySpotStore {
    /// Spots `1..=car` are cars, the following `bike` ids are bikes.
    pub fn with_inventory(car: i64, bike: i64) -> Self {
        let spots = (1..=car)
            .map(|id| Spot::new(id, VehicleCategory::Car, true))
            .chain((car + 1..=car + bike).map(|id| Spot::new(id, VehicleCategory::Bike, true)))
            .collect();
        Self {
            spots: Mutex::new(spots),
            ..Self::default()
        }
    }

    /// Override the next lookup result regardless of inventory.
    pub fn force_next_available(&self, id: Option<i64>) {
        *self.forced_next.lock().unwrap() = Some(id);
    }

    pub fn reject_updates(&self) {
        self.reject_updates.store(true, Ordering::SeqCst);
    }

    pub fn fail_updates(&self) {
        self.fail_updates.store(true, Ordering::SeqCst);
    }

    pub fn update_calls(&self) -> usize {
        self.updates.lock().unwrap().len()
    }

    pub fn updates(&self) -> Vec<Spot> {
        self.updates.lock().unwrap().clone()
    }

    pub fn spot(&self, id: i64) -> Option<Spot> {
        self.spots.lock().unwrap().iter().find(|s| s.id == id).copied()
    }
}

impl SpotStore for MemorySpotStore {
    type Error = MemoryStoreError;

    async fn next_available_spot(
        &self,
        category: VehicleCategory,
    ) -> Result<Option<i64>, Self::Error> {
        if let Some(forced) = self.forced_next.lock().unwrap().take() {
            return Ok(forced);
        }
        Ok(self
            .spots
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.category == category && s.available)
            .map(|s| s.id)
            .min())
    }

    async fn update_spot(&self, spot: &Spot) -> Result<bool, Self::Error> {
        self.updates.lock().unwrap().push(*spot);
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(MemoryStoreError);
        }
        if self.reject_updates.load(Ordering::SeqCst) {
            return Ok(false);
        }
        let mut spots = self.spots.lock().unwrap();
        match spots.iter_mut().find(|s| s.id == spot.id) {
            Some(stored) => {
                stored.available = spot.available;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct MemoryTicketStore {
    tickets: Mutex<Vec<Ticket>>,
    next_id: AtomicU32,
    saves: Mutex<Vec<Ticket>>,
    updates: Mutex<Vec<Ticket>>,
    count_lookups: Mutex<Vec<String>>,
    reject_saves: AtomicBool,
    reject_updates: AtomicBool,
    fail_lookups: AtomicBool,
}

impl MemoryTicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a historical or open ticket without going through the workflow.
    pub fn insert(&self, ticket: Ticket) {
        self.tickets.lock().unwrap().push(ticket);
    }

    pub fn reject_saves(&self) {
        self.reject_saves.store(true, Ordering::SeqCst);
    }

    pub fn reject_updates(&self) {
        self.reject_updates.store(true, Ordering::SeqCst);
    }

    pub fn fail_lookups(&self) {
        self.fail_lookups.store(true, Ordering::SeqCst);
    }

    pub fn save_calls(&self) -> usize {
        self.saves.lock().unwrap().len()
    }

    pub fn update_calls(&self) -> usize {
        self.updates.lock().unwrap().len()
    }

    pub fn count_lookups(&self) -> Vec<String> {
        self.count_lookups.lock().unwrap().clone()
    }

    pub fn all(&self) -> Vec<Ticket> {
        self.tickets.lock().unwrap().clone()
    }
}

impl TicketStore for MemoryTicketStore {
    type Error = MemoryStoreError;

    async fn new_ticket_id(&self) -> Result<String, Self::Error> {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("tkt-{n:08x}"))
    }

    async fn open_ticket(&self, vehicle_reg_number: &str) -> Result<Option<Ticket>, Self::Error> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(MemoryStoreError);
        }
        Ok(self
            .tickets
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.vehicle_reg_number == vehicle_reg_number && t.is_open())
            .max_by_key(|t| t.entry_time)
            .cloned())
    }

    async fn save_ticket(&self, ticket: &Ticket) -> Result<bool, Self::Error> {
        self.saves.lock().unwrap().push(ticket.clone());
        if self.reject_saves.load(Ordering::SeqCst) {
            return Ok(false);
        }
        self.tickets.lock().unwrap().push(ticket.clone());
        Ok(true)
    }

    async fn update_ticket(&self, ticket: &Ticket) -> Result<bool, Self::Error> {
        self.updates.lock().unwrap().push(ticket.clone());
        if self.reject_updates.load(Ordering::SeqCst) {
            return Ok(false);
        }
        let mut tickets = self.tickets.lock().unwrap();
        match tickets.iter_mut().find(|t| t.id == ticket.id) {
            Some(stored) => {
                stored.exit_time = ticket.exit_time;
                stored.price = ticket.price;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_tickets(&self, vehicle_reg_number: &str) -> Result<i64, Self::Error> {
        self.count_lookups
            .lock()
            .unwrap()
            .push(vehicle_reg_number.to_string());
        let count = self
            .tickets
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.vehicle_reg_number == vehicle_reg_number)
            .count();
        Ok(i64::try_from(count).unwrap())
    }
}
