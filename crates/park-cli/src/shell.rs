//! Interactive attendant menu.
//!
//! ```text
//! 1 New Vehicle Entering - Allocate Parking Spot
//! 2 Vehicle Exiting - Generate Ticket Price
//! 3 Shutdown System
//! ```
//!
//! Refusals are printed and the menu continues; storage failures end the
//! session with an error.

use std::io::{self, BufRead, Write};

use chrono::{DateTime, Utc};
use park_core::enums::VehicleCategory;
use park_core::errors::ParkingError;
use park_core::workflow::{ParkingWorkflow, WorkflowError};
use park_db::ParkDb;

use crate::commands::enter::welcome_back;
use crate::commands::workflow_error;

/// One answer to a numbered prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Number(u32),
    Invalid(String),
    /// Input is exhausted.
    Closed,
}

/// Where the attendant's answers come from.
pub trait InputSource {
    fn read_selection(&mut self) -> io::Result<Selection>;

    /// `None` once input is exhausted.
    fn read_vehicle_registration_number(&mut self) -> io::Result<Option<String>>;
}

/// Line-oriented input over any buffered reader (stdin in the binary).
pub struct LineInput<R> {
    reader: R,
}

impl<R: BufRead> LineInput<R> {
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }

    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead> InputSource for LineInput<R> {
    fn read_selection(&mut self) -> io::Result<Selection> {
        let Some(line) = self.next_line()? else {
            return Ok(Selection::Closed);
        };
        Ok(match line.parse::<u32>() {
            Ok(number) => Selection::Number(number),
            Err(_) => Selection::Invalid(line),
        })
    }

    fn read_vehicle_registration_number(&mut self) -> io::Result<Option<String>> {
        self.next_line()
    }
}

pub struct Shell<'w, 'a, I, W> {
    workflow: &'w ParkingWorkflow<'a, ParkDb, ParkDb>,
    input: I,
    out: W,
    discount_percent: f64,
}

impl<'w, 'a, I: InputSource, W: Write> Shell<'w, 'a, I, W> {
    pub const fn new(
        workflow: &'w ParkingWorkflow<'a, ParkDb, ParkDb>,
        input: I,
        out: W,
        discount_percent: f64,
    ) -> Self {
        Self {
            workflow,
            input,
            out,
            discount_percent,
        }
    }

    /// Loop over the main menu until the attendant shuts down or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure or when the database fails.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        writeln!(self.out, "Welcome to Parking System!")?;
        loop {
            writeln!(self.out, "Please select an option. Simply enter the number to choose an action")?;
            writeln!(self.out, "1 New Vehicle Entering - Allocate Parking Spot")?;
            writeln!(self.out, "2 Vehicle Exiting - Generate Ticket Price")?;
            writeln!(self.out, "3 Shutdown System")?;

            match self.input.read_selection()? {
                Selection::Number(1) => self.incoming().await?,
                Selection::Number(2) => self.exiting().await?,
                Selection::Number(3) | Selection::Closed => {
                    writeln!(self.out, "Exiting from the system!")?;
                    return Ok(());
                }
                Selection::Number(_) | Selection::Invalid(_) => writeln!(
                    self.out,
                    "Unsupported option. Please enter a number corresponding to the provided menu"
                )?,
            }
        }
    }

    async fn incoming(&mut self) -> anyhow::Result<()> {
        writeln!(self.out, "Please select vehicle type from menu")?;
        writeln!(self.out, "1 CAR")?;
        writeln!(self.out, "2 BIKE")?;
        let category = match self.input.read_selection()? {
            Selection::Number(number) => VehicleCategory::from_selection(number),
            Selection::Invalid(text) => Err(ParkingError::UnsupportedCategory(text)),
            Selection::Closed => return Ok(()),
        };
        let category = match category {
            Ok(category) => category,
            Err(refusal) => {
                writeln!(self.out, "Unable to process incoming vehicle: {refusal}")?;
                return Ok(());
            }
        };

        writeln!(self.out, "Please type the vehicle registration number and press enter key")?;
        let Some(reg) = self.input.read_vehicle_registration_number()? else {
            return Ok(());
        };

        match self.workflow.enter(&reg, category, Utc::now()).await {
            Ok(receipt) => {
                if receipt.recurring_user {
                    writeln!(self.out, "{}", welcome_back(self.discount_percent))?;
                }
                let ticket = receipt.ticket;
                writeln!(self.out, "Generated Ticket and saved in DB")?;
                writeln!(self.out, "Please park your vehicle in spot number: {}", ticket.spot.id)?;
                writeln!(
                    self.out,
                    "Recorded in-time for vehicle number: {} is: {}",
                    ticket.vehicle_reg_number,
                    display_time(ticket.entry_time)
                )?;
                Ok(())
            }
            Err(WorkflowError::Refused(refusal)) => {
                writeln!(self.out, "Unable to process incoming vehicle: {refusal}")?;
                Ok(())
            }
            Err(other) => Err(workflow_error(other)),
        }
    }

    async fn exiting(&mut self) -> anyhow::Result<()> {
        writeln!(self.out, "Please type the vehicle registration number and press enter key")?;
        let Some(reg) = self.input.read_vehicle_registration_number()? else {
            return Ok(());
        };

        match self.workflow.exit(&reg, Utc::now()).await {
            Ok(receipt) => {
                let ticket = receipt.ticket;
                writeln!(self.out, "Please pay the parking fare: {:.2}", ticket.price)?;
                if let Some(exit_time) = ticket.exit_time {
                    writeln!(
                        self.out,
                        "Recorded out-time for vehicle number: {} is: {}",
                        ticket.vehicle_reg_number,
                        display_time(exit_time)
                    )?;
                }
                Ok(())
            }
            Err(WorkflowError::Refused(refusal)) => {
                writeln!(self.out, "Unable to process exiting vehicle: {refusal}")?;
                Ok(())
            }
            Err(other) => Err(workflow_error(other)),
        }
    }
}

fn display_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}
