//! # park-db
//!
//! libSQL persistence for the parking facility.
//!
//! Holds the fixed spot inventory (`parking`) and the visit history
//! (`tickets`). [`ParkDb`] implements the [`park_core::store::SpotStore`] and
//! [`park_core::store::TicketStore`] contracts, so the core workflow runs
//! directly against it.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;

#[cfg(test)]
pub(crate) mod test_support;

use error::DatabaseError;
use libsql::Builder;
use park_core::enums::VehicleCategory;
use tracing::{debug, info};

/// Central database handle for all parking state.
pub struct ParkDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl ParkDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let park_db = Self { db, conn };
        park_db.run_migrations().await?;
        debug!(path, "opened parking database");
        Ok(park_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"tkt-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }

    /// Create the fixed spot inventory if the `parking` table is empty.
    ///
    /// Ids `1..=car` are car spots, the next `bike` ids are bike spots, all
    /// free. Returns `false` when an inventory already exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any insert fails; nothing is committed then.
    pub async fn seed_spots(&self, car: u32, bike: u32) -> Result<bool, DatabaseError> {
        let mut rows = self.conn.query("SELECT COUNT(*) FROM parking", ()).await?;
        let existing = rows
            .next()
            .await?
            .ok_or(DatabaseError::NoResult)?
            .get::<i64>(0)?;
        if existing > 0 {
            return Ok(false);
        }

        let car = i64::from(car);
        let bike = i64::from(bike);
        let layout = (1..=car)
            .map(|id| (id, VehicleCategory::Car))
            .chain((car + 1..=car + bike).map(|id| (id, VehicleCategory::Bike)));

        let tx = self.conn.transaction().await?;
        for (id, category) in layout {
            tx.execute(
                "INSERT INTO parking (id, category, available) VALUES (?1, ?2, 1)",
                libsql::params![id, category.as_str()],
            )
            .await?;
        }
        tx.commit().await?;

        info!(car, bike, "seeded spot inventory");
        Ok(true)
    }

    /// Delete every ticket and mark every spot free.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if either statement fails; nothing is committed then.
    pub async fn reset(&self) -> Result<(), DatabaseError> {
        let tx = self.conn.transaction().await?;
        tx.execute("DELETE FROM tickets", ()).await?;
        tx.execute("UPDATE parking SET available = 1", ()).await?;
        tx.commit().await?;
        info!("cleared tickets and freed all spots");
        Ok(())
    }
}
