//! Spot repository.
//!
//! Lowest free id wins when several spots of a category are available.

use park_core::entities::Spot;
use park_core::enums::VehicleCategory;
use park_core::store::SpotStore;
use tracing::debug;

use crate::ParkDb;
use crate::error::DatabaseError;
use crate::helpers::{get_flag, parse_enum};

const SELECT_COLS: &str = "id, category, available";

fn row_to_spot(row: &libsql::Row) -> Result<Spot, DatabaseError> {
    Ok(Spot {
        id: row.get::<i64>(0)?,
        category: parse_enum(&row.get::<String>(1)?)?,
        available: get_flag(row, 2)?,
    })
}

impl ParkDb {
    /// Get a spot by ID.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the spot does not exist.
    pub async fn get_spot(&self, id: i64) -> Result<Spot, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM parking WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_spot(&row)
    }

    /// List the inventory, optionally restricted to one category, by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_spots(
        &self,
        category: Option<VehicleCategory>,
    ) -> Result<Vec<Spot>, DatabaseError> {
        let mut rows = match category {
            Some(category) => {
                self.conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM parking WHERE category = ?1 ORDER BY id"
                        ),
                        [category.as_str()],
                    )
                    .await?
            }
            None => {
                self.conn()
                    .query(&format!("SELECT {SELECT_COLS} FROM parking ORDER BY id"), ())
                    .await?
            }
        };

        let mut spots = Vec::new();
        while let Some(row) = rows.next().await? {
            spots.push(row_to_spot(&row)?);
        }
        Ok(spots)
    }
}

impl SpotStore for ParkDb {
    type Error = DatabaseError;

    async fn next_available_spot(
        &self,
        category: VehicleCategory,
    ) -> Result<Option<i64>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT MIN(id) FROM parking WHERE category = ?1 AND available = 1",
                [category.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<Option<i64>>(0)?)
    }

    async fn update_spot(&self, spot: &Spot) -> Result<bool, DatabaseError> {
        let changed = self
            .conn()
            .execute(
                "UPDATE parking SET available = ?1 WHERE id = ?2 AND category = ?3",
                libsql::params![i64::from(spot.available), spot.id, spot.category.as_str()],
            )
            .await?;
        debug!(spot_id = spot.id, available = spot.available, changed, "update spot");
        Ok(changed == 1)
    }
}
