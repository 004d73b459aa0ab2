//! Vehicle category enum.
//!
//! Serialized as `snake_case` strings, which is also the SQL storage form.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ParkingError;

// ---------------------------------------------------------------------------
// VehicleCategory
// ---------------------------------------------------------------------------

/// Class of vehicle. Determines the hourly rate and which spots it may use.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum VehicleCategory {
    Car,
    Bike,
}

impl VehicleCategory {
    /// Every known category, in menu order.
    pub const ALL: [Self; 2] = [Self::Car, Self::Bike];

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Bike => "bike",
        }
    }

    /// Map an attendant menu selection (`1` car, `2` bike) to a category.
    ///
    /// # Errors
    ///
    /// Returns `ParkingError::UnsupportedCategory` for any other selection.
    pub fn from_selection(selection: u32) -> Result<Self, ParkingError> {
        match selection {
            1 => Ok(Self::Car),
            2 => Ok(Self::Bike),
            other => Err(ParkingError::UnsupportedCategory(format!(
                "menu selection {other}"
            ))),
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleCategory {
    type Err = ParkingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParkingError::UnsupportedCategory(needle.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&VehicleCategory::Bike).unwrap();
        assert_eq!(json, "\"bike\"");
        let recovered: VehicleCategory = serde_json::from_str("\"car\"").unwrap();
        assert_eq!(recovered, VehicleCategory::Car);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("CAR".parse::<VehicleCategory>().unwrap(), VehicleCategory::Car);
        assert_eq!(" Bike ".parse::<VehicleCategory>().unwrap(), VehicleCategory::Bike);
    }

    #[test]
    fn parse_rejects_unknown_category() {
        let err = "truck".parse::<VehicleCategory>().unwrap_err();
        assert_eq!(err, ParkingError::UnsupportedCategory("truck".into()));
    }

    #[test]
    fn menu_selection_mapping() {
        assert_eq!(VehicleCategory::from_selection(1).unwrap(), VehicleCategory::Car);
        assert_eq!(VehicleCategory::from_selection(2).unwrap(), VehicleCategory::Bike);
        assert!(matches!(
            VehicleCategory::from_selection(3),
            Err(ParkingError::UnsupportedCategory(_))
        ));
    }

    #[test]
    fn display_matches_storage_form() {
        for category in VehicleCategory::ALL {
            assert_eq!(category.to_string(), category.as_str());
        }
    }
}
