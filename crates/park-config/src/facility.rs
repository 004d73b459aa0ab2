//! Spot inventory configuration.

use serde::{Deserialize, Serialize};

const fn default_car_spots() -> u32 {
    3
}

const fn default_bike_spots() -> u32 {
    2
}

/// Fixed inventory seeded into an empty database.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FacilityConfig {
    #[serde(default = "default_car_spots")]
    pub car_spots: u32,

    #[serde(default = "default_bike_spots")]
    pub bike_spots: u32,
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            car_spots: default_car_spots(),
            bike_spots: default_bike_spots(),
        }
    }
}
