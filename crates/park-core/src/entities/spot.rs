use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::VehicleCategory;

/// A physical parking slot. The inventory is fixed at initialization; only
/// `available` changes afterwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Spot {
    pub id: i64,
    pub category: VehicleCategory,
    pub available: bool,
}

impl Spot {
    #[must_use]
    pub const fn new(id: i64, category: VehicleCategory, available: bool) -> Self {
        Self {
            id,
            category,
            available,
        }
    }
}
