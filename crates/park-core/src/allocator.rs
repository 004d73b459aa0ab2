//! Spot allocation.
//!
//! The allocator only decides which spot a vehicle gets. Persisting the
//! availability flip is the workflow's job, through [`SpotStore::update_spot`].

use tracing::debug;

use crate::entities::Spot;
use crate::enums::VehicleCategory;
use crate::store::SpotStore;

pub struct SpotAllocator<'a, S> {
    store: &'a S,
}

impl<'a, S: SpotStore> SpotAllocator<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Find a free spot of `category` and return it marked unavailable.
    ///
    /// `Ok(None)` means the facility is full for this category. That is a
    /// normal outcome, not an error.
    ///
    /// # Errors
    ///
    /// Propagates the store's error if the lookup fails.
    pub async fn find_and_reserve_spot(
        &self,
        category: VehicleCategory,
    ) -> Result<Option<Spot>, S::Error> {
        let spot = self
            .store
            .next_available_spot(category)
            .await?
            .filter(|id| *id > 0)
            .map(|id| Spot::new(id, category, false));

        match &spot {
            Some(spot) => debug!(spot_id = spot.id, %category, "reserved spot"),
            None => debug!(%category, "no free spot"),
        }
        Ok(spot)
    }

    /// Mark `spot` free again.
    #[must_use]
    pub const fn release_spot(&self, spot: Spot) -> Spot {
        Spot {
            available: true,
            ..spot
        }
    }
}
