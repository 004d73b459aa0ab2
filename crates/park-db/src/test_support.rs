//! Shared test utilities for park-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use crate::ParkDb;

    /// In-memory database seeded with 3 car spots (1-3) and 2 bike spots (4-5).
    pub async fn seeded_db() -> ParkDb {
        let db = ParkDb::open_local(":memory:").await.unwrap();
        db.seed_spots(3, 2).await.unwrap();
        db
    }
}
