use anyhow::Context;
use park_config::ParkConfig;
use park_core::fare::FareEngine;
use park_core::workflow::ParkingWorkflow;
use park_db::ParkDb;

use crate::bootstrap;
use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub db: ParkDb,
    pub fares: FareEngine,
}

impl AppContext {
    pub async fn init(config: &ParkConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let policy = config
            .fare
            .to_policy()
            .context("invalid fare configuration")?;
        let db = bootstrap::open_database(bootstrap::resolve_db_path(flags, config), config)
            .await?;

        Ok(Self {
            db,
            fares: FareEngine::new(policy),
        })
    }

    /// Entry/exit workflow over the shared database.
    pub fn workflow(&self) -> ParkingWorkflow<'_, ParkDb, ParkDb> {
        ParkingWorkflow::new(&self.db, &self.db, self.fares.clone())
    }

    /// Loyalty discount as a whole percentage, for user-facing messages.
    pub fn discount_percent(&self) -> f64 {
        self.fares.policy().loyalty_discount * 100.0
    }
}
