use std::path::Path;

use anyhow::Context;
use park_config::ParkConfig;
use park_db::ParkDb;

use crate::cli::GlobalFlags;

pub fn load_config() -> anyhow::Result<ParkConfig> {
    ParkConfig::load_with_dotenv().context("failed to load parkit configuration")
}

/// The database path in effect: `--db` wins over `database.path`.
pub fn resolve_db_path<'a>(flags: &'a GlobalFlags, config: &'a ParkConfig) -> &'a str {
    flags.db.as_deref().unwrap_or(&config.database.path)
}

/// Open the database, creating its directory if needed, and lay out the spot
/// inventory on first use.
pub async fn open_database(path: &str, config: &ParkConfig) -> anyhow::Result<ParkDb> {
    if path != ":memory:"
        && let Some(parent) = Path::new(path).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create database directory {}", parent.display()))?;
    }

    let db = ParkDb::open_local(path)
        .await
        .with_context(|| format!("failed to open parking database at {path}"))?;

    db.seed_spots(config.facility.car_spots, config.facility.bike_spots)
        .await
        .context("failed to seed parking spots")?;

    Ok(db)
}
