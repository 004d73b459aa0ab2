//! # park-config
//!
//! Layered configuration loading for the parking facility using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PARKIT_*` prefix, `__` as separator)
//! 2. Project-level `.parkit/config.toml`
//! 3. User-level `~/.config/parkit/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PARKIT_FARE__CAR_RATE_PER_HOUR` -> `fare.car_rate_per_hour`,
//! `PARKIT_DATABASE__PATH` -> `database.path`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use park_config::ParkConfig;
//!
//! let config = ParkConfig::load_with_dotenv().expect("config");
//! let policy = config.fare.to_policy().expect("valid fares");
//! println!("car rate: {}", config.fare.car_rate_per_hour);
//! # let _ = policy;
//! ```

mod database;
mod error;
mod facility;
mod fare;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use facility::FacilityConfig;
pub use fare::FareConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Directory holding project-local state and config.
pub const PROJECT_DIR: &str = ".parkit";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ParkConfig {
    #[serde(default)]
    pub fare: FareConfig,
    #[serde(default)]
    pub facility: FacilityConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl ParkConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.fare.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction or validation fails.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(PROJECT_DIR).join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("PARKIT_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("parkit").join("config.toml"))
    }
}
