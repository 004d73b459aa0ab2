//! Fare configuration.

use chrono::TimeDelta;
use park_core::enums::VehicleCategory;
use park_core::fare::{
    DEFAULT_BIKE_RATE_PER_HOUR, DEFAULT_CAR_RATE_PER_HOUR, DEFAULT_GRACE_PERIOD_MINUTES,
    DEFAULT_LOYALTY_DISCOUNT, FarePolicy, RateTable,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_car_rate() -> f64 {
    DEFAULT_CAR_RATE_PER_HOUR
}

const fn default_bike_rate() -> f64 {
    DEFAULT_BIKE_RATE_PER_HOUR
}

const fn default_grace_minutes() -> i64 {
    DEFAULT_GRACE_PERIOD_MINUTES
}

fn default_loyalty_percent() -> f64 {
    DEFAULT_LOYALTY_DISCOUNT * 100.0
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FareConfig {
    /// Hourly rate for cars.
    #[serde(default = "default_car_rate")]
    pub car_rate_per_hour: f64,

    /// Hourly rate for bikes.
    #[serde(default = "default_bike_rate")]
    pub bike_rate_per_hour: f64,

    /// Stays up to and including this many minutes are free.
    #[serde(default = "default_grace_minutes")]
    pub grace_period_minutes: i64,

    /// Discount for recurring users, in percent.
    #[serde(default = "default_loyalty_percent")]
    pub loyalty_discount_percent: f64,
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            car_rate_per_hour: default_car_rate(),
            bike_rate_per_hour: default_bike_rate(),
            grace_period_minutes: default_grace_minutes(),
            loyalty_discount_percent: default_loyalty_percent(),
        }
    }
}

impl FareConfig {
    /// Reject negative rates, a negative grace period, or a discount outside `[0, 100)`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, rate) in [
            ("fare.car_rate_per_hour", self.car_rate_per_hour),
            ("fare.bike_rate_per_hour", self.bike_rate_per_hour),
        ] {
            if !rate.is_finite() || rate < 0.0 {
                return Err(invalid(field, format!("rate must be >= 0, got {rate}")));
            }
        }
        self.grace_period()?;
        if !(0.0..100.0).contains(&self.loyalty_discount_percent) {
            return Err(invalid(
                "fare.loyalty_discount_percent",
                format!("must be in [0, 100), got {}", self.loyalty_discount_percent),
            ));
        }
        Ok(())
    }

    /// Build the core fare policy after validation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if [`Self::validate`] fails.
    pub fn to_policy(&self) -> Result<FarePolicy, ConfigError> {
        self.validate()?;
        Ok(FarePolicy {
            rates: RateTable::empty()
                .with_rate(VehicleCategory::Car, self.car_rate_per_hour)
                .with_rate(VehicleCategory::Bike, self.bike_rate_per_hour),
            grace_period: self.grace_period()?,
            loyalty_discount: self.loyalty_discount_percent / 100.0,
        })
    }

    /// Grace period as a `TimeDelta`, rejecting negative or unrepresentable minutes.
    fn grace_period(&self) -> Result<TimeDelta, ConfigError> {
        if self.grace_period_minutes < 0 {
            return Err(invalid(
                "fare.grace_period_minutes",
                format!("must be >= 0, got {}", self.grace_period_minutes),
            ));
        }
        TimeDelta::try_minutes(self.grace_period_minutes).ok_or_else(|| {
            invalid(
                "fare.grace_period_minutes",
                format!("{} minutes is out of range", self.grace_period_minutes),
            )
        })
    }
}

fn invalid(field: &str, reason: String) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_core_policy() {
        let policy = FareConfig::default().to_policy().unwrap();
        assert_eq!(policy, FarePolicy::default());
    }

    #[test]
    fn negative_rate_is_rejected() {
        let config = FareConfig {
            bike_rate_per_hour: -1.0,
            ..FareConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "fare.bike_rate_per_hour")
        );
    }

    #[test]
    fn full_discount_is_rejected() {
        let config = FareConfig {
            loyalty_discount_percent: 100.0,
            ..FareConfig::default()
        };
        assert!(config.to_policy().is_err());
    }

    #[test]
    fn negative_grace_is_rejected() {
        let config = FareConfig {
            grace_period_minutes: -5,
            ..FareConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_grace_is_rejected_not_panicking() {
        let config = FareConfig {
            grace_period_minutes: 1_000_000_000_000_000,
            ..FareConfig::default()
        };
        let err = config.to_policy().unwrap_err();
        assert!(
            matches!(
                &err,
                ConfigError::InvalidValue { field, .. } if field == "fare.grace_period_minutes"
            ),
            "{err}"
        );
    }
}
