//! Fare calculation.
//!
//! Pricing rules:
//! - Stays up to and including the grace period (30 minutes by default) are free.
//! - Longer stays are billed for their full fractional duration at the
//!   category's hourly rate. There is no further tiering.
//! - Loyalty members get a single multiplicative discount (5% by default),
//!   applied the same way for every category.
//!
//! Rates live in a [`RateTable`] keyed by [`VehicleCategory`], so adding a
//! category never touches the control flow of [`FareEngine::compute_fare`].

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};

use crate::entities::Ticket;
use crate::enums::VehicleCategory;
use crate::errors::ParkingError;

pub const DEFAULT_CAR_RATE_PER_HOUR: f64 = 1.5;
pub const DEFAULT_BIKE_RATE_PER_HOUR: f64 = 1.0;
pub const DEFAULT_GRACE_PERIOD_MINUTES: i64 = 30;
pub const DEFAULT_LOYALTY_DISCOUNT: f64 = 0.05;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

// ---------------------------------------------------------------------------
// RateTable
// ---------------------------------------------------------------------------

/// Hourly rate per vehicle category.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable(BTreeMap<VehicleCategory, f64>);

impl RateTable {
    /// An empty table. Every lookup fails until rates are added.
    #[must_use]
    pub const fn empty() -> Self {
        Self(BTreeMap::new())
    }

    #[must_use]
    pub fn with_rate(mut self, category: VehicleCategory, per_hour: f64) -> Self {
        self.0.insert(category, per_hour);
        self
    }

    /// Hourly rate for `category`.
    ///
    /// # Errors
    ///
    /// Returns `ParkingError::UnsupportedCategory` if no rate is configured.
    pub fn rate_for(&self, category: VehicleCategory) -> Result<f64, ParkingError> {
        self.0
            .get(&category)
            .copied()
            .ok_or_else(|| ParkingError::UnsupportedCategory(category.to_string()))
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::empty()
            .with_rate(VehicleCategory::Car, DEFAULT_CAR_RATE_PER_HOUR)
            .with_rate(VehicleCategory::Bike, DEFAULT_BIKE_RATE_PER_HOUR)
    }
}

// ---------------------------------------------------------------------------
// FarePolicy
// ---------------------------------------------------------------------------

/// Tunable pricing parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct FarePolicy {
    pub rates: RateTable,
    /// Stays up to and including this long are free.
    pub grace_period: TimeDelta,
    /// Fraction taken off for loyalty members, e.g. `0.05`.
    pub loyalty_discount: f64,
}

impl Default for FarePolicy {
    fn default() -> Self {
        Self {
            rates: RateTable::default(),
            grace_period: TimeDelta::minutes(DEFAULT_GRACE_PERIOD_MINUTES),
            loyalty_discount: DEFAULT_LOYALTY_DISCOUNT,
        }
    }
}

// ---------------------------------------------------------------------------
// FareEngine
// ---------------------------------------------------------------------------

/// Pure fare calculator. Callers store the result on the ticket.
#[derive(Debug, Clone, Default)]
pub struct FareEngine {
    policy: FarePolicy,
}

impl FareEngine {
    #[must_use]
    pub const fn new(policy: FarePolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub const fn policy(&self) -> &FarePolicy {
        &self.policy
    }

    /// Compute the amount owed for a stay.
    ///
    /// # Errors
    ///
    /// - `ParkingError::InvalidDuration` if `exit` is `None` or precedes `entry`.
    /// - `ParkingError::UnsupportedCategory` if the stay is billable and no
    ///   rate is configured for `category`.
    pub fn compute_fare(
        &self,
        entry: DateTime<Utc>,
        exit: Option<DateTime<Utc>>,
        category: VehicleCategory,
        loyalty_member: bool,
    ) -> Result<f64, ParkingError> {
        let exit = match exit {
            Some(exit) if exit >= entry => exit,
            _ => return Err(ParkingError::InvalidDuration { entry, exit }),
        };

        let stay = hours(exit - entry);
        if stay <= hours(self.policy.grace_period) {
            return Ok(0.0);
        }

        let rate = self.policy.rates.rate_for(category)?;
        let factor = if loyalty_member {
            1.0 - self.policy.loyalty_discount
        } else {
            1.0
        };
        Ok(stay * rate * factor)
    }

    /// Compute the fare for a ticket from its own timestamps and spot category.
    ///
    /// # Errors
    ///
    /// Same as [`Self::compute_fare`].
    pub fn price_ticket(&self, ticket: &Ticket, loyalty_member: bool) -> Result<f64, ParkingError> {
        self.compute_fare(
            ticket.entry_time,
            ticket.exit_time,
            ticket.spot.category,
            loyalty_member,
        )
    }
}

#[allow(clippy::cast_precision_loss)]
fn hours(delta: TimeDelta) -> f64 {
    delta.num_milliseconds() as f64 / MILLIS_PER_HOUR
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Spot;
    use chrono::TimeZone;
    use rstest::rstest;

    fn entry() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[rstest]
    #[case::zero(0, VehicleCategory::Car, false)]
    #[case::twenty_minutes_car(20, VehicleCategory::Car, false)]
    #[case::twenty_minutes_loyal_bike(20, VehicleCategory::Bike, true)]
    #[case::exactly_half_hour_car(30, VehicleCategory::Car, false)]
    #[case::exactly_half_hour_loyal(30, VehicleCategory::Car, true)]
    #[case::exactly_half_hour_bike(30, VehicleCategory::Bike, false)]
    fn grace_period_is_free(
        #[case] minutes: i64,
        #[case] category: VehicleCategory,
        #[case] loyal: bool,
    ) {
        let engine = FareEngine::default();
        let fare = engine
            .compute_fare(entry(), Some(entry() + TimeDelta::minutes(minutes)), category, loyal)
            .unwrap();
        assert_eq!(fare, 0.0);
    }

    #[rstest]
    #[case::car_one_hour(60, VehicleCategory::Car, false, 1.5)]
    #[case::car_one_hour_loyal(60, VehicleCategory::Car, true, 1.425)]
    #[case::bike_one_hour(60, VehicleCategory::Bike, false, 1.0)]
    #[case::bike_one_hour_loyal(60, VehicleCategory::Bike, true, 0.95)]
    #[case::car_45_minutes(45, VehicleCategory::Car, false, 1.125)]
    #[case::bike_45_minutes(45, VehicleCategory::Bike, false, 0.75)]
    #[case::car_one_day(24 * 60, VehicleCategory::Car, false, 36.0)]
    #[case::bike_one_day_loyal(24 * 60, VehicleCategory::Bike, true, 22.8)]
    fn billed_for_full_duration(
        #[case] minutes: i64,
        #[case] category: VehicleCategory,
        #[case] loyal: bool,
        #[case] expected: f64,
    ) {
        let engine = FareEngine::default();
        let fare = engine
            .compute_fare(entry(), Some(entry() + TimeDelta::minutes(minutes)), category, loyal)
            .unwrap();
        assert_close(fare, expected);
    }

    #[test]
    fn one_millisecond_past_grace_is_billed() {
        let engine = FareEngine::default();
        let exit = entry() + TimeDelta::minutes(30) + TimeDelta::milliseconds(1);
        let fare = engine
            .compute_fare(entry(), Some(exit), VehicleCategory::Car, false)
            .unwrap();
        assert!(fare > 0.0);
        assert_close(fare, (0.5 + 1.0 / 3_600_000.0) * 1.5);
    }

    #[test]
    fn missing_exit_is_invalid() {
        let engine = FareEngine::default();
        let err = engine
            .compute_fare(entry(), None, VehicleCategory::Car, false)
            .unwrap_err();
        assert_eq!(
            err,
            ParkingError::InvalidDuration {
                entry: entry(),
                exit: None
            }
        );
    }

    #[test]
    fn exit_before_entry_is_invalid() {
        let engine = FareEngine::default();
        let exit = entry() - TimeDelta::seconds(1);
        let err = engine
            .compute_fare(entry(), Some(exit), VehicleCategory::Bike, true)
            .unwrap_err();
        assert!(matches!(err, ParkingError::InvalidDuration { exit: Some(e), .. } if e == exit));
    }

    #[test]
    fn category_without_rate_is_unsupported() {
        let engine = FareEngine::new(FarePolicy {
            rates: RateTable::empty().with_rate(VehicleCategory::Car, 2.0),
            ..FarePolicy::default()
        });
        let err = engine
            .compute_fare(
                entry(),
                Some(entry() + TimeDelta::hours(2)),
                VehicleCategory::Bike,
                false,
            )
            .unwrap_err();
        assert_eq!(err, ParkingError::UnsupportedCategory("bike".into()));
    }

    #[test]
    fn custom_policy_changes_rate_grace_and_discount() {
        let engine = FareEngine::new(FarePolicy {
            rates: RateTable::empty().with_rate(VehicleCategory::Car, 4.0),
            grace_period: TimeDelta::minutes(10),
            loyalty_discount: 0.25,
        });
        let fare = engine
            .compute_fare(
                entry(),
                Some(entry() + TimeDelta::minutes(15)),
                VehicleCategory::Car,
                true,
            )
            .unwrap();
        assert_close(fare, 0.25 * 4.0 * 0.75);
    }

    #[test]
    fn price_ticket_reads_ticket_fields() {
        let engine = FareEngine::default();
        let mut ticket = Ticket::open(
            "tkt-00000001",
            "ABCDEF",
            Spot::new(4, VehicleCategory::Bike, false),
            entry(),
        );
        ticket.exit_time = Some(entry() + TimeDelta::hours(3));
        assert_close(engine.price_ticket(&ticket, false).unwrap(), 3.0);
    }
}
