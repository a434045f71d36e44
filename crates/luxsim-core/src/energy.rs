//! Energy Cost Estimator
//!
//! Converts installed power into consumption and cost projections. The month
//! is a fixed 30 days regardless of `days_per_year`, so monthly and yearly
//! figures only agree when a year is taken as 360 days.

use serde::{Deserialize, Serialize};

use crate::math;
use crate::{LightingError, LightingResult};

/// Days in the projection month
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Operating schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageProfile {
    pub hours_per_day: f64,
    pub days_per_year: f64,
}

impl Default for UsageProfile {
    fn default() -> Self {
        Self {
            hours_per_day: 10.0,
            days_per_year: 365.0,
        }
    }
}

impl UsageProfile {
    /// Reject schedules outside (0, 24] hours and (0, 366] days
    pub fn validate(&self) -> LightingResult<()> {
        if !(self.hours_per_day > 0.0 && self.hours_per_day <= 24.0) {
            return Err(LightingError::InvalidParameter(format!(
                "hours per day must lie in (0, 24], got {}",
                self.hours_per_day
            )));
        }
        if !(self.days_per_year > 0.0 && self.days_per_year <= 366.0) {
            return Err(LightingError::InvalidParameter(format!(
                "days per year must lie in (0, 366], got {}",
                self.days_per_year
            )));
        }
        Ok(())
    }
}

/// Electricity price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tariff {
    /// Price per kWh
    pub cost_per_kwh: f64,
    /// Currency code for display
    pub currency: String,
}

impl Default for Tariff {
    fn default() -> Self {
        Self {
            cost_per_kwh: 0.25,
            currency: "SGD".to_string(),
        }
    }
}

impl Tariff {
    /// Create a tariff in the given currency
    pub fn new(cost_per_kwh: f64, currency: &str) -> Self {
        Self {
            cost_per_kwh,
            currency: currency.to_string(),
        }
    }

    /// Reject negative or non-finite prices
    pub fn validate(&self) -> LightingResult<()> {
        if !(self.cost_per_kwh.is_finite() && self.cost_per_kwh >= 0.0) {
            return Err(LightingError::InvalidParameter(format!(
                "cost per kWh must be non-negative, got {}",
                self.cost_per_kwh
            )));
        }
        Ok(())
    }
}

/// Consumption (kWh) and cost over a day, a 30-day month and a year
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostProjection {
    pub daily_kwh: f64,
    pub monthly_kwh: f64,
    pub yearly_kwh: f64,
    pub daily_cost: f64,
    pub monthly_cost: f64,
    pub yearly_cost: f64,
}

impl CostProjection {
    /// Copy rounded to two decimals for display
    pub fn rounded(&self) -> Self {
        Self {
            daily_kwh: math::round_to(self.daily_kwh, 2),
            monthly_kwh: math::round_to(self.monthly_kwh, 2),
            yearly_kwh: math::round_to(self.yearly_kwh, 2),
            daily_cost: math::round_to(self.daily_cost, 2),
            monthly_cost: math::round_to(self.monthly_cost, 2),
            yearly_cost: math::round_to(self.yearly_cost, 2),
        }
    }
}

/// Energy cost projection
#[derive(Debug, Clone, Copy, Default)]
pub struct EnergyCostEstimator;

impl EnergyCostEstimator {
    /// Create an estimator
    pub fn new() -> Self {
        Self
    }

    /// Project consumption and cost for `total_power` watts
    pub fn project(&self, total_power: f64, usage: &UsageProfile, tariff: &Tariff) -> LightingResult<CostProjection> {
        math::ensure_positive(total_power, "total power")?;
        usage.validate()?;
        tariff.validate()?;

        let daily_kwh = total_power / 1000.0 * usage.hours_per_day;
        let daily_cost = daily_kwh * tariff.cost_per_kwh;

        Ok(CostProjection {
            daily_kwh,
            monthly_kwh: daily_kwh * DAYS_PER_MONTH,
            yearly_kwh: daily_kwh * usage.days_per_year,
            daily_cost,
            monthly_cost: daily_cost * DAYS_PER_MONTH,
            yearly_cost: daily_cost * usage.days_per_year,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_living_room_costs() {
        let projection = EnergyCostEstimator::new()
            .project(60.0, &UsageProfile::default(), &Tariff::default())
            .unwrap();

        assert!((projection.daily_kwh - 0.6).abs() < 1e-12);
        assert!((projection.yearly_kwh - 219.0).abs() < 1e-9);
        assert!((projection.daily_cost - 0.15).abs() < 1e-12);

        let rounded = projection.rounded();
        assert_eq!(rounded.daily_kwh, 0.6);
        assert_eq!(rounded.monthly_kwh, 18.0);
        assert_eq!(rounded.yearly_kwh, 219.0);
        assert_eq!(rounded.monthly_cost, 4.5);
        assert_eq!(rounded.yearly_cost, 54.75);
    }

    #[test]
    fn test_monthly_is_thirty_days() {
        let usage = UsageProfile { hours_per_day: 7.5, days_per_year: 250.0 };
        let tariff = Tariff::new(0.3141, "SGD");
        for power in [12.0, 60.0, 487.0, 12_345.0] {
            let projection = EnergyCostEstimator::new().project(power, &usage, &tariff).unwrap();
            assert_eq!(projection.daily_kwh * 30.0, projection.monthly_kwh);
            assert_eq!(projection.daily_cost * 30.0, projection.monthly_cost);
            assert!((projection.daily_kwh * 250.0 - projection.yearly_kwh).abs() < 1e-9);
            assert!((projection.daily_cost * 250.0 - projection.yearly_cost).abs() < 1e-9);
        }
    }

    #[test]
    fn test_month_and_year_disagree_off_360() {
        let usage = UsageProfile { hours_per_day: 10.0, days_per_year: 365.0 };
        let projection = EnergyCostEstimator::new().project(100.0, &usage, &Tariff::default()).unwrap();
        assert!(projection.monthly_kwh * 12.0 < projection.yearly_kwh);
    }

    #[test]
    fn test_invalid_inputs() {
        let estimator = EnergyCostEstimator::new();
        let tariff = Tariff::default();
        assert!(estimator.project(0.0, &UsageProfile::default(), &tariff).is_err());

        let usage = UsageProfile { hours_per_day: 25.0, days_per_year: 365.0 };
        assert!(matches!(estimator.project(60.0, &usage, &tariff), Err(LightingError::InvalidParameter(_))));

        let usage = UsageProfile { hours_per_day: 10.0, days_per_year: 0.0 };
        assert!(estimator.project(60.0, &usage, &tariff).is_err());

        assert!(estimator.project(60.0, &UsageProfile::default(), &Tariff::new(-0.1, "SGD")).is_err());
    }
}
