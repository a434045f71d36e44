//! Outdoor Metrics
//!
//! Simplified glare and light pollution proxies for outdoor candidates.

use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;
use crate::math;
use crate::space::SpaceSpec;
use crate::{LightingError, LightingResult};

/// Glare discomfort band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlareClass {
    Low,
    Moderate,
    High,
}

impl GlareClass {
    /// Band a glare index: below 10 is low, below 20 moderate
    pub fn from_index(index: f64) -> Self {
        if index < 10.0 {
            Self::Low
        } else if index < 20.0 {
            Self::Moderate
        } else {
            Self::High
        }
    }
}

/// Light pollution risk band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollutionClass {
    Low,
    Medium,
    High,
}

impl PollutionClass {
    /// Band a pollution index: below 1 is low, below 2 medium
    pub fn from_index(index: f64) -> Self {
        if index < 1.0 {
            Self::Low
        } else if index < 2.0 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// Glare and pollution figures for one candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutdoorReport {
    pub glare_index: f64,
    pub glare_class: GlareClass,
    pub pollution_index: f64,
    pub pollution_class: PollutionClass,
}

/// Glare and light pollution estimator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutdoorMetrics {
    /// Viewing angle from the fixture axis in degrees
    pub observation_angle_deg: f64,
    /// Efficacy used to turn installed watts back into lumens
    pub assumed_lumens_per_watt: f64,
    /// Share of the flux emitted above the horizontal
    pub upward_light_fraction: f64,
}

impl Default for OutdoorMetrics {
    fn default() -> Self {
        Self {
            observation_angle_deg: 30.0,
            assumed_lumens_per_watt: 100.0,
            upward_light_fraction: 0.05,
        }
    }
}

impl OutdoorMetrics {
    /// Glare proxy, using the mounting height as the observer distance
    pub fn glare_index(&self, fixture_lumens: f64, mounting_height: f64) -> f64 {
        fixture_lumens * self.observation_angle_deg.to_radians().cos() / (mounting_height * mounting_height)
    }

    /// Upward light per unit of lit volume
    pub fn pollution_index(&self, total_power: f64, area: f64, mounting_height: f64) -> f64 {
        total_power * self.assumed_lumens_per_watt * self.upward_light_fraction / (area * mounting_height)
    }

    /// Evaluate an exterior candidate in its space
    pub fn evaluate(&self, candidate: &Candidate, space: &SpaceSpec) -> LightingResult<OutdoorReport> {
        let area = space.validate()?;
        let mounting_height = candidate.fixture.mounting_height().ok_or_else(|| {
            LightingError::InvalidParameter(format!(
                "{} has no mounting height; outdoor metrics apply to exterior fixtures only",
                candidate.fixture_ref
            ))
        })?;
        math::ensure_positive(mounting_height, "mounting height")?;

        let glare_index = math::ensure_finite(self.glare_index(candidate.fixture.lumens, mounting_height), "glare index")?;
        let pollution_index = math::ensure_finite(
            self.pollution_index(candidate.total_power, area, mounting_height),
            "light pollution index",
        )?;

        Ok(OutdoorReport {
            glare_index,
            glare_class: GlareClass::from_index(glare_index),
            pollution_index,
            pollution_class: PollutionClass::from_index(pollution_index),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FixtureRef, FixtureSpec, IpRating};
    use crate::space::Illuminance;

    fn candidate(spec: FixtureSpec, count: u32) -> Candidate {
        Candidate {
            fixture_ref: FixtureRef { category: "Pedestrian".to_string(), index: 0 },
            total_power: f64::from(count) * spec.wattage,
            fixture: spec,
            fixture_count: count,
            achieved_lux: 20.0,
            spacing: 5.0,
            max_spacing: 8.0,
            coverage: None,
        }
    }

    #[test]
    fn test_classification_bands() {
        assert_eq!(GlareClass::from_index(9.99), GlareClass::Low);
        assert_eq!(GlareClass::from_index(10.0), GlareClass::Moderate);
        assert_eq!(GlareClass::from_index(20.0), GlareClass::High);

        assert_eq!(PollutionClass::from_index(0.5), PollutionClass::Low);
        assert_eq!(PollutionClass::from_index(1.0), PollutionClass::Medium);
        assert_eq!(PollutionClass::from_index(2.0), PollutionClass::High);
    }

    #[test]
    fn test_bollard_metrics() {
        let bollard = FixtureSpec::exterior("LED Bollard", 12.0, 900.0, 80, 3000, IpRating::IP65, 360.0, 1.0);
        let space = SpaceSpec::outdoor(30.0, 4.0, 0.5, 2.0, Illuminance::Lux(10.0));
        let report = OutdoorMetrics::default().evaluate(&candidate(bollard, 10), &space).unwrap();

        let expected_glare = 900.0 * 30f64.to_radians().cos();
        assert!((report.glare_index - expected_glare).abs() < 1e-9);
        assert_eq!(report.glare_class, GlareClass::High);

        // 120 W x 100 lm/W x 0.05 / (120 m2 x 1 m) = 5
        assert!((report.pollution_index - 5.0).abs() < 1e-12);
        assert_eq!(report.pollution_class, PollutionClass::High);
    }

    #[test]
    fn test_tall_pole_low_glare() {
        let flood = FixtureSpec::exterior("LED Flood Light", 200.0, 2000.0, 80, 5000, IpRating::IP66, 60.0, 15.0);
        let space = SpaceSpec::outdoor(100.0, 60.0, 10.0, 20.0, Illuminance::Lux(100.0));
        let report = OutdoorMetrics::default().evaluate(&candidate(flood, 4), &space).unwrap();

        assert!(report.glare_index < 10.0);
        assert_eq!(report.glare_class, GlareClass::Low);
        assert!(report.pollution_index < 1.0);
        assert_eq!(report.pollution_class, PollutionClass::Low);
    }

    #[test]
    fn test_interior_candidate_rejected() {
        let bulb = FixtureSpec::interior("LED Bulb", 9.0, 800.0, 80, 3000, IpRating::IP20, 200.0);
        let space = SpaceSpec::outdoor(10.0, 10.0, 1.0, 5.0, Illuminance::Lux(10.0));
        assert!(matches!(
            OutdoorMetrics::default().evaluate(&candidate(bulb, 2), &space),
            Err(LightingError::InvalidParameter(_))
        ));
    }
}
