//! # LuxSim Core
//!
//! Lighting computation engine for the LuxSim calculator.
//!
//! This crate turns a space description and a target illuminance into ranked
//! fixture recommendations:
//! - **Catalog / Standards**: Read-only fixture specifications and SS 531 illuminance tables
//! - **Lumen method**: Indoor fixture counts from target lux and floor area
//! - **Coverage**: Outdoor fixture counts from beam geometry and lumen output
//! - **Ranking**: Deterministic ordering by fixture count, then total power
//! - **Layout**: Regular 2D placement grid for the recommended fixture
//! - **Energy**: Daily, monthly and yearly consumption and cost projections
//! - **Outdoor metrics**: Glare index and light pollution risk
//!
//! Every operation is a pure function over immutable inputs. The built-in
//! tables are initialised once and never mutated, so a [`LightingEngine`] can
//! be shared across threads freely.

pub mod math;
pub mod catalog;
pub mod standards;
pub mod space;
pub mod candidate;
pub mod lumen;
pub mod coverage;
pub mod ranking;
pub mod layout;
pub mod energy;
pub mod outdoor;
pub mod engine;

pub use catalog::{FixtureCatalog, FixtureRef, FixtureSpec, IpRating, Placement, INDOOR_CATALOG, OUTDOOR_CATALOG};
pub use standards::{SpaceType, StandardsTable, INDOOR_STANDARDS, OUTDOOR_STANDARDS};
pub use space::{Environment, Illuminance, SpaceHeight, SpaceSpec};
pub use candidate::{Candidate, Coverage, Evaluation};
pub use layout::{LayoutGenerator, LayoutPlacement};
pub use energy::{CostProjection, EnergyCostEstimator, Tariff, UsageProfile};
pub use outdoor::{GlareClass, OutdoorMetrics, OutdoorReport, PollutionClass};
pub use engine::{LightingEngine, LightingRequest, Recommendation, ReferenceTables};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lighting computation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LightingError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Empty catalog: {0}")]
    EmptyCatalog(String),

    #[error("Computation overflow: {0}")]
    ComputationOverflow(String),

    #[error("Unknown standard: {0}")]
    UnknownStandard(String),
}

/// Result type for lighting computations
pub type LightingResult<T> = Result<T, LightingError>;

/// Engine configuration
///
/// Any field omitted from a JSON config file falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maintenance factor (output decline over time)
    pub maintenance_factor: f64,
    /// Utilization factor for indoor rooms
    pub indoor_utilization: f64,
    /// Utilization factor for outdoor areas (lower, fixtures sit farther apart)
    pub outdoor_utilization: f64,
    /// Upper bound for a beam half-angle in degrees before taking its tangent
    pub max_half_angle_deg: f64,
    /// Observation angle used by the glare index, in degrees
    pub observation_angle_deg: f64,
    /// Luminous efficacy assumed when estimating upward light, in lm/W
    pub assumed_lumens_per_watt: f64,
    /// Share of emitted light that escapes upward
    pub upward_light_fraction: f64,
    /// Lowest supported target illuminance in lux
    pub min_target_lux: f64,
    /// Highest supported target illuminance in lux
    pub max_target_lux: f64,
    /// Largest fixture count a placement grid is generated for
    pub max_layout_fixtures: u32,
    /// Usage profile applied when a request does not carry one
    pub default_usage: UsageProfile,
    /// Tariff applied when a request does not carry one
    pub default_tariff: Tariff,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            maintenance_factor: 0.8,
            indoor_utilization: 0.7,
            outdoor_utilization: 0.5,
            max_half_angle_deg: 89.9,
            observation_angle_deg: 30.0,
            assumed_lumens_per_watt: 100.0,
            upward_light_fraction: 0.05,
            min_target_lux: 1.0,
            max_target_lux: 10_000.0,
            max_layout_fixtures: layout::DEFAULT_MAX_LAYOUT_FIXTURES,
            default_usage: UsageProfile::default(),
            default_tariff: Tariff::default(),
        }
    }
}

impl EngineConfig {
    /// Check every factor and bound, failing on the first invalid one
    pub fn validate(&self) -> LightingResult<()> {
        math::ensure_unit_factor(self.maintenance_factor, "maintenance factor")?;
        math::ensure_unit_factor(self.indoor_utilization, "indoor utilization factor")?;
        math::ensure_unit_factor(self.outdoor_utilization, "outdoor utilization factor")?;
        if self.outdoor_utilization > self.indoor_utilization {
            log::warn!(
                "Outdoor utilization factor {} exceeds indoor factor {}; outdoor fixtures usually sit farther apart",
                self.outdoor_utilization,
                self.indoor_utilization
            );
        }

        if !(self.max_half_angle_deg > 0.0 && self.max_half_angle_deg < 90.0) {
            return Err(LightingError::InvalidParameter(format!(
                "maximum half-angle must lie in (0, 90) degrees, got {}",
                self.max_half_angle_deg
            )));
        }
        if !(0.0..90.0).contains(&self.observation_angle_deg) {
            return Err(LightingError::InvalidParameter(format!(
                "observation angle must lie in [0, 90) degrees, got {}",
                self.observation_angle_deg
            )));
        }
        math::ensure_positive(self.assumed_lumens_per_watt, "assumed efficacy")?;
        if !(0.0..=1.0).contains(&self.upward_light_fraction) {
            return Err(LightingError::InvalidParameter(format!(
                "upward light fraction must lie in [0, 1], got {}",
                self.upward_light_fraction
            )));
        }
        math::ensure_positive(self.min_target_lux, "minimum target illuminance")?;
        if !(self.max_target_lux.is_finite() && self.max_target_lux >= self.min_target_lux) {
            return Err(LightingError::InvalidParameter(format!(
                "supported illuminance range [{}, {}] is empty",
                self.min_target_lux, self.max_target_lux
            )));
        }
        if self.max_layout_fixtures == 0 {
            return Err(LightingError::InvalidParameter(
                "maximum layout fixture count must be at least 1".to_string(),
            ));
        }
        self.default_usage.validate()?;
        self.default_tariff.validate()?;
        Ok(())
    }
}
