//! Outdoor Coverage
//!
//! Outdoor fixture counts take the larger of two bounds: enough fixtures for
//! their beams to cover the whole area, and enough flux for the lumen method.
//! The coverage bound keeps fixtures from being spaced farther apart than their
//! beam reaches even when raw output alone would allow fewer units.

use std::f64::consts::PI;

use crate::candidate::{Candidate, Coverage};
use crate::catalog::{FixtureCatalog, FixtureRef, FixtureSpec};
use crate::lumen::LumenMethodCalculator;
use crate::math;
use crate::space::{Environment, SpaceSpec};
use crate::{LightingError, LightingResult};

/// Spacing cap for omnidirectional fixtures, in meters
pub const OMNI_SPACING_CAP: f64 = 10.0;
/// Spacing cap for directional fixtures, in meters
pub const DIRECTIONAL_SPACING_CAP: f64 = 15.0;

/// Beam footprint of a single fixture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamFootprint {
    pub radius: f64,
    pub area: f64,
    pub omnidirectional: bool,
}

/// Coverage/lumen hybrid calculator for outdoor areas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageCalculator {
    lumen: LumenMethodCalculator,
    max_half_angle_deg: f64,
}

impl CoverageCalculator {
    /// Create a calculator with the outdoor utilization factor
    pub fn new(maintenance_factor: f64, utilization_factor: f64, max_half_angle_deg: f64) -> LightingResult<Self> {
        Ok(Self {
            lumen: LumenMethodCalculator::new(maintenance_factor, utilization_factor, max_half_angle_deg)?,
            max_half_angle_deg,
        })
    }

    /// Ground footprint of an exterior fixture's beam.
    ///
    /// Omnidirectional fixtures light a disc; narrower beams are
    /// approximated by a strip `2 x radius` wide and `mounting_height` deep.
    pub fn footprint(&self, spec: &FixtureSpec) -> LightingResult<BeamFootprint> {
        let mounting_height = spec.mounting_height().ok_or_else(|| {
            LightingError::InvalidParameter(format!("{} has no mounting height", spec.fixture_type))
        })?;
        let radius = math::ensure_finite(
            mounting_height * math::tan_half_angle(spec.beam_angle, self.max_half_angle_deg),
            "coverage radius",
        )?;
        let omnidirectional = spec.is_omnidirectional();
        let area = if omnidirectional {
            PI * radius * radius
        } else {
            2.0 * radius * mounting_height
        };
        let area = math::ensure_finite(area, "coverage area")?;
        if area <= f64::EPSILON {
            return Err(LightingError::ComputationOverflow(format!(
                "beam angle {} deg covers no ground area",
                spec.beam_angle
            )));
        }
        Ok(BeamFootprint {
            radius,
            area,
            omnidirectional,
        })
    }

    /// Evaluate one exterior fixture against an area
    pub fn evaluate_fixture(
        &self,
        fixture_ref: FixtureRef,
        spec: &FixtureSpec,
        area: f64,
        target_lux: f64,
    ) -> LightingResult<Candidate> {
        spec.validate()?;
        let footprint = self.footprint(spec)?;
        let required = self.lumen.required_lumens(target_lux, area)?;
        let by_coverage = math::ceil_count(area / footprint.area, "coverage fixture count")?;
        let by_lumens = math::ceil_count(required / spec.lumens, "lumen fixture count")?;
        let fixture_count = by_coverage.max(by_lumens);

        let achieved_lux = math::ensure_finite(
            self.lumen.achieved_lux(fixture_count, spec.lumens, area),
            "achieved illuminance",
        )?;

        let (max_spacing, cap) = if footprint.omnidirectional {
            (2.0 * footprint.radius, OMNI_SPACING_CAP)
        } else {
            (1.5 * footprint.radius, DIRECTIONAL_SPACING_CAP)
        };

        // Always MF x UF; see `Coverage::uniformity`
        let uniformity = achieved_lux / (f64::from(fixture_count) * spec.lumens / area);

        Ok(Candidate {
            fixture_ref,
            fixture: spec.clone(),
            fixture_count,
            total_power: f64::from(fixture_count) * spec.wattage,
            achieved_lux,
            spacing: max_spacing.min(cap),
            max_spacing,
            coverage: Some(Coverage {
                radius: footprint.radius,
                area: footprint.area,
                uniformity,
            }),
        })
    }

    /// One candidate per catalog fixture whose mounting height fits the area
    pub fn calculate(&self, space: &SpaceSpec, target_lux: f64, catalog: &FixtureCatalog) -> LightingResult<Vec<Candidate>> {
        let area = space.validate()?;
        if space.environment() != Environment::Outdoor {
            return Err(LightingError::InvalidParameter(
                "coverage method needs an outdoor space with a mounting height range".to_string(),
            ));
        }
        math::ensure_positive(target_lux, "target illuminance")?;

        let mut candidates = Vec::with_capacity(catalog.len());
        for (fixture_ref, spec) in catalog.iter() {
            let Some(height) = spec.mounting_height() else {
                return Err(LightingError::InvalidParameter(format!(
                    "{fixture_ref} ({}) is not an exterior fixture",
                    spec.fixture_type
                )));
            };
            if !space.accepts_mounting_height(height) {
                log::debug!("Skipping {fixture_ref}: mounting height {height} m outside requested range");
                continue;
            }
            candidates.push(self.evaluate_fixture(fixture_ref, spec, area, target_lux)?);
        }

        if candidates.is_empty() {
            log::warn!("No outdoor fixture fits the requested mounting height range");
            return Err(LightingError::EmptyCatalog(
                "no outdoor fixtures available for the requested mounting heights".to_string(),
            ));
        }

        log::debug!(
            "Coverage method: {} candidates for {:.1} m2 at {} lux",
            candidates.len(),
            area,
            target_lux
        );
        Ok(candidates)
    }
}
