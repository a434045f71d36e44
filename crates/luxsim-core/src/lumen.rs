//! Lumen Method
//!
//! Indoor fixture counts: the installed flux must cover
//! `target_lux x area / (MF x UF)`, rounded up to whole fixtures.

use crate::candidate::Candidate;
use crate::catalog::{FixtureCatalog, FixtureRef, FixtureSpec};
use crate::math;
use crate::space::SpaceSpec;
use crate::{LightingError, LightingResult};

/// Lumen-method calculator for indoor rooms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LumenMethodCalculator {
    maintenance_factor: f64,
    utilization_factor: f64,
    max_half_angle_deg: f64,
}

impl LumenMethodCalculator {
    /// Create a calculator, rejecting factors outside (0, 1]
    pub fn new(maintenance_factor: f64, utilization_factor: f64, max_half_angle_deg: f64) -> LightingResult<Self> {
        math::ensure_unit_factor(maintenance_factor, "maintenance factor")?;
        math::ensure_unit_factor(utilization_factor, "utilization factor")?;
        Ok(Self {
            maintenance_factor,
            utilization_factor,
            max_half_angle_deg,
        })
    }

    /// Combined light loss factor MF x UF
    pub fn light_loss_factor(&self) -> f64 {
        self.maintenance_factor * self.utilization_factor
    }

    /// Total flux the fixtures must emit to reach `target_lux` on `area`
    pub fn required_lumens(&self, target_lux: f64, area: f64) -> LightingResult<f64> {
        let llf = self.light_loss_factor();
        if llf <= f64::EPSILON {
            return Err(LightingError::ComputationOverflow(format!(
                "light loss factor {llf} is too small to divide by"
            )));
        }
        math::ensure_finite(target_lux * area / llf, "required lumens")
    }

    /// Maintained illuminance from `count` fixtures of `lumens` each
    pub fn achieved_lux(&self, count: u32, lumens: f64, area: f64) -> f64 {
        f64::from(count) * lumens * self.light_loss_factor() / area
    }

    /// Widest spacing the beam allows at a given mounting height
    pub fn max_spacing(&self, height: f64, beam_angle: f64) -> f64 {
        height * math::tan_half_angle(beam_angle, self.max_half_angle_deg) * 2.0
    }

    /// Evaluate one fixture against a room
    pub fn evaluate_fixture(
        &self,
        fixture_ref: FixtureRef,
        spec: &FixtureSpec,
        area: f64,
        height: f64,
        target_lux: f64,
    ) -> LightingResult<Candidate> {
        spec.validate()?;

        let required = self.required_lumens(target_lux, area)?;
        let fixture_count = math::ceil_count(required / spec.lumens, "fixture count")?;
        let achieved_lux = math::ensure_finite(self.achieved_lux(fixture_count, spec.lumens, area), "achieved illuminance")?;
        let max_spacing = math::ensure_finite(self.max_spacing(height, spec.beam_angle), "maximum spacing")?;
        let spacing = (area / f64::from(fixture_count)).sqrt().min(max_spacing);

        Ok(Candidate {
            fixture_ref,
            fixture: spec.clone(),
            fixture_count,
            total_power: f64::from(fixture_count) * spec.wattage,
            achieved_lux,
            spacing,
            max_spacing,
            coverage: None,
        })
    }

    /// One candidate per catalog fixture, in catalog order
    pub fn calculate(&self, space: &SpaceSpec, target_lux: f64, catalog: &FixtureCatalog) -> LightingResult<Vec<Candidate>> {
        let area = space.validate()?;
        let height = space.ceiling_height().ok_or_else(|| {
            LightingError::InvalidParameter("lumen method needs an indoor space with a ceiling height".to_string())
        })?;
        math::ensure_positive(target_lux, "target illuminance")?;
        if catalog.is_empty() {
            return Err(LightingError::EmptyCatalog("no indoor fixtures to evaluate".to_string()));
        }

        let candidates = catalog
            .iter()
            .map(|(fixture_ref, spec)| self.evaluate_fixture(fixture_ref, spec, area, height, target_lux))
            .collect::<LightingResult<Vec<_>>>()?;

        log::debug!(
            "Lumen method: {} candidates for {:.1} m2 at {} lux (MF {}, UF {})",
            candidates.len(),
            area,
            target_lux,
            self.maintenance_factor,
            self.utilization_factor
        );
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::IpRating;
    use crate::space::Illuminance;
    use crate::INDOOR_CATALOG;

    fn calculator() -> LumenMethodCalculator {
        LumenMethodCalculator::new(0.8, 0.7, 89.9).unwrap()
    }

    fn bulb() -> FixtureSpec {
        FixtureSpec::interior("LED Bulb", 12.0, 1100.0, 80, 3000, IpRating::IP20, 200.0)
    }

    fn bulb_ref() -> FixtureRef {
        FixtureRef { category: "Residential".to_string(), index: 1 }
    }

    #[test]
    fn test_living_room_example() {
        let calc = calculator();
        let required = calc.required_lumens(150.0, 20.0).unwrap();
        assert!((required - 5357.142857).abs() < 1e-5);

        let candidate = calc.evaluate_fixture(bulb_ref(), &bulb(), 20.0, 2.8, 150.0).unwrap();
        assert_eq!(candidate.fixture_count, 5);
        assert_eq!(candidate.total_power, 60.0);
        assert!((candidate.achieved_lux - 154.0).abs() < 1e-9);
        assert!(candidate.meets_target(150.0));
        assert_eq!(candidate.spacing, 2.0);
        assert!(candidate.coverage.is_none());
    }

    #[test]
    fn test_spacing_capped_by_beam() {
        let calc = calculator();
        let track = FixtureSpec::interior("LED Track Light", 20.0, 2000.0, 85, 4000, IpRating::IP20, 36.0);
        let candidate = calc.evaluate_fixture(bulb_ref(), &track, 100.0, 2.8, 100.0).unwrap();

        let expected_max = 2.8 * 18f64.to_radians().tan() * 2.0;
        assert!((candidate.max_spacing - expected_max).abs() < 1e-12);
        assert_eq!(candidate.spacing, expected_max);
        assert!(candidate.spacing <= candidate.max_spacing);
    }

    #[test]
    fn test_count_never_below_one() {
        let calc = calculator();
        let high_bay = FixtureSpec::interior("LED High Bay", 200.0, 20000.0, 80, 5000, IpRating::IP65, 60.0);
        let candidate = calc.evaluate_fixture(bulb_ref(), &high_bay, 1.0, 3.0, 1.0).unwrap();
        assert_eq!(candidate.fixture_count, 1);
    }

    #[test]
    fn test_monotonic_in_target() {
        let calc = calculator();
        let mut previous = 0;
        for target in (50..=2000).step_by(50) {
            let candidate = calc.evaluate_fixture(bulb_ref(), &bulb(), 37.5, 3.0, f64::from(target)).unwrap();
            assert!(candidate.fixture_count >= previous);
            assert!(candidate.meets_target(f64::from(target)));
            previous = candidate.fixture_count;
        }
    }

    #[test]
    fn test_invalid_factors() {
        assert!(matches!(LumenMethodCalculator::new(0.0, 0.7, 89.9), Err(LightingError::InvalidParameter(_))));
        assert!(LumenMethodCalculator::new(0.8, 1.5, 89.9).is_err());
        assert!(LumenMethodCalculator::new(1.0, 1.0, 89.9).is_ok());
    }

    #[test]
    fn test_calculate_whole_catalog() {
        let space = SpaceSpec::indoor(5.0, 4.0, 2.8, Illuminance::Lux(150.0));
        let candidates = calculator().calculate(&space, 150.0, &INDOOR_CATALOG).unwrap();
        assert_eq!(candidates.len(), INDOOR_CATALOG.len());
        assert!(candidates.iter().all(|c| c.fixture_count >= 1 && c.meets_target(150.0)));
        assert!(candidates.iter().all(|c| c.total_power == f64::from(c.fixture_count) * c.fixture.wattage));
    }

    #[test]
    fn test_calculate_rejects_outdoor_space_and_empty_catalog() {
        let outdoor = SpaceSpec::outdoor(20.0, 10.0, 3.0, 8.0, Illuminance::Lux(20.0));
        assert!(matches!(
            calculator().calculate(&outdoor, 20.0, &INDOOR_CATALOG),
            Err(LightingError::InvalidParameter(_))
        ));

        let room = SpaceSpec::indoor(5.0, 4.0, 2.8, Illuminance::Lux(150.0));
        assert!(matches!(
            calculator().calculate(&room, 150.0, &FixtureCatalog::new()),
            Err(LightingError::EmptyCatalog(_))
        ));
    }
}
