//! Candidate configurations produced by the calculators

use serde::{Deserialize, Serialize};

use crate::catalog::{FixtureRef, FixtureSpec};
use crate::space::Environment;

/// Beam coverage figures for an outdoor candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    /// Ground radius lit by one fixture in meters
    pub radius: f64,
    /// Ground area lit by one fixture in square meters
    pub area: f64,
    /// Uniformity proxy.
    ///
    /// The formula reduces to MF x UF for every fixture regardless of geometry,
    /// so it is not a real min/average uniformity measurement and must not be
    /// relied on as a safety check.
    pub uniformity: f64,
}

/// One fixture model evaluated against one space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub fixture_ref: FixtureRef,
    pub fixture: FixtureSpec,
    /// Number of fixtures, at least one
    pub fixture_count: u32,
    /// fixture_count x wattage, in watts
    pub total_power: f64,
    /// Maintained illuminance with `fixture_count` fixtures, in lux
    pub achieved_lux: f64,
    /// Recommended spacing between fixtures in meters
    pub spacing: f64,
    /// Upper bound on spacing from the mounting geometry
    pub max_spacing: f64,
    /// Present for outdoor candidates only
    pub coverage: Option<Coverage>,
}

impl Candidate {
    /// Achieved illuminance reaches `target_lux`, allowing for rounding noise
    pub fn meets_target(&self, target_lux: f64) -> bool {
        self.achieved_lux >= target_lux - 1e-9 * target_lux.max(1.0)
    }

    /// Lumens installed across all fixtures
    pub fn total_lumens(&self) -> f64 {
        f64::from(self.fixture_count) * self.fixture.lumens
    }
}

/// Ranked candidates for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub environment: Environment,
    /// Floor area in square meters
    pub area: f64,
    /// Resolved target illuminance in lux
    pub target_lux: f64,
    /// Candidates in ranked order
    pub candidates: Vec<Candidate>,
}

impl Evaluation {
    /// Best-ranked candidate
    pub fn recommended(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    /// The `n` best-ranked candidates
    pub fn top(&self, n: usize) -> &[Candidate] {
        &self.candidates[..n.min(self.candidates.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::IpRating;

    fn candidate(count: u32, achieved_lux: f64) -> Candidate {
        let fixture = FixtureSpec::interior("LED Bulb", 12.0, 1100.0, 80, 3000, IpRating::IP20, 200.0);
        Candidate {
            fixture_ref: FixtureRef { category: "Residential".to_string(), index: 1 },
            total_power: f64::from(count) * fixture.wattage,
            fixture,
            fixture_count: count,
            achieved_lux,
            spacing: 2.0,
            max_spacing: 5.0,
            coverage: None,
        }
    }

    #[test]
    fn test_meets_target() {
        assert!(candidate(5, 154.0).meets_target(150.0));
        assert!(candidate(5, 150.0 - 1e-12).meets_target(150.0));
        assert!(!candidate(4, 123.2).meets_target(150.0));
    }

    #[test]
    fn test_total_lumens() {
        assert_eq!(candidate(5, 154.0).total_lumens(), 5500.0);
    }

    #[test]
    fn test_top() {
        let evaluation = Evaluation {
            environment: Environment::Indoor,
            area: 20.0,
            target_lux: 150.0,
            candidates: vec![candidate(5, 154.0), candidate(6, 184.8)],
        };
        assert_eq!(evaluation.recommended().unwrap().fixture_count, 5);
        assert_eq!(evaluation.top(1).len(), 1);
        assert_eq!(evaluation.top(10).len(), 2);
    }
}
