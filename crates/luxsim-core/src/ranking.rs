//! Candidate ranking
//!
//! Fewest fixtures first, then lowest total power. The sort is stable, so equal
//! candidates keep their catalog enumeration order.

use std::cmp::Ordering;

use crate::candidate::Candidate;

/// Ordering used by [`rank_candidates`]
pub fn compare(a: &Candidate, b: &Candidate) -> Ordering {
    a.fixture_count
        .cmp(&b.fixture_count)
        .then_with(|| a.total_power.total_cmp(&b.total_power))
}

/// Sort candidates in place into ranked order
pub fn rank_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(compare);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FixtureRef, FixtureSpec, IpRating};

    fn candidate(category: &str, index: usize, count: u32, wattage: f64) -> Candidate {
        Candidate {
            fixture_ref: FixtureRef { category: category.to_string(), index },
            fixture: FixtureSpec::interior("LED Panel", wattage, 1000.0, 85, 4000, IpRating::IP20, 120.0),
            fixture_count: count,
            total_power: f64::from(count) * wattage,
            achieved_lux: 100.0,
            spacing: 1.0,
            max_spacing: 2.0,
            coverage: None,
        }
    }

    #[test]
    fn test_count_then_power() {
        let mut candidates = vec![
            candidate("A", 0, 6, 10.0),
            candidate("A", 1, 4, 30.0),
            candidate("A", 2, 4, 20.0),
        ];
        rank_candidates(&mut candidates);

        let order: Vec<_> = candidates.iter().map(|c| c.fixture_ref.index).collect();
        assert_eq!(order, [2, 1, 0]);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let mut candidates = vec![
            candidate("Office", 0, 3, 18.0),
            candidate("Educational", 0, 3, 18.0),
            candidate("Office", 1, 3, 18.0),
            candidate("Residential", 2, 2, 40.0),
        ];
        rank_candidates(&mut candidates);

        let order: Vec<_> = candidates.iter().map(|c| c.fixture_ref.to_string()).collect();
        assert_eq!(order, ["Residential#3", "Office#1", "Educational#1", "Office#2"]);
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let build = || {
            (0..12)
                .map(|i| candidate("Mixed", i, (i % 4) as u32 + 1, 10.0 * ((i % 3) as f64 + 1.0)))
                .collect::<Vec<_>>()
        };
        let mut first = build();
        let mut second = build();
        rank_candidates(&mut first);
        rank_candidates(&mut second);
        assert_eq!(first, second);
    }
}
