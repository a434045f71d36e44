//! Lighting Engine
//!
//! Facade tying the calculators together. Every method takes `&self` and
//! allocates its results fresh, so one engine can serve many threads.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::candidate::Evaluation;
use crate::catalog::{FixtureCatalog, INDOOR_CATALOG, OUTDOOR_CATALOG};
use crate::coverage::CoverageCalculator;
use crate::energy::{CostProjection, EnergyCostEstimator, Tariff, UsageProfile};
use crate::layout::{LayoutGenerator, LayoutPlacement};
use crate::lumen::LumenMethodCalculator;
use crate::outdoor::{OutdoorMetrics, OutdoorReport};
use crate::ranking::rank_candidates;
use crate::space::{Environment, SpaceSpec};
use crate::standards::{StandardsTable, INDOOR_STANDARDS, OUTDOOR_STANDARDS};
use crate::{Candidate, EngineConfig, LightingError, LightingResult};

/// Catalogs and standards a request is evaluated against
#[derive(Debug, Clone, Copy)]
pub struct ReferenceTables<'a> {
    pub indoor_catalog: &'a FixtureCatalog,
    pub outdoor_catalog: &'a FixtureCatalog,
    pub indoor_standards: &'a StandardsTable,
    pub outdoor_standards: &'a StandardsTable,
}

impl ReferenceTables<'static> {
    /// The built-in tables
    pub fn builtin() -> Self {
        Self {
            indoor_catalog: &INDOOR_CATALOG,
            outdoor_catalog: &OUTDOOR_CATALOG,
            indoor_standards: &INDOOR_STANDARDS,
            outdoor_standards: &OUTDOOR_STANDARDS,
        }
    }
}

impl Default for ReferenceTables<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

/// One complete lighting request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingRequest {
    pub space: SpaceSpec,
    /// Outdoor catalog category to draw fixtures from (outdoor only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_type: Option<String>,
    /// Falls back to the engine's default usage profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageProfile>,
    /// Falls back to the engine's default tariff
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tariff: Option<Tariff>,
}

impl LightingRequest {
    /// Indoor request using the engine's default usage and tariff
    pub fn indoor(space: SpaceSpec) -> Self {
        Self {
            space,
            area_type: None,
            usage: None,
            tariff: None,
        }
    }

    /// Outdoor request drawing fixtures from the `area_type` category
    pub fn outdoor(space: SpaceSpec, area_type: &str) -> Self {
        Self {
            area_type: Some(area_type.to_string()),
            ..Self::indoor(space)
        }
    }
}

/// Everything computed for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub evaluation: Evaluation,
    /// Placement of the recommended candidate
    pub layout: LayoutPlacement,
    /// Cost of the recommended candidate
    pub cost: CostProjection,
    /// Cost of every candidate, aligned with `evaluation.candidates`
    pub candidate_costs: Vec<CostProjection>,
    /// Glare and pollution of the recommended candidate, outdoor only
    pub outdoor: Option<OutdoorReport>,
}

impl Recommendation {
    /// Best-ranked candidate, the one the layout and cost describe
    pub fn recommended(&self) -> Option<&Candidate> {
        self.evaluation.recommended()
    }
}

/// Lighting computation engine
#[derive(Debug, Clone)]
pub struct LightingEngine {
    config: EngineConfig,
    lumen: LumenMethodCalculator,
    coverage: CoverageCalculator,
    layout: LayoutGenerator,
    energy: EnergyCostEstimator,
    outdoor: OutdoorMetrics,
}

impl LightingEngine {
    /// Create an engine, validating the configuration first
    pub fn new(config: EngineConfig) -> LightingResult<Self> {
        config.validate()?;

        let lumen = LumenMethodCalculator::new(
            config.maintenance_factor,
            config.indoor_utilization,
            config.max_half_angle_deg,
        )?;
        let coverage = CoverageCalculator::new(
            config.maintenance_factor,
            config.outdoor_utilization,
            config.max_half_angle_deg,
        )?;
        let outdoor = OutdoorMetrics {
            observation_angle_deg: config.observation_angle_deg,
            assumed_lumens_per_watt: config.assumed_lumens_per_watt,
            upward_light_fraction: config.upward_light_fraction,
        };
        let layout = LayoutGenerator::new(config.max_layout_fixtures);

        Ok(Self {
            config,
            lumen,
            coverage,
            layout,
            energy: EnergyCostEstimator::new(),
            outdoor,
        })
    }

    /// Get the engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Ranked indoor candidates across every catalog category
    pub fn compute_indoor(
        &self,
        space: &SpaceSpec,
        catalog: &FixtureCatalog,
        standards: &StandardsTable,
    ) -> LightingResult<Evaluation> {
        let area = space.validate()?;
        let target_lux = space.resolve_target(standards, &self.config)?;

        let mut candidates = self.lumen.calculate(space, target_lux, catalog)?;
        rank_candidates(&mut candidates);

        Ok(Evaluation {
            environment: Environment::Indoor,
            area,
            target_lux,
            candidates,
        })
    }

    /// Ranked outdoor candidates from the `area_type` catalog category
    pub fn compute_outdoor(
        &self,
        space: &SpaceSpec,
        area_type: &str,
        catalog: &FixtureCatalog,
        standards: &StandardsTable,
    ) -> LightingResult<Evaluation> {
        let area = space.validate()?;
        let target_lux = space.resolve_target(standards, &self.config)?;
        let category = catalog.only(area_type)?;

        let mut candidates = self.coverage.calculate(space, target_lux, &category)?;
        rank_candidates(&mut candidates);

        Ok(Evaluation {
            environment: Environment::Outdoor,
            area,
            target_lux,
            candidates,
        })
    }

    /// Grid placement for a candidate's fixtures
    pub fn layout(&self, candidate: &Candidate, space: &SpaceSpec) -> LightingResult<LayoutPlacement> {
        space.validate()?;
        self.layout.generate(space.bounds(), candidate.fixture_count)
    }

    /// Consumption and cost for a candidate
    pub fn energy_cost(&self, candidate: &Candidate, usage: &UsageProfile, tariff: &Tariff) -> LightingResult<CostProjection> {
        self.energy.project(candidate.total_power, usage, tariff)
    }

    /// Glare and light pollution for an outdoor candidate
    pub fn outdoor_metrics(&self, candidate: &Candidate, space: &SpaceSpec) -> LightingResult<OutdoorReport> {
        self.outdoor.evaluate(candidate, space)
    }

    /// Evaluate a request end to end
    pub fn recommend(&self, request: &LightingRequest, tables: &ReferenceTables<'_>) -> LightingResult<Recommendation> {
        let space = &request.space;
        let evaluation = match space.environment() {
            Environment::Indoor => self.compute_indoor(space, tables.indoor_catalog, tables.indoor_standards)?,
            Environment::Outdoor => {
                let area_type = request.area_type.as_deref().ok_or_else(|| {
                    LightingError::InvalidParameter("outdoor requests need an area type".to_string())
                })?;
                self.compute_outdoor(space, area_type, tables.outdoor_catalog, tables.outdoor_standards)?
            }
        };

        let usage = request.usage.unwrap_or(self.config.default_usage);
        let tariff = request.tariff.as_ref().unwrap_or(&self.config.default_tariff);

        let best = evaluation
            .recommended()
            .ok_or_else(|| LightingError::EmptyCatalog("no candidates were produced".to_string()))?;
        let layout = self.layout(best, space)?;
        let cost = self.energy_cost(best, &usage, tariff)?;
        let outdoor = match evaluation.environment {
            Environment::Indoor => None,
            Environment::Outdoor => Some(self.outdoor_metrics(best, space)?),
        };
        let candidate_costs = evaluation
            .candidates
            .iter()
            .map(|candidate| self.energy_cost(candidate, &usage, tariff))
            .collect::<LightingResult<Vec<_>>>()?;

        log::debug!(
            "Recommended {} x {} ({}) at {:.0} W for {:.1} m2",
            best.fixture_count,
            best.fixture.fixture_type,
            best.fixture_ref,
            best.total_power,
            evaluation.area
        );

        Ok(Recommendation {
            evaluation,
            layout,
            cost,
            candidate_costs,
            outdoor,
        })
    }

    /// Evaluate many requests in parallel, keeping input order
    pub fn evaluate_batch(
        &self,
        requests: &[LightingRequest],
        tables: &ReferenceTables<'_>,
    ) -> Vec<LightingResult<Recommendation>> {
        requests
            .par_iter()
            .map(|request| self.recommend(request, tables))
            .collect()
    }
}

impl Default for LightingEngine {
    fn default() -> Self {
        // The default configuration always validates
        match Self::new(EngineConfig::default()) {
            Ok(engine) => engine,
            Err(err) => unreachable!("default engine configuration rejected: {err}"),
        }
    }
}
