//! # LuxSim CLI
//!
//! Command-line front end for the LuxSim lighting engine.
//!
//! ## Commands
//! - `indoor` - Recommend fixtures for a room
//! - `outdoor` - Recommend fixtures for an outdoor area
//! - `batch` - Evaluate a JSON file of requests in parallel
//! - `standards` - List required illuminance per space type
//! - `catalog` - List the fixture catalog

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use luxsim_core::{
    EngineConfig, FixtureCatalog, Illuminance, LightingEngine, LightingRequest, Recommendation,
    ReferenceTables, SpaceSpec, SpaceType, StandardsTable, Tariff, UsageProfile,
    INDOOR_CATALOG, INDOOR_STANDARDS, OUTDOOR_CATALOG, OUTDOOR_STANDARDS,
};

/// LuxSim lighting calculator
#[derive(Parser)]
#[command(name = "luxsim")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Engine configuration file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Indoor fixture catalog replacing the built-in one (JSON)
    #[arg(long, global = true)]
    pub indoor_catalog: Option<PathBuf>,

    /// Outdoor fixture catalog replacing the built-in one (JSON)
    #[arg(long, global = true)]
    pub outdoor_catalog: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Target illuminance: a standards entry or an explicit value
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Standards group (building type or outdoor area group)
    #[arg(long)]
    pub group: Option<String>,

    /// Standards entry within the group (room or area)
    #[arg(long)]
    pub space: Option<String>,

    /// Custom target illuminance in lux, overriding the standard
    #[arg(long)]
    pub lux: Option<f64>,
}

/// Operating schedule, tariff and light loss overrides
#[derive(Args, Debug, Clone, Default)]
pub struct UsageArgs {
    /// Operating hours per day
    #[arg(long)]
    pub hours_per_day: Option<f64>,

    /// Operating days per year
    #[arg(long)]
    pub days_per_year: Option<f64>,

    /// Electricity cost per kWh
    #[arg(long)]
    pub cost_per_kwh: Option<f64>,

    /// Currency code for costs
    #[arg(long)]
    pub currency: Option<String>,

    /// Maintenance factor (0-1]
    #[arg(long)]
    pub maintenance_factor: Option<f64>,

    /// Utilization factor (0-1], indoor or outdoor depending on the command
    #[arg(long)]
    pub utilization_factor: Option<f64>,

    /// Number of ranked options to list
    #[arg(long, default_value = "5")]
    pub top: usize,
}

/// CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Recommend fixtures for an indoor room
    Indoor {
        /// Room length in meters
        #[arg(short, long)]
        length: f64,

        /// Room width in meters
        #[arg(short, long)]
        width: f64,

        /// Ceiling height in meters
        #[arg(long, default_value = "2.8")]
        height: f64,

        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        usage: UsageArgs,
    },

    /// Recommend fixtures for an outdoor area
    Outdoor {
        /// Area length in meters
        #[arg(short, long)]
        length: f64,

        /// Area width in meters
        #[arg(short, long)]
        width: f64,

        /// Outdoor catalog category (e.g. "Car Park")
        #[arg(short, long)]
        area_type: String,

        /// Lowest acceptable mounting height in meters
        #[arg(long, default_value = "0.5")]
        min_height: f64,

        /// Highest acceptable mounting height in meters
        #[arg(long, default_value = "20")]
        max_height: f64,

        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        usage: UsageArgs,
    },

    /// Evaluate a JSON array of requests
    Batch {
        /// Request file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// List required illuminance per space type
    Standards {
        /// Show outdoor areas instead of indoor rooms
        #[arg(long)]
        outdoor: bool,
    },

    /// List the fixture catalog
    Catalog {
        /// Show the outdoor catalog instead of the indoor one
        #[arg(long)]
        outdoor: bool,
    },
}

/// Outcome of one batch request
#[derive(Debug, Serialize)]
pub struct BatchEntry {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Read and parse a JSON file
fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} from {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {what} in {}", path.display()))
}

/// Load the engine configuration, defaulting when no file is given
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            log::debug!("Loading config from {}", path.display());
            read_json(path, "engine config")
        }
        None => Ok(EngineConfig::default()),
    }
}

impl TargetArgs {
    /// Resolve to an engine target; an explicit lux value wins
    pub fn to_illuminance(&self, default_group: &str, default_space: &str) -> Illuminance {
        match self.lux {
            Some(lux) => Illuminance::Lux(lux),
            None => Illuminance::Standard(SpaceType::new(
                self.group.as_deref().unwrap_or(default_group),
                self.space.as_deref().unwrap_or(default_space),
            )),
        }
    }
}

impl UsageArgs {
    /// Apply schedule, tariff and factor overrides onto a config
    pub fn apply(&self, config: &mut EngineConfig, outdoor: bool) {
        if let Some(hours) = self.hours_per_day {
            config.default_usage.hours_per_day = hours;
        }
        if let Some(days) = self.days_per_year {
            config.default_usage.days_per_year = days;
        }
        if let Some(cost) = self.cost_per_kwh {
            config.default_tariff.cost_per_kwh = cost;
        }
        if let Some(currency) = &self.currency {
            config.default_tariff.currency = currency.clone();
        }
        if let Some(mf) = self.maintenance_factor {
            config.maintenance_factor = mf;
        }
        if let Some(uf) = self.utilization_factor {
            if outdoor {
                config.outdoor_utilization = uf;
            } else {
                config.indoor_utilization = uf;
            }
        }
    }
}

fn print_recommendation(recommendation: &Recommendation, usage: &UsageProfile, tariff: &Tariff, top: usize) {
    let evaluation = &recommendation.evaluation;
    let Some(best) = recommendation.recommended() else {
        println!("No candidates.");
        return;
    };

    println!("Area:            {:.1} m2", evaluation.area);
    println!("Target:          {} lux", evaluation.target_lux);
    println!("Recommended:     {} x {} ({} W each, {})", best.fixture_count, best.fixture.fixture_type, best.fixture.wattage, best.fixture_ref);
    println!("Total power:     {} W", best.total_power);
    println!("Installed flux:  {:.0} lm", best.total_lumens());
    println!("Achieved:        {:.1} lux", best.achieved_lux);
    println!();

    println!(
        "{:<4} {:<20} {:<18} {:>6} {:>7} {:>5} {:>8} {:>7} {:>7} {:>4} {:>6} {:>9} {:>10}",
        "#", "Category", "Type", "W", "lm", "N", "Total W", "Lux", "Spacing", "CRI", "CCT", "Monthly", "Yearly"
    );
    for (rank, (candidate, cost)) in evaluation
        .top(top)
        .iter()
        .zip(&recommendation.candidate_costs)
        .enumerate()
    {
        let cost = cost.rounded();
        println!(
            "{:<4} {:<20} {:<18} {:>6} {:>7} {:>5} {:>8} {:>7.1} {:>7.2} {:>4} {:>5}K {:>9.2} {:>10.2}",
            rank + 1,
            candidate.fixture_ref.category,
            candidate.fixture.fixture_type,
            candidate.fixture.wattage,
            candidate.fixture.lumens,
            candidate.fixture_count,
            candidate.total_power,
            candidate.achieved_lux,
            candidate.spacing,
            candidate.fixture.cri,
            candidate.fixture.color_temp_k,
            cost.monthly_cost,
            cost.yearly_cost,
        );
    }
    println!();

    let layout = &recommendation.layout;
    println!("Layout:          {} x {} grid, {:.2} m x {:.2} m", layout.rows, layout.cols, layout.x_spacing, layout.y_spacing);
    for (i, position) in layout.positions.iter().enumerate() {
        println!("  Fixture {:>3}:   ({:.2}, {:.2})", i + 1, position.x, position.y);
    }
    println!();

    let cost = recommendation.cost.rounded();
    println!("Energy ({} h/day, {} days/year at {} {}/kWh):", usage.hours_per_day, usage.days_per_year, tariff.cost_per_kwh, tariff.currency);
    println!("  Daily:         {:.2} kWh  {:.2} {}", cost.daily_kwh, cost.daily_cost, tariff.currency);
    println!("  Monthly:       {:.2} kWh  {:.2} {}", cost.monthly_kwh, cost.monthly_cost, tariff.currency);
    println!("  Yearly:        {:.2} kWh  {:.2} {}", cost.yearly_kwh, cost.yearly_cost, tariff.currency);

    if let Some(outdoor) = &recommendation.outdoor {
        println!();
        println!("Glare index:     {:.1} ({:?})", outdoor.glare_index, outdoor.glare_class);
        println!("Light pollution: {:.2} ({:?})", outdoor.pollution_index, outdoor.pollution_class);
        if let Some(coverage) = &best.coverage {
            println!("Uniformity:      {:.2} (proxy, equals MF x UF; not a safety check)", coverage.uniformity);
        }
    }
}

fn print_standards(standards: &StandardsTable) {
    for group in standards.groups() {
        println!("{group}");
        for (name, lux) in standards.entries(group).into_iter().flatten() {
            println!("  {name:<24} {lux:>6} lux");
        }
    }
}

fn print_catalog(catalog: &FixtureCatalog) {
    for (fixture_ref, spec) in catalog.iter() {
        let mounting = spec
            .mounting_height()
            .map(|h| format!("{h} m"))
            .unwrap_or_else(|| "ceiling".to_string());
        println!(
            "{:<24} {:<18} {:>5} W {:>7} lm {:>5.0} lm/W  CRI {:>2}  {}K  {}  {:>5} deg  {}",
            fixture_ref.to_string(),
            spec.fixture_type,
            spec.wattage,
            spec.lumens,
            spec.efficacy(),
            spec.cri,
            spec.color_temp_k,
            spec.ip_rating,
            spec.beam_angle,
            mounting,
        );
    }
}

fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("failed to serialize output")?);
    Ok(())
}

/// Execute the CLI command
pub fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let mut config = load_config(cli.config.as_deref())?;

    let indoor_catalog: Option<FixtureCatalog> = cli
        .indoor_catalog
        .as_deref()
        .map(|path| read_json(path, "indoor catalog"))
        .transpose()?;
    let outdoor_catalog: Option<FixtureCatalog> = cli
        .outdoor_catalog
        .as_deref()
        .map(|path| read_json(path, "outdoor catalog"))
        .transpose()?;

    let tables = ReferenceTables {
        indoor_catalog: indoor_catalog.as_ref().unwrap_or(&*INDOOR_CATALOG),
        outdoor_catalog: outdoor_catalog.as_ref().unwrap_or(&*OUTDOOR_CATALOG),
        indoor_standards: &*INDOOR_STANDARDS,
        outdoor_standards: &*OUTDOOR_STANDARDS,
    };

    match cli.command {
        Commands::Indoor { length, width, height, target, usage } => {
            usage.apply(&mut config, false);
            let engine = LightingEngine::new(config).context("invalid engine configuration")?;
            let space = SpaceSpec::indoor(length, width, height, target.to_illuminance("Residential", "Living Room"));

            log::info!("Calculating indoor lighting for {length} m x {width} m x {height} m...");
            let recommendation = engine
                .recommend(&LightingRequest::indoor(space), &tables)
                .context("indoor calculation failed")?;

            if cli.json {
                emit_json(&recommendation)?;
            } else {
                let config = engine.config();
                print_recommendation(&recommendation, &config.default_usage, &config.default_tariff, usage.top);
            }
        }

        Commands::Outdoor { length, width, area_type, min_height, max_height, target, usage } => {
            usage.apply(&mut config, true);
            let engine = LightingEngine::new(config).context("invalid engine configuration")?;
            let default_space = tables
                .outdoor_standards
                .entries(&area_type)
                .and_then(|mut entries| entries.next())
                .map(|(name, _)| name.to_string())
                .unwrap_or_default();
            let illuminance = target.to_illuminance(&area_type, &default_space);
            let space = SpaceSpec::outdoor(length, width, min_height, max_height, illuminance);

            log::info!("Calculating outdoor lighting for {area_type} ({length} m x {width} m)...");
            let recommendation = engine
                .recommend(&LightingRequest::outdoor(space, &area_type), &tables)
                .context("outdoor calculation failed")?;

            if cli.json {
                emit_json(&recommendation)?;
            } else {
                let config = engine.config();
                print_recommendation(&recommendation, &config.default_usage, &config.default_tariff, usage.top);
            }
        }

        Commands::Batch { input } => {
            let engine = LightingEngine::new(config).context("invalid engine configuration")?;
            let requests: Vec<LightingRequest> = read_json(&input, "batch requests")?;

            log::info!("Evaluating {} requests...", requests.len());
            let entries: Vec<BatchEntry> = engine
                .evaluate_batch(&requests, &tables)
                .into_iter()
                .enumerate()
                .map(|(index, result)| match result {
                    Ok(recommendation) => BatchEntry { index, recommendation: Some(recommendation), error: None },
                    Err(err) => {
                        log::error!("Request {}: {}", index + 1, err);
                        BatchEntry { index, recommendation: None, error: Some(err.to_string()) }
                    }
                })
                .collect();

            let failed = entries.iter().filter(|e| e.error.is_some()).count();
            if cli.json {
                emit_json(&entries)?;
            } else {
                for entry in &entries {
                    match (&entry.recommendation, &entry.error) {
                        (Some(recommendation), _) => {
                            if let Some(best) = recommendation.recommended() {
                                println!(
                                    "{:>3}: {} x {} ({}) - {} W, {:.1} lux",
                                    entry.index + 1,
                                    best.fixture_count,
                                    best.fixture.fixture_type,
                                    best.fixture_ref,
                                    best.total_power,
                                    best.achieved_lux
                                );
                            }
                        }
                        (None, Some(error)) => println!("{:>3}: error: {}", entry.index + 1, error),
                        (None, None) => {}
                    }
                }
            }
            log::info!("Batch complete: {} succeeded, {} failed", entries.len() - failed, failed);
        }

        Commands::Standards { outdoor } => {
            let standards = if outdoor { tables.outdoor_standards } else { tables.indoor_standards };
            if cli.json {
                emit_json(standards)?;
            } else {
                print_standards(standards);
            }
        }

        Commands::Catalog { outdoor } => {
            let catalog = if outdoor { tables.outdoor_catalog } else { tables.indoor_catalog };
            if cli.json {
                emit_json(catalog)?;
            } else {
                print_catalog(catalog);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        let cli = Cli::parse_from(["luxsim", "standards"]);
        assert!(matches!(cli.command, Commands::Standards { outdoor: false }));
    }

    #[test]
    fn test_indoor_command() {
        let cli = Cli::parse_from([
            "luxsim", "indoor", "-l", "5", "-w", "4", "--group", "Office", "--space", "Private Office",
            "--hours-per-day", "12", "--json",
        ]);
        assert!(cli.json);
        if let Commands::Indoor { length, width, height, target, usage } = cli.command {
            assert_eq!(length, 5.0);
            assert_eq!(width, 4.0);
            assert_eq!(height, 2.8);
            assert_eq!(
                target.to_illuminance("Residential", "Living Room"),
                Illuminance::Standard(SpaceType::new("Office", "Private Office"))
            );
            assert_eq!(usage.hours_per_day, Some(12.0));
            assert_eq!(usage.top, 5);
        } else {
            panic!("Expected Indoor command");
        }
    }

    #[test]
    fn test_custom_lux_wins() {
        let cli = Cli::parse_from(["luxsim", "indoor", "-l", "5", "-w", "4", "--lux", "250"]);
        if let Commands::Indoor { target, .. } = cli.command {
            assert_eq!(target.to_illuminance("Residential", "Living Room"), Illuminance::Lux(250.0));
        } else {
            panic!("Expected Indoor command");
        }
    }

    #[test]
    fn test_outdoor_command() {
        let cli = Cli::parse_from([
            "luxsim", "outdoor", "-l", "60", "-w", "40", "-a", "Car Park", "--min-height", "4", "--max-height", "10",
        ]);
        if let Commands::Outdoor { area_type, min_height, max_height, .. } = cli.command {
            assert_eq!(area_type, "Car Park");
            assert_eq!(min_height, 4.0);
            assert_eq!(max_height, 10.0);
        } else {
            panic!("Expected Outdoor command");
        }
    }

    #[test]
    fn test_usage_overrides() {
        let usage = UsageArgs {
            hours_per_day: Some(8.0),
            cost_per_kwh: Some(0.3),
            utilization_factor: Some(0.4),
            ..Default::default()
        };

        let mut config = EngineConfig::default();
        usage.apply(&mut config, true);
        assert_eq!(config.default_usage.hours_per_day, 8.0);
        assert_eq!(config.default_usage.days_per_year, 365.0);
        assert_eq!(config.default_tariff.cost_per_kwh, 0.3);
        assert_eq!(config.outdoor_utilization, 0.4);
        assert_eq!(config.indoor_utilization, 0.7);
    }

    #[test]
    fn test_default_config_without_file() {
        assert_eq!(load_config(None).unwrap(), EngineConfig::default());
    }
}
