//! Fixture Catalog
//!
//! Read-only fixture specifications grouped by category. Categories keep their
//! insertion order, which is also the tie-break order used by the ranker.

use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{LightingError, LightingResult};

/// Ingress protection rating (dust and moisture resistance)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IpRating {
    /// Solid particle protection (first digit)
    pub solids: u8,
    /// Liquid ingress protection (second digit)
    pub liquids: u8,
}

impl IpRating {
    pub const IP20: Self = Self::new(2, 0);
    pub const IP44: Self = Self::new(4, 4);
    pub const IP54: Self = Self::new(5, 4);
    pub const IP65: Self = Self::new(6, 5);
    pub const IP66: Self = Self::new(6, 6);
    pub const IP67: Self = Self::new(6, 7);

    /// Create a rating from its two digits
    pub const fn new(solids: u8, liquids: u8) -> Self {
        Self { solids, liquids }
    }
}

impl fmt::Display for IpRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IP{}{}", self.solids, self.liquids)
    }
}

/// Where a fixture is installed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// Ceiling-mounted inside a room; height comes from the room
    Interior,
    /// Pole, wall or ground mounted outdoors at a fixed height in meters
    Exterior { mounting_height: f64 },
}

/// Specification of a single fixture model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureSpec {
    /// Fixture type label ("LED Panel", "Street Light", ...)
    pub fixture_type: String,
    /// Power draw in watts
    pub wattage: f64,
    /// Luminous flux in lumens
    pub lumens: f64,
    /// Color rendering index
    pub cri: u8,
    /// Correlated color temperature in kelvin
    pub color_temp_k: u32,
    /// Ingress protection rating
    pub ip_rating: IpRating,
    /// Full beam angle in degrees
    pub beam_angle: f64,
    /// Installation kind
    pub placement: Placement,
}

impl FixtureSpec {
    /// Create an interior fixture
    pub fn interior(
        fixture_type: &str,
        wattage: f64,
        lumens: f64,
        cri: u8,
        color_temp_k: u32,
        ip_rating: IpRating,
        beam_angle: f64,
    ) -> Self {
        Self {
            fixture_type: fixture_type.to_string(),
            wattage,
            lumens,
            cri,
            color_temp_k,
            ip_rating,
            beam_angle,
            placement: Placement::Interior,
        }
    }

    /// Create an exterior fixture mounted at `mounting_height` meters
    #[allow(clippy::too_many_arguments)]
    pub fn exterior(
        fixture_type: &str,
        wattage: f64,
        lumens: f64,
        cri: u8,
        color_temp_k: u32,
        ip_rating: IpRating,
        beam_angle: f64,
        mounting_height: f64,
    ) -> Self {
        Self {
            placement: Placement::Exterior { mounting_height },
            ..Self::interior(fixture_type, wattage, lumens, cri, color_temp_k, ip_rating, beam_angle)
        }
    }

    /// Mounting height for exterior fixtures
    pub fn mounting_height(&self) -> Option<f64> {
        match self.placement {
            Placement::Interior => None,
            Placement::Exterior { mounting_height } => Some(mounting_height),
        }
    }

    /// Luminous efficacy in lm/W
    pub fn efficacy(&self) -> f64 {
        self.lumens / self.wattage
    }

    /// A beam at least 180 degrees wide is treated as omnidirectional
    pub fn is_omnidirectional(&self) -> bool {
        self.beam_angle >= 180.0
    }

    /// Reject non-physical specifications
    pub fn validate(&self) -> LightingResult<()> {
        let label = &self.fixture_type;
        if !(self.wattage.is_finite() && self.wattage > 0.0) {
            return Err(LightingError::InvalidParameter(format!(
                "{label}: wattage must be positive, got {}",
                self.wattage
            )));
        }
        if !(self.lumens.is_finite() && self.lumens > 0.0) {
            return Err(LightingError::InvalidParameter(format!(
                "{label}: lumens must be positive, got {}",
                self.lumens
            )));
        }
        if !(0.0..=360.0).contains(&self.beam_angle) {
            return Err(LightingError::InvalidParameter(format!(
                "{label}: beam angle must lie in [0, 360] degrees, got {}",
                self.beam_angle
            )));
        }
        if let Some(height) = self.mounting_height() {
            if !(height.is_finite() && height > 0.0) {
                return Err(LightingError::InvalidParameter(format!(
                    "{label}: mounting height must be positive, got {height}"
                )));
            }
        }
        Ok(())
    }
}

/// Identity of a fixture within a catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixtureRef {
    /// Category name
    pub category: String,
    /// Position within the category list
    pub index: usize,
}

impl fmt::Display for FixtureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.category, self.index + 1)
    }
}

/// Fixture specifications grouped by category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixtureCatalog {
    categories: IndexMap<String, Vec<FixtureSpec>>,
}

impl FixtureCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style category registration
    pub fn with_category(mut self, category: &str, fixtures: Vec<FixtureSpec>) -> Self {
        self.insert(category, fixtures);
        self
    }

    /// Register a category, appending to it if it already exists
    pub fn insert(&mut self, category: &str, fixtures: Vec<FixtureSpec>) {
        self.categories.entry(category.to_string()).or_default().extend(fixtures);
    }

    /// Category names in insertion order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Fixtures of one category
    pub fn get(&self, category: &str) -> Option<&[FixtureSpec]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    /// Enumerate every fixture in category order, then list order
    pub fn iter(&self) -> impl Iterator<Item = (FixtureRef, &FixtureSpec)> {
        self.categories.iter().flat_map(|(category, fixtures)| {
            fixtures.iter().enumerate().map(move |(index, spec)| {
                (FixtureRef { category: category.clone(), index }, spec)
            })
        })
    }

    /// Total number of fixtures across all categories
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// Check if the catalog holds no fixtures at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Single-category view, failing if that category has no fixtures
    pub fn only(&self, category: &str) -> LightingResult<FixtureCatalog> {
        match self.categories.get(category) {
            Some(fixtures) if !fixtures.is_empty() => {
                Ok(FixtureCatalog::new().with_category(category, fixtures.clone()))
            }
            _ => Err(LightingError::EmptyCatalog(format!(
                "no fixtures registered for category '{category}'"
            ))),
        }
    }

    /// Validate every fixture in the catalog
    pub fn validate(&self) -> LightingResult<()> {
        self.iter().try_for_each(|(_, spec)| spec.validate())
    }
}

/// Built-in indoor LED catalog (common Singapore market options)
pub static INDOOR_CATALOG: LazyLock<FixtureCatalog> = LazyLock::new(|| {
    use IpRating as Ip;
    let f = FixtureSpec::interior;

    FixtureCatalog::new()
        .with_category("Residential", vec![
            f("LED Bulb", 9.0, 800.0, 80, 3000, Ip::IP20, 200.0),
            f("LED Bulb", 12.0, 1100.0, 80, 3000, Ip::IP20, 200.0),
            f("LED Downlight", 15.0, 1400.0, 80, 4000, Ip::IP44, 100.0),
            f("LED Downlight", 18.0, 1700.0, 85, 4000, Ip::IP44, 100.0),
        ])
        .with_category("Office", vec![
            f("LED Panel", 18.0, 1800.0, 85, 4000, Ip::IP20, 120.0),
            f("LED Panel", 24.0, 2400.0, 85, 4000, Ip::IP20, 120.0),
            f("LED Panel", 36.0, 3600.0, 85, 4000, Ip::IP20, 120.0),
            f("LED Panel", 48.0, 4800.0, 85, 5000, Ip::IP20, 120.0),
        ])
        .with_category("Commercial", vec![
            f("LED Track Light", 20.0, 2000.0, 85, 4000, Ip::IP20, 36.0),
            f("LED Track Light", 30.0, 3000.0, 85, 4000, Ip::IP20, 36.0),
            f("LED High Bay", 40.0, 4000.0, 90, 5000, Ip::IP65, 90.0),
            f("LED High Bay", 50.0, 5000.0, 90, 5000, Ip::IP65, 90.0),
        ])
        .with_category("Industrial", vec![
            f("LED High Bay", 50.0, 5000.0, 80, 5000, Ip::IP65, 90.0),
            f("LED High Bay", 100.0, 10000.0, 80, 5000, Ip::IP65, 90.0),
            f("LED High Bay", 150.0, 15000.0, 80, 5000, Ip::IP65, 60.0),
            f("LED High Bay", 200.0, 20000.0, 80, 5000, Ip::IP65, 60.0),
        ])
        .with_category("Educational", vec![
            f("LED Panel", 18.0, 1800.0, 85, 4000, Ip::IP20, 120.0),
            f("LED Panel", 24.0, 2400.0, 85, 4000, Ip::IP20, 120.0),
            f("LED Panel", 36.0, 3600.0, 85, 4000, Ip::IP20, 120.0),
        ])
});

/// Built-in outdoor catalog, one category per outdoor area group
pub static OUTDOOR_CATALOG: LazyLock<FixtureCatalog> = LazyLock::new(|| {
    use IpRating as Ip;
    let f = FixtureSpec::exterior;

    FixtureCatalog::new()
        .with_category("Car Park", vec![
            f("LED Area Light", 60.0, 7800.0, 70, 4000, Ip::IP66, 140.0, 6.0),
            f("LED Area Light", 100.0, 13000.0, 70, 4000, Ip::IP66, 140.0, 8.0),
            f("LED Area Light", 150.0, 19500.0, 70, 4000, Ip::IP66, 150.0, 10.0),
        ])
        .with_category("Roadway", vec![
            f("LED Street Light", 40.0, 5200.0, 70, 4000, Ip::IP66, 120.0, 6.0),
            f("LED Street Light", 80.0, 10400.0, 70, 4000, Ip::IP66, 130.0, 8.0),
            f("LED Street Light", 120.0, 15600.0, 70, 4000, Ip::IP66, 140.0, 10.0),
        ])
        .with_category("Pedestrian", vec![
            f("LED Bollard", 12.0, 900.0, 80, 3000, Ip::IP65, 360.0, 1.0),
            f("LED Post Top", 25.0, 3000.0, 80, 3000, Ip::IP65, 360.0, 3.5),
            f("LED Pathway Pole", 35.0, 4200.0, 80, 3000, Ip::IP66, 180.0, 4.0),
        ])
        .with_category("Sports", vec![
            f("LED Flood Light", 200.0, 26000.0, 80, 5000, Ip::IP66, 60.0, 12.0),
            f("LED Flood Light", 400.0, 52000.0, 80, 5000, Ip::IP66, 40.0, 15.0),
            f("LED Flood Light", 600.0, 78000.0, 90, 5000, Ip::IP66, 30.0, 18.0),
        ])
        .with_category("Facade & Landscape", vec![
            f("LED Wall Pack", 30.0, 3300.0, 80, 4000, Ip::IP65, 110.0, 4.0),
            f("LED Spike Spot", 10.0, 900.0, 80, 3000, Ip::IP67, 36.0, 0.5),
            f("LED Flood Light", 50.0, 6000.0, 80, 4000, Ip::IP66, 90.0, 5.0),
        ])
});
