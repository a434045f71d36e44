//! Space description for a single lighting request

use serde::{Deserialize, Serialize};

use crate::math::{self, Rect};
use crate::standards::{SpaceType, StandardsTable};
use crate::{EngineConfig, LightingError, LightingResult};

/// Indoor room or outdoor area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Indoor,
    Outdoor,
}

/// Vertical extent of the space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceHeight {
    /// Room ceiling height in meters
    Ceiling(f64),
    /// Acceptable outdoor mounting heights in meters (inclusive)
    Mounting { min: f64, max: f64 },
}

/// Target illuminance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Illuminance {
    /// Explicit value in lux
    Lux(f64),
    /// Minimum from the standards table for this space type
    Standard(SpaceType),
}

/// Space to be lit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceSpec {
    /// Length in meters (x axis)
    pub length: f64,
    /// Width in meters (y axis)
    pub width: f64,
    pub height: SpaceHeight,
    pub target: Illuminance,
}

impl SpaceSpec {
    /// Indoor room with a ceiling height
    pub fn indoor(length: f64, width: f64, ceiling_height: f64, target: Illuminance) -> Self {
        Self {
            length,
            width,
            height: SpaceHeight::Ceiling(ceiling_height),
            target,
        }
    }

    /// Outdoor area accepting fixtures mounted between `min_height` and `max_height`
    pub fn outdoor(length: f64, width: f64, min_height: f64, max_height: f64, target: Illuminance) -> Self {
        Self {
            length,
            width,
            height: SpaceHeight::Mounting { min: min_height, max: max_height },
            target,
        }
    }

    /// Indoor when a ceiling height is given, outdoor for a mounting range
    pub fn environment(&self) -> Environment {
        match self.height {
            SpaceHeight::Ceiling(_) => Environment::Indoor,
            SpaceHeight::Mounting { .. } => Environment::Outdoor,
        }
    }

    /// Floor area in square meters
    pub fn area(&self) -> f64 {
        self.bounds().area()
    }

    /// Bounding rectangle on the working plane
    pub fn bounds(&self) -> Rect {
        Rect::from_dimensions(self.length, self.width)
    }

    /// Ceiling height, for indoor spaces
    pub fn ceiling_height(&self) -> Option<f64> {
        match self.height {
            SpaceHeight::Ceiling(height) => Some(height),
            SpaceHeight::Mounting { .. } => None,
        }
    }

    /// Whether an outdoor fixture at `height` fits the mounting range
    pub fn accepts_mounting_height(&self, height: f64) -> bool {
        match self.height {
            SpaceHeight::Ceiling(_) => false,
            SpaceHeight::Mounting { min, max } => (min..=max).contains(&height),
        }
    }

    /// Check dimensions and heights; returns the floor area
    pub fn validate(&self) -> LightingResult<f64> {
        math::ensure_positive(self.length, "space length")?;
        math::ensure_positive(self.width, "space width")?;
        match self.height {
            SpaceHeight::Ceiling(height) => {
                math::ensure_positive(height, "ceiling height")?;
            }
            SpaceHeight::Mounting { min, max } => {
                math::ensure_positive(min, "minimum mounting height")?;
                math::ensure_positive(max, "maximum mounting height")?;
                if min > max {
                    return Err(LightingError::InvalidParameter(format!(
                        "mounting height range [{min}, {max}] is empty"
                    )));
                }
            }
        }
        math::ensure_finite(self.area(), "space area")
    }

    /// Resolve the target to lux and check it against the supported range
    pub fn resolve_target(&self, standards: &StandardsTable, config: &EngineConfig) -> LightingResult<f64> {
        let lux = match &self.target {
            Illuminance::Lux(lux) => *lux,
            Illuminance::Standard(space_type) => standards.required_lux(space_type)?,
        };
        if !(config.min_target_lux..=config.max_target_lux).contains(&lux) {
            return Err(LightingError::InvalidParameter(format!(
                "target illuminance {lux} lux outside supported range [{}, {}]",
                config.min_target_lux, config.max_target_lux
            )));
        }
        Ok(lux)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::INDOOR_STANDARDS;

    #[test]
    fn test_indoor_space() {
        let space = SpaceSpec::indoor(5.0, 4.0, 2.8, Illuminance::Lux(150.0));
        assert_eq!(space.environment(), Environment::Indoor);
        assert_eq!(space.validate().unwrap(), 20.0);
        assert_eq!(space.ceiling_height(), Some(2.8));
        assert!(!space.accepts_mounting_height(2.8));
    }

    #[test]
    fn test_outdoor_space() {
        let space = SpaceSpec::outdoor(40.0, 20.0, 4.0, 8.0, Illuminance::Lux(20.0));
        assert_eq!(space.environment(), Environment::Outdoor);
        assert_eq!(space.validate().unwrap(), 800.0);
        assert!(space.accepts_mounting_height(4.0));
        assert!(space.accepts_mounting_height(8.0));
        assert!(!space.accepts_mounting_height(10.0));
        assert_eq!(space.ceiling_height(), None);
    }

    #[test]
    fn test_invalid_dimensions() {
        let space = SpaceSpec::indoor(0.0, 4.0, 2.8, Illuminance::Lux(150.0));
        assert!(matches!(space.validate(), Err(LightingError::InvalidParameter(_))));

        let space = SpaceSpec::indoor(5.0, -1.0, 2.8, Illuminance::Lux(150.0));
        assert!(space.validate().is_err());

        let space = SpaceSpec::outdoor(10.0, 10.0, 8.0, 4.0, Illuminance::Lux(20.0));
        assert!(space.validate().is_err());
    }

    #[test]
    fn test_resolve_target() {
        let config = EngineConfig::default();

        let space = SpaceSpec::indoor(5.0, 4.0, 2.8, Illuminance::Standard(SpaceType::new("Office", "Private Office")));
        assert_eq!(space.resolve_target(&INDOOR_STANDARDS, &config).unwrap(), 500.0);

        let space = SpaceSpec::indoor(5.0, 4.0, 2.8, Illuminance::Lux(0.0));
        assert!(matches!(
            space.resolve_target(&INDOOR_STANDARDS, &config),
            Err(LightingError::InvalidParameter(_))
        ));

        let space = SpaceSpec::indoor(5.0, 4.0, 2.8, Illuminance::Lux(20_000.0));
        assert!(space.resolve_target(&INDOOR_STANDARDS, &config).is_err());
    }

    #[test]
    fn test_space_json() {
        let json = r#"{
            "length": 5.0,
            "width": 4.0,
            "height": { "ceiling": 2.8 },
            "target": { "standard": { "group": "Residential", "name": "Kitchen" } }
        }"#;
        let space: SpaceSpec = serde_json::from_str(json).unwrap();
        assert_eq!(space.ceiling_height(), Some(2.8));
        assert_eq!(space.target, Illuminance::Standard(SpaceType::new("Residential", "Kitchen")));
    }
}
