//! Illuminance Standards
//!
//! Minimum maintained illuminance per space type. Indoor values follow
//! SS 531:2014; outdoor groups mirror the outdoor catalog categories.

use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{LightingError, LightingResult};

/// Address of a standards entry: building type and room, or area group and area
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpaceType {
    pub group: String,
    pub name: String,
}

impl SpaceType {
    /// Address `name` within `group`
    pub fn new(group: &str, name: &str) -> Self {
        Self {
            group: group.to_string(),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for SpaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.group, self.name)
    }
}

/// Required illuminance in lux, grouped by building type or area group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StandardsTable {
    groups: IndexMap<String, IndexMap<String, f64>>,
}

impl StandardsTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style group registration
    pub fn with_group(mut self, group: &str, entries: &[(&str, f64)]) -> Self {
        let rooms = self.groups.entry(group.to_string()).or_default();
        for (name, lux) in entries {
            rooms.insert(name.to_string(), *lux);
        }
        self
    }

    /// Group names in insertion order
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Entries of one group in insertion order
    pub fn entries(&self, group: &str) -> Option<impl Iterator<Item = (&str, f64)>> {
        self.groups
            .get(group)
            .map(|rooms| rooms.iter().map(|(name, lux)| (name.as_str(), *lux)))
    }

    /// Required illuminance for a space type
    pub fn required_lux(&self, space_type: &SpaceType) -> LightingResult<f64> {
        self.groups
            .get(&space_type.group)
            .and_then(|rooms| rooms.get(&space_type.name))
            .copied()
            .ok_or_else(|| LightingError::UnknownStandard(space_type.to_string()))
    }
}

/// SS 531:2014 indoor illuminance
pub static INDOOR_STANDARDS: LazyLock<StandardsTable> = LazyLock::new(|| {
    StandardsTable::new()
        .with_group("Residential", &[
            ("Living Room", 150.0),
            ("Bedroom", 100.0),
            ("Kitchen", 300.0),
            ("Bathroom", 100.0),
            ("Study Room", 300.0),
            ("Corridor", 75.0),
        ])
        .with_group("Office", &[
            ("Open Plan Office", 400.0),
            ("Private Office", 500.0),
            ("Conference Room", 500.0),
            ("Reception", 300.0),
            ("Corridor", 100.0),
        ])
        .with_group("Commercial", &[
            ("Retail Shop", 500.0),
            ("Supermarket", 750.0),
            ("Restaurant", 200.0),
            ("Lobby", 300.0),
            ("Parking Lot", 75.0),
        ])
        .with_group("Industrial", &[
            ("Warehouse", 150.0),
            ("Factory Floor", 300.0),
            ("Laboratory", 500.0),
            ("Control Room", 300.0),
        ])
        .with_group("Educational", &[
            ("Classroom", 300.0),
            ("Library", 500.0),
            ("Laboratory", 500.0),
            ("Auditorium", 200.0),
        ])
});

/// Outdoor area illuminance
pub static OUTDOOR_STANDARDS: LazyLock<StandardsTable> = LazyLock::new(|| {
    StandardsTable::new()
        .with_group("Car Park", &[
            ("Open Car Park", 20.0),
            ("Car Park Entrance", 50.0),
        ])
        .with_group("Roadway", &[
            ("Main Road", 30.0),
            ("Residential Street", 15.0),
            ("Service Road", 10.0),
        ])
        .with_group("Pedestrian", &[
            ("Walkway", 10.0),
            ("Plaza", 20.0),
            ("Staircase & Ramp", 50.0),
        ])
        .with_group("Sports", &[
            ("Training Field", 100.0),
            ("Recreational Court", 200.0),
            ("Competition Field", 500.0),
        ])
        .with_group("Facade & Landscape", &[
            ("Garden", 5.0),
            ("Building Facade", 50.0),
        ])
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{INDOOR_CATALOG, OUTDOOR_CATALOG};

    #[test]
    fn test_indoor_lookup() {
        let lux = INDOOR_STANDARDS.required_lux(&SpaceType::new("Residential", "Living Room")).unwrap();
        assert_eq!(lux, 150.0);

        let lux = INDOOR_STANDARDS.required_lux(&SpaceType::new("Commercial", "Supermarket")).unwrap();
        assert_eq!(lux, 750.0);
    }

    #[test]
    fn test_unknown_standard() {
        let result = INDOOR_STANDARDS.required_lux(&SpaceType::new("Office", "Ballroom"));
        assert!(matches!(result, Err(LightingError::UnknownStandard(_))));

        let result = OUTDOOR_STANDARDS.required_lux(&SpaceType::new("Marina", "Jetty"));
        assert_eq!(result, Err(LightingError::UnknownStandard("Marina / Jetty".to_string())));
    }

    #[test]
    fn test_entries_keep_order() {
        let rooms: Vec<_> = INDOOR_STANDARDS.entries("Office").unwrap().map(|(name, _)| name).collect();
        assert_eq!(rooms[0], "Open Plan Office");
        assert_eq!(rooms.len(), 5);
        assert!(INDOOR_STANDARDS.entries("Hospital").is_none());
    }

    #[test]
    fn test_groups_match_catalog_categories() {
        assert!(INDOOR_STANDARDS.groups().eq(INDOOR_CATALOG.categories()));
        assert!(OUTDOOR_STANDARDS.groups().eq(OUTDOOR_CATALOG.categories()));
    }
}
