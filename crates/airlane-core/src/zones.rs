//! Restricted-zone registry.
//!
//! Zones are declared per city as a pair of locality substrings. A route
//! crosses a zone when one end mentions `area_a` and the other `area_b`, in
//! either direction. The table is loaded once and never mutated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_ZONES: &str = include_str!("../data/zones.json");

/// A declared restricted origin/destination pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub city: String,
    pub name: String,
    pub area_a: String,
    pub area_b: String,
}

impl Zone {
    /// Symmetric match against already-normalized place strings.
    pub fn matches(&self, origin: &str, destination: &str) -> bool {
        (origin.contains(&self.area_a) && destination.contains(&self.area_b))
            || (origin.contains(&self.area_b) && destination.contains(&self.area_a))
    }
}

/// Versioned zone table as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneTable {
    pub version: String,
    pub effective_from: NaiveDate,
    pub zones: Vec<Zone>,
}

#[derive(Debug, Error)]
pub enum ZoneTableError {
    #[error("zone table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("zone #{index} has an empty {field}")]
    EmptyField { index: usize, field: &'static str },
}

/// Lowercase, trim and collapse internal whitespace.
pub fn normalize_place(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Read-only catalogue of restricted zones keyed by city.
#[derive(Debug, Clone)]
pub struct ZoneRegistry {
    /// Table as loaded, for publishing
    source: ZoneTable,
    /// Normalized copies used for matching
    zones: Vec<Zone>,
}

impl ZoneRegistry {
    /// Registry backed by the table compiled into the crate.
    pub fn builtin() -> Result<Self, ZoneTableError> {
        Self::from_json(BUILTIN_ZONES)
    }

    pub fn from_json(raw: &str) -> Result<Self, ZoneTableError> {
        let table: ZoneTable = serde_json::from_str(raw)?;
        Self::from_table(table)
    }

    pub fn from_table(table: ZoneTable) -> Result<Self, ZoneTableError> {
        let mut zones = Vec::with_capacity(table.zones.len());
        for (index, zone) in table.zones.iter().enumerate() {
            let city = normalize_place(&zone.city);
            let area_a = normalize_place(&zone.area_a);
            let area_b = normalize_place(&zone.area_b);
            for (field, value) in [("city", &city), ("areaA", &area_a), ("areaB", &area_b)] {
                if value.is_empty() {
                    return Err(ZoneTableError::EmptyField { index, field });
                }
            }
            zones.push(Zone {
                city,
                name: zone.name.clone(),
                area_a,
                area_b,
            });
        }

        tracing::debug!(version = %table.version, zones = zones.len(), "Loaded zone table");

        Ok(Self {
            source: table,
            zones,
        })
    }

    /// Whether the route between `origin` and `destination` crosses a zone of `city`.
    pub fn lookup(&self, city: &str, origin: &str, destination: &str) -> bool {
        self.find(city, origin, destination).is_some()
    }

    /// The first zone of `city` crossed by the route, if any.
    pub fn find(&self, city: &str, origin: &str, destination: &str) -> Option<&Zone> {
        let city = normalize_place(city);
        let origin = normalize_place(origin);
        let destination = normalize_place(destination);

        self.zones
            .iter()
            .filter(|zone| zone.city == city)
            .find(|zone| zone.matches(&origin, &destination))
    }

    /// Whether `city` has any declared zones.
    pub fn has_city(&self, city: &str) -> bool {
        let city = normalize_place(city);
        self.zones.iter().any(|zone| zone.city == city)
    }

    pub fn version(&self) -> &str {
        &self.source.version
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// The table as loaded, with its original spelling and casing.
    pub fn table(&self) -> &ZoneTable {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn registry() -> ZoneRegistry {
        ZoneRegistry::builtin().unwrap()
    }

    #[test]
    fn builtin_table_loads() {
        let registry = registry();
        assert_eq!(registry.zones().len(), 4);
        assert!(registry.has_city("Mumbai"));
        assert!(registry.has_city("bangalore"));
        assert!(!registry.has_city("Pune"));
    }

    #[test]
    fn matches_in_both_directions() {
        let registry = registry();
        assert!(registry.lookup("Mumbai", "Powai warehouse", "Santacruz East hub"));
        assert!(registry.lookup("Mumbai", "Santacruz East hub", "Powai warehouse"));
        assert!(registry.lookup("Bangalore", "Yelanka depot", "JOKUR"));
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        let registry = registry();
        assert!(registry.lookup("  mumbai ", "BANDRA   EAST", "trombay\tcheck post"));
    }

    #[test]
    fn unknown_city_never_matches() {
        let registry = registry();
        assert!(!registry.lookup("Pune", "Powai", "Santacruz East"));
    }

    #[test]
    fn zones_are_scoped_to_their_city() {
        let registry = registry();
        assert!(!registry.lookup("Bangalore", "Powai", "Santacruz East"));
    }

    #[test]
    fn unlisted_pair_is_clear() {
        let registry = registry();
        assert!(!registry.lookup("Bangalore", "Jayanagar", "Koramangala"));
    }

    #[test]
    fn find_reports_zone_name() {
        let registry = registry();
        let zone = registry
            .find("Bangalore", "Electronic City phase 1", "Jayanagar 4th block")
            .unwrap();
        assert_eq!(zone.name, "Jayanagar - Electronic City corridor");
    }

    #[test]
    fn published_table_keeps_loaded_spelling() {
        let registry = registry();
        let first = &registry.table().zones[0];
        assert_eq!(first.city, "Mumbai");
        assert_eq!(registry.zones()[0].city, "mumbai");
        assert_eq!(registry.table().effective_from.to_string(), "2025-01-01");
    }

    #[test]
    fn rejects_empty_area() {
        let raw = r#"{
            "version": "test",
            "effectiveFrom": "2025-01-01",
            "zones": [{ "city": "Pune", "name": "x", "areaA": "  ", "areaB": "hadapsar" }]
        }"#;
        let err = ZoneRegistry::from_json(raw).unwrap_err();
        assert!(matches!(
            err,
            ZoneTableError::EmptyField { index: 0, field: "areaA" }
        ));
    }

    proptest! {
        #[test]
        fn lookup_is_symmetric(
            prefix in "[a-z ]{0,8}",
            suffix in "[a-z ]{0,8}",
            zone_idx in 0usize..4,
        ) {
            let registry = registry();
            let zone = registry.zones()[zone_idx].clone();
            let a = format!("{}{}{}", prefix, zone.area_a, suffix);
            let b = format!("{}{}{}", suffix, zone.area_b, prefix);

            prop_assert!(registry.lookup(&zone.city, &a, &b));
            prop_assert_eq!(
                registry.lookup(&zone.city, &a, &b),
                registry.lookup(&zone.city, &b, &a)
            );
        }

        #[test]
        fn arbitrary_pairs_are_symmetric(
            origin in "[a-zA-Z ]{0,24}",
            destination in "[a-zA-Z ]{0,24}",
        ) {
            let registry = registry();
            for city in ["Mumbai", "Bangalore", "Delhi"] {
                prop_assert_eq!(
                    registry.lookup(city, &origin, &destination),
                    registry.lookup(city, &destination, &origin)
                );
            }
        }
    }
}
