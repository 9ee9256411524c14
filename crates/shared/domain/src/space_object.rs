//! Near-earth objects shown on the home page.
//!
//! The data comes from a feed in the NASA NeoWs format. [`format_feed`]
//! flattens it into display rows.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A near-earth object with its closest approach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceObject {
    pub id: String,
    pub name: String,
    pub estimated_diameter_min_km: f64,
    pub estimated_diameter_max_km: f64,
    pub is_potentially_hazardous: bool,
    pub close_approach_date: NaiveDate,
    pub miss_distance_km: f64,
    pub relative_velocity_kph: f64,
}

impl SpaceObject {
    /// Mean of the estimated diameter range.
    pub fn mean_diameter_km(&self) -> f64 {
        (self.estimated_diameter_min_km + self.estimated_diameter_max_km) / 2.0
    }
}

#[derive(Debug, Deserialize)]
struct Feed {
    near_earth_objects: BTreeMap<String, Vec<FeedObject>>,
}

#[derive(Debug, Deserialize)]
struct FeedObject {
    id: String,
    name: String,
    estimated_diameter: EstimatedDiameter,
    is_potentially_hazardous_asteroid: bool,
    #[serde(default)]
    close_approach_data: Vec<CloseApproach>,
}

#[derive(Debug, Deserialize)]
struct EstimatedDiameter {
    kilometers: DiameterRange,
}

#[derive(Debug, Deserialize)]
struct DiameterRange {
    estimated_diameter_min: f64,
    estimated_diameter_max: f64,
}

// NeoWs encodes these measurements as strings.
#[derive(Debug, Deserialize)]
struct CloseApproach {
    close_approach_date: String,
    relative_velocity: RelativeVelocity,
    miss_distance: MissDistance,
}

#[derive(Debug, Deserialize)]
struct RelativeVelocity {
    kilometers_per_hour: String,
}

#[derive(Debug, Deserialize)]
struct MissDistance {
    kilometers: String,
}

/// Parse a NeoWs feed document into space objects.
///
/// Objects without approach data are skipped and an object listed on several
/// days is kept once. The result is ordered by approach date, then name.
///
/// # Errors
/// Returns [`DomainError::Feed`] if the document or one of its numeric or
/// date fields cannot be parsed.
pub fn format_feed(raw: &str) -> DomainResult<Vec<SpaceObject>> {
    let feed: Feed = serde_json::from_str(raw).map_err(|e| DomainError::feed(e.to_string()))?;

    let mut seen = HashSet::new();
    let mut objects = Vec::new();

    for entry in feed.near_earth_objects.into_values().flatten() {
        let Some(approach) = entry.close_approach_data.first() else {
            continue;
        };
        if !seen.insert(entry.id.clone()) {
            continue;
        }

        objects.push(SpaceObject {
            close_approach_date: parse_date(&approach.close_approach_date)?,
            miss_distance_km: parse_measure("miss_distance", &approach.miss_distance.kilometers)?,
            relative_velocity_kph: parse_measure(
                "relative_velocity",
                &approach.relative_velocity.kilometers_per_hour,
            )?,
            id: entry.id,
            name: entry.name,
            estimated_diameter_min_km: entry.estimated_diameter.kilometers.estimated_diameter_min,
            estimated_diameter_max_km: entry.estimated_diameter.kilometers.estimated_diameter_max,
            is_potentially_hazardous: entry.is_potentially_hazardous_asteroid,
        });
    }

    objects.sort_by(|a, b| {
        a.close_approach_date
            .cmp(&b.close_approach_date)
            .then_with(|| a.name.cmp(&b.name))
    });

    Ok(objects)
}

fn parse_date(value: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| DomainError::feed(format!("close_approach_date {:?}: {}", value, e)))
}

fn parse_measure(field: &str, value: &str) -> DomainResult<f64> {
    value
        .parse::<f64>()
        .map_err(|e| DomainError::feed(format!("{} {:?}: {}", field, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object_json(id: &str, name: &str, date: &str, miss: &str) -> String {
        format!(
            r#"{{
                "id": "{id}",
                "name": "{name}",
                "estimated_diameter": {{"kilometers": {{"estimated_diameter_min": 0.1, "estimated_diameter_max": 0.3}}}},
                "is_potentially_hazardous_asteroid": false,
                "close_approach_data": [{{
                    "close_approach_date": "{date}",
                    "relative_velocity": {{"kilometers_per_hour": "45000.5"}},
                    "miss_distance": {{"kilometers": "{miss}"}}
                }}]
            }}"#
        )
    }

    #[test]
    fn test_orders_by_date_then_name() {
        let raw = format!(
            r#"{{"near_earth_objects": {{
                "2024-01-02": [{}],
                "2024-01-01": [{}, {}]
            }}}}"#,
            object_json("3", "Alpha", "2024-01-02", "100.0"),
            object_json("2", "Zeta", "2024-01-01", "200.0"),
            object_json("1", "Beta", "2024-01-01", "300.0"),
        );

        let objects = format_feed(&raw).unwrap();
        let names: Vec<_> = objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Zeta", "Alpha"]);
        assert_eq!(objects[0].miss_distance_km, 300.0);
        assert!((objects[0].mean_diameter_km() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_objects_kept_once() {
        let raw = format!(
            r#"{{"near_earth_objects": {{"2024-01-01": [{}], "2024-01-02": [{}]}}}}"#,
            object_json("7", "Repeat", "2024-01-01", "1.0"),
            object_json("7", "Repeat", "2024-01-02", "2.0"),
        );

        let objects = format_feed(&raw).unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].miss_distance_km, 1.0);
    }

    #[test]
    fn test_skips_objects_without_approach() {
        let raw = r#"{"near_earth_objects": {"2024-01-01": [{
            "id": "9",
            "name": "Drifter",
            "estimated_diameter": {"kilometers": {"estimated_diameter_min": 1.0, "estimated_diameter_max": 2.0}},
            "is_potentially_hazardous_asteroid": true,
            "close_approach_data": []
        }]}}"#;

        assert!(format_feed(raw).unwrap().is_empty());
    }

    #[test]
    fn test_bad_measure_is_feed_error() {
        let raw = format!(
            r#"{{"near_earth_objects": {{"2024-01-01": [{}]}}}}"#,
            object_json("1", "Broken", "2024-01-01", "far away"),
        );

        assert!(matches!(format_feed(&raw), Err(DomainError::Feed(_))));
    }

    #[test]
    fn test_invalid_document_is_feed_error() {
        assert!(matches!(format_feed("not json"), Err(DomainError::Feed(_))));
    }
}
