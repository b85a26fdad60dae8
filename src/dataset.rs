use std::collections::HashMap;
use std::fs;

use serde::Deserialize;

use crate::domain::types::City;
use crate::error::SolverError;

/// One dataset entry. Extra keys (the original datasets carry precomputed
/// distance blobs) are ignored.
#[derive(Debug, Deserialize)]
struct CityRecord {
    lat: f64,
    lng: f64,
}

/// Parse a JSON document mapping city name -> { "lat", "lng" }. Cities are
/// returned in sorted-name order so index assignment is deterministic
/// regardless of the document's key order.
pub fn parse_cities(json: &str) -> Result<Vec<City>, SolverError> {
    let records: HashMap<String, CityRecord> = serde_json::from_str(json)
        .map_err(|err| SolverError::InvalidInput(format!("malformed city dataset: {}", err)))?;

    let mut cities: Vec<City> = records
        .into_iter()
        .map(|(name, record)| City::new(name, record.lat, record.lng))
        .collect();
    cities.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(cities)
}

/// Read and parse a city dataset file.
pub fn load_cities(path: &str) -> Result<Vec<City>, SolverError> {
    let content = fs::read_to_string(path)
        .map_err(|err| SolverError::InvalidInput(format!("cannot read {}: {}", path, err)))?;
    parse_cities(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_dataset_in_sorted_order() {
        let json = r#"{
            "Warszawa": { "lat": 52.2297, "lng": 21.0122 },
            "Gdansk":   { "lat": 54.3520, "lng": 18.6466 },
            "Krakow":   { "lat": 50.0647, "lng": 19.9450 }
        }"#;
        let cities = parse_cities(json).unwrap();
        let names: Vec<&str> = cities.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Gdansk", "Krakow", "Warszawa"]);
        assert!((cities[2].lat - 52.2297).abs() < 1e-9);
    }

    #[test]
    fn ignores_extra_keys() {
        let json = r#"{
            "a": { "lat": 1.0, "lng": 2.0, "distances": { "b": 3.5 } },
            "b": { "lat": 2.0, "lng": 3.0, "distances": { "a": 3.5 } }
        }"#;
        let cities = parse_cities(json).unwrap();
        assert_eq!(cities.len(), 2);
    }

    #[test]
    fn rejects_missing_coordinates() {
        let json = r#"{ "a": { "lat": 1.0 } }"#;
        assert!(matches!(
            parse_cities(json),
            Err(SolverError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_non_numeric_coordinates() {
        let json = r#"{ "a": { "lat": "north", "lng": 2.0 } }"#;
        assert!(parse_cities(json).is_err());
    }

    #[test]
    fn missing_file_is_invalid_input() {
        assert!(matches!(
            load_cities("definitely-not-here.json"),
            Err(SolverError::InvalidInput(_))
        ));
    }
}
