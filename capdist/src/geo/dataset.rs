//! Capital dataset loading.
//!
//! Records use the `{iso2, name, capital, lat, lon}` JSON shape. A copy of
//! the world capitals table ships inside the crate; a replacement file can
//! be supplied through `[data] points_file` in the config.

use super::store::InMemoryPointStore;
use super::types::GeoPoint;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUNDLED_CAPITALS: &str = include_str!("../../data/capitals.json");

/// Errors raised while loading a point dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Failed to read the dataset file
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dataset is not valid JSON of the expected shape
    #[error("Malformed dataset: {0}")]
    Json(#[from] serde_json::Error),

    /// Two records share a code
    #[error("Duplicate location code: {0}")]
    DuplicateCode(String),

    /// A record has no code
    #[error("Record '{name}' has an empty code")]
    EmptyCode { name: String },

    /// A record's coordinates are out of range
    #[error("Invalid coordinates for {code}: ({latitude}, {longitude})")]
    InvalidCoordinates {
        code: String,
        latitude: f64,
        longitude: f64,
    },
}

#[derive(Debug, Deserialize)]
struct CapitalRecord {
    iso2: String,
    name: String,
    capital: String,
    lat: f64,
    lon: f64,
}

impl From<CapitalRecord> for GeoPoint {
    fn from(record: CapitalRecord) -> Self {
        GeoPoint::new(
            record.iso2,
            record.name,
            record.capital,
            record.lat,
            record.lon,
        )
    }
}

/// Parse a JSON array of capital records into points.
pub fn parse_points_json(json: &str) -> Result<Vec<GeoPoint>, DatasetError> {
    let records: Vec<CapitalRecord> = serde_json::from_str(json)?;
    Ok(records.into_iter().map(GeoPoint::from).collect())
}

/// Store holding the capitals table compiled into the crate.
pub fn bundled_capitals() -> Result<InMemoryPointStore, DatasetError> {
    InMemoryPointStore::from_points(parse_points_json(BUNDLED_CAPITALS)?)
}

/// Store loaded from a JSON dataset on disk.
pub fn load_points_file(path: &Path) -> Result<InMemoryPointStore, DatasetError> {
    let json = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let points = parse_points_json(&json)?;
    tracing::debug!(path = %path.display(), count = points.len(), "Loaded point dataset");
    InMemoryPointStore::from_points(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPointStore;

    #[test]
    fn test_bundled_capitals_load() {
        let store = bundled_capitals().unwrap();
        assert!(store.len() > 50);

        let us = store.get("US").unwrap();
        assert_eq!(us.name, "United States");
        assert!((us.latitude - 38.9072).abs() < 1e-9);
    }

    #[test]
    fn test_parse_upper_cases_codes() {
        let json = r#"[{"iso2":"ke","name":"Kenya","capital":"Nairobi","lat":-1.2864,"lon":36.8172}]"#;
        let points = parse_points_json(json).unwrap();
        assert_eq!(points[0].code, "KE");
        assert_eq!(points[0].label, "Nairobi");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let err = parse_points_json(r#"[{"iso2":"KE"}]"#).unwrap_err();
        assert!(matches!(err, DatasetError::Json(_)));
    }

    #[test]
    fn test_load_points_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.json");
        std::fs::write(
            &path,
            r#"[{"iso2":"A","name":"Alpha","capital":"A","lat":0,"lon":0},
                {"iso2":"B","name":"Beta","capital":"B","lat":0,"lon":1}]"#,
        )
        .unwrap();

        let store = load_points_file(&path).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.contains("B"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_points_file(Path::new("/nonexistent/points.json")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/points.json"));
    }
}
