//! Point type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Valid latitude range
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// A named location on the globe, typically a country's capital.
///
/// Immutable once loaded. The `code` is unique within a store and always
/// upper-case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Unique location code (ISO 3166-1 alpha-2 for countries)
    pub code: String,
    /// Display name (country name)
    pub name: String,
    /// Secondary label (capital city)
    pub label: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point, upper-casing the code.
    pub fn new(
        code: impl AsRef<str>,
        name: impl Into<String>,
        label: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            code: code.as_ref().trim().to_uppercase(),
            name: name.into(),
            label: label.into(),
            latitude,
            longitude,
        }
    }

    /// Whether both coordinates fall inside their valid ranges.
    pub fn has_valid_coordinates(&self) -> bool {
        (MIN_LAT..=MAX_LAT).contains(&self.latitude)
            && (MIN_LON..=MAX_LON).contains(&self.longitude)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}) [{:.4}, {:.4}]",
            self.code, self.name, self.label, self.latitude, self.longitude
        )
    }
}
