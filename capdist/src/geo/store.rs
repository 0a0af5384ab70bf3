//! Point lookup by code.

use super::dataset::DatasetError;
use super::types::GeoPoint;
use std::collections::HashMap;

/// Read-only lookup of validated points by their unique code.
///
/// Implementations must be safe to share across batch workers; the engine
/// holds a store behind an `Arc` and resolves codes from blocking threads.
pub trait GeoPointStore: Send + Sync {
    /// Resolve a code (exact, upper-case match) to its point.
    fn get(&self, code: &str) -> Option<&GeoPoint>;

    /// Whether the code resolves.
    fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// All points in load order.
    fn points(&self) -> Vec<&GeoPoint>;

    /// Number of points in the store.
    fn len(&self) -> usize {
        self.points().len()
    }

    /// Whether the store holds no points.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Store backed by a hash map, preserving load order for listing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPointStore {
    by_code: HashMap<String, GeoPoint>,
    order: Vec<String>,
}

impl InMemoryPointStore {
    /// Build a store from points, rejecting duplicates and invalid coordinates.
    pub fn from_points(points: Vec<GeoPoint>) -> Result<Self, DatasetError> {
        let mut by_code = HashMap::with_capacity(points.len());
        let mut order = Vec::with_capacity(points.len());

        for point in points {
            if point.code.is_empty() {
                return Err(DatasetError::EmptyCode { name: point.name });
            }
            if !point.has_valid_coordinates() {
                return Err(DatasetError::InvalidCoordinates {
                    code: point.code,
                    latitude: point.latitude,
                    longitude: point.longitude,
                });
            }
            if by_code.contains_key(&point.code) {
                return Err(DatasetError::DuplicateCode(point.code));
            }
            order.push(point.code.clone());
            by_code.insert(point.code.clone(), point);
        }

        Ok(Self { by_code, order })
    }
}

impl GeoPointStore for InMemoryPointStore {
    fn get(&self, code: &str) -> Option<&GeoPoint> {
        self.by_code.get(code)
    }

    fn points(&self) -> Vec<&GeoPoint> {
        self.order
            .iter()
            .filter_map(|code| self.by_code.get(code))
            .collect()
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}
