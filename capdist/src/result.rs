//! The synchronous result contract.

use crate::distance::DISTANCE_UNIT;
use crate::pairs::Pair;
use serde::{Deserialize, Serialize};

/// All pairs of one computation, sorted ascending by distance.
///
/// Serializes as `{pairs: [{a, b, km}], count, unit: "km"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceResult {
    /// Pairs in ascending distance order
    pub pairs: Vec<Pair>,
    /// Number of pairs
    pub count: usize,
    /// Distance unit, always "km"
    pub unit: String,
}

impl DistanceResult {
    /// Wrap pairs that are already sorted.
    pub fn from_sorted(pairs: Vec<Pair>) -> Self {
        Self {
            count: pairs.len(),
            pairs,
            unit: DISTANCE_UNIT.to_string(),
        }
    }

    /// Shortest pair, if any.
    pub fn shortest(&self) -> Option<&Pair> {
        self.pairs.first()
    }

    /// Longest pair, if any.
    pub fn longest(&self) -> Option<&Pair> {
        self.pairs.last()
    }

    /// Find the pair joining two codes, in either order.
    pub fn find(&self, a: &str, b: &str) -> Option<&Pair> {
        self.pairs.iter().find(|p| p.joins(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let result = DistanceResult::from_sorted(vec![Pair::new("CA", "US", 734.26)]);
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["count"], 1);
        assert_eq!(value["unit"], "km");
        assert_eq!(value["pairs"][0]["a"], "CA");
        assert_eq!(value["pairs"][0]["km"], 734.3);
    }

    #[test]
    fn test_accessors() {
        let result = DistanceResult::from_sorted(vec![
            Pair::new("CA", "US", 1.0),
            Pair::new("US", "MX", 2.0),
        ]);
        assert_eq!(result.shortest().map(|p| p.km), Some(1.0));
        assert_eq!(result.longest().map(|p| p.km), Some(2.0));
        assert!(result.find("MX", "US").is_some());
        assert!(result.find("CA", "MX").is_none());
    }
}
