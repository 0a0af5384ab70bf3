//! Geographic point records and the store that resolves them by code.
//!
//! The distance engine never validates coordinates itself. Records enter
//! through a [`GeoPointStore`], which guarantees unique, upper-cased codes
//! and in-range latitude/longitude before anything reaches the core.

mod dataset;
mod store;
mod types;

pub use dataset::{bundled_capitals, load_points_file, parse_points_json, DatasetError};
pub use store::{GeoPointStore, InMemoryPointStore};
pub use types::{GeoPoint, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
