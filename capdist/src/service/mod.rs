//! High-level facade over the distance engine.
//!
//! The service owns the point store, the result cache and the scheduler,
//! and exposes the two request paths:
//!
//! - [`DistanceService::compute`]: validate, check the cache, compute on a
//!   miss, return the sorted result.
//! - [`DistanceService::stream`]: the same, delivered as an ordered
//!   [`DistanceSession`](crate::stream::DistanceSession) of progress events.
//!
//! # Example
//!
//! ```ignore
//! use capdist::geo::bundled_capitals;
//! use capdist::service::{DistanceService, ServiceConfig};
//! use std::sync::Arc;
//!
//! let store = Arc::new(bundled_capitals()?);
//! let service = DistanceService::new(ServiceConfig::default(), store);
//!
//! let result = service.compute(&["US", "CA", "MX"]).await?;
//! assert_eq!(result.count, 3);
//! ```

mod config;
mod error;
mod facade;

pub use crate::result::DistanceResult;
pub use config::{ServiceConfig, ServiceConfigBuilder};
pub use error::ServiceError;
pub use facade::DistanceService;
