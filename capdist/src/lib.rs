//! capdist - pairwise great-circle distances between country capitals
//!
//! This library computes the distance between every unordered pair of a
//! set of locations, sorts the pairs by distance, caches results per code
//! set and streams progress while large sets are computed.
//!
//! # High-Level API
//!
//! For most use cases, the [`service`] module provides a simplified facade:
//!
//! ```ignore
//! use capdist::geo::bundled_capitals;
//! use capdist::service::{DistanceService, ServiceConfig};
//! use capdist::stream::SessionEvent;
//! use std::sync::Arc;
//!
//! let service = DistanceService::new(ServiceConfig::default(), Arc::new(bundled_capitals()?));
//!
//! // Whole result at once
//! let result = service.compute(&["US", "CA", "MX"]).await?;
//!
//! // Or as an ordered stream of progress events
//! let mut session = service.stream(&["US", "CA", "MX", "FR", "DE"])?;
//! while let Some(event) = session.next().await {
//!     println!("{}", serde_json::to_string(&event)?);
//! }
//! ```

pub mod cache;
pub mod config;
pub mod distance;
pub mod geo;
pub mod logging;
pub mod pairs;
pub mod request;
pub mod result;
pub mod scheduler;
pub mod service;
pub mod stream;

/// Version of the capdist library and CLI.
///
/// Synchronized across the workspace and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
