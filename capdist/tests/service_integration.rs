//! Integration tests for the synchronous request path.
//!
//! These tests drive `DistanceService::compute` end to end:
//! - ordering and pair counts for real capitals
//! - input rejection before any computation
//! - result caching and eviction through the service
//! - the `{pairs, count, unit}` wire shape

use capdist::cache::CacheConfig;
use capdist::distance::{DistanceFn, Haversine};
use capdist::geo::{bundled_capitals, GeoPoint, GeoPointStore, InMemoryPointStore};
use capdist::request::InputError;
use capdist::service::{DistanceService, ServiceConfig, ServiceError};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// =============================================================================
// Test Helpers
// =============================================================================

/// Haversine that counts its invocations.
struct CountingDistance {
    calls: Arc<AtomicUsize>,
}

impl DistanceFn for CountingDistance {
    fn km(&self, a: &GeoPoint, b: &GeoPoint) -> f64 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Haversine.km(a, b)
    }
}

fn capitals() -> Arc<dyn GeoPointStore> {
    Arc::new(bundled_capitals().expect("bundled dataset loads"))
}

fn counting_service(config: ServiceConfig) -> (DistanceService, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let service = DistanceService::new(config, capitals()).with_distance(Arc::new(
        CountingDistance {
            calls: Arc::clone(&calls),
        },
    ));
    (service, calls)
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn test_north_american_capitals_sorted() {
    let service = DistanceService::new(ServiceConfig::default(), capitals());

    let result = service.compute(&["US", "CA", "MX"]).await.unwrap();

    assert_eq!(result.count, 3);
    assert_eq!(result.unit, "km");

    let order: Vec<(&str, &str)> = result
        .pairs
        .iter()
        .map(|p| (p.first.as_str(), p.second.as_str()))
        .collect();
    assert_eq!(order, vec![("US", "CA"), ("US", "MX"), ("CA", "MX")]);

    assert!((result.pairs[0].km - 732.7).abs() < 1.0);
    assert!((result.pairs[1].km - 3031.8).abs() < 1.0);
    assert!((result.pairs[2].km - 3603.3).abs() < 1.0);
}

#[tokio::test]
async fn test_unknown_code_rejected_without_computation() {
    let (service, calls) = counting_service(ServiceConfig::default());

    let err = service.compute(&["US", "ZZ"]).await.unwrap_err();

    assert!(err.is_input_error());
    assert!(err.payload().error.contains("ZZ"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(service.cache_stats().size, 0);
}

#[tokio::test]
async fn test_coincident_points_have_zero_distance() {
    let store = InMemoryPointStore::from_points(vec![
        GeoPoint::new("A", "Alpha", "Alpha", 0.0, 0.0),
        GeoPoint::new("B", "Bravo", "Bravo", 0.0, 0.0),
    ])
    .unwrap();
    let service = DistanceService::new(ServiceConfig::default(), Arc::new(store));

    let result = service.compute(&["A", "B"]).await.unwrap();

    assert_eq!(result.count, 1);
    assert_eq!(result.pairs[0].km, 0.0);
}

#[tokio::test]
async fn test_repeat_request_served_from_cache() {
    let (service, calls) = counting_service(ServiceConfig::default());

    let first = service.compute(&["FR", "DE", "IT", "ES"]).await.unwrap();
    let computed = calls.load(Ordering::SeqCst);
    assert_eq!(computed, 6);

    let second = service.compute(&["es", "it", "de", "fr"]).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), computed);
    assert!(Arc::ptr_eq(&first, &second));

    let stats = service.cache_stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.keys, vec!["distances:DE,ES,FR,IT"]);
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_single_code_rejected() {
    let service = DistanceService::new(ServiceConfig::default(), capitals());

    let err = service.compute(&["US", "us"]).await.unwrap_err();

    assert_eq!(err, ServiceError::Input(InputError::TooFewCodes { count: 1 }));
}

#[tokio::test]
async fn test_too_many_codes_rejected() {
    let config = ServiceConfig::builder().max_codes(3).build();
    let service = DistanceService::new(config, capitals());

    let err = service.compute(&["US", "CA", "MX", "FR"]).await.unwrap_err();

    assert_eq!(
        err,
        ServiceError::Input(InputError::TooManyCodes { count: 4, max: 3 })
    );
}

// =============================================================================
// Cache behaviour through the service
// =============================================================================

#[tokio::test]
async fn test_oldest_request_evicted_first() {
    let config = ServiceConfig::builder()
        .cache(CacheConfig {
            max_entries: 2,
            ..Default::default()
        })
        .build();
    let (service, calls) = counting_service(config);

    service.compute(&["US", "CA"]).await.unwrap();
    service.compute(&["FR", "DE"]).await.unwrap();
    service.compute(&["JP", "CN"]).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    // Still cached
    service.compute(&["DE", "FR"]).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    // Evicted, so computed again
    service.compute(&["CA", "US"]).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert_eq!(service.cache_stats().evictions, 2);
}

// =============================================================================
// Whole dataset
// =============================================================================

#[tokio::test]
async fn test_all_capitals() {
    let store = capitals();
    let codes: Vec<String> = store.points().iter().map(|p| p.code.clone()).collect();
    let n = codes.len();
    let service = DistanceService::new(ServiceConfig::default(), store);

    let result = service.compute(codes.as_slice()).await.unwrap();

    assert_eq!(result.count, n * (n - 1) / 2);
    assert!(result.pairs.windows(2).all(|w| w[0].km <= w[1].km));

    let distinct: HashSet<(String, String)> = result
        .pairs
        .iter()
        .map(|p| {
            let mut ends = [p.first.clone(), p.second.clone()];
            ends.sort();
            let [a, b] = ends;
            (a, b)
        })
        .collect();
    assert_eq!(distinct.len(), result.count);
    assert!(result.pairs.iter().all(|p| p.first != p.second));
}

#[tokio::test]
async fn test_wire_shape_rounds_km() {
    let service = DistanceService::new(ServiceConfig::default(), capitals());
    let result = service.compute(&["US", "CA"]).await.unwrap();

    let json = serde_json::to_value(result.as_ref()).unwrap();

    assert_eq!(json["count"], 1);
    assert_eq!(json["unit"], "km");
    assert_eq!(json["pairs"][0]["a"], "US");
    assert_eq!(json["pairs"][0]["b"], "CA");
    assert_eq!(json["pairs"][0]["km"], 732.7);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_any_subset_yields_all_pairs_sorted(mask in proptest::collection::vec(any::<bool>(), 63)) {
        let store = capitals();
        let codes: Vec<String> = store
            .points()
            .iter()
            .zip(&mask)
            .filter(|(_, keep)| **keep)
            .map(|(p, _)| p.code.clone())
            .collect();
        prop_assume!(codes.len() >= 2);

        let service = DistanceService::new(ServiceConfig::default(), store);
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let result = runtime.block_on(service.compute(codes.as_slice())).unwrap();

        let n = codes.len();
        prop_assert_eq!(result.count, n * (n - 1) / 2);
        prop_assert!(result.pairs.windows(2).all(|w| w[0].km <= w[1].km));
    }
}
