//! Distance service facade implementation.

use super::config::ServiceConfig;
use super::error::ServiceError;
use crate::cache::{Cache, CacheKey, CacheStats, NoOpCache, ResultCache};
use crate::distance::DistanceFn;
use crate::geo::GeoPointStore;
use crate::request::{validate_codes, ComputationRequest, InputError};
use crate::result::DistanceResult;
use crate::scheduler::{BatchScheduler, ComputeError};
use crate::stream::{DistanceSession, ProgressEvent, SessionEmitter, SessionEvent};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Serves distance requests against one point store and one result cache.
///
/// Cloning is cheap; clones share the store, cache and scheduler. Build one
/// at startup and hand clones to whatever accepts requests.
#[derive(Clone)]
pub struct DistanceService {
    config: ServiceConfig,
    store: Arc<dyn GeoPointStore>,
    cache: Arc<dyn Cache>,
    scheduler: BatchScheduler,
}

impl DistanceService {
    /// Create a service, building the cache described by `config`.
    pub fn new(config: ServiceConfig, store: Arc<dyn GeoPointStore>) -> Self {
        let cache: Arc<dyn Cache> = if config.cache().enabled {
            Arc::new(ResultCache::new(*config.cache()))
        } else {
            Arc::new(NoOpCache)
        };
        Self::with_cache(config, store, cache)
    }

    /// Create a service around an existing cache.
    pub fn with_cache(
        config: ServiceConfig,
        store: Arc<dyn GeoPointStore>,
        cache: Arc<dyn Cache>,
    ) -> Self {
        let scheduler = BatchScheduler::new(Arc::clone(&store)).with_config(*config.scheduler());
        Self {
            config,
            store,
            cache,
            scheduler,
        }
    }

    /// Replace the distance function (haversine by default).
    pub fn with_distance(mut self, distance: Arc<dyn DistanceFn>) -> Self {
        self.scheduler = self.scheduler.with_distance(distance);
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn GeoPointStore> {
        &self.store
    }

    pub fn cache(&self) -> &Arc<dyn Cache> {
        &self.cache
    }

    /// Normalize and check raw codes against the store.
    pub fn validate<S: AsRef<str>>(&self, codes: &[S]) -> Result<ComputationRequest, InputError> {
        validate_codes(self.store.as_ref(), codes, self.config.max_codes())
    }

    /// Compute (or fetch from cache) the sorted distances for `codes`.
    pub async fn compute<S: AsRef<str>>(
        &self,
        codes: &[S],
    ) -> Result<Arc<DistanceResult>, ServiceError> {
        let request = self.validate(codes)?;
        self.compute_request(&request, &CancellationToken::new())
            .await
    }

    /// Compute a validated request, honouring `cancellation`.
    ///
    /// Only complete results are cached.
    pub async fn compute_request(
        &self,
        request: &ComputationRequest,
        cancellation: &CancellationToken,
    ) -> Result<Arc<DistanceResult>, ServiceError> {
        let key = CacheKey::for_request(request);

        if let Some(hit) = self.cache.get(&key) {
            debug!(key = %key, "Result cache hit");
            return Ok(hit);
        }

        debug!(key = %key, total = request.total_pairs(), "Result cache miss");
        let pairs = self.scheduler.run(request, None, cancellation).await?;
        let result = Arc::new(DistanceResult::from_sorted(pairs));
        self.cache.set(key, Arc::clone(&result), None);

        Ok(result)
    }

    /// Start a streaming session for `codes`.
    ///
    /// Validation happens up front; an invalid request never starts a
    /// session. Must be called from within a Tokio runtime.
    pub fn stream<S: AsRef<str>>(&self, codes: &[S]) -> Result<DistanceSession, InputError> {
        let request = self.validate(codes)?;
        Ok(self.stream_request(request))
    }

    /// Start a streaming session for a validated request.
    pub fn stream_request(&self, request: ComputationRequest) -> DistanceSession {
        let (tx, rx) = mpsc::channel(self.config.channel_capacity());
        let cancellation = CancellationToken::new();
        let session = DistanceSession::new(rx, cancellation.clone(), request.total_pairs());

        let service = self.clone();
        tokio::spawn(async move {
            service
                .run_session(request, SessionEmitter::new(tx), cancellation)
                .await;
        });

        session
    }

    /// Snapshot of the result cache.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop every cached result.
    pub fn clear_cache(&self) {
        self.cache.clear();
        info!("Result cache cleared");
    }

    async fn run_session(
        self,
        request: ComputationRequest,
        mut emitter: SessionEmitter,
        cancellation: CancellationToken,
    ) {
        let total = request.total_pairs();
        let key = CacheKey::for_request(&request);
        info!(key = %key, total, "Session started");

        if emitter.emit(SessionEvent::Started { total }).await.is_err() {
            debug!(key = %key, "Consumer left before start");
            return;
        }

        if let Some(hit) = self.cache.get(&key) {
            debug!(key = %key, "Result cache hit, replaying");
            let replay = [
                SessionEvent::Progress(ProgressEvent::new(total, total, None)),
                SessionEvent::Completed(hit),
            ];
            for event in replay {
                if emitter.emit(event).await.is_err() {
                    debug!(key = %key, "Consumer left during replay");
                    return;
                }
            }
            info!(key = %key, total, cached = true, "Session completed");
            return;
        }

        let (progress_tx, mut progress_rx) =
            mpsc::channel::<ProgressEvent>(self.config.channel_capacity());
        let scheduler = &self.scheduler;
        let request_ref = &request;
        let token = &cancellation;

        let compute = async {
            // Dropping the sender ends the forwarder once the run is over
            let progress_tx = progress_tx;
            scheduler.run(request_ref, Some(&progress_tx), token).await
        };

        let forward = async {
            while let Some(progress) = progress_rx.recv().await {
                if let Err(e) = emitter.emit(SessionEvent::Progress(progress)).await {
                    debug!(error = %e, "Progress delivery stopped");
                    token.cancel();
                    break;
                }
            }
        };

        let (outcome, ()) = tokio::join!(compute, forward);

        match outcome {
            Ok(pairs) => {
                let result = Arc::new(DistanceResult::from_sorted(pairs));
                self.cache.set(key.clone(), Arc::clone(&result), None);

                match emitter.emit(SessionEvent::Completed(result)).await {
                    Ok(_) => info!(key = %key, total, cached = false, "Session completed"),
                    Err(e) => debug!(key = %key, error = %e, "Result not delivered"),
                }
            }
            Err(ComputeError::Cancelled) => {
                debug!(key = %key, "Session cancelled");
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Session failed");
                let payload = ServiceError::from(e).payload();
                if let Err(e) = emitter.emit(SessionEvent::Failed(payload)).await {
                    debug!(key = %key, error = %e, "Failure not delivered");
                }
            }
        }
    }
}
