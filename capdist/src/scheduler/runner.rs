//! Bounded-concurrency batch runner.
//!
//! Batches are pulled from the generator only when a worker slot is free, so
//! at most `concurrency` batches exist at any time regardless of how many
//! pairs the request covers.

use super::batch::{Batch, ComputedBatch};
use super::error::ComputeError;
use super::policy::{policy_for, BatchPolicy};
use crate::distance::{DistanceFn, Haversine};
use crate::geo::GeoPointStore;
use crate::pairs::{Pair, PairGenerator};
use crate::request::ComputationRequest;
use crate::stream::{ProgressEvent, ProgressMetrics};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Scheduler tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Upper bound on batches in flight (0 = use the staged policy as is)
    pub max_concurrency: usize,
    /// Fixed policy overriding the staged one
    pub policy: Option<BatchPolicy>,
}

impl SchedulerConfig {
    /// Resolve the policy for a computation of `total_pairs`.
    pub fn policy_for(&self, total_pairs: usize) -> BatchPolicy {
        self.policy
            .unwrap_or_else(|| policy_for(total_pairs))
            .with_max_concurrency(self.max_concurrency)
    }
}

/// Computes every pair of a request in batches on blocking workers.
#[derive(Clone)]
pub struct BatchScheduler {
    store: Arc<dyn GeoPointStore>,
    distance: Arc<dyn DistanceFn>,
    config: SchedulerConfig,
}

impl BatchScheduler {
    /// Create a scheduler using haversine distance and the staged policy.
    pub fn new(store: Arc<dyn GeoPointStore>) -> Self {
        Self {
            store,
            distance: Arc::new(Haversine),
            config: SchedulerConfig::default(),
        }
    }

    pub fn with_distance(mut self, distance: Arc<dyn DistanceFn>) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> SchedulerConfig {
        self.config
    }

    pub fn store(&self) -> &Arc<dyn GeoPointStore> {
        &self.store
    }

    /// Compute all pairs of `request`, sorted ascending by distance.
    ///
    /// After each batch completes, a cumulative [`ProgressEvent`] is sent on
    /// `progress` (if given). `done` only grows and reaches `total` exactly
    /// once. Cancelling the token, or dropping the progress receiver, stops
    /// scheduling new batches and returns [`ComputeError::Cancelled`].
    pub async fn run(
        &self,
        request: &ComputationRequest,
        progress: Option<&mpsc::Sender<ProgressEvent>>,
        cancellation: &CancellationToken,
    ) -> Result<Vec<Pair>, ComputeError> {
        let total = request.total_pairs();
        let policy = self.config.policy_for(total);
        let codes: Arc<[String]> = request.codes().into();
        let started = Instant::now();

        debug!(
            codes = codes.len(),
            total,
            batch_size = policy.batch_size,
            concurrency = policy.concurrency,
            "Scheduling pair computation"
        );

        let mut generator = PairGenerator::new(codes.len());
        let mut in_flight: JoinSet<Result<ComputedBatch, ComputeError>> = JoinSet::new();
        let mut completed: Vec<ComputedBatch> = Vec::with_capacity(policy.batch_count(total));
        let mut next_index = 0usize;
        let mut done = 0usize;

        loop {
            if cancellation.is_cancelled() {
                in_flight.abort_all();
                debug!(done, total, "Computation cancelled");
                return Err(ComputeError::Cancelled);
            }

            // Refill free worker slots
            while in_flight.len() < policy.concurrency {
                let descriptors = generator.next_batch(policy.batch_size);
                if descriptors.is_empty() {
                    break;
                }
                let batch = Batch::new(next_index, descriptors);
                next_index += 1;

                let codes = Arc::clone(&codes);
                let store = Arc::clone(&self.store);
                let distance = Arc::clone(&self.distance);
                in_flight.spawn_blocking(move || {
                    batch.compute(&codes, store.as_ref(), distance.as_ref())
                });
            }

            let joined = tokio::select! {
                biased;
                _ = cancellation.cancelled() => {
                    in_flight.abort_all();
                    debug!(done, total, "Computation cancelled");
                    return Err(ComputeError::Cancelled);
                }
                joined = in_flight.join_next() => joined,
            };

            let Some(joined) = joined else {
                break;
            };

            let batch = match joined {
                Ok(Ok(batch)) => batch,
                Ok(Err(e)) => {
                    in_flight.abort_all();
                    warn!(error = %e, "Batch failed, aborting computation");
                    return Err(e);
                }
                Err(join_err) => {
                    in_flight.abort_all();
                    warn!(error = %join_err, "Batch worker panicked");
                    return Err(ComputeError::Worker(join_err.to_string()));
                }
            };

            done += batch.pairs.len();

            if let Some(tx) = progress {
                let metrics = ProgressMetrics::measure(done, total, started.elapsed());
                let event = ProgressEvent::new(done, total, batch.pairs.last().cloned())
                    .with_metrics(metrics);
                tokio::select! {
                    biased;
                    _ = cancellation.cancelled() => {
                        in_flight.abort_all();
                        return Err(ComputeError::Cancelled);
                    }
                    sent = tx.send(event) => {
                        if sent.is_err() {
                            in_flight.abort_all();
                            debug!(done, total, "Progress receiver dropped");
                            return Err(ComputeError::Cancelled);
                        }
                    }
                }
            }

            completed.push(batch);
            tokio::task::yield_now().await;
        }

        // Reassemble in generation order so equal distances tie-break stably
        completed.sort_by_key(|b| b.index);
        let mut pairs: Vec<Pair> = completed.into_iter().flat_map(|b| b.pairs).collect();
        pairs.sort_by(|a, b| a.km.total_cmp(&b.km));

        debug!(
            pairs = pairs.len(),
            batches = next_index,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Pair computation complete"
        );

        Ok(pairs)
    }
}
