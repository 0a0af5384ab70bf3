//! Batched, bounded-concurrency pair computation.
//!
//! The scheduler turns a [`ComputationRequest`](crate::request::ComputationRequest)
//! into a sorted list of [`Pair`](crate::pairs::Pair) records:
//!
//! ```text
//! PairGenerator ──next_batch()──► Batch ──spawn_blocking──► ComputedBatch
//!       ▲                                  (≤ concurrency)        │
//!       └──────────── refill as batches complete ◄────────────────┤
//!                                                                 ▼
//!                                         ProgressEvent (done/total) ──► channel
//! ```
//!
//! Batch size and worker count come from [`policy_for`], which stages the
//! settings by total pair count. Completed batches are reassembled in
//! generation order and stably sorted by distance, so the final result is
//! identical no matter which worker finished first.

mod batch;
mod error;
mod policy;
mod runner;

pub use batch::{Batch, ComputedBatch};
pub use error::ComputeError;
pub use policy::{
    policy_for, BatchPolicy, LARGE_TIER_MAX_PAIRS, MEDIUM_TIER_MAX_PAIRS, SMALL_TIER_MAX_PAIRS,
};
pub use runner::{BatchScheduler, SchedulerConfig};
