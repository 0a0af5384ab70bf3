//! Batch size and concurrency policy.
//!
//! Small inputs use small batches so progress updates arrive quickly;
//! large inputs use bigger batches and more workers to amortize
//! scheduling overhead.

/// Upper bound (inclusive) of total pairs for the small tier.
pub const SMALL_TIER_MAX_PAIRS: usize = 1_000;

/// Upper bound (inclusive) of total pairs for the medium tier.
pub const MEDIUM_TIER_MAX_PAIRS: usize = 10_000;

/// Upper bound (inclusive) of total pairs for the large tier.
pub const LARGE_TIER_MAX_PAIRS: usize = 50_000;

/// How a computation is partitioned and how many batches run at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPolicy {
    /// Pairs per batch
    pub batch_size: usize,
    /// Maximum batches in flight
    pub concurrency: usize,
}

impl BatchPolicy {
    /// Create a policy; both values are raised to at least 1.
    pub fn new(batch_size: usize, concurrency: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            concurrency: concurrency.max(1),
        }
    }

    /// Cap concurrency at `max` (ignored when `max` is 0).
    pub fn with_max_concurrency(self, max: usize) -> Self {
        if max == 0 {
            self
        } else {
            Self::new(self.batch_size, self.concurrency.min(max))
        }
    }

    /// Number of batches needed to cover `total_pairs`.
    pub fn batch_count(&self, total_pairs: usize) -> usize {
        total_pairs.div_ceil(self.batch_size)
    }
}

/// Staged policy by total pair count.
///
/// | total pairs       | batch size | concurrency |
/// |-------------------|-----------:|------------:|
/// | ≤ 1,000           |        100 |           2 |
/// | ≤ 10,000          |        500 |           3 |
/// | ≤ 50,000          |      1,000 |           4 |
/// | above             |      2,000 |           6 |
pub fn policy_for(total_pairs: usize) -> BatchPolicy {
    if total_pairs <= SMALL_TIER_MAX_PAIRS {
        BatchPolicy::new(100, 2)
    } else if total_pairs <= MEDIUM_TIER_MAX_PAIRS {
        BatchPolicy::new(500, 3)
    } else if total_pairs <= LARGE_TIER_MAX_PAIRS {
        BatchPolicy::new(1_000, 4)
    } else {
        BatchPolicy::new(2_000, 6)
    }
}
