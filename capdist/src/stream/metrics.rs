//! Throughput and time-remaining estimates for a running session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Rate and ETA measured at one progress step.
///
/// Serializes as `{elapsedMs, pairsPerSecond, etaMs?}`. `etaMs` is absent
/// while no rate can be measured yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressMetrics {
    /// Time since the computation started
    pub elapsed_ms: u64,
    /// Pairs computed per second so far
    pub pairs_per_second: f64,
    /// Estimated time until every pair is computed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta_ms: Option<u64>,
}

impl ProgressMetrics {
    /// Measure throughput after `done` of `total` pairs took `elapsed`.
    ///
    /// The rate is 0 until at least one pair is done and some time has
    /// passed. A finished computation always reports an ETA of 0.
    pub fn measure(done: usize, total: usize, elapsed: Duration) -> Self {
        let secs = elapsed.as_secs_f64();
        let pairs_per_second = if done == 0 || secs <= 0.0 {
            0.0
        } else {
            done as f64 / secs
        };

        let eta_ms = if done >= total {
            Some(0)
        } else if pairs_per_second > 0.0 {
            let remaining = (total - done) as f64;
            Duration::try_from_secs_f64(remaining / pairs_per_second)
                .ok()
                .map(|eta| eta.as_millis().min(u64::MAX as u128) as u64)
        } else {
            None
        };

        Self {
            elapsed_ms: elapsed.as_millis().min(u64::MAX as u128) as u64,
            pairs_per_second,
            eta_ms,
        }
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }

    pub fn eta(&self) -> Option<Duration> {
        self.eta_ms.map(Duration::from_millis)
    }
}

impl fmt::Display for ProgressMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Speed: {:.0} pairs/sec | ETA: ", self.pairs_per_second)?;
        match self.eta_ms {
            Some(ms) => write!(f, "{:.1}s", ms as f64 / 1000.0),
            None => write!(f, "--"),
        }
    }
}
