//! Unordered pair generation.
//!
//! [`PairGenerator`] walks every combination `(i, j)` with `i < j` over an
//! input of `n` codes exactly once, in a fixed order. It yields index
//! descriptors rather than distances so the scheduler can pull pairs in
//! batches without materializing the whole set.

use crate::distance::round_km;
use serde::{Deserialize, Serialize, Serializer};

/// Number of unordered pairs among `n` items: `n * (n - 1) / 2`.
#[inline]
pub const fn total_pairs(n: usize) -> usize {
    if n < 2 {
        0
    } else {
        n * (n - 1) / 2
    }
}

/// Indices of one unordered pair into the request's code list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairDescriptor {
    /// Index of the first code (always less than `second`)
    pub first: usize,
    /// Index of the second code
    pub second: usize,
}

/// Lazy, deterministic sequence of all unordered index pairs.
///
/// Cloning a fresh generator, or calling [`PairGenerator::restart`], replays
/// the same sequence from the beginning.
#[derive(Debug, Clone)]
pub struct PairGenerator {
    n: usize,
    i: usize,
    j: usize,
    remaining: usize,
}

impl PairGenerator {
    /// Create a generator over `n` items.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            i: 0,
            j: 1,
            remaining: total_pairs(n),
        }
    }

    /// Total number of pairs the full sequence contains.
    pub fn total(&self) -> usize {
        total_pairs(self.n)
    }

    /// Rewind to the first pair.
    pub fn restart(&mut self) {
        *self = Self::new(self.n);
    }

    /// Pull up to `size` descriptors.
    ///
    /// Returns an empty vector once the sequence is exhausted.
    pub fn next_batch(&mut self, size: usize) -> Vec<PairDescriptor> {
        self.by_ref().take(size).collect()
    }
}

impl Iterator for PairGenerator {
    type Item = PairDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let descriptor = PairDescriptor {
            first: self.i,
            second: self.j,
        };

        self.j += 1;
        if self.j >= self.n {
            self.i += 1;
            self.j = self.i + 1;
        }
        self.remaining -= 1;

        Some(descriptor)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for PairGenerator {}

impl std::iter::FusedIterator for PairGenerator {}

/// Two distinct codes and the distance between them.
///
/// `km` holds full precision; serialization rounds it to one decimal place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    /// First code of the pair
    #[serde(rename = "a")]
    pub first: String,
    /// Second code of the pair
    #[serde(rename = "b")]
    pub second: String,
    /// Great-circle distance in kilometres
    #[serde(serialize_with = "serialize_rounded_km")]
    pub km: f64,
}

impl Pair {
    /// Create a new pair.
    pub fn new(first: impl Into<String>, second: impl Into<String>, km: f64) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            km,
        }
    }

    /// Distance rounded to one decimal place.
    pub fn rounded_km(&self) -> f64 {
        round_km(self.km)
    }

    /// Whether this pair joins the two codes, in either order.
    pub fn joins(&self, a: &str, b: &str) -> bool {
        (self.first == a && self.second == b) || (self.first == b && self.second == a)
    }
}

fn serialize_rounded_km<S: Serializer>(km: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_km(*km))
}
