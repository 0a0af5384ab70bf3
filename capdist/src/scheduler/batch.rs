//! A bounded unit of pair work.

use super::error::ComputeError;
use crate::distance::DistanceFn;
use crate::geo::GeoPointStore;
use crate::pairs::{Pair, PairDescriptor};

/// A slice of the pair sequence, tagged with its position in generation order.
#[derive(Debug, Clone)]
pub struct Batch {
    /// Zero-based batch index
    pub index: usize,
    /// Pairs to compute
    pub descriptors: Vec<PairDescriptor>,
}

/// The computed pairs of one batch, in the batch's own order.
#[derive(Debug, Clone)]
pub struct ComputedBatch {
    /// Index of the source batch
    pub index: usize,
    /// Computed pairs
    pub pairs: Vec<Pair>,
}

impl Batch {
    pub fn new(index: usize, descriptors: Vec<PairDescriptor>) -> Self {
        Self { index, descriptors }
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Resolve both ends of every pair and compute its distance.
    ///
    /// Touches no shared mutable state. Fails on the first code the store
    /// cannot resolve.
    pub fn compute(
        self,
        codes: &[String],
        store: &dyn GeoPointStore,
        distance: &dyn DistanceFn,
    ) -> Result<ComputedBatch, ComputeError> {
        let resolve = |idx: usize| {
            let code = &codes[idx];
            store.get(code).ok_or_else(|| ComputeError::MissingPoint { code: code.clone() })
        };

        let pairs = self
            .descriptors
            .iter()
            .map(|d| {
                let a = resolve(d.first)?;
                let b = resolve(d.second)?;
                Ok(Pair::new(&a.code, &b.code, distance.km(a, b)))
            })
            .collect::<Result<Vec<_>, ComputeError>>()?;

        Ok(ComputedBatch {
            index: self.index,
            pairs,
        })
    }
}
