use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::settings::MemFullBehavior;

/// Rolling record of the life sum of computed generations, oldest first.
///
/// Each sample carries its generation number, so a sample skipped by a
/// `StopSilently` store never shifts which generations the others belong to.
#[derive(Clone, Debug, PartialEq)]
pub struct LifeStats {
    samples: VecDeque<(u64, f64)>,
    capacity: usize,
    behavior: MemFullBehavior,
}

impl LifeStats {
    pub fn new(capacity: usize, behavior: MemFullBehavior) -> Self {
        Self {
            // the default capacity is large, don't reserve all of it up front
            samples: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            behavior,
        }
    }

    /// Samples currently stored.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most samples kept at once.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    /// Life sum of the most recent sampled generation.
    pub fn latest(&self) -> Option<f64> {
        self.samples.back().map(|&(_, sum)| sum)
    }

    /// Life sums, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|&(_, sum)| sum)
    }

    /// `(generation, life sum)` pairs, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = (u64, f64)> + '_ {
        self.samples.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// Fails only if a new sample would hit a full store under `ThrowOnFull`.
    pub fn check_room(&self) -> Result<()> {
        if self.capacity > 0 && self.is_full() && self.behavior == MemFullBehavior::ThrowOnFull {
            return Err(Error::ResourceExhausted("life statistics are full"));
        }
        Ok(())
    }

    /// Appends the life sum of `generation` according to the overflow policy.
    /// Returns false if the sample was not kept.
    pub fn record(&mut self, generation: u64, sum: f64) -> Result<bool> {
        if self.capacity == 0 {
            return Ok(false);
        }
        if self.is_full() {
            match self.behavior {
                MemFullBehavior::ForgetSilently => {
                    self.samples.pop_front();
                }
                MemFullBehavior::StopSilently => {
                    log::warn!("Life statistics full, sample of generation {} dropped", generation);
                    return Ok(false);
                }
                MemFullBehavior::ThrowOnFull => {
                    return Err(Error::ResourceExhausted("life statistics are full"));
                }
            }
        }
        self.samples.push_back((generation, sum));
        Ok(true)
    }

    /// Forgets the samples of generations newer than `generation` (they were rewound).
    pub fn drop_after(&mut self, generation: u64) {
        while self.samples.back().is_some_and(|&(g, _)| g > generation) {
            self.samples.pop_back();
        }
    }

    /// Applies a new capacity and policy, dropping the oldest samples that no longer fit.
    pub fn reconfigure(&mut self, capacity: usize, behavior: MemFullBehavior) {
        if self.samples.len() > capacity {
            let excess = self.samples.len() - capacity;
            self.samples.drain(..excess);
        }
        self.capacity = capacity;
        self.behavior = behavior;
    }
}
