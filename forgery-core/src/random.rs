//! Random sources
//!
//! Every random choice the engine makes goes through [`RandomSource`], so a
//! fixed implementation makes fetches and expansions reproducible.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Uniform integers in `[0, bound)`.
pub trait RandomSource: Send + Sync {
    /// Return a value in `[0, bound)`; `0` when `bound` is 0 or 1.
    fn next_int(&self, bound: usize) -> usize;

    /// [`next_int`](Self::next_int) clamped into `[0, bound)`, safe to index with.
    fn pick(&self, bound: usize) -> usize {
        self.next_int(bound).min(bound.saturating_sub(1))
    }
}

/// [`StdRng`] behind a mutex.
#[derive(Debug)]
pub struct StdRandom {
    rng: Mutex<StdRng>,
}

impl StdRandom {
    /// Seed from the operating system.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for StdRandom {
    fn next_int(&self, bound: usize) -> usize {
        if bound <= 1 {
            return 0;
        }
        self.rng.lock().random_range(0..bound)
    }
}

/// Always returns the same index, clamped below `bound`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedRandom {
    value: usize,
}

impl FixedRandom {
    pub fn new(value: usize) -> Self {
        Self { value }
    }
}

impl RandomSource for FixedRandom {
    fn next_int(&self, bound: usize) -> usize {
        self.value.min(bound.saturating_sub(1))
    }
}

/// Replays `values` in a cycle, each reduced modulo `bound`.
#[derive(Debug)]
pub struct SequenceRandom {
    values: Vec<usize>,
    cursor: AtomicUsize,
}

impl SequenceRandom {
    pub fn new(values: impl Into<Vec<usize>>) -> Self {
        Self {
            values: values.into(),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Number of draws made so far.
    pub fn draws(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

impl RandomSource for SequenceRandom {
    fn next_int(&self, bound: usize) -> usize {
        let draw = self.cursor.fetch_add(1, Ordering::SeqCst);
        if bound <= 1 || self.values.is_empty() {
            return 0;
        }
        self.values[draw % self.values.len()] % bound
    }
}
