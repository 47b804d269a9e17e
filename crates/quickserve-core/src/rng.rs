//! Injectable randomness for the simulator.
//!
//! Every draw the simulator makes goes through [`RandomSource`]. Any
//! `rand::RngCore` implements it, so production passes an entropy-seeded
//! `StdRng` and tests pass `StdRng::seed_from_u64` for reproducible runs.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

pub trait RandomSource: Send {
    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform integer in `lo..=hi`. Returns `lo` when the range is empty.
    fn int_inclusive(&mut self, lo: u32, hi: u32) -> u32;

    /// Uniform float in `[lo, hi]`. Returns `lo` when the range is empty.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64;

    /// Uniform index into a slice of length `len`; `len == 0` yields 0.
    fn index(&mut self, len: usize) -> usize;

    /// `true` with probability `p`. Values outside `[0, 1]` saturate.
    fn chance(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.unit() < p
    }
}

impl<R: RngCore + Send> RandomSource for R {
    fn unit(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn int_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        self.gen_range(lo..=hi)
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if lo.is_nan() || hi.is_nan() || hi <= lo {
            return lo;
        }
        self.gen_range(lo..=hi)
    }

    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.gen_range(0..len)
    }
}

/// Entropy-seeded generator for production runs.
pub fn from_entropy() -> StdRng {
    StdRng::from_entropy()
}

/// Fixed-seed generator for reproducible runs.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
