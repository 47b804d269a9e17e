//! Wall-clock source in milliseconds.
//!
//! The simulator never reads the system time directly; it asks a `Clock`.
//! Production uses [`SystemClock`], tests drive a [`ManualClock`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Millisecond timestamps as `f64` (sub-millisecond precision is kept).
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> f64;
}

/// Unix-epoch wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        // A clock set before 1970 reads as zero rather than failing the tick.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

/// Hand-driven clock. Clones share the same reading, so a test can keep one
/// handle while the simulator context owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(start_ms.to_bits())),
        }
    }

    pub fn set(&self, ms: f64) {
        self.bits.store(ms.to_bits(), Ordering::Relaxed);
    }

    pub fn advance(&self, delta_ms: f64) {
        let _ = self
            .bits
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |b| {
                Some((f64::from_bits(b) + delta_ms).to_bits())
            });
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_reading() {
        let a = ManualClock::new(1_000.0);
        let b = a.clone();
        a.advance(250.5);
        assert_eq!(b.now_ms(), 1_250.5);
        b.set(10.0);
        assert_eq!(a.now_ms(), 10.0);
    }

    #[test]
    fn system_clock_is_past_2020() {
        // 2020-01-01T00:00:00Z in ms
        assert!(SystemClock.now_ms() > 1_577_836_800_000.0);
    }
}
