//! Simulator context: built once at startup and handed to every tick step.
//!
//! Holds the config, the time and randomness sources, the metric registry,
//! and the process start timestamp used for the slow-machine warm-up.

use std::sync::Arc;

use quickserve_core::clock::Clock;
use quickserve_core::rng::RandomSource;

use crate::config::SimConfig;
use crate::obs::SimMetrics;

pub struct SimContext {
    pub(crate) cfg: SimConfig,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) rng: Box<dyn RandomSource>,
    pub(crate) metrics: Arc<SimMetrics>,
    started_ms: f64,
}

impl SimContext {
    /// `started_ms` is taken from `clock` at construction.
    pub fn new(
        cfg: SimConfig,
        clock: Box<dyn Clock>,
        rng: Box<dyn RandomSource>,
        metrics: Arc<SimMetrics>,
    ) -> Self {
        let started_ms = clock.now_ms();
        Self {
            cfg,
            clock,
            rng,
            metrics,
            started_ms,
        }
    }

    pub fn cfg(&self) -> &SimConfig {
        &self.cfg
    }

    pub fn metrics(&self) -> &Arc<SimMetrics> {
        &self.metrics
    }

    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    pub fn started_ms(&self) -> f64 {
        self.started_ms
    }

    /// How long the process has been running at `now_ms`.
    pub fn uptime_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.started_ms).max(0.0)
    }

    /// Slow-machine penalties only apply once the warm-up has elapsed.
    pub fn warmed_up(&self, now_ms: f64) -> bool {
        self.uptime_ms(now_ms) >= self.cfg.slow_machine.warmup_ms
    }
}
