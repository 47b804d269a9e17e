//! Lightweight in-process metrics.
//!
//! Metrics are stored as atomics and rendered in Prometheus text format by
//! the `/metrics` handlers of both binaries.

pub mod metrics;

pub use metrics::{CounterVec, GaugeVec, HistogramSnapshot, HistogramVec};

/// Content type of the Prometheus text exposition format.
pub const TEXT_FORMAT: &str = "text/plain; version=0.0.4; charset=utf-8";
