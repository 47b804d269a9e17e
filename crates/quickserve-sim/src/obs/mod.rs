//! Metric families for the order exporter, built on the core primitives.

pub mod metrics;

pub use metrics::SimMetrics;
