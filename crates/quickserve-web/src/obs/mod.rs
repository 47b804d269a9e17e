//! Request instrumentation for the content server.
//!
//! - `metrics`: metric families and their rendering
//! - `middleware`: per-request count and latency tracking

pub mod metrics;
pub mod middleware;

pub use metrics::WebMetrics;
