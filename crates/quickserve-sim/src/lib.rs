//! quickserve order exporter library.
//!
//! Simulates fast-food orders flowing through a fixed pool of machines,
//! perturbs ambient restaurant readings, and republishes both as metrics for
//! scraping. Consumed by the `order-exporter` binary and by integration
//! tests.

pub mod ambient;
pub mod config;
pub mod context;
pub mod obs;
pub mod ops;
pub mod orders;
pub mod router;
pub mod runner;
