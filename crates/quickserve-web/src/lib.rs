//! quickserve content server library.
//!
//! Wires the static text pages, request instrumentation, and the metrics
//! scrape path into one axum router. Consumed by the `content-server`
//! binary and by integration tests.

pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod routes;
