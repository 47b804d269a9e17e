//! Axum router for the scrape endpoint.

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{obs::SimMetrics, ops};

pub fn build_router(metrics: Arc<SimMetrics>) -> Router {
    Router::new()
        .route("/metrics", get(ops::metrics))
        .route("/healthz", get(ops::healthz))
        .with_state(metrics)
}
