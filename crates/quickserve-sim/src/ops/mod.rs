//! Scrape endpoints of the order exporter.
//!
//! - `/healthz` : liveness
//! - `/metrics` : Prometheus text format

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use quickserve_core::obs::TEXT_FORMAT;

use crate::obs::SimMetrics;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(State(metrics): State<Arc<SimMetrics>>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, TEXT_FORMAT)],
        metrics.render(),
    )
        .into_response()
}
