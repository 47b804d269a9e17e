use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use crate::app_state::AppState;

/// Endpoint label for requests no route matched.
pub const UNMATCHED_ENDPOINT: &str = "none";

/// Record count and latency of every request passing through the content app.
pub async fn track_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let method = req.method().as_str().to_owned();
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_ENDPOINT.to_owned());

    let started = Instant::now();
    let res = next.run(req).await;
    let elapsed = started.elapsed();

    let status = res.status().as_u16().to_string();
    state
        .metrics()
        .record_request(&method, &endpoint, &status, elapsed);
    tracing::debug!(%method, %endpoint, %status, elapsed_us = elapsed.as_micros() as u64, "request");
    res
}
