//! Axum router wiring.
//!
//! The content pages (and the 404 fallback) sit behind the request-tracking
//! middleware; `/metrics` and `/healthz` are merged in beside them.

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, obs, ops, routes};

pub fn build_router(state: AppState) -> Router {
    let content = routes::content::routes()
        .fallback(routes::content::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            obs::middleware::track_requests,
        ));

    let ops_routes = Router::new()
        .route("/metrics", get(ops::metrics))
        .route("/healthz", get(ops::healthz));

    content.merge(ops_routes).with_state(state)
}
