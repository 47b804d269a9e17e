//! Fixed-text pages. Every hit bumps `http_requests_total{method}`.
//!
//! `get` also answers HEAD through the same handler; those hits count as
//! `GET` like any other page view.

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Router,
};

use crate::app_state::AppState;

/// Method label for page hits.
pub const PAGE_METHOD: &str = "GET";

#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub path: &'static str,
    pub body: &'static str,
}

pub const PAGES: [Page; 4] = [
    Page {
        path: "/",
        body: "This is the main page.",
    },
    Page {
        path: "/banana",
        body: "A banana is an elongated, edible fruit – botanically a berry – produced by several kinds of large herbaceous flowering plants in the genus Musa.",
    },
    Page {
        path: "/apple",
        body: "An apple is an edible fruit produced by an apple tree (Malus domestica). Apple trees are cultivated worldwide and are the most widely grown species in the genus Malus.",
    },
    Page {
        path: "/dragonfruit",
        body: "A pitaya (/pɪˈtaɪ.ə/) or pitahaya (/ˌpɪtəˈhaɪ.ə/) is the fruit of several different cactus species indigenous to the Americas. Pitaya usually refers to fruit of the genus Stenocereus, while pitahaya or dragon fruit refers to fruit of the genus Hylocereus, both in the family Cactaceae.",
    },
];

pub fn routes() -> Router<AppState> {
    PAGES.iter().fold(Router::new(), |router, page| {
        let body = page.body;
        router.route(
            page.path,
            get(move |State(state): State<AppState>| async move {
                state
                    .metrics()
                    .requests_by_method
                    .inc(&[("method", PAGE_METHOD)]);
                body
            }),
        )
    })
}

pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
