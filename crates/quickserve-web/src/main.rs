//! Static content server.
//!
//! - Text pages: /, /banana, /apple, /dragonfruit
//! - Scrape path: /metrics
//! - Graceful shutdown on Ctrl+C

use tracing_subscriber::{fmt, EnvFilter};

use quickserve_core::error::{QuickServeError, Result};
use quickserve_web::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(err) = run().await {
        tracing::error!(error = %err, code = err.code().as_str(), "content server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cfg = config::load()?;
    let listen = cfg.server.listen_addr()?;

    let state = app_state::AppState::new(cfg);
    let app = router::build_router(state);

    tracing::info!(%listen, "content server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| QuickServeError::io(format!("bind {listen}"), e))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %err, "ctrl_c listener error");
            }
            tracing::info!("shutdown signal received");
        })
        .await
        .map_err(|e| QuickServeError::io("serve", e))
}
