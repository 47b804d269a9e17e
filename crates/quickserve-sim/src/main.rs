//! Order metrics exporter.
//!
//! - Scrape endpoint: 0.0.0.0:$ORDER_METRICS_PORT/metrics (default 9101)
//! - Tick loop: generate orders, admit/complete them, perturb ambient readings
//! - Ctrl+C ends the loop and exits 0

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use quickserve_core::clock::SystemClock;
use quickserve_core::error::{QuickServeError, Result};
use quickserve_core::rng;
use quickserve_sim::{config, context::SimContext, obs::SimMetrics, router, runner::Generator};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(err) = run().await {
        tracing::error!(error = %err, code = err.code().as_str(), "order exporter failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cfg = config::load()?;
    let listen = cfg.exporter.listen_addr()?;

    if cfg.window.recency_ms < cfg.window.retention_ms {
        tracing::warn!(
            retention_ms = cfg.window.retention_ms,
            recency_ms = cfg.window.recency_ms,
            "aggregation only sees completed orders inside the recency filter; older retained samples are not used"
        );
    }

    let metrics = Arc::new(SimMetrics::new());
    let app = router::build_router(Arc::clone(&metrics));

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| QuickServeError::io(format!("bind {listen}"), e))?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::warn!(error = %e, "scrape server error");
        }
    });

    tracing::info!(
        %listen,
        tick_interval_ms = cfg.tick_interval_ms,
        categories = cfg.categories.len(),
        "order exporter starting"
    );
    println!("Order metrics exporter listening on port {}", listen.port());
    println!("Press Ctrl+C to exit");

    let ctx = SimContext::new(cfg, Box::new(SystemClock), Box::new(rng::from_entropy()), metrics);
    Generator::new(ctx).run_until(shutdown_signal()).await;

    println!("\nOrder metrics exporter exiting.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "ctrl_c listener error; stopping");
    }
}
