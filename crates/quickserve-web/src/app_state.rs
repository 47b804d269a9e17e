//! Shared application state for the content server.

use std::sync::Arc;

use crate::config::WebConfig;
use crate::obs::WebMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: WebConfig,
    metrics: WebMetrics,
}

impl AppState {
    pub fn new(cfg: WebConfig) -> Self {
        let metrics = WebMetrics::new();
        metrics.set_app_info(&cfg.app.version, &cfg.app.config);
        Self {
            inner: Arc::new(AppStateInner { cfg, metrics }),
        }
    }

    pub fn cfg(&self) -> &WebConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> &WebMetrics {
        &self.inner.metrics
    }
}
