//! Content server config loader (strict parsing).
//!
//! Defaults cover everything; `CONTENT_SERVER_CONFIG` may name a YAML file.

pub mod schema;

use std::fs;

use quickserve_core::error::{Result, QuickServeError};

pub use schema::{AppSection, ServerSection, WebConfig};

pub const CONFIG_PATH_ENV: &str = "CONTENT_SERVER_CONFIG";

pub fn load_from_file(path: &str) -> Result<WebConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| QuickServeError::io(format!("read config {path}"), e))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<WebConfig> {
    let cfg: WebConfig = serde_yaml::from_str(s)
        .map_err(|e| QuickServeError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// File named by `CONTENT_SERVER_CONFIG`, or defaults.
pub fn load() -> Result<WebConfig> {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => load_from_file(&path),
        Err(_) => Ok(WebConfig::default()),
    }
}
