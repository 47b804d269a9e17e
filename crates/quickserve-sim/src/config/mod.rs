//! Generator config loader (strict parsing).
//!
//! Every field has a default, so the exporter runs without a file. When
//! `ORDER_SIM_CONFIG` names a YAML file it is parsed strictly; the scrape
//! port can always be overridden with `ORDER_METRICS_PORT`.

pub mod schema;

use std::fs;

use quickserve_core::error::{Result, QuickServeError};

pub use schema::{
    AmbientSection, CategoryConfig, CountRange, ExporterSection, MsRange, RestroomConfig,
    SimConfig, SlowMachine, WindowSection, AGGREGATE_LABEL,
};

pub const CONFIG_PATH_ENV: &str = "ORDER_SIM_CONFIG";
pub const PORT_ENV: &str = "ORDER_METRICS_PORT";

pub fn load_from_file(path: &str) -> Result<SimConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| QuickServeError::io(format!("read config {path}"), e))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<SimConfig> {
    let cfg: SimConfig = serde_yaml::from_str(s)
        .map_err(|e| QuickServeError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load from the process environment.
pub fn load() -> Result<SimConfig> {
    load_with(|k| std::env::var(k).ok())
}

/// Load using an arbitrary variable lookup (tests pass a closure).
pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<SimConfig> {
    let mut cfg = match lookup(CONFIG_PATH_ENV) {
        Some(path) => load_from_file(&path)?,
        None => SimConfig::default(),
    };
    apply_env_overrides(&mut cfg, &lookup)?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn apply_env_overrides(
    cfg: &mut SimConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(raw) = lookup(PORT_ENV) {
        let port: u16 = raw
            .trim()
            .parse()
            .map_err(|e| QuickServeError::BadConfig(format!("{PORT_ENV}={raw:?}: {e}")))?;
        cfg.exporter.set_port(port)?;
    }
    Ok(())
}
