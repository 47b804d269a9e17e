use std::net::SocketAddr;

use serde::Deserialize;
use quickserve_core::error::{Result, QuickServeError};

/// Label reserved for the cross-category aggregate series.
pub const AGGREGATE_LABEL: &str = "all";

fn bad(msg: impl Into<String>) -> QuickServeError {
    QuickServeError::BadConfig(msg.into())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimConfig {
    pub version: u32,

    #[serde(default)]
    pub exporter: ExporterSection,

    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    #[serde(default = "default_orders_per_tick")]
    pub orders_per_tick: CountRange,

    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryConfig>,

    #[serde(default)]
    pub slow_machine: SlowMachine,

    /// Total (queue + processing) time above which an order counts as slow.
    #[serde(default = "default_slow_total_ms")]
    pub slow_total_ms: f64,

    #[serde(default)]
    pub window: WindowSection,

    #[serde(default)]
    pub ambient: AmbientSection,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            version: 1,
            exporter: ExporterSection::default(),
            tick_interval_ms: default_tick_interval_ms(),
            orders_per_tick: default_orders_per_tick(),
            categories: default_categories(),
            slow_machine: SlowMachine::default(),
            slow_total_ms: default_slow_total_ms(),
            window: WindowSection::default(),
            ambient: AmbientSection::default(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(bad(format!("unsupported config version {}", self.version)));
        }
        if self.tick_interval_ms == 0 {
            return Err(bad("tick_interval_ms must be greater than 0"));
        }
        if self.orders_per_tick.min > self.orders_per_tick.max {
            return Err(bad("orders_per_tick.min must not exceed orders_per_tick.max"));
        }
        if self.categories.is_empty() {
            return Err(bad("categories must not be empty"));
        }
        for (i, c) in self.categories.iter().enumerate() {
            c.validate()?;
            if self.categories[..i].iter().any(|o| o.item == c.item) {
                return Err(bad(format!("duplicate category: {}", c.item)));
            }
        }
        if !(self.slow_total_ms.is_finite() && self.slow_total_ms >= 0.0) {
            return Err(bad("slow_total_ms must be a non-negative number"));
        }

        self.exporter.validate()?;
        self.slow_machine.validate()?;
        self.window.validate()?;
        self.ambient.validate()?;
        Ok(())
    }

    pub fn category(&self, item: &str) -> Option<&CategoryConfig> {
        self.categories.iter().find(|c| c.item == item)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ExporterSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .map_err(|e| bad(format!("exporter.listen must be a valid SocketAddr: {e}")))
    }

    /// Keep the configured interface, replace the port.
    pub fn set_port(&mut self, port: u16) -> Result<()> {
        let mut addr = self.listen_addr()?;
        addr.set_port(port);
        self.listen = addr.to_string();
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MsRange {
    pub min: f64,
    pub max: f64,
}

impl MsRange {
    fn validate(&self, what: &str) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min < 0.0 {
            return Err(bad(format!("{what} bounds must be non-negative numbers")));
        }
        if self.min > self.max {
            return Err(bad(format!("{what}.min must not exceed {what}.max")));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    pub item: String,
    pub processing_ms: MsRange,
    pub machines: u32,
}

impl CategoryConfig {
    fn validate(&self) -> Result<()> {
        if self.item.is_empty() {
            return Err(bad("category item must not be empty"));
        }
        if self.item == AGGREGATE_LABEL {
            return Err(bad(format!("category item '{AGGREGATE_LABEL}' is reserved")));
        }
        if self.machines == 0 {
            return Err(bad(format!("category {} needs at least one machine", self.item)));
        }
        self.processing_ms
            .validate(&format!("categories[{}].processing_ms", self.item))
    }
}

/// Intermittent slow machine: after warm-up, some orders take longer.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlowMachine {
    #[serde(default = "default_warmup_ms")]
    pub warmup_ms: f64,
    #[serde(default = "default_slow_probability")]
    pub probability: f64,
    #[serde(default = "default_penalty_ms")]
    pub penalty_ms: f64,
}

impl Default for SlowMachine {
    fn default() -> Self {
        Self {
            warmup_ms: default_warmup_ms(),
            probability: default_slow_probability(),
            penalty_ms: default_penalty_ms(),
        }
    }
}

impl SlowMachine {
    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(bad("slow_machine.probability must be between 0 and 1"));
        }
        if !(self.warmup_ms.is_finite() && self.warmup_ms >= 0.0) {
            return Err(bad("slow_machine.warmup_ms must be a non-negative number"));
        }
        if !(self.penalty_ms.is_finite() && self.penalty_ms >= 0.0) {
            return Err(bad("slow_machine.penalty_ms must be a non-negative number"));
        }
        Ok(())
    }
}

/// Completed-order sample retention and the recency filter applied when
/// aggregating. The two are independent knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowSection {
    #[serde(default = "default_retention_ms")]
    pub retention_ms: f64,
    #[serde(default = "default_recency_ms")]
    pub recency_ms: f64,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            retention_ms: default_retention_ms(),
            recency_ms: default_recency_ms(),
        }
    }
}

impl WindowSection {
    fn validate(&self) -> Result<()> {
        if !(self.retention_ms.is_finite() && self.retention_ms > 0.0) {
            return Err(bad("window.retention_ms must be greater than 0"));
        }
        if !(self.recency_ms.is_finite() && self.recency_ms >= 0.0) {
            return Err(bad("window.recency_ms must be a non-negative number"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AmbientSection {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_handwash_probability")]
    pub handwash_probability: f64,
    #[serde(default = "default_restrooms")]
    pub restrooms: Vec<RestroomConfig>,
}

impl Default for AmbientSection {
    fn default() -> Self {
        Self {
            enabled: true,
            handwash_probability: default_handwash_probability(),
            restrooms: default_restrooms(),
        }
    }
}

impl AmbientSection {
    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.handwash_probability) {
            return Err(bad("ambient.handwash_probability must be between 0 and 1"));
        }
        for r in &self.restrooms {
            if r.name.is_empty() {
                return Err(bad("ambient.restrooms[].name must not be empty"));
            }
            if r.stalls == 0 {
                return Err(bad(format!("restroom {} needs at least one stall", r.name)));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RestroomConfig {
    pub name: String,
    pub stalls: u32,
    #[serde(default = "default_max_queue")]
    pub max_queue: u32,
}

fn default_listen() -> String {
    "0.0.0.0:9101".into()
}
fn default_tick_interval_ms() -> u64 {
    10
}
fn default_orders_per_tick() -> CountRange {
    CountRange { min: 2, max: 5 }
}
fn default_categories() -> Vec<CategoryConfig> {
    vec![
        CategoryConfig {
            item: "fries".into(),
            processing_ms: MsRange { min: 170.0, max: 200.0 },
            machines: 10,
        },
        CategoryConfig {
            item: "milkshake".into(),
            processing_ms: MsRange { min: 100.0, max: 150.0 },
            machines: 10,
        },
    ]
}
fn default_warmup_ms() -> f64 {
    60_000.0
}
fn default_slow_probability() -> f64 {
    0.05
}
fn default_penalty_ms() -> f64 {
    180.0
}
fn default_slow_total_ms() -> f64 {
    400.0
}
fn default_retention_ms() -> f64 {
    10_000.0
}
fn default_recency_ms() -> f64 {
    100.0
}
fn default_true() -> bool {
    true
}
fn default_handwash_probability() -> f64 {
    0.8
}
fn default_max_queue() -> u32 {
    6
}
fn default_restrooms() -> Vec<RestroomConfig> {
    vec![
        RestroomConfig { name: "men".into(), stalls: 3, max_queue: default_max_queue() },
        RestroomConfig { name: "women".into(), stalls: 3, max_queue: default_max_queue() },
        RestroomConfig { name: "accessible".into(), stalls: 1, max_queue: 2 },
    ]
}
