use std::net::SocketAddr;

use serde::Deserialize;
use quickserve_core::error::{Result, QuickServeError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub app: AppSection,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            app: AppSection::default(),
        }
    }
}

impl WebConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(QuickServeError::BadConfig(format!(
                "unsupported config version {}",
                self.version
            )));
        }
        self.server.listen_addr()?;
        self.app.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            QuickServeError::BadConfig(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }
}

/// Labels of the `app_version` info gauge.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppSection {
    #[serde(default = "default_app_version")]
    pub version: String,
    #[serde(default = "default_app_config")]
    pub config: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            version: default_app_version(),
            config: default_app_config(),
        }
    }
}

impl AppSection {
    fn validate(&self) -> Result<()> {
        if self.version.is_empty() || self.config.is_empty() {
            return Err(QuickServeError::BadConfig(
                "app.version and app.config must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8000".into()
}
fn default_app_version() -> String {
    "v0.1.2".into()
}
fn default_app_config() -> String {
    "staging".into()
}
