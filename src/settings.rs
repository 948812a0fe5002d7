//! Runtime settings.
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `VITALWATCH_*` environment variables.
//!
//! ```toml
//! base_url = "http://192.168.4.1"
//! log_filter = "vitalwatch=debug"
//! ```
//!
//! The poll interval and alert thresholds are fixed and cannot be set here.

use std::path::Path;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::client::DEFAULT_BASE_URL;

/// Prefix for environment overrides (e.g. `VITALWATCH_BASE_URL`).
pub const ENV_PREFIX: &str = "VITALWATCH";

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Address of the sensor backend.
    pub base_url: String,
    /// tracing-subscriber filter directive.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::build(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn build(path: Option<&Path>, environment: Environment) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("log_filter", DEFAULT_LOG_FILTER)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder.add_source(environment).build()?;
        Ok(config.try_deserialize()?)
    }
}
