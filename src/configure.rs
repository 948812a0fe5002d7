//! One-shot device configuration (Wi-Fi credentials).
//!
//! Independent of the polling engine: it shares only the transport.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::client::SensorApi;

/// Result of a configuration submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfigOutcome {
    Success,
    Failure,
}

impl ConfigOutcome {
    /// Short status string for display.
    pub fn status(&self) -> &'static str {
        match self {
            ConfigOutcome::Success => "configured",
            ConfigOutcome::Failure => "failed",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ConfigOutcome::Success)
    }
}

impl fmt::Display for ConfigOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status())
    }
}

/// Sends configuration requests to the device.
///
/// Each call is a single request with no retry. Concurrent submissions are
/// not serialized here; callers that need that must prevent them.
#[derive(Clone)]
pub struct ConfigDispatcher {
    api: Arc<dyn SensorApi>,
}

impl ConfigDispatcher {
    pub fn new(api: Arc<dyn SensorApi>) -> Self {
        Self { api }
    }

    /// Submit Wi-Fi credentials and report whether the device accepted them.
    pub async fn configure(&self, ssid: &str, password: &str) -> ConfigOutcome {
        match self.api.submit_config(ssid, password).await {
            Ok(()) => {
                info!("Device configured for network '{}'", ssid);
                ConfigOutcome::Success
            }
            Err(e) => {
                warn!("Configuration request failed: {}", e);
                ConfigOutcome::Failure
            }
        }
    }
}

impl fmt::Debug for ConfigDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigDispatcher")
            .field("api", &self.api.description())
            .finish()
    }
}
