//! Transport to the sensor backend.
//!
//! The [`SensorApi`] trait is the seam between the engine and the network.
//! [`HttpSensorClient`] is the real implementation; tests substitute
//! scripted fakes.
//!
//! Each call is one round trip with no retry. Failures come back as a
//! [`TelemetryError`] and it is up to the caller whether to surface them.

mod http;

pub use http::HttpSensorClient;

use async_trait::async_trait;

use crate::data::Reading;
use crate::error::TelemetryError;

/// Base address used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Path of the latest-reading endpoint.
pub const CURRENT_PATH: &str = "/sensor/data";

/// Path of the history endpoint (newest first).
pub const HISTORY_PATH: &str = "/sensor/history";

/// Path of the device configuration endpoint.
pub const CONFIGURE_PATH: &str = "/sensor/configure";

/// Operations the backend offers.
///
/// # Example
///
/// ```no_run
/// use vitalwatch::{HttpSensorClient, SensorApi};
///
/// # tokio_test::block_on(async {
/// let client = HttpSensorClient::new("http://localhost:5000").unwrap();
/// match client.fetch_current().await {
///     Ok(reading) => println!("{} bpm", reading.heart_rate),
///     Err(e) => eprintln!("{}", e),
/// }
/// # });
/// ```
#[async_trait]
pub trait SensorApi: Send + Sync {
    /// Fetch the latest reading.
    async fn fetch_current(&self) -> Result<Reading, TelemetryError>;

    /// Fetch past readings as the backend returns them, newest first.
    async fn fetch_history(&self) -> Result<Vec<Reading>, TelemetryError>;

    /// Send Wi-Fi credentials to the device.
    async fn submit_config(&self, ssid: &str, password: &str) -> Result<(), TelemetryError>;

    /// Returns a human-readable description of the backend.
    fn description(&self) -> &str;
}
