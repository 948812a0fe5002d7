//! HTTP implementation of [`SensorApi`] using reqwest.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use super::{SensorApi, CONFIGURE_PATH, CURRENT_PATH, HISTORY_PATH};
use crate::data::Reading;
use crate::error::TelemetryError;

/// Sensor backend reached over HTTP.
///
/// Uses reqwest's default timeouts; nothing here retries.
#[derive(Debug, Clone)]
pub struct HttpSensorClient {
    client: Client,
    base_url: String,
    description: String,
}

#[derive(Debug, Serialize)]
struct ConfigRequest<'a> {
    ssid: &'a str,
    password: &'a str,
}

impl HttpSensorClient {
    /// Create a client for the backend at `base_url` (e.g. "http://localhost:5000").
    pub fn new(base_url: impl Into<String>) -> Result<Self, TelemetryError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client that sends requests through an existing reqwest `Client`.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            description: format!("http: {}", base_url),
            base_url,
        }
    }

    /// Returns the base address requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, TelemetryError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(TelemetryError::Transport(format!(
                "GET {} returned status {}",
                path,
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| TelemetryError::MalformedPayload(e.to_string()))
    }
}

#[async_trait]
impl SensorApi for HttpSensorClient {
    async fn fetch_current(&self) -> Result<Reading, TelemetryError> {
        self.get_json(CURRENT_PATH).await
    }

    async fn fetch_history(&self) -> Result<Vec<Reading>, TelemetryError> {
        self.get_json(HISTORY_PATH).await
    }

    async fn submit_config(&self, ssid: &str, password: &str) -> Result<(), TelemetryError> {
        let url = self.url(CONFIGURE_PATH);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&ConfigRequest { ssid, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TelemetryError::Configuration(format!(
                "backend returned status {}",
                response.status()
            )));
        }

        Ok(())
    }

    fn description(&self) -> &str {
        &self.description
    }
}
