//! Error types for talking to the sensor backend.

use thiserror::Error;

/// Errors that can occur when fetching readings or submitting configuration.
///
/// The message carried by each variant is for logs only. Callers branch on the
/// variant, never on the text.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Network failure or a non-2xx response on a fetch.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response body was not a well-formed reading (or list of readings).
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The backend rejected a configuration request.
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for TelemetryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TelemetryError::MalformedPayload(err.to_string())
        } else {
            TelemetryError::Transport(err.to_string())
        }
    }
}
