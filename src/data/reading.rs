//! Sensor readings as served by the backend.
//!
//! The wire format uses the backend's field names (`bpm`, `bpm_avg`,
//! `ds18b20_temp`, `dht11_temp`, `humidity`, `timestamp`). A [`Reading`] can
//! only be obtained through validation, so holding one means every numeric
//! field is finite and the timestamp parsed.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Offset-less timestamp layouts accepted in addition to RFC 3339.
/// These are interpreted as UTC.
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// One timestamped snapshot of sensor values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireReading")]
pub struct Reading {
    /// Instantaneous heart rate in beats per minute.
    #[serde(rename = "bpm")]
    pub heart_rate: f64,

    /// Rolling average heart rate, maintained upstream.
    #[serde(rename = "bpm_avg")]
    pub heart_rate_average: f64,

    /// Body temperature from the contact probe, in °C.
    #[serde(rename = "ds18b20_temp")]
    pub body_temperature: f64,

    /// Room temperature, in °C.
    #[serde(rename = "dht11_temp")]
    pub ambient_temperature: f64,

    /// Relative humidity, in percent.
    pub humidity: f64,

    /// Capture time according to the server clock.
    #[serde(rename = "timestamp")]
    pub captured_at: DateTime<Utc>,
}

/// Why a payload could not become a [`Reading`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidReading {
    #[error("field `{0}` is not a finite number")]
    NonFinite(&'static str),

    #[error("unparseable timestamp `{0}`")]
    Timestamp(String),
}

/// Raw shape of a reading as it appears on the wire, before validation.
#[derive(Debug, Deserialize)]
struct WireReading {
    bpm: f64,
    bpm_avg: f64,
    ds18b20_temp: f64,
    dht11_temp: f64,
    humidity: f64,
    timestamp: String,
}

impl TryFrom<WireReading> for Reading {
    type Error = InvalidReading;

    fn try_from(wire: WireReading) -> Result<Self, Self::Error> {
        let fields = [
            ("bpm", wire.bpm),
            ("bpm_avg", wire.bpm_avg),
            ("ds18b20_temp", wire.ds18b20_temp),
            ("dht11_temp", wire.dht11_temp),
            ("humidity", wire.humidity),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(InvalidReading::NonFinite(*name));
        }

        let captured_at = parse_timestamp(&wire.timestamp)
            .ok_or_else(|| InvalidReading::Timestamp(wire.timestamp.clone()))?;

        Ok(Reading {
            heart_rate: wire.bpm,
            heart_rate_average: wire.bpm_avg,
            body_temperature: wire.ds18b20_temp,
            ambient_temperature: wire.dht11_temp,
            humidity: wire.humidity,
            captured_at,
        })
    }
}

/// Parse a server timestamp.
///
/// Accepts RFC 3339 (`2024-05-01T10:00:00Z`, `2024-05-01T12:00:00+02:00`) and
/// ISO-8601 without an offset (`2024-05-01T10:00:00.250`, `2024-05-01 10:00:00`),
/// which is taken to be UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
pub(crate) fn sample(bpm: f64, timestamp: &str) -> Reading {
    Reading {
        heart_rate: bpm,
        heart_rate_average: bpm,
        body_temperature: 36.6,
        ambient_temperature: 22.0,
        humidity: 40.0,
        captured_at: parse_timestamp(timestamp).expect("valid test timestamp"),
    }
}
