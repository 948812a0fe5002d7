//! # vitalwatch
//!
//! Live telemetry synchronization for a health-sensor dashboard.
//!
//! The crate polls a remote sensor service for the latest reading (heart
//! rate, body and ambient temperature, humidity), loads its history once,
//! derives a heart-rate alert, and publishes a consistent snapshot of all of
//! it for a presentation layer to render. It can also push Wi-Fi credentials
//! to the device.
//!
//! ## Architecture
//!
//! ```text
//!  ┌────────┐   fetch   ┌──────────┐  publish   ┌─────────────────────┐
//!  │ client │──────────▶│  engine  │───────────▶│ watch::Receiver     │──▶ UI
//!  │ (HTTP) │           │ (polling)│            │ <EngineState>       │
//!  └───┬────┘           └────┬─────┘            └─────────────────────┘
//!      │                     │ normalize / evaluate
//!      │                     ▼
//!      │                ┌──────────┐
//!      │                │   data   │
//!      │                └──────────┘
//!      │ submit
//!  ┌───┴───────┐
//!  │ configure │──▶ "configured" | "failed"
//!  └───────────┘
//! ```
//!
//! - **[`client`]**: The [`SensorApi`] trait and its reqwest implementation
//! - **[`data`]**: [`Reading`] validation, history ordering and alert evaluation
//! - **[`engine`]**: The [`PollingEngine`] task that owns [`EngineState`]
//! - **[`configure`]**: Single-shot Wi-Fi configuration via [`ConfigDispatcher`]
//! - **[`settings`]**: Layered runtime [`Settings`]
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use vitalwatch::{ConfigDispatcher, HttpSensorClient, PollingEngine};
//!
//! # tokio_test::block_on(async {
//! let client = Arc::new(HttpSensorClient::new("http://localhost:5000").unwrap());
//!
//! let handle = PollingEngine::new(client.clone()).start();
//! let state = handle.wait_for(|s| s.current.is_some()).await;
//! println!("alert: {}", state.alert.label());
//!
//! let outcome = ConfigDispatcher::new(client).configure("home", "secret").await;
//! println!("{}", outcome);
//!
//! handle.shutdown().await;
//! # });
//! ```

pub mod client;
pub mod configure;
pub mod data;
pub mod engine;
pub mod error;
pub mod settings;

pub use client::{HttpSensorClient, SensorApi, DEFAULT_BASE_URL};
pub use configure::{ConfigDispatcher, ConfigOutcome};
pub use data::{normalize, AlertState, HistoryBuffer, Reading};
pub use engine::{EngineHandle, EngineState, HistoryStatus, PollingEngine, POLL_INTERVAL};
pub use error::TelemetryError;
pub use settings::Settings;
