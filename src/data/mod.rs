//! Data models and pure transformations over sensor readings.
//!
//! ## Submodules
//!
//! - [`reading`]: The validated [`Reading`] type and its wire format
//! - [`history`]: Newest-first to ascending reordering ([`normalize`]) and [`HistoryBuffer`]
//! - [`alert`]: Heart-rate band check producing an [`AlertState`]
//!
//! ## Data Flow
//!
//! ```text
//! GET /sensor/data ──▶ Reading ──▶ alert::evaluate() ──▶ AlertState
//!
//! GET /sensor/history ──▶ Vec<Reading> (newest first)
//!        │
//!        ▼
//! history::normalize() ──▶ HistoryBuffer (oldest first)
//! ```

pub mod alert;
pub mod history;
pub mod reading;

pub use alert::{evaluate, evaluate_heart_rate, AlertState, HEART_RATE_HIGH, HEART_RATE_LOW};
pub use history::{normalize, HistoryBuffer};
pub use reading::{parse_timestamp, InvalidReading, Reading};
