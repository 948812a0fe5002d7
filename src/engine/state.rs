//! The engine's view of the world: latest reading, history and alert.

use serde::Serialize;

use crate::data::{evaluate, AlertState, HistoryBuffer, Reading};
use crate::error::TelemetryError;

/// Outcome of the one-shot history fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum HistoryStatus {
    /// Fetch not yet completed.
    #[default]
    Pending,
    Loaded,
    /// Fetch failed; history stays empty for the rest of the session.
    Failed,
}

/// State owned by the polling engine.
///
/// Only the engine task mutates it. Everyone else sees clones published
/// through the engine's watch channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EngineState {
    /// Latest known-good reading, absent until the first successful poll.
    pub current: Option<Reading>,
    /// Past readings, oldest first.
    pub history: HistoryBuffer,
    /// Verdict for `current`.
    pub alert: AlertState,
    /// Whether the most recent current-reading poll failed.
    pub last_fetch_failed: bool,
    pub history_status: HistoryStatus,
}

impl EngineState {
    /// State at session start: no reading, empty history, alert unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when a reading is on display but the latest poll failed.
    pub fn is_stale(&self) -> bool {
        self.last_fetch_failed && self.current.is_some()
    }

    /// Apply the outcome of a current-reading poll.
    ///
    /// A failure only raises `last_fetch_failed`; the previous reading and
    /// alert stay as they were. Returns whether anything changed.
    pub(crate) fn apply_current(&mut self, result: Result<Reading, TelemetryError>) -> bool {
        match result {
            Ok(reading) => {
                let changed = self.last_fetch_failed || self.current.as_ref() != Some(&reading);
                self.current = Some(reading);
                self.alert = evaluate(self.current.as_ref());
                self.last_fetch_failed = false;
                changed
            }
            Err(_) => {
                let changed = !self.last_fetch_failed;
                self.last_fetch_failed = true;
                changed
            }
        }
    }

    /// Apply the outcome of the history fetch. Returns whether anything changed.
    pub(crate) fn apply_history(&mut self, result: Result<Vec<Reading>, TelemetryError>) -> bool {
        match result {
            Ok(raw) => {
                self.history = HistoryBuffer::from_newest_first(raw);
                self.history_status = HistoryStatus::Loaded;
            }
            Err(_) => {
                self.history = HistoryBuffer::new();
                self.history_status = HistoryStatus::Failed;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::reading::sample;

    fn transport_error() -> TelemetryError {
        TelemetryError::Transport("connection refused".to_string())
    }

    #[test]
    fn test_initial_state() {
        let state = EngineState::new();
        assert!(state.current.is_none());
        assert!(state.history.is_empty());
        assert_eq!(state.alert, AlertState::Unknown);
        assert!(!state.last_fetch_failed);
        assert_eq!(state.history_status, HistoryStatus::Pending);
        assert!(!state.is_stale());
    }

    #[test]
    fn test_apply_current_success() {
        let mut state = EngineState::new();

        assert!(state.apply_current(Ok(sample(75.0, "2024-05-01T10:00:00Z"))));
        assert_eq!(state.alert, AlertState::Normal);
        assert_eq!(state.current.as_ref().map(|r| r.heart_rate), Some(75.0));

        assert!(state.apply_current(Ok(sample(45.0, "2024-05-01T10:00:05Z"))));
        assert_eq!(state.alert, AlertState::Abnormal);

        // Same reading again is not a change.
        assert!(!state.apply_current(Ok(sample(45.0, "2024-05-01T10:00:05Z"))));
    }

    #[test]
    fn test_failure_keeps_last_good_reading() {
        let mut state = EngineState::new();
        let r1 = sample(75.0, "2024-05-01T10:00:00Z");
        state.apply_current(Ok(r1.clone()));

        assert!(state.apply_current(Err(transport_error())));
        assert_eq!(state.current, Some(r1.clone()));
        assert_eq!(state.alert, AlertState::Normal);
        assert!(state.last_fetch_failed);
        assert!(state.is_stale());

        // A second failure changes nothing.
        assert!(!state.apply_current(Err(TelemetryError::MalformedPayload("{}".to_string()))));
        assert_eq!(state.current, Some(r1));

        // Recovery clears the flag.
        assert!(state.apply_current(Ok(sample(80.0, "2024-05-01T10:00:10Z"))));
        assert!(!state.last_fetch_failed);
    }

    #[test]
    fn test_failure_before_any_reading() {
        let mut state = EngineState::new();
        state.apply_current(Err(transport_error()));

        assert!(state.current.is_none());
        assert_eq!(state.alert, AlertState::Unknown);
        assert!(state.last_fetch_failed);
        assert!(!state.is_stale());
    }

    #[test]
    fn test_apply_history() {
        let mut state = EngineState::new();
        state.apply_history(Ok(vec![
            sample(70.0, "2024-05-01T10:00:10Z"),
            sample(72.0, "2024-05-01T10:00:05Z"),
        ]));

        assert_eq!(state.history_status, HistoryStatus::Loaded);
        assert_eq!(state.history.heart_rate_series(), vec![72.0, 70.0]);
        // History never feeds the alert.
        assert_eq!(state.alert, AlertState::Unknown);
    }

    #[test]
    fn test_apply_history_failure() {
        let mut state = EngineState::new();
        state.apply_history(Err(transport_error()));

        assert_eq!(state.history_status, HistoryStatus::Failed);
        assert!(state.history.is_empty());
        assert!(!state.last_fetch_failed);
    }

    #[test]
    fn test_serialize_state() {
        let mut state = EngineState::new();
        state.apply_current(Ok(sample(75.0, "2024-05-01T10:00:00Z")));

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["current"]["bpm"], 75.0);
        assert_eq!(value["alert"], "Normal");
        assert_eq!(value["last_fetch_failed"], false);
        assert_eq!(value["history_status"], "Pending");
        assert!(value["history"].as_array().unwrap().is_empty());
    }
}
