//! Heart-rate alert evaluation.

use serde::Serialize;

use super::reading::Reading;

/// Lowest heart rate (bpm) still considered normal.
pub const HEART_RATE_LOW: f64 = 60.0;

/// Highest heart rate (bpm) still considered normal.
pub const HEART_RATE_HIGH: f64 = 100.0;

/// Alert verdict derived from the latest reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AlertState {
    Normal,
    Abnormal,
    /// No reading has arrived yet.
    #[default]
    Unknown,
}

impl AlertState {
    /// Returns a short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            AlertState::Normal => "NORMAL",
            AlertState::Abnormal => "ABNORMAL",
            AlertState::Unknown => "UNKNOWN",
        }
    }

    pub fn is_abnormal(&self) -> bool {
        matches!(self, AlertState::Abnormal)
    }
}

/// Evaluate the alert for the latest reading, if any.
///
/// Each call is independent of earlier verdicts.
pub fn evaluate(reading: Option<&Reading>) -> AlertState {
    reading.map_or(AlertState::Unknown, |r| evaluate_heart_rate(r.heart_rate))
}

/// Classify a heart rate. Both bounds are inclusive on the normal side.
pub fn evaluate_heart_rate(bpm: f64) -> AlertState {
    if (HEART_RATE_LOW..=HEART_RATE_HIGH).contains(&bpm) {
        AlertState::Normal
    } else {
        AlertState::Abnormal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::reading::sample;

    #[test]
    fn test_absent_reading_is_unknown() {
        assert_eq!(evaluate(None), AlertState::Unknown);
        assert_eq!(AlertState::default(), AlertState::Unknown);
    }

    #[test]
    fn test_normal_and_abnormal_readings() {
        let normal = sample(75.0, "2024-05-01T10:00:00Z");
        assert_eq!(evaluate(Some(&normal)), AlertState::Normal);

        let slow = sample(45.0, "2024-05-01T10:00:00Z");
        assert_eq!(evaluate(Some(&slow)), AlertState::Abnormal);

        let fast = sample(130.0, "2024-05-01T10:00:00Z");
        assert_eq!(evaluate(Some(&fast)), AlertState::Abnormal);
    }

    #[test]
    fn test_boundaries_are_normal() {
        assert_eq!(evaluate_heart_rate(60.0), AlertState::Normal);
        assert_eq!(evaluate_heart_rate(100.0), AlertState::Normal);
        assert_eq!(evaluate_heart_rate(59.9), AlertState::Abnormal);
        assert_eq!(evaluate_heart_rate(100.1), AlertState::Abnormal);
    }

    #[test]
    fn test_sweep_matches_band() {
        for bpm in 0..=250 {
            let bpm = bpm as f64;
            let expected_abnormal = bpm < 60.0 || bpm > 100.0;
            assert_eq!(evaluate_heart_rate(bpm).is_abnormal(), expected_abnormal, "bpm {bpm}");
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(AlertState::Normal.label(), "NORMAL");
        assert_eq!(AlertState::Abnormal.label(), "ABNORMAL");
        assert_eq!(AlertState::Unknown.label(), "UNKNOWN");
    }
}
