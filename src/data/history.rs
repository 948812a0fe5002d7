//! Historical readings for charting and listing.

use serde::Serialize;

use super::reading::Reading;

/// Reorder a newest-first history payload into ascending capture order.
///
/// This is an exact reversal: no filtering, no deduplication of equal
/// timestamps. Apply it exactly once per fetch, since a second application
/// restores the original order.
pub fn normalize(mut newest_first: Vec<Reading>) -> Vec<Reading> {
    newest_first.reverse();
    newest_first
}

/// Past readings in ascending capture order.
///
/// Only constructed from a normalized fetch result, so the order reflects
/// the backend's capture times rather than arrival times.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HistoryBuffer {
    readings: Vec<Reading>,
}

impl HistoryBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a buffer from a raw newest-first payload.
    pub fn from_newest_first(raw: Vec<Reading>) -> Self {
        Self {
            readings: normalize(raw),
        }
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.readings.iter()
    }

    pub fn as_slice(&self) -> &[Reading] {
        &self.readings
    }

    /// The most recently captured reading in the buffer.
    pub fn latest(&self) -> Option<&Reading> {
        self.readings.last()
    }

    /// Heart rate values in chart order (oldest first).
    pub fn heart_rate_series(&self) -> Vec<f64> {
        self.readings.iter().map(|r| r.heart_rate).collect()
    }
}
