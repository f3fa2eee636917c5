//! ReelScript Core Type Definitions
//!
//! Defines fundamental types used throughout the project.
//! All types are exported to TypeScript via specta.

use serde::{Deserialize, Serialize};
use specta::Type;
use tracing::warn;

// =============================================================================
// ID Types
// =============================================================================

/// Clip unique identifier (assigned by the caller's storage layer)
pub type ClipId = String;

// =============================================================================
// Time Types
// =============================================================================

/// Time in seconds (floating point)
pub type TimeSec = f64;

/// Returns true if the value is a usable timestamp (finite and non-negative)
pub fn is_valid_time_sec(value: TimeSec) -> bool {
    value.is_finite() && value >= 0.0
}

// =============================================================================
// Time Range
// =============================================================================

/// Time range
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start_sec: TimeSec,
    pub end_sec: TimeSec,
}

impl TimeRange {
    pub fn new(start_sec: TimeSec, end_sec: TimeSec) -> Self {
        if start_sec > end_sec {
            warn!(
                "TimeRange created with start > end ({} > {}), swapping",
                start_sec, end_sec
            );
            return Self {
                start_sec: end_sec,
                end_sec: start_sec,
            };
        }
        Self { start_sec, end_sec }
    }

    /// Creates a range from a start time and a duration
    pub fn with_duration(start_sec: TimeSec, duration_sec: TimeSec) -> Self {
        Self::new(start_sec, start_sec + duration_sec.max(0.0))
    }

    /// Returns duration in seconds
    pub fn duration(&self) -> TimeSec {
        self.end_sec - self.start_sec
    }

    /// Checks if a given time is within range
    pub fn contains(&self, time: TimeSec) -> bool {
        time >= self.start_sec && time <= self.end_sec
    }

    /// Checks if a span `[start, end]` overlaps this range
    pub fn overlaps_span(&self, start: TimeSec, end: TimeSec) -> bool {
        start < self.end_sec && end > self.start_sec
    }

    /// Maps an absolute timestamp into this range's local timeline.
    ///
    /// The result is offset by the range start and clamped into `[0, duration]`.
    pub fn to_local(&self, time: TimeSec) -> TimeSec {
        let local = time - self.start_sec;
        if !local.is_finite() {
            return 0.0;
        }
        local.clamp(0.0, self.duration().max(0.0))
    }
}

// =============================================================================
// Tests
// =============================================================================
