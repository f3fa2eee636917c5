//! Clip Interval Models
//!
//! Clip intervals are inclusive ranges of segment indices. Rejections of a
//! proposed edit are plain values; nothing here mutates caller state.

use serde::{Deserialize, Serialize};
use specta::Type;
use thiserror::Error;

use crate::core::transcript::Segment;
use crate::core::{ClipId, TimeSec};

// =============================================================================
// Clip Interval
// =============================================================================

/// An inclusive range of segment indices designated as a clip
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct ClipInterval {
    /// Caller-assigned identifier (None for not-yet-persisted clips)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ClipId>,
    pub start_index: usize,
    pub end_index: usize,
}

impl ClipInterval {
    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            id: None,
            start_index,
            end_index,
        }
    }

    /// Sets the identifier
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Returns true if the segment index lies inside this clip
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index <= self.end_index
    }

    /// Number of segments covered
    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index) + 1
    }

    /// Always false; a clip covers at least one segment
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns true if both clips carry the same identifier
    pub fn same_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }
}

// =============================================================================
// Segment Time
// =============================================================================

/// Timing of one segment, as needed by the clip modules
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Type)]
pub struct SegmentTime {
    pub start: TimeSec,
    pub end: TimeSec,
}

impl SegmentTime {
    pub fn new(start: TimeSec, end: TimeSec) -> Self {
        Self { start, end }
    }

    /// Projects segments onto their timing
    pub fn from_segments(segments: &[Segment]) -> Vec<Self> {
        segments
            .iter()
            .map(|s| Self::new(s.start, s.end))
            .collect()
    }
}

// =============================================================================
// Clip Timing
// =============================================================================

/// A clip's time interval including silence padding
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct ClipTiming {
    /// Padding taken from the silence before the first segment
    pub pause_before: TimeSec,
    /// Padding taken from the silence after the last segment
    pub pause_after: TimeSec,
    pub starts_at: TimeSec,
    pub ends_at: TimeSec,
    pub duration: TimeSec,
}

// =============================================================================
// Rejections
// =============================================================================

/// Category of a rejected clip edit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub enum RejectionKind {
    OutOfBounds,
    Overlap,
    DurationExceeded,
    NotFound,
}

/// Why a proposed clip edit was not accepted
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ClipRejection {
    #[error("Segment range {start}~{end} is outside the {segment_count}-segment transcript")]
    OutOfBounds {
        start: i64,
        end: i64,
        segment_count: usize,
    },

    #[error(
        "Start segment {start} lies inside existing clip {from}~{to}",
        from = .existing.start_index,
        to = .existing.end_index
    )]
    Overlap { start: usize, existing: ClipInterval },

    #[error("Clip duration {duration:.2}s exceeds the {max:.0}s limit")]
    DurationExceeded { duration: TimeSec, max: TimeSec },

    #[error("Clip not found: {0}")]
    NotFound(ClipId),
}

impl ClipRejection {
    pub fn kind(&self) -> RejectionKind {
        match self {
            Self::OutOfBounds { .. } => RejectionKind::OutOfBounds,
            Self::Overlap { .. } => RejectionKind::Overlap,
            Self::DurationExceeded { .. } => RejectionKind::DurationExceeded,
            Self::NotFound(_) => RejectionKind::NotFound,
        }
    }

    /// Serializable `{kind, detail}` form for callers
    pub fn report(&self) -> Rejection {
        Rejection {
            kind: self.kind(),
            detail: self.to_string(),
        }
    }
}

/// A rejection as reported to callers
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    pub kind: RejectionKind,
    pub detail: String,
}

// =============================================================================
// Tests
// =============================================================================
