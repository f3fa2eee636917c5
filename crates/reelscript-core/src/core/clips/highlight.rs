//! Highlight Window Precomputer
//!
//! For every segment, finds how far a highlight starting there may extend
//! without exceeding the window limit or ending in the middle of a clip.

use tracing::trace;

use super::models::{ClipInterval, SegmentTime};
use crate::core::settings::HighlightSettings;

/// Precomputed highlight window ends, one per segment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightWindows {
    ends: Vec<usize>,
    /// Index into the clip list for each segment covered by a clip
    clip_of: Vec<Option<usize>>,
}

impl HighlightWindows {
    /// Computes window ends for every segment.
    ///
    /// Scans from the last segment backwards. Each position starts from the
    /// answer of the position after it and only moves left, so the whole
    /// pass is amortized linear for time-ordered segments.
    pub fn compute(
        segment_times: &[SegmentTime],
        clips: &[ClipInterval],
        settings: &HighlightSettings,
    ) -> Self {
        let count = segment_times.len();
        let mut clip_of = vec![None; count];
        for (clip_index, clip) in clips.iter().enumerate() {
            let last = clip.end_index.min(count.saturating_sub(1));
            for slot in clip_of.iter_mut().take(last + 1).skip(clip.start_index) {
                *slot = Some(clip_index);
            }
        }

        let mut windows = Self {
            ends: vec![0; count],
            clip_of,
        };

        let max_window = settings.max_window_sec;
        let mut candidate = count.saturating_sub(1);
        for i in (0..count).rev() {
            candidate = candidate.max(i);
            while candidate > i
                && (segment_times[candidate].end - segment_times[i].start > max_window
                    || windows.gap_in_clip(candidate, candidate + 1))
            {
                candidate -= 1;
            }
            windows.ends[i] = candidate;
        }

        trace!(segments = count, clips = clips.len(), "Computed highlight windows");
        windows
    }

    /// Window end for every segment
    pub fn ends(&self) -> &[usize] {
        &self.ends
    }

    pub fn end_for(&self, index: usize) -> Option<usize> {
        self.ends.get(index).copied()
    }

    /// Returns true if the segment belongs to any clip
    pub fn in_clip(&self, index: usize) -> bool {
        matches!(self.clip_of.get(index), Some(Some(_)))
    }

    /// Returns true if the boundary between `prev` and `next` lies inside one clip.
    pub fn gap_in_clip(&self, prev: usize, next: usize) -> bool {
        match (self.clip_of.get(prev), self.clip_of.get(next)) {
            (Some(Some(a)), Some(Some(b))) => a == b,
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
