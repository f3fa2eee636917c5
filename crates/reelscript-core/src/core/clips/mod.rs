//! Clip System Module
//!
//! Clips are inclusive ranges of transcript segments. This module validates
//! proposed clip edits, derives padded clip timing and precomputes highlight
//! windows. Callers own the clip list; every operation here is a pure
//! function of its inputs.
//!
//! # Example Usage
//!
//! ```rust
//! use reelscript_core::core::clips::{propose_create, ClipInterval, SegmentTime};
//! use reelscript_core::core::settings::ClipSettings;
//!
//! let times: Vec<SegmentTime> = (0..30)
//!     .map(|i| SegmentTime::new(i as f64 * 2.0, (i + 1) as f64 * 2.0))
//!     .collect();
//! let existing = vec![ClipInterval::new(10, 12).with_id("intro")];
//!
//! let clip = propose_create(30, &existing, 5, 15, &times, &ClipSettings::default()).unwrap();
//! assert_eq!((clip.start_index, clip.end_index), (5, 9));
//! ```

mod highlight;
mod models;
mod resolver;
mod timing;

pub use highlight::HighlightWindows;
pub use models::{
    ClipInterval, ClipRejection, ClipTiming, Rejection, RejectionKind, SegmentTime,
};
pub use resolver::{propose_create, propose_update, ClipResolver};
pub use timing::clip_timing;

use crate::core::settings::ClipSettings;
use crate::core::transcript::Transcript;

/// Padded timing of a clip over a transcript.
///
/// Uses the transcript's video duration (or its last segment end) for
/// padding after the final segment.
pub fn transcript_clip_timing(
    transcript: &Transcript,
    clip: &ClipInterval,
    settings: &ClipSettings,
) -> Option<ClipTiming> {
    let times = SegmentTime::from_segments(&transcript.segments);
    clip_timing(&times, clip, transcript.effective_duration(), settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::Segment;

    #[test]
    fn test_transcript_clip_timing_uses_video_duration() {
        let transcript = Transcript::with_segments(vec![
            Segment::new(0.0, 2.0, "one"),
            Segment::new(2.4, 5.0, "two"),
        ])
        .with_duration(5.3);

        let timing =
            transcript_clip_timing(&transcript, &ClipInterval::new(1, 1), &ClipSettings::default())
                .unwrap();
        assert!((timing.pause_before - 0.2).abs() < 1e-9);
        assert!((timing.pause_after - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_transcript_clip_timing_without_duration() {
        let transcript = Transcript::with_segments(vec![Segment::new(1.0, 4.0, "only")]);
        let timing =
            transcript_clip_timing(&transcript, &ClipInterval::new(0, 0), &ClipSettings::default())
                .unwrap();
        assert_eq!(timing.pause_after, 0.0);
        assert_eq!(timing.starts_at, 0.0);
    }
}
