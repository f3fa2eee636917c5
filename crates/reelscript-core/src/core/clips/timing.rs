//! Clip timing with silence padding.
//!
//! A clip borrows up to half of the silence on each side of it, capped at
//! `max_pause_sec`, so that cuts do not land right on a spoken word.

use super::models::{ClipInterval, ClipTiming, SegmentTime};
use crate::core::settings::ClipSettings;
use crate::core::TimeSec;

/// Derives the padded time interval of a clip.
///
/// `video_duration` bounds the padding after the final segment. Returns `None`
/// when the clip's indices fall outside `segment_times`.
pub fn clip_timing(
    segment_times: &[SegmentTime],
    clip: &ClipInterval,
    video_duration: TimeSec,
    settings: &ClipSettings,
) -> Option<ClipTiming> {
    let (first_index, last_index) = if clip.start_index <= clip.end_index {
        (clip.start_index, clip.end_index)
    } else {
        (clip.end_index, clip.start_index)
    };
    let first = segment_times.get(first_index)?;
    let last = segment_times.get(last_index)?;
    let max_pause = settings.max_pause_sec;

    let pause_before = match first_index.checked_sub(1) {
        Some(prev) => half_gap(segment_times[prev].end, first.start),
        None => non_negative(first.start),
    }
    .min(max_pause);

    let pause_after = match segment_times.get(last_index + 1) {
        Some(next) => half_gap(last.end, next.start),
        None => non_negative(video_duration - last.end),
    }
    .min(max_pause);

    let starts_at = first.start - pause_before;
    let ends_at = last.end + pause_after;

    Some(ClipTiming {
        pause_before,
        pause_after,
        starts_at,
        ends_at,
        duration: ends_at - starts_at,
    })
}

fn half_gap(from: TimeSec, to: TimeSec) -> TimeSec {
    non_negative(to - from) / 2.0
}

fn non_negative(value: TimeSec) -> TimeSec {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
