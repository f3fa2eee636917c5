//! Clip Interval Resolver
//!
//! Validates a proposed clip (new or edited) against the transcript bounds,
//! the other clips and the duration limit, truncating its end where it would
//! run into the next clip.
//!
//! Resolution order:
//! 1. reversed ranges are swapped
//! 2. bounds check
//! 3. the start may not land inside another clip
//! 4. the end is cut back to just before the next clip's start
//! 5. wall-clock duration check
//!
//! A rejection is only a report; callers keep their stored interval as is.

use tracing::debug;

use super::models::{ClipInterval, ClipRejection, SegmentTime};
use crate::core::settings::ClipSettings;

/// Validation context for clip edits over one transcript
#[derive(Clone, Debug)]
pub struct ClipResolver<'a> {
    segment_count: usize,
    existing: &'a [ClipInterval],
    segment_times: &'a [SegmentTime],
    settings: ClipSettings,
}

impl<'a> ClipResolver<'a> {
    pub fn new(
        segment_count: usize,
        existing: &'a [ClipInterval],
        segment_times: &'a [SegmentTime],
    ) -> Self {
        Self {
            segment_count,
            existing,
            segment_times,
            settings: ClipSettings::default(),
        }
    }

    /// Uses custom clip settings
    pub fn with_settings(mut self, settings: ClipSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Validates a new clip over segments `start..=end`.
    pub fn propose_create(&self, start: i64, end: i64) -> Result<ClipInterval, ClipRejection> {
        let (start_index, end_index) = self.resolve(None, start, end)?;
        Ok(ClipInterval::new(start_index, end_index))
    }

    /// Validates new boundaries for the existing clip `clip_id`.
    ///
    /// The clip itself is ignored when checking overlap and truncation. Only
    /// the boundaries change; other caller-side fields are the caller's concern.
    pub fn propose_update(
        &self,
        clip_id: &str,
        start: i64,
        end: i64,
    ) -> Result<ClipInterval, ClipRejection> {
        if !self.existing.iter().any(|c| c.same_id(clip_id)) {
            debug!(clip_id, "Rejected clip update: unknown clip");
            return Err(ClipRejection::NotFound(clip_id.to_string()));
        }
        let (start_index, end_index) = self.resolve(Some(clip_id), start, end)?;
        Ok(ClipInterval::new(start_index, end_index).with_id(clip_id))
    }

    fn others(&self, exclude: Option<&str>) -> Vec<&'a ClipInterval> {
        self.existing
            .iter()
            .filter(|clip| !exclude.is_some_and(|id| clip.same_id(id)))
            .collect()
    }

    fn resolve(
        &self,
        exclude: Option<&str>,
        start: i64,
        end: i64,
    ) -> Result<(usize, usize), ClipRejection> {
        let (start, end) = if start > end { (end, start) } else { (start, end) };

        let available = self.segment_count.min(self.segment_times.len());
        let (start_index, mut end_index) = match (usize::try_from(start), usize::try_from(end)) {
            (Ok(s), Ok(e)) if e < available => (s, e),
            _ => {
                let rejection = ClipRejection::OutOfBounds {
                    start,
                    end,
                    segment_count: self.segment_count,
                };
                debug!(%rejection, "Rejected clip proposal");
                return Err(rejection);
            }
        };

        let others = self.others(exclude);

        if let Some(existing) = others.iter().find(|clip| clip.contains(start_index)) {
            let rejection = ClipRejection::Overlap {
                start: start_index,
                existing: (*existing).clone(),
            };
            debug!(%rejection, "Rejected clip proposal");
            return Err(rejection);
        }

        let next_start = others
            .iter()
            .map(|clip| clip.start_index)
            .filter(|&s| s > start_index)
            .min();
        if let Some(next_start) = next_start {
            if end_index >= next_start {
                debug!(
                    from = end_index,
                    to = next_start - 1,
                    "Truncating clip end before next clip"
                );
                end_index = next_start - 1;
            }
        }

        let duration = self.segment_times[end_index].end - self.segment_times[start_index].start;
        if !duration.is_finite() || duration > self.settings.max_duration_sec {
            let rejection = ClipRejection::DurationExceeded {
                duration,
                max: self.settings.max_duration_sec,
            };
            debug!(%rejection, "Rejected clip proposal");
            return Err(rejection);
        }

        Ok((start_index, end_index))
    }
}

/// Validates a new clip. See [`ClipResolver::propose_create`].
pub fn propose_create(
    segment_count: usize,
    existing: &[ClipInterval],
    start: i64,
    end: i64,
    segment_times: &[SegmentTime],
    settings: &ClipSettings,
) -> Result<ClipInterval, ClipRejection> {
    ClipResolver::new(segment_count, existing, segment_times)
        .with_settings(settings.clone())
        .propose_create(start, end)
}

/// Validates an edit of an existing clip. See [`ClipResolver::propose_update`].
pub fn propose_update(
    segment_count: usize,
    existing: &[ClipInterval],
    clip_id: &str,
    start: i64,
    end: i64,
    segment_times: &[SegmentTime],
    settings: &ClipSettings,
) -> Result<ClipInterval, ClipRejection> {
    ClipResolver::new(segment_count, existing, segment_times)
        .with_settings(settings.clone())
        .propose_update(clip_id, start, end)
}

// =============================================================================
// Tests
// =============================================================================
