//! Word Timestamp Resolver
//!
//! Flattens segments into a single word sequence in which every word has a
//! start and an end. Segments are expected to arrive in time order; the
//! resolver does not re-sort.

use tracing::{debug, trace};

use super::models::{ResolvedWord, Segment, WordSpan};
use crate::core::TimeSec;

/// Where a segment's word timing came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordSource {
    /// Per-word timing supplied by the recognizer (gaps filled from neighbors)
    Explicit,
    /// No word list; timing spread evenly across the segment
    Interpolated,
    /// Neither words nor text; contributes nothing
    Empty,
}

/// The words contributed by one segment, tagged with their source
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedSegment {
    pub source: WordSource,
    pub words: Vec<ResolvedWord>,
}

/// Resolves every segment into a flat, time-ordered word sequence.
pub fn resolve_words(segments: &[Segment]) -> Vec<ResolvedWord> {
    resolve_segments(segments)
        .into_iter()
        .flat_map(|segment| segment.words)
        .collect()
}

/// Resolves every segment, keeping the per-segment grouping and source tag.
pub fn resolve_segments(segments: &[Segment]) -> Vec<ResolvedSegment> {
    let mut last_end: Option<TimeSec> = None;
    let mut resolved = Vec::with_capacity(segments.len());

    for segment in segments {
        let entry = match segment.words.as_deref() {
            Some(words) if !words.is_empty() => ResolvedSegment {
                source: WordSource::Explicit,
                words: resolve_explicit(segment, words, &mut last_end),
            },
            _ if !segment.text.trim().is_empty() => {
                let words = interpolate(segment);
                if let Some(last) = words.last() {
                    last_end = Some(last.end);
                }
                ResolvedSegment {
                    source: WordSource::Interpolated,
                    words,
                }
            }
            _ => ResolvedSegment {
                source: WordSource::Empty,
                words: Vec::new(),
            },
        };
        resolved.push(entry);
    }

    debug!(
        segments = segments.len(),
        words = resolved.iter().map(|s| s.words.len()).sum::<usize>(),
        interpolated = resolved
            .iter()
            .filter(|s| s.source == WordSource::Interpolated)
            .count(),
        "Resolved transcript words"
    );

    resolved
}

fn resolve_explicit(
    segment: &Segment,
    words: &[WordSpan],
    last_end: &mut Option<TimeSec>,
) -> Vec<ResolvedWord> {
    let mut out = Vec::with_capacity(words.len());

    for (idx, span) in words.iter().enumerate() {
        let Some(text) = span.trimmed_text() else {
            trace!(index = idx, "Skipping word without text");
            continue;
        };

        let start = span.start.or(*last_end).unwrap_or(segment.start);
        let end = span
            .end
            .or_else(|| words.get(idx + 1).and_then(|next| next.start))
            .unwrap_or(segment.end);
        let end = end.max(start);

        *last_end = Some(end);
        out.push(ResolvedWord::new(text, start, end));
    }

    out
}

fn interpolate(segment: &Segment) -> Vec<ResolvedWord> {
    let tokens: Vec<&str> = segment.text.split_whitespace().collect();
    let count = tokens.len() as f64;
    let span = segment.end - segment.start;

    tokens
        .iter()
        .enumerate()
        .map(|(j, token)| {
            let start = segment.start + span * j as f64 / count;
            let end = segment.start + span * (j + 1) as f64 / count;
            ResolvedWord::new(token, start, end)
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
