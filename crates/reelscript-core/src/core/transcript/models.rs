//! Transcript Data Models
//!
//! Segments and word spans as produced by the external recognizer, plus the
//! resolved word shape every downstream component works with.

use serde::{Deserialize, Serialize};
use specta::Type;

use crate::core::{is_valid_time_sec, CoreError, CoreResult, TimeRange, TimeSec};

// =============================================================================
// Transcript
// =============================================================================

/// Complete transcript of one source video
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    /// Recognized segments in time order
    #[serde(default)]
    pub segments: Vec<Segment>,
    /// Source video length in seconds, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<TimeSec>,
}

impl Transcript {
    /// Creates a transcript from segments
    pub fn with_segments(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            duration: None,
        }
    }

    /// Parses a transcript from JSON and validates segment bounds.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let transcript: Self = serde_json::from_str(json)?;
        transcript.validate()?;
        Ok(transcript)
    }

    /// Checks that every segment has usable, ordered bounds.
    pub fn validate(&self) -> CoreResult<()> {
        for (index, segment) in self.segments.iter().enumerate() {
            if !is_valid_time_sec(segment.start) || !is_valid_time_sec(segment.end) {
                return Err(CoreError::ValidationError(format!(
                    "Segment {} has invalid bounds {}~{}",
                    index, segment.start, segment.end
                )));
            }
            if segment.end < segment.start {
                return Err(CoreError::ValidationError(format!(
                    "Segment {} ends before it starts ({} < {})",
                    index, segment.end, segment.start
                )));
            }
        }
        Ok(())
    }

    /// Sets the source video duration
    pub fn with_duration(mut self, duration: TimeSec) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Returns the source duration, falling back to the last segment end
    pub fn effective_duration(&self) -> TimeSec {
        self.duration
            .filter(|d| d.is_finite())
            .unwrap_or_else(|| self.segments.last().map(|s| s.end).unwrap_or(0.0))
    }

    /// Returns the time span covered by segments `[first, last]` (inclusive).
    pub fn span(&self, first: usize, last: usize) -> Option<TimeRange> {
        let start = self.segments.get(first)?.start;
        let end = self.segments.get(last)?.end;
        Some(TimeRange::new(start, end))
    }

    /// Returns the number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the transcript has no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

// =============================================================================
// Segment
// =============================================================================

/// One recognized utterance
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Start time in seconds
    pub start: TimeSec,
    /// End time in seconds
    pub end: TimeSec,
    /// Recognized text
    #[serde(default)]
    pub text: String,
    /// Optional per-word timing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<WordSpan>>,
}

impl Segment {
    /// Creates a segment without word timing
    pub fn new(start: TimeSec, end: TimeSec, text: &str) -> Self {
        Self {
            start,
            end,
            text: text.to_string(),
            words: None,
        }
    }

    /// Attaches per-word timing
    pub fn with_words(mut self, words: Vec<WordSpan>) -> Self {
        self.words = Some(words);
        self
    }

    /// Returns the duration of this segment in seconds
    pub fn duration(&self) -> TimeSec {
        self.end - self.start
    }
}

// =============================================================================
// Word Span
// =============================================================================

/// A single recognized word; timing may be partially or fully missing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct WordSpan {
    /// Word text, possibly padded with whitespace
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<TimeSec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<TimeSec>,
    /// Recognition confidence (0.0 - 1.0)
    #[serde(default, alias = "probability", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl WordSpan {
    /// Creates a word with full timing
    pub fn timed(word: &str, start: TimeSec, end: TimeSec) -> Self {
        Self {
            word: Some(word.to_string()),
            start: Some(start),
            end: Some(end),
            confidence: None,
        }
    }

    /// Creates a word with no timing at all
    pub fn untimed(word: &str) -> Self {
        Self {
            word: Some(word.to_string()),
            start: None,
            end: None,
            confidence: None,
        }
    }

    /// Returns the trimmed text, or None for missing or blank words
    pub fn trimmed_text(&self) -> Option<&str> {
        self.word
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

// =============================================================================
// Resolved Word
// =============================================================================

/// A word with guaranteed timing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedWord {
    pub word: String,
    pub start: TimeSec,
    pub end: TimeSec,
}

impl ResolvedWord {
    pub fn new(word: &str, start: TimeSec, end: TimeSec) -> Self {
        Self {
            word: word.to_string(),
            start,
            end,
        }
    }

    /// Returns the duration of this word in seconds
    pub fn duration(&self) -> TimeSec {
        self.end - self.start
    }
}

// =============================================================================
// Tests
// =============================================================================
