//! Engine Settings
//!
//! Named heuristic constants for phrasing, clip limits and highlight windows.
//!
//! Settings are a versioned JSON document with defaults for every field.
//! Parsing never reads from disk; callers hand over the JSON text.
//! Out-of-range values are corrected by [`EngineSettings::normalize`] instead of
//! rejected, so stale or hand-edited configs keep working.

use serde::{Deserialize, Serialize};
use specta::Type;
use tracing::debug;

use crate::core::{CoreError, CoreResult};

/// Settings schema version for migration support
pub const SETTINGS_VERSION: u32 = 1;

/// Hard cap on words per adaptive phrase
pub const DEFAULT_MAX_WORDS: usize = 10;

/// Soft target of words per adaptive phrase
pub const DEFAULT_TARGET_WORDS: usize = 6;

/// Minimum phrase length before a comma/semicolon/colon may end it
pub const DEFAULT_MIN_WORDS_FOR_COMMA_BREAK: usize = 3;

/// Inter-word silence (seconds) that closes an adaptive phrase
pub const DEFAULT_SILENCE_THRESHOLD_SEC: f64 = 0.7;

/// Words per fixed-size chunk
pub const DEFAULT_GROUP_SIZE: usize = 4;

/// Longest clip (seconds) the interval resolver accepts
pub const DEFAULT_MAX_CLIP_DURATION_SEC: f64 = 90.0;

/// Upper bound on the silence padding added on each side of a clip
pub const DEFAULT_MAX_PAUSE_SEC: f64 = 1.0;

/// Longest span (seconds) a highlight window may cover
pub const DEFAULT_MAX_WINDOW_SEC: f64 = 60.0;

/// Engine settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Type)]
#[serde(rename_all = "camelCase")]
pub struct EngineSettings {
    /// Schema version for migrations
    #[serde(default = "default_version")]
    pub version: u32,

    /// Phrase segmentation settings
    #[serde(default)]
    pub phrases: PhraseSettings,

    /// Clip interval settings
    #[serde(default)]
    pub clips: ClipSettings,

    /// Highlight window settings
    #[serde(default)]
    pub highlight: HighlightSettings,
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            phrases: PhraseSettings::default(),
            clips: ClipSettings::default(),
            highlight: HighlightSettings::default(),
        }
    }
}

impl EngineSettings {
    /// Parses settings JSON and normalizes the result.
    ///
    /// Missing fields take their defaults and unknown fields are ignored.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let mut settings: Self = serde_json::from_str(json)
            .map_err(|e| CoreError::InvalidSettings(e.to_string()))?;
        settings.normalize();
        debug!(version = settings.version, "Loaded engine settings");
        Ok(settings)
    }

    /// Normalizes and clamps settings so the engine always sees valid values.
    pub fn normalize(&mut self) {
        self.version = SETTINGS_VERSION;
        self.phrases.normalize();
        self.clips.normalize();
        self.highlight.normalize();
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

fn non_negative_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        fallback
    }
}

/// Phrase segmentation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Type)]
#[serde(rename_all = "camelCase")]
pub struct PhraseSettings {
    /// Hard cap on words per phrase
    #[serde(default = "default_max_words")]
    pub max_words: usize,

    /// Soft target of words per phrase
    #[serde(default = "default_target_words")]
    pub target_words: usize,

    /// Words required before a comma-like mark may close a phrase
    #[serde(default = "default_min_words_for_comma_break")]
    pub min_words_for_comma_break: usize,

    /// Silence between words (seconds) that closes a phrase
    #[serde(default = "default_silence_threshold_sec")]
    pub silence_threshold_sec: f64,

    /// Chunk size for the fixed-chunk segmenter
    #[serde(default = "default_group_size")]
    pub fixed_group_size: usize,
}

impl Default for PhraseSettings {
    fn default() -> Self {
        Self {
            max_words: DEFAULT_MAX_WORDS,
            target_words: DEFAULT_TARGET_WORDS,
            min_words_for_comma_break: DEFAULT_MIN_WORDS_FOR_COMMA_BREAK,
            silence_threshold_sec: DEFAULT_SILENCE_THRESHOLD_SEC,
            fixed_group_size: DEFAULT_GROUP_SIZE,
        }
    }
}

impl PhraseSettings {
    pub fn normalize(&mut self) {
        self.max_words = self.max_words.clamp(1, 100);
        self.target_words = self.target_words.clamp(1, self.max_words);
        self.min_words_for_comma_break = self.min_words_for_comma_break.clamp(1, self.max_words);
        self.silence_threshold_sec =
            non_negative_or(self.silence_threshold_sec, DEFAULT_SILENCE_THRESHOLD_SEC);
        self.fixed_group_size = self.fixed_group_size.clamp(1, 50);
    }
}

fn default_max_words() -> usize {
    DEFAULT_MAX_WORDS
}

fn default_target_words() -> usize {
    DEFAULT_TARGET_WORDS
}

fn default_min_words_for_comma_break() -> usize {
    DEFAULT_MIN_WORDS_FOR_COMMA_BREAK
}

fn default_silence_threshold_sec() -> f64 {
    DEFAULT_SILENCE_THRESHOLD_SEC
}

fn default_group_size() -> usize {
    DEFAULT_GROUP_SIZE
}

/// Clip interval settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Type)]
#[serde(rename_all = "camelCase")]
pub struct ClipSettings {
    /// Longest accepted clip, measured from first segment start to last segment end
    #[serde(default = "default_max_clip_duration_sec")]
    pub max_duration_sec: f64,

    /// Upper bound on pause padding on either side of a clip
    #[serde(default = "default_max_pause_sec")]
    pub max_pause_sec: f64,
}

impl Default for ClipSettings {
    fn default() -> Self {
        Self {
            max_duration_sec: DEFAULT_MAX_CLIP_DURATION_SEC,
            max_pause_sec: DEFAULT_MAX_PAUSE_SEC,
        }
    }
}

impl ClipSettings {
    pub fn normalize(&mut self) {
        self.max_duration_sec = positive_or(self.max_duration_sec, DEFAULT_MAX_CLIP_DURATION_SEC);
        self.max_pause_sec = non_negative_or(self.max_pause_sec, DEFAULT_MAX_PAUSE_SEC);
    }
}

fn default_max_clip_duration_sec() -> f64 {
    DEFAULT_MAX_CLIP_DURATION_SEC
}

fn default_max_pause_sec() -> f64 {
    DEFAULT_MAX_PAUSE_SEC
}

/// Highlight window settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Type)]
#[serde(rename_all = "camelCase")]
pub struct HighlightSettings {
    /// Longest span a highlight window may cover
    #[serde(default = "default_max_window_sec")]
    pub max_window_sec: f64,
}

impl Default for HighlightSettings {
    fn default() -> Self {
        Self {
            max_window_sec: DEFAULT_MAX_WINDOW_SEC,
        }
    }
}

impl HighlightSettings {
    pub fn normalize(&mut self) {
        self.max_window_sec = positive_or(self.max_window_sec, DEFAULT_MAX_WINDOW_SEC);
    }
}

fn default_max_window_sec() -> f64 {
    DEFAULT_MAX_WINDOW_SEC
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = EngineSettings::default();
        assert_eq!(settings.version, SETTINGS_VERSION);
        assert_eq!(settings.phrases.max_words, 10);
        assert_eq!(settings.phrases.target_words, 6);
        assert_eq!(settings.phrases.min_words_for_comma_break, 3);
        assert_eq!(settings.phrases.silence_threshold_sec, 0.7);
        assert_eq!(settings.phrases.fixed_group_size, 4);
        assert_eq!(settings.clips.max_duration_sec, 90.0);
        assert_eq!(settings.clips.max_pause_sec, 1.0);
        assert_eq!(settings.highlight.max_window_sec, 60.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings =
            EngineSettings::from_json_str(r#"{ "phrases": { "targetWords": 4 } }"#).unwrap();
        assert_eq!(settings.phrases.target_words, 4);
        assert_eq!(settings.phrases.max_words, 10);
        assert_eq!(settings.clips, ClipSettings::default());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let settings =
            EngineSettings::from_json_str(r#"{ "theme": "dark", "clips": { "foo": 1 } }"#)
                .unwrap();
        assert_eq!(settings, EngineSettings::default());
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let result = EngineSettings::from_json_str("{ not json");
        assert!(matches!(result, Err(CoreError::InvalidSettings(_))));
    }

    #[test]
    fn test_normalize_clamps_word_counts() {
        let mut settings = EngineSettings::default();
        settings.phrases.max_words = 0;
        settings.phrases.target_words = 50;
        settings.phrases.min_words_for_comma_break = 0;
        settings.phrases.fixed_group_size = 0;
        settings.normalize();

        assert_eq!(settings.phrases.max_words, 1);
        assert_eq!(settings.phrases.target_words, 1);
        assert_eq!(settings.phrases.min_words_for_comma_break, 1);
        assert_eq!(settings.phrases.fixed_group_size, 1);
    }

    #[test]
    fn test_normalize_replaces_bad_durations() {
        let mut settings = EngineSettings::default();
        settings.phrases.silence_threshold_sec = f64::NAN;
        settings.clips.max_duration_sec = -5.0;
        settings.clips.max_pause_sec = f64::INFINITY;
        settings.highlight.max_window_sec = 0.0;
        settings.version = 0;
        settings.normalize();

        assert_eq!(settings.phrases.silence_threshold_sec, DEFAULT_SILENCE_THRESHOLD_SEC);
        assert_eq!(settings.clips.max_duration_sec, DEFAULT_MAX_CLIP_DURATION_SEC);
        assert_eq!(settings.clips.max_pause_sec, DEFAULT_MAX_PAUSE_SEC);
        assert_eq!(settings.highlight.max_window_sec, DEFAULT_MAX_WINDOW_SEC);
        assert_eq!(settings.version, SETTINGS_VERSION);
    }

    #[test]
    fn test_settings_roundtrip_uses_camel_case() {
        let json = serde_json::to_value(EngineSettings::default()).unwrap();
        assert!(json["phrases"]["silenceThresholdSec"].is_number());
        assert!(json["clips"]["maxDurationSec"].is_number());
        assert!(json["highlight"]["maxWindowSec"].is_number());
    }
}
