//! Caption Data Models
//!
//! Defines phrases, colors and the style configuration used by the emitters.
//!
//! # Overview
//!
//! Captions support two presentation modes:
//! - Word highlight: short adaptive phrases, the spoken word recolored
//! - Phrase: fixed-size upper-case chunks shown whole

use serde::{Deserialize, Serialize};
use specta::Type;
use tracing::warn;

use crate::core::transcript::ResolvedWord;
use crate::core::{TimeRange, TimeSec};

// =============================================================================
// Phrase
// =============================================================================

/// A short run of words displayed together
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct Phrase {
    /// Display text
    pub text: String,
    /// First word start in seconds
    pub start: TimeSec,
    /// Last word end in seconds
    pub end: TimeSec,
    /// Words in display order
    pub words: Vec<ResolvedWord>,
}

impl Phrase {
    /// Builds a phrase from a non-empty word run, joining words with single spaces.
    ///
    /// Returns None for an empty run.
    pub fn from_words(words: Vec<ResolvedWord>) -> Option<Self> {
        let start = words.first()?.start;
        let end = words.last()?.end;
        let text = words
            .iter()
            .map(|w| w.word.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Some(Self {
            text,
            start,
            end,
            words,
        })
    }

    /// Returns the duration of this phrase in seconds
    pub fn duration(&self) -> TimeSec {
        self.end - self.start
    }
}

// =============================================================================
// Caption Mode / Format
// =============================================================================

/// How phrases are built and rendered
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Type, Default)]
#[serde(rename_all = "camelCase")]
pub enum CaptionMode {
    /// Adaptive phrases, one event per word with the active word highlighted
    #[default]
    WordHighlight,
    /// Fixed-size chunks, one upper-case event per phrase
    Phrase,
}

/// Output document format
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Type, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    /// Advanced SubStation Alpha
    #[default]
    Ass,
    /// SubRip
    Srt,
    /// WebVTT
    Vtt,
}

impl SubtitleFormat {
    /// Returns the conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Ass => "ass",
            Self::Srt => "srt",
            Self::Vtt => "vtt",
        }
    }
}

// =============================================================================
// Color
// =============================================================================

/// RGBA color value (0-255 for each component)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Creates a new color from RGBA components
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from RGB components
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// Yellow color (common for subtitles)
    pub fn yellow() -> Self {
        Self::rgb(255, 255, 0)
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn try_from_hex(hex: &str) -> Result<Self, String> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 && hex.len() != 8 {
            return Err(format!("Invalid hex color length: {}", hex.len()));
        }
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("Invalid hex color digits: {}", hex));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| e.to_string())
        };
        let r = channel(0..2)?;
        let g = channel(2..4)?;
        let b = channel(4..6)?;
        let a = if hex.len() == 8 { channel(6..8)? } else { 255 };

        Ok(Self::rgba(r, g, b, a))
    }

    /// Converts to hex string (e.g., "FFFFFF" or "FFFFFFFF" with alpha)
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Converts to ASS/SSA style color format (&HAABBGGRR)
    pub fn to_ass_color(&self) -> String {
        format!(
            "&H{:02X}{:02X}{:02X}{:02X}",
            255 - self.a,
            self.b,
            self.g,
            self.r
        )
    }

    /// Converts to an inline override color (&HBBGGRR&), as used by `\c`
    pub fn to_ass_override(&self) -> String {
        format!("&H{:02X}{:02X}{:02X}&", self.b, self.g, self.r)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::white()
    }
}

// =============================================================================
// Style Configuration
// =============================================================================

/// Caller-supplied style options; unset fields take the mode default
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_width: Option<u32>,
    /// Left and right margin in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_h: Option<u32>,
    /// Vertical margin in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_v: Option<u32>,
    /// Text color as `#RRGGBB`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    /// Active-word color as `#RRGGBB`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_color: Option<String>,
}

impl StyleConfig {
    /// Parses a style map from JSON; unrecognized keys are ignored.
    pub fn from_json_str(json: &str) -> crate::core::CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Fills unset options with the defaults of `mode`.
    pub fn resolve(&self, mode: CaptionMode) -> AssStyle {
        let defaults = AssStyle::for_mode(mode);
        let margin_h = self.margin_h.unwrap_or(defaults.margin_l);

        AssStyle {
            font_size: self.font_size.unwrap_or(defaults.font_size),
            outline_width: self.outline_width.unwrap_or(defaults.outline_width),
            margin_l: margin_h,
            margin_r: margin_h,
            margin_v: self.margin_v.unwrap_or(defaults.margin_v),
            primary: parse_color_or(self.primary_color.as_deref(), defaults.primary.clone()),
            highlight: parse_color_or(
                self.highlight_color.as_deref(),
                defaults.highlight.clone(),
            ),
            ..defaults
        }
    }
}

fn parse_color_or(value: Option<&str>, fallback: Color) -> Color {
    match value.map(Color::try_from_hex) {
        None => fallback,
        Some(Ok(color)) => color,
        Some(Err(e)) => {
            warn!(
                "Failed to parse caption color '{}': {}, using default",
                value.unwrap_or_default(),
                e
            );
            fallback
        }
    }
}

/// Fully resolved style written to the `[V4+ Styles]` section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct AssStyle {
    pub font_name: String,
    pub font_size: u32,
    pub bold: bool,
    pub outline_width: u32,
    pub margin_l: u32,
    pub margin_r: u32,
    pub margin_v: u32,
    pub primary: Color,
    pub highlight: Color,
    pub outline: Color,
}

impl AssStyle {
    /// Default style for a caption mode
    pub fn for_mode(mode: CaptionMode) -> Self {
        match mode {
            CaptionMode::WordHighlight => Self {
                font_name: "Arial".to_string(),
                font_size: 120,
                bold: true,
                outline_width: 10,
                margin_l: 80,
                margin_r: 80,
                margin_v: 350,
                primary: Color::white(),
                highlight: Color::yellow(),
                outline: Color::black(),
            },
            CaptionMode::Phrase => Self {
                font_name: "Arial".to_string(),
                font_size: 72,
                bold: true,
                outline_width: 4,
                margin_l: 60,
                margin_r: 60,
                margin_v: 250,
                primary: Color::white(),
                highlight: Color::yellow(),
                outline: Color::black(),
            },
        }
    }
}

// =============================================================================
// Caption Request
// =============================================================================

/// Everything needed to turn a transcript into a caption document
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Type)]
#[serde(rename_all = "camelCase")]
pub struct CaptionRequest {
    #[serde(default)]
    pub mode: CaptionMode,
    #[serde(default)]
    pub format: SubtitleFormat,
    #[serde(default)]
    pub style: StyleConfig,
    /// Clip window in absolute transcript time; output is relative to its start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<TimeRange>,
}

impl CaptionRequest {
    pub fn new(mode: CaptionMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Restricts captions to a clip window
    pub fn with_window(mut self, window: TimeRange) -> Self {
        self.window = Some(window);
        self
    }

    /// Selects the output format
    pub fn with_format(mut self, format: SubtitleFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets style overrides
    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }
}

// =============================================================================
// Tests
// =============================================================================
