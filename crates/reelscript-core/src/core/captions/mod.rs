//! Caption System Module
//!
//! Provides caption/subtitle generation for short clips including:
//! - Phrase models and style configuration (Phrase, StyleConfig, Color)
//! - Adaptive and fixed-chunk phrase segmentation
//! - ASS document emission with per-word highlighting
//! - SRT and VTT export
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Caption System                               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  models.rs     - Data structures (Phrase, Style, Request)       │
//! │  phrases.rs    - Adaptive / fixed-chunk segmenters              │
//! │  ass.rs        - ASS document emitter                           │
//! │  formats.rs    - SRT/VTT export                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use reelscript_core::core::captions::{generate_captions, CaptionMode, CaptionRequest};
//! use reelscript_core::core::settings::EngineSettings;
//! use reelscript_core::core::transcript::{Segment, Transcript};
//! use reelscript_core::core::TimeRange;
//!
//! let transcript = Transcript::with_segments(vec![
//!     Segment::new(8.0, 10.0, "Before the clip"),
//!     Segment::new(10.0, 12.0, "Inside the clip"),
//! ]);
//! let request = CaptionRequest::new(CaptionMode::Phrase)
//!     .with_window(TimeRange::new(10.0, 12.0));
//!
//! let ass = generate_captions(&transcript, &request, &EngineSettings::default()).unwrap();
//! assert!(ass.contains("INSIDE THE CLIP"));
//! assert!(!ass.contains("BEFORE"));
//! ```

mod ass;
mod formats;
mod models;
mod phrases;

pub use models::{
    AssStyle, CaptionMode, CaptionRequest, Color, Phrase, StyleConfig, SubtitleFormat,
};

pub use phrases::{segment_adaptive, segment_fixed, BreakReasons};

pub use ass::{
    emit_ass, escape_ass_text, format_ass_timestamp, EmitOptions, PLAY_RES_X, PLAY_RES_Y,
    STYLE_NAME,
};

pub use formats::{export_srt, export_vtt, format_srt_timestamp, format_vtt_timestamp};

use tracing::debug;

use crate::core::settings::EngineSettings;
use crate::core::transcript::{resolve_words, ResolvedWord, Transcript};
use crate::core::{CoreError, CoreResult, TimeRange};

/// Builds phrases for a mode using the configured segmenter.
pub fn build_phrases(
    words: &[ResolvedWord],
    mode: CaptionMode,
    settings: &EngineSettings,
) -> Vec<Phrase> {
    match mode {
        CaptionMode::WordHighlight => segment_adaptive(words, &settings.phrases),
        CaptionMode::Phrase => segment_fixed(words, settings.phrases.fixed_group_size),
    }
}

/// Keeps the words that overlap a clip window.
///
/// Zero-length words count when they sit inside the window.
pub fn words_in_window(words: &[ResolvedWord], window: &TimeRange) -> Vec<ResolvedWord> {
    words
        .iter()
        .filter(|w| {
            window.overlaps_span(w.start, w.end)
                || (w.start == w.end && window.contains(w.start) && w.start < window.end_sec)
        })
        .cloned()
        .collect()
}

/// Generates a caption document for a transcript (or a clip window of it).
///
/// Pipeline: resolve words → keep the window's words → segment → emit.
/// Returns [`CoreError::EmptyInput`] when no words remain.
pub fn generate_captions(
    transcript: &Transcript,
    request: &CaptionRequest,
    settings: &EngineSettings,
) -> CoreResult<String> {
    let mut words = resolve_words(&transcript.segments);
    if let Some(window) = &request.window {
        words = words_in_window(&words, window);
    }

    if words.is_empty() {
        debug!("No words to caption");
        return Err(CoreError::EmptyInput);
    }

    let phrases = build_phrases(&words, request.mode, settings);
    let window = request.window.as_ref();

    match request.format {
        SubtitleFormat::Ass => {
            let options = EmitOptions {
                mode: request.mode,
                style: request.style.clone(),
                window: request.window.clone(),
            };
            emit_ass(&phrases, &options)
        }
        SubtitleFormat::Srt => export_srt(&phrases, window),
        SubtitleFormat::Vtt => export_vtt(&phrases, window),
    }
}

// =============================================================================
// Tests
// =============================================================================
