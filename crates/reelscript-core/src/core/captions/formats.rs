//! Plain Subtitle Exporters
//!
//! Exports phrases as SubRip (SRT) or WebVTT for players that do not read ASS.
//! Word highlighting is not representable in these formats; each phrase becomes
//! one cue.
//!
//! # Example
//!
//! ```rust
//! use reelscript_core::core::captions::{export_srt, Phrase};
//! use reelscript_core::core::transcript::ResolvedWord;
//!
//! let phrase = Phrase::from_words(vec![ResolvedWord::new("Hello", 1.0, 2.5)]).unwrap();
//! let srt = export_srt(&[phrase], None).unwrap();
//! assert_eq!(srt, "1\n00:00:01,000 --> 00:00:02,500\nHello");
//! ```

use super::models::Phrase;
use crate::core::{CoreError, CoreResult, TimeRange, TimeSec};

fn cue_times(phrase: &Phrase, window: Option<&TimeRange>) -> (TimeSec, TimeSec) {
    match window {
        Some(window) => (window.to_local(phrase.start), window.to_local(phrase.end)),
        None => (phrase.start, phrase.end),
    }
}

// =============================================================================
// SRT Format
// =============================================================================

/// Exports phrases to SRT format
///
/// # SRT Format
///
/// ```text
/// 1
/// 00:00:01,000 --> 00:00:04,000
/// First caption text
///
/// 2
/// 00:00:05,500 --> 00:00:08,000
/// Second caption text
/// ```
pub fn export_srt(phrases: &[Phrase], window: Option<&TimeRange>) -> CoreResult<String> {
    if phrases.is_empty() {
        return Err(CoreError::EmptyInput);
    }

    let mut output = String::new();

    for (index, phrase) in phrases.iter().enumerate() {
        // Sequence number
        output.push_str(&format!("{}\n", index + 1));

        // Timestamps
        let (start, end) = cue_times(phrase, window);
        output.push_str(&format!(
            "{} --> {}\n",
            format_srt_timestamp(start),
            format_srt_timestamp(end)
        ));

        // Text
        output.push_str(&phrase.text);
        output.push_str("\n\n");
    }

    Ok(output.trim_end().to_string())
}

/// Formats seconds as SRT timestamp (00:00:00,000)
pub fn format_srt_timestamp(seconds: TimeSec) -> String {
    let (hours, mins, secs, ms) = split_millis(seconds);
    format!("{:02}:{:02}:{:02},{:03}", hours, mins, secs, ms)
}

// =============================================================================
// VTT Format
// =============================================================================

/// Exports phrases to WebVTT format
pub fn export_vtt(phrases: &[Phrase], window: Option<&TimeRange>) -> CoreResult<String> {
    if phrases.is_empty() {
        return Err(CoreError::EmptyInput);
    }

    let mut output = String::from("WEBVTT\n\n");

    for phrase in phrases {
        let (start, end) = cue_times(phrase, window);
        output.push_str(&format!(
            "{} --> {}\n",
            format_vtt_timestamp(start),
            format_vtt_timestamp(end)
        ));

        // VTT treats "-->" inside a cue payload as malformed.
        output.push_str(&phrase.text.replace("-->", "->"));
        output.push_str("\n\n");
    }

    Ok(output.trim_end().to_string())
}

/// Formats seconds as VTT timestamp (00:00:00.000)
pub fn format_vtt_timestamp(seconds: TimeSec) -> String {
    let (hours, mins, secs, ms) = split_millis(seconds);
    format!("{:02}:{:02}:{:02}.{:03}", hours, mins, secs, ms)
}

fn split_millis(seconds: TimeSec) -> (u64, u64, u64, u64) {
    let seconds = if seconds.is_finite() {
        seconds.max(0.0)
    } else {
        0.0
    };
    let total_ms = (seconds * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let secs = total_secs % 60;
    let total_mins = total_secs / 60;
    let mins = total_mins % 60;
    let hours = total_mins / 60;
    (hours, mins, secs, ms)
}

// =============================================================================
// Tests
// =============================================================================
