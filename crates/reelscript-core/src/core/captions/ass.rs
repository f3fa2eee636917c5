//! ASS Subtitle Emitter
//!
//! Renders phrases into an Advanced SubStation Alpha document for a
//! 1080x1920 portrait canvas.
//!
//! # Document Layout
//!
//! ```text
//! [Script Info]      canvas resolution and script metadata
//! [V4+ Styles]       one "Default" style built from the resolved StyleConfig
//! [Events]           Dialogue lines in phrase/word order
//! ```

use std::fmt::Write;

use tracing::debug;

use super::models::{AssStyle, CaptionMode, Phrase, StyleConfig};
use crate::core::{CoreError, CoreResult, TimeRange, TimeSec};

/// Canvas width in pixels
pub const PLAY_RES_X: u32 = 1080;

/// Canvas height in pixels
pub const PLAY_RES_Y: u32 = 1920;

/// Name of the single style every event uses
pub const STYLE_NAME: &str = "Default";

const STYLE_FORMAT: &str = "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding";

const EVENT_FORMAT: &str =
    "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

/// Emission options
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmitOptions {
    pub mode: CaptionMode,
    pub style: StyleConfig,
    /// Clip window; timestamps become relative to its start and are clamped to it
    pub window: Option<TimeRange>,
}

impl EmitOptions {
    pub fn new(mode: CaptionMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn with_window(mut self, window: TimeRange) -> Self {
        self.window = Some(window);
        self
    }

    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }
}

/// A single timed dialogue event
#[derive(Clone, Debug, PartialEq)]
struct DialogueEvent {
    start: TimeSec,
    end: TimeSec,
    text: String,
}

/// Renders phrases as an ASS document.
///
/// Returns [`CoreError::EmptyInput`] when there is nothing to caption.
pub fn emit_ass(phrases: &[Phrase], options: &EmitOptions) -> CoreResult<String> {
    if phrases.is_empty() {
        return Err(CoreError::EmptyInput);
    }

    let style = options.style.resolve(options.mode);
    let events = match options.mode {
        CaptionMode::WordHighlight => word_highlight_events(phrases, &style),
        CaptionMode::Phrase => phrase_events(phrases),
    };

    let mut output = String::new();
    write_header(&mut output);
    write_style(&mut output, &style);

    output.push_str("[Events]\n");
    output.push_str(EVENT_FORMAT);
    output.push('\n');
    for event in &events {
        let (start, end) = match &options.window {
            Some(window) => (window.to_local(event.start), window.to_local(event.end)),
            None => (event.start, event.end),
        };
        // Writing to a String cannot fail.
        let _ = writeln!(
            output,
            "Dialogue: 0,{},{},{},,0,0,0,,{}",
            format_ass_timestamp(start),
            format_ass_timestamp(end),
            STYLE_NAME,
            event.text
        );
    }

    debug!(
        mode = ?options.mode,
        phrases = phrases.len(),
        events = events.len(),
        "Emitted ASS document"
    );
    Ok(output)
}

fn write_header(output: &mut String) {
    output.push_str("[Script Info]\n");
    output.push_str("Title: ReelScript Captions\n");
    output.push_str("ScriptType: v4.00+\n");
    let _ = writeln!(output, "PlayResX: {}", PLAY_RES_X);
    let _ = writeln!(output, "PlayResY: {}", PLAY_RES_Y);
    output.push_str("WrapStyle: 0\n");
    output.push_str("ScaledBorderAndShadow: yes\n\n");
}

fn write_style(output: &mut String, style: &AssStyle) {
    output.push_str("[V4+ Styles]\n");
    output.push_str(STYLE_FORMAT);
    output.push('\n');
    let _ = writeln!(
        output,
        "Style: {name},{font},{size},{primary},{primary},{outline},&H00000000,{bold},0,0,0,100,100,0,0,1,{ow},0,2,{ml},{mr},{mv},1",
        name = STYLE_NAME,
        font = style.font_name,
        size = style.font_size,
        primary = style.primary.to_ass_color(),
        outline = style.outline.to_ass_color(),
        bold = if style.bold { -1 } else { 0 },
        ow = style.outline_width,
        ml = style.margin_l,
        mr = style.margin_r,
        mv = style.margin_v,
    );
    output.push('\n');
}

/// One event per word; each shows the whole phrase with the active word recolored.
fn word_highlight_events(phrases: &[Phrase], style: &AssStyle) -> Vec<DialogueEvent> {
    let highlight = style.highlight.to_ass_override();
    let primary = style.primary.to_ass_override();
    let mut events = Vec::new();

    for phrase in phrases {
        let escaped: Vec<String> = phrase
            .words
            .iter()
            .map(|w| escape_ass_text(&w.word))
            .collect();

        for (i, word) in phrase.words.iter().enumerate() {
            let end = phrase
                .words
                .get(i + 1)
                .map(|next| next.start)
                .unwrap_or(phrase.end);

            let text = escaped
                .iter()
                .enumerate()
                .map(|(j, w)| {
                    if j == i {
                        format!("{{\\c{}}}{}{{\\c{}}}", highlight, w, primary)
                    } else {
                        w.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");

            events.push(DialogueEvent {
                start: word.start,
                end,
                text,
            });
        }
    }

    events
}

/// One upper-case event per phrase.
fn phrase_events(phrases: &[Phrase]) -> Vec<DialogueEvent> {
    phrases
        .iter()
        .map(|phrase| DialogueEvent {
            start: phrase.start,
            end: phrase.end,
            text: escape_ass_text(&phrase.text.to_uppercase()),
        })
        .collect()
}

/// Formats seconds as an ASS timestamp (`H:MM:SS.CC`).
///
/// Negative and non-finite values clamp to zero. Rounding to centiseconds
/// carries into seconds, minutes and hours.
pub fn format_ass_timestamp(seconds: TimeSec) -> String {
    let seconds = if seconds.is_finite() {
        seconds.max(0.0)
    } else {
        0.0
    };
    let total_cs = (seconds * 100.0).round() as u64;
    let cs = total_cs % 100;
    let total_secs = total_cs / 100;
    let secs = total_secs % 60;
    let total_mins = total_secs / 60;
    let mins = total_mins % 60;
    let hours = total_mins / 60;

    format!("{}:{:02}:{:02}.{:02}", hours, mins, secs, cs)
}

/// Escapes text so it cannot open override blocks.
///
/// Backslash is escaped first so the escapes added for braces stay intact.
/// Line feeds become ASS hard breaks (`\N`) so an event stays on one line.
pub fn escape_ass_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('{', "\\{")
        .replace('}', "\\}")
        .replace('\n', "\\N")
}

// =============================================================================
// Tests
// =============================================================================
