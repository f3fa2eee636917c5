//! Destructive and Edge Case Tests for the Engine
//!
//! These tests feed malformed timing, hostile caption text and out-of-range
//! clip edits through the public operations and check that nothing panics
//! and that every output stays well-formed.

use crate::core::captions::{
    emit_ass, escape_ass_text, export_srt, format_ass_timestamp, format_srt_timestamp,
    generate_captions, segment_adaptive, segment_fixed, CaptionMode, CaptionRequest, Color,
    EmitOptions, Phrase, StyleConfig,
};
use crate::core::clips::{
    clip_timing, propose_create, propose_update, ClipInterval, HighlightWindows, RejectionKind,
    SegmentTime,
};
use crate::core::settings::{ClipSettings, EngineSettings, HighlightSettings, PhraseSettings};
use crate::core::transcript::{resolve_words, ResolvedWord, Segment, Transcript, WordSpan};
use crate::core::{CoreError, TimeRange};

#[test]
fn test_destructive_timestamp_values() {
    assert_eq!(format_ass_timestamp(f64::NAN), "0:00:00.00");
    assert_eq!(format_ass_timestamp(f64::INFINITY), "0:00:00.00");
    assert_eq!(format_ass_timestamp(-3.0), "0:00:00.00");
    assert_eq!(format_srt_timestamp(-0.001), "00:00:00,000");

    // Rounding carries all the way to the hour.
    assert_eq!(format_ass_timestamp(3599.996), "1:00:00.00");
}

#[test]
fn test_destructive_time_range_inversion() {
    let range = TimeRange::new(10.0, 5.0);
    assert_eq!(range.start_sec, 5.0);
    assert_eq!(range.end_sec, 10.0);

    let empty = TimeRange::new(3.0, 3.0);
    assert_eq!(empty.to_local(100.0), 0.0);
}

#[test]
fn test_destructive_word_timing_out_of_order() {
    // A word whose end precedes its start collapses to zero length.
    let segments = vec![Segment::new(0.0, 5.0, "odd timing").with_words(vec![
        WordSpan::timed("odd", 2.0, 1.0),
        WordSpan::untimed("timing"),
    ])];

    let words = resolve_words(&segments);
    assert_eq!(words.len(), 2);
    assert_eq!(words[0].start, 2.0);
    assert_eq!(words[0].end, 2.0);
    assert!(words.iter().all(|w| w.start <= w.end));
}

#[test]
fn test_destructive_blank_words_and_segments() {
    let segments = vec![
        Segment::new(0.0, 1.0, "   "),
        Segment::new(1.0, 2.0, "").with_words(vec![
            WordSpan::untimed(""),
            WordSpan::untimed("  \t "),
        ]),
    ];

    assert!(resolve_words(&segments).is_empty());
    let result = generate_captions(
        &Transcript::with_segments(segments),
        &CaptionRequest::default(),
        &EngineSettings::default(),
    );
    assert!(matches!(result, Err(CoreError::EmptyInput)));
}

#[test]
fn test_destructive_override_injection() {
    let hostile = ResolvedWord::new("{\\b0\\c&H0000FF&}pwned\\", 0.0, 1.0);
    let phrase = Phrase::from_words(vec![hostile]).unwrap();

    let doc = emit_ass(&[phrase], &EmitOptions::new(CaptionMode::Phrase)).unwrap();
    let dialogue = doc.lines().find(|l| l.starts_with("Dialogue:")).unwrap();
    let text = dialogue.splitn(10, ',').nth(9).unwrap();

    // Every brace in the payload is escaped.
    assert_eq!(text, "\\{\\\\B0\\\\C&H0000FF&\\}PWNED\\\\");
    assert_eq!(escape_ass_text("a\\{b"), "a\\\\\\{b");
    assert_ne!(escape_ass_text("\\{"), escape_ass_text("{"));
}

#[test]
fn test_destructive_newlines_stay_on_one_dialogue_line() {
    let phrase = Phrase::from_words(vec![ResolvedWord::new("line\nbreak", 0.0, 1.0)]).unwrap();
    let srt = export_srt(&[phrase.clone()], None).unwrap();
    assert!(srt.starts_with("1\n"));

    let doc = emit_ass(&[phrase], &EmitOptions::new(CaptionMode::Phrase)).unwrap();
    let dialogue_count = doc.lines().filter(|l| l.starts_with("Dialogue:")).count();
    assert_eq!(dialogue_count, 1);
    assert!(doc.contains("LINE\\NBREAK"));
}

#[test]
fn test_destructive_phrase_settings_zero() {
    let words: Vec<ResolvedWord> = (0..5)
        .map(|i| ResolvedWord::new("w", i as f64, i as f64 + 0.5))
        .collect();

    let mut settings = PhraseSettings {
        max_words: 0,
        target_words: 0,
        min_words_for_comma_break: 0,
        silence_threshold_sec: -1.0,
        fixed_group_size: 0,
    };
    settings.normalize();

    let adaptive = segment_adaptive(&words, &settings);
    assert_eq!(adaptive.iter().map(|p| p.words.len()).sum::<usize>(), 5);
    assert!(adaptive.iter().all(|p| !p.words.is_empty()));

    let fixed = segment_fixed(&words, 0);
    assert_eq!(fixed.len(), 5);
}

#[test]
fn test_destructive_style_garbage() {
    assert!(Color::try_from_hex("#GGGGGG").is_err());
    assert!(Color::try_from_hex("#12345").is_err());
    assert!(Color::try_from_hex("").is_err());

    let style = StyleConfig {
        primary_color: Some("chartreuse".to_string()),
        font_size: Some(0),
        ..Default::default()
    };
    let resolved = style.resolve(CaptionMode::WordHighlight);
    assert_eq!(resolved.primary, Color::white());
    assert_eq!(resolved.font_size, 0);

    assert!(StyleConfig::from_json_str(r#""just a string""#).is_err());
}

#[test]
fn test_destructive_clip_indices() {
    let times: Vec<SegmentTime> = (0..5)
        .map(|i| SegmentTime::new(i as f64, i as f64 + 1.0))
        .collect();
    let settings = ClipSettings::default();

    let huge = propose_create(5, &[], 0, i64::MAX, &times, &settings);
    assert_eq!(huge.unwrap_err().kind(), RejectionKind::OutOfBounds);

    let both_negative = propose_create(5, &[], -10, -2, &times, &settings);
    assert_eq!(both_negative.unwrap_err().kind(), RejectionKind::OutOfBounds);

    let empty = propose_create(0, &[], 0, 0, &[], &settings);
    assert_eq!(empty.unwrap_err().kind(), RejectionKind::OutOfBounds);

    // An existing clip that is itself out of range does not break resolution.
    let broken = vec![ClipInterval::new(40, 50).with_id("stale")];
    assert!(propose_create(5, &broken, 0, 4, &times, &settings).is_ok());
    assert!(propose_update(5, &broken, "stale", 1, 3, &times, &settings).is_ok());
}

#[test]
fn test_destructive_clip_nan_timing() {
    let times = vec![SegmentTime::new(f64::NAN, 1.0), SegmentTime::new(1.0, 2.0)];
    let settings = ClipSettings::default();

    let rejected = propose_create(2, &[], 0, 1, &times, &settings);
    assert_eq!(rejected.unwrap_err().kind(), RejectionKind::DurationExceeded);

    let timing = clip_timing(&times, &ClipInterval::new(1, 1), f64::NAN, &settings).unwrap();
    assert_eq!(timing.pause_before, 0.0);
    assert_eq!(timing.pause_after, 0.0);
}

#[test]
fn test_destructive_highlight_unsorted_segments() {
    let times = vec![
        SegmentTime::new(50.0, 55.0),
        SegmentTime::new(0.0, 5.0),
        SegmentTime::new(120.0, 130.0),
    ];
    let windows = HighlightWindows::compute(&times, &[], &HighlightSettings::default());
    assert_eq!(windows.len(), 3);
    assert!(windows.ends().iter().enumerate().all(|(i, &e)| e >= i && e < 3));
}
