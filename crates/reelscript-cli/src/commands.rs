//! Command handlers
//!
//! Each handler reads its input files, calls the engine and writes the
//! result to `out` (or to the requested output file).

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use reelscript_core::core::captions::{generate_captions, CaptionRequest, StyleConfig};
use reelscript_core::core::clips::{
    transcript_clip_timing, ClipInterval, ClipRejection, ClipResolver, ClipTiming,
    HighlightWindows, SegmentTime,
};
use reelscript_core::core::settings::EngineSettings;
use reelscript_core::core::transcript::Transcript;
use reelscript_core::core::TimeRange;

use crate::cli::{CaptionsArgs, ClipCreateArgs, ClipTimingArgs, ClipUpdateArgs, HighlightArgs};
use crate::error::CliError;

// =============================================================================
// Input Loading
// =============================================================================

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn load_transcript(path: &Path) -> Result<Transcript> {
    let transcript = Transcript::from_json_str(&read_file(path)?)
        .with_context(|| format!("Invalid transcript {}", path.display()))?;
    debug!(
        path = %path.display(),
        segments = transcript.len(),
        "Loaded transcript"
    );
    Ok(transcript)
}

pub fn load_settings(path: Option<&Path>) -> Result<EngineSettings> {
    match path {
        Some(path) => EngineSettings::from_json_str(&read_file(path)?)
            .with_context(|| format!("Invalid settings {}", path.display())),
        None => Ok(EngineSettings::default()),
    }
}

pub fn load_style(path: &Path) -> Result<StyleConfig> {
    StyleConfig::from_json_str(&read_file(path)?)
        .with_context(|| format!("Invalid style {}", path.display()))
}

pub fn load_clips(path: Option<&Path>) -> Result<Vec<ClipInterval>> {
    match path {
        Some(path) => serde_json::from_str(&read_file(path)?)
            .with_context(|| format!("Invalid clip list {}", path.display())),
        None => Ok(Vec::new()),
    }
}

fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    writeln!(out, "{}", json)?;
    Ok(())
}

// =============================================================================
// Captions
// =============================================================================

pub fn run_captions(args: &CaptionsArgs, out: &mut dyn Write) -> Result<()> {
    let transcript = load_transcript(&args.transcript)?;
    let settings = load_settings(args.settings.as_deref())?;

    let mut request = CaptionRequest::new(args.mode.into()).with_format(args.format.into());
    if let Some(path) = &args.style {
        request = request.with_style(load_style(path)?);
    }
    if let (Some(start), Some(end)) = (args.clip_start, args.clip_end) {
        request = request.with_window(TimeRange::new(start, end));
    }

    let document = match generate_captions(&transcript, &request, &settings) {
        Ok(document) => document,
        Err(e) if e.is_empty_input() => return Err(CliError::NoWords.into()),
        Err(e) => return Err(e).context("Failed to generate captions"),
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &document)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = document.len(), "Wrote captions");
        }
        None => {
            out.write_all(document.as_bytes())?;
            if !document.ends_with('\n') {
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

// =============================================================================
// Clips
// =============================================================================

/// An accepted clip with its padded timing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AcceptedClip {
    clip: ClipInterval,
    timing: Option<ClipTiming>,
}

fn report_outcome(
    outcome: Result<ClipInterval, ClipRejection>,
    transcript: &Transcript,
    settings: &EngineSettings,
    out: &mut dyn Write,
) -> Result<()> {
    match outcome {
        Ok(clip) => {
            let timing = transcript_clip_timing(transcript, &clip, &settings.clips);
            write_json(out, &AcceptedClip { clip, timing })
        }
        Err(rejection) => {
            let report = rejection.report();
            write_json(out, &report)?;
            Err(CliError::ClipRejected(report).into())
        }
    }
}

pub fn run_clip_create(args: &ClipCreateArgs, out: &mut dyn Write) -> Result<()> {
    let transcript = load_transcript(&args.transcript)?;
    let clips = load_clips(args.clips.as_deref())?;
    let settings = load_settings(args.settings.as_deref())?;
    let times = SegmentTime::from_segments(&transcript.segments);

    let outcome = ClipResolver::new(transcript.len(), &clips, &times)
        .with_settings(settings.clips.clone())
        .propose_create(args.start, args.end);
    report_outcome(outcome, &transcript, &settings, out)
}

pub fn run_clip_update(args: &ClipUpdateArgs, out: &mut dyn Write) -> Result<()> {
    let transcript = load_transcript(&args.transcript)?;
    let clips = load_clips(Some(&args.clips))?;
    let settings = load_settings(args.settings.as_deref())?;
    let times = SegmentTime::from_segments(&transcript.segments);

    let outcome = ClipResolver::new(transcript.len(), &clips, &times)
        .with_settings(settings.clips.clone())
        .propose_update(&args.id, args.start, args.end);
    report_outcome(outcome, &transcript, &settings, out)
}

pub fn run_clip_timing(args: &ClipTimingArgs, out: &mut dyn Write) -> Result<()> {
    let transcript = load_transcript(&args.transcript)?;
    let settings = load_settings(args.settings.as_deref())?;
    let clip = ClipInterval::new(args.start.min(args.end), args.start.max(args.end));

    let timing = transcript_clip_timing(&transcript, &clip, &settings.clips).ok_or(
        CliError::RangeOutOfBounds {
            start: args.start,
            end: args.end,
        },
    )?;
    write_json(out, &timing)
}

// =============================================================================
// Highlight
// =============================================================================

pub fn run_highlight(args: &HighlightArgs, out: &mut dyn Write) -> Result<()> {
    let transcript = load_transcript(&args.transcript)?;
    let clips = load_clips(args.clips.as_deref())?;
    let settings = load_settings(args.settings.as_deref())?;
    let times = SegmentTime::from_segments(&transcript.segments);

    let windows = HighlightWindows::compute(&times, &clips, &settings.highlight);
    write_json(out, &windows.ends())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{FormatArg, ModeArg};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    /// 30 back-to-back segments of 5 seconds each
    fn uniform_transcript(dir: &TempDir) -> PathBuf {
        let segments: Vec<String> = (0..30)
            .map(|i| {
                format!(
                    r#"{{ "start": {}.0, "end": {}.0, "text": "segment number {}" }}"#,
                    i * 5,
                    (i + 1) * 5,
                    i
                )
            })
            .collect();
        let json = format!(r#"{{ "segments": [{}], "duration": 152.0 }}"#, segments.join(","));
        write_fixture(dir, "transcript.json", &json)
    }

    fn captions_args(transcript: PathBuf) -> CaptionsArgs {
        CaptionsArgs {
            transcript,
            mode: ModeArg::WordHighlight,
            format: FormatArg::Ass,
            clip_start: None,
            clip_end: None,
            style: None,
            settings: None,
            output: None,
        }
    }

    fn cli_error(err: &anyhow::Error) -> Option<&CliError> {
        err.downcast_ref::<CliError>()
    }

    // -------------------------------------------------------------------------
    // Captions
    // -------------------------------------------------------------------------

    #[test]
    fn test_captions_to_stdout() {
        let dir = TempDir::new().unwrap();
        let args = captions_args(uniform_transcript(&dir));

        let mut out = Vec::new();
        run_captions(&args, &mut out).unwrap();
        let doc = String::from_utf8(out).unwrap();
        assert!(doc.starts_with("[Script Info]"));
        assert!(doc.contains("PlayResX: 1080"));
    }

    #[test]
    fn test_captions_to_file_with_style() {
        let dir = TempDir::new().unwrap();
        let style = write_fixture(&dir, "style.json", r##"{ "fontSize": 64, "primaryColor": "#FF0000" }"##);
        let output = dir.path().join("out.srt");

        let mut args = captions_args(uniform_transcript(&dir));
        args.mode = ModeArg::Phrase;
        args.format = FormatArg::Srt;
        args.style = Some(style);
        args.clip_start = Some(10.0);
        args.clip_end = Some(20.0);
        args.output = Some(output.clone());

        let mut out = Vec::new();
        run_captions(&args, &mut out).unwrap();
        assert!(out.is_empty());

        let srt = fs::read_to_string(output).unwrap();
        assert!(srt.starts_with("1\n00:00:00,000 --> "));
        assert!(srt.contains("SEGMENT NUMBER 2"));
        assert!(!srt.contains("NUMBER 0"));
    }

    #[test]
    fn test_captions_without_words_exits_with_two() {
        let dir = TempDir::new().unwrap();
        let transcript = write_fixture(&dir, "empty.json", r#"{ "segments": [] }"#);

        let err = run_captions(&captions_args(transcript), &mut Vec::new()).unwrap_err();
        let cli_err = cli_error(&err).unwrap();
        assert!(matches!(cli_err, CliError::NoWords));
        assert_eq!(cli_err.exit_code(), 2);
    }

    #[test]
    fn test_missing_transcript_file() {
        let dir = TempDir::new().unwrap();
        let args = captions_args(dir.path().join("nope.json"));

        let err = run_captions(&args, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
        assert!(cli_error(&err).is_none());
    }

    #[test]
    fn test_invalid_settings_file() {
        let dir = TempDir::new().unwrap();
        let settings = write_fixture(&dir, "settings.json", "{ broken");
        let mut args = captions_args(uniform_transcript(&dir));
        args.settings = Some(settings);

        let err = run_captions(&args, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("Invalid settings"));
    }

    // -------------------------------------------------------------------------
    // Clips
    // -------------------------------------------------------------------------

    #[test]
    fn test_clip_create_truncates() {
        let dir = TempDir::new().unwrap();
        let clips = write_fixture(
            &dir,
            "clips.json",
            r#"[{ "id": "a", "startIndex": 10, "endIndex": 12 }]"#,
        );
        let args = ClipCreateArgs {
            transcript: uniform_transcript(&dir),
            clips: Some(clips),
            start: 5,
            end: 15,
            settings: None,
        };

        let mut out = Vec::new();
        run_clip_create(&args, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["clip"]["startIndex"], 5);
        assert_eq!(json["clip"]["endIndex"], 9);
        assert_eq!(json["timing"]["startsAt"], 25.0);
    }

    #[test]
    fn test_clip_create_rejection_report() {
        let dir = TempDir::new().unwrap();
        let args = ClipCreateArgs {
            transcript: uniform_transcript(&dir),
            clips: None,
            start: 0,
            end: 29,
            settings: None,
        };

        let mut out = Vec::new();
        let err = run_clip_create(&args, &mut out).unwrap_err();
        assert_eq!(cli_error(&err).unwrap().exit_code(), 1);

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["kind"], "durationExceeded");
    }

    #[test]
    fn test_clip_update_keeps_id() {
        let dir = TempDir::new().unwrap();
        let clips = write_fixture(
            &dir,
            "clips.json",
            r#"[{ "id": "a", "startIndex": 2, "endIndex": 4 }, { "id": "b", "startIndex": 8, "endIndex": 9 }]"#,
        );
        let args = ClipUpdateArgs {
            transcript: uniform_transcript(&dir),
            clips,
            id: "a".to_string(),
            start: 3,
            end: 12,
            settings: None,
        };

        let mut out = Vec::new();
        run_clip_update(&args, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["clip"]["id"], "a");
        assert_eq!(json["clip"]["endIndex"], 7);
    }

    #[test]
    fn test_clip_timing_out_of_range() {
        let dir = TempDir::new().unwrap();
        let args = ClipTimingArgs {
            transcript: uniform_transcript(&dir),
            start: 28,
            end: 40,
            settings: None,
        };

        let err = run_clip_timing(&args, &mut Vec::new()).unwrap_err();
        assert!(matches!(
            cli_error(&err),
            Some(CliError::RangeOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_clip_timing_last_segment() {
        let dir = TempDir::new().unwrap();
        let args = ClipTimingArgs {
            transcript: uniform_transcript(&dir),
            start: 29,
            end: 29,
            settings: None,
        };

        let mut out = Vec::new();
        run_clip_timing(&args, &mut out).unwrap();
        let timing: ClipTiming = serde_json::from_slice(&out).unwrap();
        assert_eq!(timing.pause_before, 0.0);
        assert_eq!(timing.pause_after, 1.0);
        assert_eq!(timing.ends_at, 151.0);
    }

    // -------------------------------------------------------------------------
    // Highlight
    // -------------------------------------------------------------------------

    #[test]
    fn test_highlight_ends() {
        let dir = TempDir::new().unwrap();
        let args = HighlightArgs {
            transcript: uniform_transcript(&dir),
            clips: None,
            settings: None,
        };

        let mut out = Vec::new();
        run_highlight(&args, &mut out).unwrap();
        let ends: Vec<usize> = serde_json::from_slice(&out).unwrap();
        assert_eq!(ends.len(), 30);
        assert_eq!(ends[0], 11);
        assert_eq!(ends[29], 29);
    }
}
