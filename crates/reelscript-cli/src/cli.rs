//! Command-line interface for reelscript
//!
//! Provides argument parsing using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use reelscript_core::core::captions::{CaptionMode, SubtitleFormat};

/// Caption generation and clip editing for short-form video transcripts
#[derive(Parser, Debug)]
#[command(name = "reelscript", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a caption document from a transcript
    Captions(CaptionsArgs),

    /// Create, edit and time clips
    Clip {
        #[command(subcommand)]
        action: ClipAction,
    },

    /// Print the highlight window end for every segment
    Highlight(HighlightArgs),
}

/// Clip subcommands
#[derive(Subcommand, Debug)]
pub enum ClipAction {
    /// Validate a new clip against the existing ones
    Create(ClipCreateArgs),

    /// Validate new boundaries for an existing clip
    Update(ClipUpdateArgs),

    /// Print the padded timing of a segment range
    Timing(ClipTimingArgs),
}

#[derive(Args, Debug)]
pub struct CaptionsArgs {
    /// Transcript JSON file
    #[arg(long, value_name = "FILE")]
    pub transcript: PathBuf,

    /// Caption style
    #[arg(long, value_enum, default_value_t = ModeArg::WordHighlight)]
    pub mode: ModeArg,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Ass)]
    pub format: FormatArg,

    /// Clip window start in seconds
    #[arg(long, value_name = "SECONDS", requires = "clip_end")]
    pub clip_start: Option<f64>,

    /// Clip window end in seconds
    #[arg(long, value_name = "SECONDS", requires = "clip_start")]
    pub clip_end: Option<f64>,

    /// Style options JSON file
    #[arg(long, value_name = "FILE")]
    pub style: Option<PathBuf>,

    /// Engine settings JSON file
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Write the document here instead of stdout
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ClipCreateArgs {
    /// Transcript JSON file
    #[arg(long, value_name = "FILE")]
    pub transcript: PathBuf,

    /// Existing clips (JSON array of intervals)
    #[arg(long, value_name = "FILE")]
    pub clips: Option<PathBuf>,

    /// First segment index
    #[arg(long, allow_negative_numbers = true)]
    pub start: i64,

    /// Last segment index (inclusive)
    #[arg(long, allow_negative_numbers = true)]
    pub end: i64,

    /// Engine settings JSON file
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ClipUpdateArgs {
    /// Transcript JSON file
    #[arg(long, value_name = "FILE")]
    pub transcript: PathBuf,

    /// Existing clips (JSON array of intervals)
    #[arg(long, value_name = "FILE")]
    pub clips: PathBuf,

    /// Identifier of the clip being edited
    #[arg(long)]
    pub id: String,

    /// New first segment index
    #[arg(long, allow_negative_numbers = true)]
    pub start: i64,

    /// New last segment index (inclusive)
    #[arg(long, allow_negative_numbers = true)]
    pub end: i64,

    /// Engine settings JSON file
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ClipTimingArgs {
    /// Transcript JSON file
    #[arg(long, value_name = "FILE")]
    pub transcript: PathBuf,

    /// First segment index
    #[arg(long)]
    pub start: usize,

    /// Last segment index (inclusive)
    #[arg(long)]
    pub end: usize,

    /// Engine settings JSON file
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct HighlightArgs {
    /// Transcript JSON file
    #[arg(long, value_name = "FILE")]
    pub transcript: PathBuf,

    /// Existing clips (JSON array of intervals)
    #[arg(long, value_name = "FILE")]
    pub clips: Option<PathBuf>,

    /// Engine settings JSON file
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// Large text, active word recolored
    WordHighlight,
    /// Upper-case fixed word groups
    Phrase,
}

impl From<ModeArg> for CaptionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::WordHighlight => CaptionMode::WordHighlight,
            ModeArg::Phrase => CaptionMode::Phrase,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Ass,
    Srt,
    Vtt,
}

impl From<FormatArg> for SubtitleFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Ass => SubtitleFormat::Ass,
            FormatArg::Srt => SubtitleFormat::Srt,
            FormatArg::Vtt => SubtitleFormat::Vtt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_captions_defaults() {
        let cli = Cli::try_parse_from(["reelscript", "captions", "--transcript", "t.json"]).unwrap();
        let Commands::Captions(args) = cli.command else {
            panic!("expected captions command");
        };
        assert_eq!(args.mode, ModeArg::WordHighlight);
        assert_eq!(args.format, FormatArg::Ass);
        assert!(args.clip_start.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_clip_window_needs_both_ends() {
        let result = Cli::try_parse_from([
            "reelscript",
            "captions",
            "--transcript",
            "t.json",
            "--clip-start",
            "10",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_clip_create_negative_index() {
        let cli = Cli::try_parse_from([
            "reelscript", "-vv", "clip", "create", "--transcript", "t.json", "--start", "-1",
            "--end", "4",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Clip {
            action: ClipAction::Create(args),
        } = cli.command
        else {
            panic!("expected clip create");
        };
        assert_eq!(args.start, -1);
        assert_eq!(args.end, 4);
    }

    #[test]
    fn test_mode_names() {
        let cli = Cli::try_parse_from([
            "reelscript",
            "captions",
            "--transcript",
            "t.json",
            "--mode",
            "phrase",
            "--format",
            "vtt",
        ])
        .unwrap();
        let Commands::Captions(args) = cli.command else {
            panic!("expected captions command");
        };
        assert_eq!(CaptionMode::from(args.mode), CaptionMode::Phrase);
        assert_eq!(SubtitleFormat::from(args.format), SubtitleFormat::Vtt);
    }
}
