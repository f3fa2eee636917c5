//! reelscript: headless caption generation and clip editing.

mod cli;
mod commands;
mod error;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{ClipAction, Cli, Commands};
use crate::error::CliError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            let code = err
                .downcast_ref::<CliError>()
                .map(CliError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Captions(args) => commands::run_captions(&args, &mut out)?,
        Commands::Clip { action } => match action {
            ClipAction::Create(args) => commands::run_clip_create(&args, &mut out)?,
            ClipAction::Update(args) => commands::run_clip_update(&args, &mut out)?,
            ClipAction::Timing(args) => commands::run_clip_timing(&args, &mut out)?,
        },
        Commands::Highlight(args) => commands::run_highlight(&args, &mut out)?,
    }

    out.flush()?;
    Ok(())
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins over `-v` when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("reelscript={level},reelscript_core={level}")));

    // Avoid panics if already initialized.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
