//! CLI error types with dedicated exit codes.

use reelscript_core::core::clips::Rejection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    /// The transcript (or clip window) contains no words
    #[error("Nothing to caption: no words in the requested range")]
    NoWords,

    /// A clip proposal was rejected; the report was already printed
    #[error("Clip rejected: {}", .0.detail)]
    ClipRejected(Rejection),

    #[error("Segment range {start}~{end} is outside the transcript")]
    RangeOutOfBounds { start: usize, end: usize },
}

impl CliError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NoWords => 2,
            Self::ClipRejected(_) | Self::RangeOutOfBounds { .. } => 1,
        }
    }
}
