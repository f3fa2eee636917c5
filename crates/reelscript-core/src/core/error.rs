//! ReelScript Error Definitions
//!
//! Defines error types used throughout the project.
//! Clip edit rejections are reported separately, see [`crate::core::clips::ClipRejection`].

use thiserror::Error;

/// Core engine error types
#[derive(Error, Debug)]
pub enum CoreError {
    // =========================================================================
    // Caption Errors
    // =========================================================================
    /// No words resolved from any segment; there is nothing to caption.
    #[error("No caption content: transcript resolved to zero words")]
    EmptyInput,

    // =========================================================================
    // General Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Core engine result type
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Returns true when the error only means "nothing to caption"
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput)
    }
}
