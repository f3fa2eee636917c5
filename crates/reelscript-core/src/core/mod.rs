//! ReelScript Core Engine
//!
//! Core timeline engine module.
//! Handles transcript word timing, caption generation and clip interval management.

pub mod captions;
pub mod clips;
pub mod settings;
pub mod transcript;

// Re-export common types
mod types;
pub use types::*;

mod error;
pub use error::*;

#[cfg(test)]
mod tests_destructive;
