//! ReelScript Core Library
//!
//! Transcript timeline engine for short-form video.
//! Turns word-level speech recognition output into time-coded caption markup,
//! and keeps a set of non-overlapping, duration-bounded clip intervals
//! consistent over a longer transcript.
//!
//! Everything in this crate is pure computation over in-memory values:
//! no process spawning, no file or network I/O, no persistence.
//!
//! ## TypeScript Bindings
//!
//! All public model types derive `specta::Type` so a front end can export
//! them as TypeScript definitions.

pub mod core;

pub use crate::core::{CoreError, CoreResult};
