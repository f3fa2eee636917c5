//! Transcript Module
//!
//! Speech recognition output as consumed by the engine, and the word
//! timestamp resolver that flattens it into a time-ordered word sequence.
//!
//! # Example Usage
//!
//! ```rust
//! use reelscript_core::core::transcript::{resolve_words, Segment, WordSpan};
//!
//! let segments = vec![
//!     Segment::new(0.0, 1.0, "Hello world")
//!         .with_words(vec![WordSpan::timed("Hello", 0.0, 0.4), WordSpan::untimed("world")]),
//!     Segment::new(1.0, 2.0, "no word timing here"),
//! ];
//!
//! let words = resolve_words(&segments);
//! assert_eq!(words.len(), 6);
//! assert_eq!(words[1].start, 0.4);
//! ```

mod models;
mod resolver;

pub use models::{ResolvedWord, Segment, Transcript, WordSpan};
pub use resolver::{resolve_segments, resolve_words, ResolvedSegment, WordSource};
