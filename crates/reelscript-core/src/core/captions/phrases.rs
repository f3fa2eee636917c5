//! Phrase Segmenters
//!
//! Groups a resolved word sequence into display phrases.
//!
//! - [`segment_adaptive`] breaks on punctuation, phrase length and silence,
//!   for the word-highlight caption style.
//! - [`segment_fixed`] cuts fixed-size upper-case chunks, for the plain
//!   phrase caption style.

use tracing::debug;

use super::models::Phrase;
use crate::core::settings::PhraseSettings;
use crate::core::transcript::ResolvedWord;

const SENTENCE_END: [char; 3] = ['.', '!', '?'];
const CLAUSE_END: [char; 3] = [',', ';', ':'];

/// Which break conditions held after appending a word
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BreakReasons {
    pub hard_cap: bool,
    pub sentence_end: bool,
    pub clause_end: bool,
    pub target_reached: bool,
    pub silence: bool,
}

impl BreakReasons {
    /// Evaluates every condition for `word`, the `count`-th word of the open phrase.
    pub fn evaluate(
        word: &ResolvedWord,
        next: Option<&ResolvedWord>,
        count: usize,
        settings: &PhraseSettings,
    ) -> Self {
        let text = word.word.trim();
        Self {
            hard_cap: count >= settings.max_words,
            sentence_end: text.ends_with(SENTENCE_END),
            clause_end: count >= settings.min_words_for_comma_break && text.ends_with(CLAUSE_END),
            target_reached: count >= settings.target_words,
            silence: next.is_some_and(|n| n.start - word.end > settings.silence_threshold_sec),
        }
    }

    /// True if any condition closes the phrase
    pub fn any(&self) -> bool {
        self.hard_cap || self.sentence_end || self.clause_end || self.target_reached || self.silence
    }
}

/// Splits words into short phrases using punctuation, length and silence.
///
/// The last word always closes its phrase.
pub fn segment_adaptive(words: &[ResolvedWord], settings: &PhraseSettings) -> Vec<Phrase> {
    let mut phrases = Vec::new();
    let mut current: Vec<ResolvedWord> = Vec::new();

    for (idx, word) in words.iter().enumerate() {
        current.push(word.clone());

        let next = words.get(idx + 1);
        let reasons = BreakReasons::evaluate(word, next, current.len(), settings);

        if next.is_none() || reasons.any() {
            phrases.extend(Phrase::from_words(std::mem::take(&mut current)));
        }
    }

    debug!(
        words = words.len(),
        phrases = phrases.len(),
        "Segmented adaptive phrases"
    );
    phrases
}

/// Splits words into consecutive groups of `group_size`, text upper-cased.
///
/// The final group holds the remainder. A group size of 0 is treated as 1.
pub fn segment_fixed(words: &[ResolvedWord], group_size: usize) -> Vec<Phrase> {
    let phrases: Vec<Phrase> = words
        .chunks(group_size.max(1))
        .filter_map(|chunk| Phrase::from_words(chunk.to_vec()))
        .map(|mut phrase| {
            phrase.text = phrase.text.to_uppercase();
            phrase
        })
        .collect();

    debug!(
        words = words.len(),
        phrases = phrases.len(),
        group_size,
        "Segmented fixed phrases"
    );
    phrases
}

// =============================================================================
// Tests
// =============================================================================
