//! A matcher that performs exact substring comparison, case-insensitive and
//! whitespace-normalized.
//!
//! The `ExactMatcher` checks the trap's modified side before its original side: a
//! submission carrying the modified fragment is the AI-use indicator, so when both
//! somehow appear the stronger signal wins. A hit is a full-confidence decision;
//! a miss falls through to the next strategy in the chain.

use crate::traits::matcher::TrapMatcher;
use crate::types::{MatchKind, MatchOutcome, Trap};
use crate::utilities::text::normalize;

/// A matcher that decides only on verbatim (normalized) occurrences of either trap side.
pub struct ExactMatcher;

impl TrapMatcher for ExactMatcher {
    fn name(&self) -> &'static str {
        "exact"
    }

    /// Search the normalized submission for the normalized trap texts.
    ///
    /// # Returns
    ///
    /// `Some` with confidence 100 when either side occurs as a substring (modified
    /// checked first), `None` otherwise.
    fn evaluate(&self, trap: &Trap, submission: &str) -> Option<MatchOutcome> {
        let haystack = normalize(submission);
        if haystack.is_empty() {
            return None;
        }

        for (needle, kind) in [
            (normalize(&trap.modified_text), MatchKind::Modified),
            (normalize(&trap.original_text), MatchKind::Original),
        ] {
            if needle.is_empty() {
                continue;
            }
            if let Some(pos) = haystack.find(&needle) {
                return Some(MatchOutcome {
                    match_kind: kind,
                    confidence: 100.0,
                    found_in_submission: needle,
                    location: word_location(&haystack, pos),
                    partial_bias: None,
                });
            }
        }
        None
    }
}

/// 1-based word index of a byte position in normalized text.
fn word_location(haystack: &str, pos: usize) -> String {
    let word = haystack[..pos].split_whitespace().count() + 1;
    format!("word {word}")
}
