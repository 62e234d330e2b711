//! The terminal matching tier: approximate matching by edit-distance similarity
//! over token windows.
//!
//! When neither trap side occurs verbatim, the submission is swept with windows
//! sized to the trap text and the most similar window decides. Above the
//! similarity floor the result is a `partial` match biased to the closer side;
//! below it the result is `neither`, with the best similarity surfaced as a
//! sub-threshold confidence so reviewers can see how close the call was.

use crate::scorer::round2;
use crate::traits::matcher::TrapMatcher;
use crate::types::{MatchKind, MatchOutcome, Trap};
use crate::utilities::similarity::normalized_similarity;
use crate::utilities::text::normalize;

/// Default similarity floor below which a window is not considered a match.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.75;

/// Best window found for one side of a trap.
#[derive(Debug, Clone)]
struct WindowHit {
    similarity: f64,
    text: String,
    word_index: usize,
}

/// A matcher that always produces a classification; the end of the chain.
pub struct FuzzyMatcher {
    threshold: f64,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl FuzzyMatcher {
    pub fn new(threshold: f64) -> Self {
        FuzzyMatcher { threshold }
    }

    /// Best-matching window of `tokens` against `target`, by normalized
    /// edit-distance similarity. Window length equals the target's token count;
    /// shorter submissions are compared as a single window.
    fn best_window(tokens: &[&str], target: &str) -> Option<WindowHit> {
        if target.is_empty() {
            return None;
        }
        if tokens.is_empty() {
            return Some(WindowHit {
                similarity: 0.0,
                text: String::new(),
                word_index: 0,
            });
        }

        let width = target.split(' ').count().min(tokens.len());
        let mut best: Option<WindowHit> = None;

        for (i, window) in tokens.windows(width).enumerate() {
            let text = window.join(" ");
            let similarity = normalized_similarity(&text, target);
            let better = match &best {
                Some(hit) => similarity > hit.similarity,
                None => true,
            };
            if better {
                best = Some(WindowHit {
                    similarity,
                    text,
                    word_index: i,
                });
            }
        }
        best
    }
}

impl TrapMatcher for FuzzyMatcher {
    fn name(&self) -> &'static str {
        "fuzzy"
    }

    /// Compare the best windows for both trap sides and classify.
    ///
    /// Always returns `Some`. Ties between equally similar sides bias toward
    /// `Modified`, the conservative direction for an integrity screen: the case is
    /// surfaced for review rather than silently cleared.
    fn evaluate(&self, trap: &Trap, submission: &str) -> Option<MatchOutcome> {
        let haystack = normalize(submission);
        let tokens: Vec<&str> = haystack.split(' ').filter(|t| !t.is_empty()).collect();

        let original = normalize(&trap.original_text);
        let modified = normalize(&trap.modified_text);

        let original_hit = Self::best_window(&tokens, &original);
        let modified_hit = Self::best_window(&tokens, &modified);

        let (bias, hit) = match (modified_hit, original_hit) {
            (Some(m), Some(o)) => {
                if m.similarity >= o.similarity {
                    (MatchKind::Modified, m)
                } else {
                    (MatchKind::Original, o)
                }
            }
            (Some(m), None) => (MatchKind::Modified, m),
            (None, Some(o)) => (MatchKind::Original, o),
            (None, None) => return Some(MatchOutcome::not_found()),
        };

        if hit.similarity >= self.threshold {
            Some(MatchOutcome {
                match_kind: MatchKind::Partial,
                confidence: round2(hit.similarity * 100.0),
                found_in_submission: hit.text,
                location: format!("word {}", hit.word_index + 1),
                partial_bias: Some(bias),
            })
        } else {
            Some(MatchOutcome {
                match_kind: MatchKind::Neither,
                confidence: round2(hit.similarity * 100.0),
                found_in_submission: hit.text,
                location: format!("word {}", hit.word_index + 1),
                partial_bias: None,
            })
        }
    }
}
