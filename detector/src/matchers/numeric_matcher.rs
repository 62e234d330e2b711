//! A specialized first-pass matcher for number traps that compares values
//! numerically instead of textually.
//!
//! "750-word", "750 words", "750.0 word" and (within the bounded word-number
//! table) "eleven apples" all resolve to the same quantity. The matcher anchors on
//! the trap's unit context — the non-numeric remainder of the fragment — and reads
//! the number attached to or preceding it. Traps of any other kind, or fragments
//! whose context cannot be located, fall through to the later tiers.

use crate::traits::matcher::TrapMatcher;
use crate::types::{MatchKind, MatchOutcome, Trap, TrapKind};
use crate::utilities::text::{normalize, parse_number, trim_punctuation};
use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+(\.\d+)?[-\s]*").expect("leading-number regex must compile"));

const EPSILON: f64 = 1e-9;

/// Fold a trailing plural 's' so "word"/"words" and "apple"/"apples" compare equal.
fn singular(token: &str) -> &str {
    token.strip_suffix('s').unwrap_or(token)
}

/// A matcher that decides number traps by numeric value rather than surface form.
pub struct NumericMatcher;

impl NumericMatcher {
    /// The unit context of a trap fragment: everything after its leading number,
    /// normalized ("500-word" -> "word", "6 apples" -> "apples").
    fn unit_of(text: &str) -> Option<String> {
        let m = LEADING_NUMBER.find(text)?;
        let unit = normalize(&text[m.end()..]);
        if unit.is_empty() { None } else { Some(unit) }
    }

    /// The numeric value of a trap fragment's leading number.
    fn value_of(text: &str) -> Option<f64> {
        let m = LEADING_NUMBER.find(text)?;
        parse_number(m.as_str().trim_matches(['-', ' ']))
    }
}

impl TrapMatcher for NumericMatcher {
    fn name(&self) -> &'static str {
        "numeric"
    }

    /// Locate the trap's unit context in the submission and compare the adjacent
    /// numeric token against the trap's modified and original values.
    ///
    /// When both values occur somewhere in the submission, modified wins — it is
    /// the AI-use indicator. Returns `None` for non-number traps and whenever the
    /// context or a comparable number cannot be found.
    fn evaluate(&self, trap: &Trap, submission: &str) -> Option<MatchOutcome> {
        if trap.kind != TrapKind::Number {
            return None;
        }

        let unit = Self::unit_of(&trap.original_text)?;
        let original_value = Self::value_of(&trap.original_text)?;
        let modified_value = Self::value_of(&trap.modified_text)?;

        let haystack = normalize(submission);
        let tokens: Vec<&str> = haystack.split(' ').filter(|t| !t.is_empty()).collect();
        let unit_head = singular(unit.split(' ').next().unwrap_or(&unit));

        let mut original_hit: Option<(String, usize)> = None;
        let mut modified_hit: Option<(String, usize)> = None;

        for (i, token) in tokens.iter().enumerate() {
            let bare = trim_punctuation(token);

            // "750-word": number glued to the unit inside one token.
            // "750 words": unit token with the number in the preceding token.
            let hit = if let Some((number_part, unit_part)) = bare.split_once('-') {
                if singular(unit_part) == unit_head {
                    parse_number(number_part).map(|v| (v, (*token).to_string()))
                } else {
                    None
                }
            } else if singular(bare) == unit_head && i > 0 {
                parse_number(tokens[i - 1]).map(|v| (v, format!("{} {}", tokens[i - 1], token)))
            } else {
                None
            };

            let Some((value, found)) = hit else { continue };

            if (value - modified_value).abs() < EPSILON && modified_hit.is_none() {
                modified_hit = Some((found, i));
            } else if (value - original_value).abs() < EPSILON && original_hit.is_none() {
                original_hit = Some((found, i));
            }
        }

        let (kind, (found, index)) = match (modified_hit, original_hit) {
            (Some(hit), _) => (MatchKind::Modified, hit),
            (None, Some(hit)) => (MatchKind::Original, hit),
            (None, None) => return None,
        };

        Some(MatchOutcome {
            match_kind: kind,
            confidence: 100.0,
            found_in_submission: found,
            location: format!("word {}", index + 1),
            partial_bias: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Span;

    fn word_count_trap() -> Trap {
        Trap::new("500-word", "750-word", Span::new(0, 8), TrapKind::Number).unwrap()
    }

    fn apples_trap() -> Trap {
        Trap::new("6 apples", "11 apples", Span::new(0, 8), TrapKind::Number).unwrap()
    }

    #[test]
    fn test_unit_and_value_extraction() {
        assert_eq!(NumericMatcher::unit_of("500-word").as_deref(), Some("word"));
        assert_eq!(NumericMatcher::unit_of("6 apples").as_deref(), Some("apples"));
        assert_eq!(NumericMatcher::unit_of("500").as_deref(), None);
        assert_eq!(NumericMatcher::value_of("500-word"), Some(500.0));
        assert_eq!(NumericMatcher::value_of("11 apples"), Some(11.0));
    }

    #[test]
    fn test_matches_modified_hyphenated() {
        let outcome = NumericMatcher
            .evaluate(&word_count_trap(), "Here is my 750-word essay.")
            .unwrap();
        assert_eq!(outcome.match_kind, MatchKind::Modified);
        assert_eq!(outcome.confidence, 100.0);
        assert_eq!(outcome.found_in_submission, "750-word");
    }

    #[test]
    fn test_matches_original_with_plural_unit() {
        let outcome = NumericMatcher
            .evaluate(&word_count_trap(), "an essay of 500 words")
            .unwrap();
        assert_eq!(outcome.match_kind, MatchKind::Original);
        assert_eq!(outcome.found_in_submission, "500 words");
    }

    #[test]
    fn test_matches_decimal_formatting() {
        let outcome = NumericMatcher
            .evaluate(&apples_trap(), "I bought 11.0 apples today.")
            .unwrap();
        assert_eq!(outcome.match_kind, MatchKind::Modified);
    }

    #[test]
    fn test_matches_word_number() {
        let outcome = NumericMatcher
            .evaluate(&apples_trap(), "She took eleven apples home.")
            .unwrap();
        assert_eq!(outcome.match_kind, MatchKind::Modified);
        assert_eq!(outcome.found_in_submission, "eleven apples");
    }

    #[test]
    fn test_modified_wins_over_original() {
        let outcome = NumericMatcher
            .evaluate(&word_count_trap(), "500 words or 750 words, either way")
            .unwrap();
        assert_eq!(outcome.match_kind, MatchKind::Modified);
    }

    #[test]
    fn test_unrelated_number_falls_through() {
        assert!(
            NumericMatcher
                .evaluate(&word_count_trap(), "a 900-word draft")
                .is_none()
        );
    }

    #[test]
    fn test_missing_context_falls_through() {
        assert!(
            NumericMatcher
                .evaluate(&word_count_trap(), "750 apples and nothing else")
                .is_none()
        );
    }

    #[test]
    fn test_non_number_trap_falls_through() {
        let trap = Trap::new("metaphor", "simile", Span::new(0, 8), TrapKind::Word).unwrap();
        assert!(NumericMatcher.evaluate(&trap, "a simile here").is_none());
    }

    #[test]
    fn test_empty_submission_falls_through() {
        assert!(NumericMatcher.evaluate(&word_count_trap(), "").is_none());
    }
}
