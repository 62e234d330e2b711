//! # Fragment Selector
//!
//! Scans assignment instruction text and proposes candidate substitutable fragments:
//! numeric quantities with their unit context, curated subject-matter phrases, and
//! capitalized proper-noun phrases. Selection is deterministic — the same
//! instructions always yield the same candidate set in the same order.

use crate::mutator::LEXICON;
use crate::types::{Candidate, Span, TrapKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// Common words too generic to anchor a trap on their own.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has", "have", "if",
    "in", "into", "is", "it", "its", "more", "most", "must", "no", "not", "of", "on", "or",
    "should", "such", "that", "the", "their", "then", "there", "these", "this", "to", "was",
    "were", "will", "with", "your",
];

/// An integer, optionally hyphenated to or followed by a unit word ("500-word",
/// "6 apples"). The unit keeps the fragment uniquely locatable in a submission.
static NUMBER_WITH_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d+)(-[A-Za-z]+|\s+[A-Za-z]+)\b").expect("number pattern must compile")
});

/// Two to four capitalized tokens, optionally joined by a connective
/// ("Treaty of Tordesillas", "The Industrial Revolution").
static PROPER_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?: (?:of|the|and|[A-Z][a-z]+)){1,3}\b")
        .expect("proper-phrase pattern must compile")
});

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token.to_ascii_lowercase().as_str())
}

/// Proposes substitutable fragments from assignment instructions.
pub struct FragmentSelector;

impl FragmentSelector {
    /// Scan `instructions` and return non-overlapping candidates ordered by position.
    ///
    /// Fails softly: text with no safe candidates yields an empty list. Callers must
    /// handle zero-trap assignments (detection degenerates to a defined "no traps"
    /// result downstream).
    pub fn select(&self, instructions: &str) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for m in NUMBER_WITH_UNIT.find_iter(instructions) {
            let unit = m
                .as_str()
                .trim_start_matches(|c: char| c.is_ascii_digit())
                .trim_start_matches('-')
                .trim_start();
            // "6 of" anchors nothing; require a content word as the unit.
            if is_stopword(unit) {
                continue;
            }
            candidates.push(Candidate {
                text: m.as_str().to_string(),
                span: Span::new(m.start(), m.end()),
                kind: TrapKind::Number,
            });
        }

        candidates.extend(lexicon_candidates(instructions));

        for m in PROPER_PHRASE.find_iter(instructions) {
            let tokens: Vec<&str> = m.as_str().split(' ').collect();
            if tokens.iter().filter(|t| !is_stopword(t)).count() * 2 < tokens.len() {
                continue;
            }
            candidates.push(Candidate {
                text: m.as_str().to_string(),
                span: Span::new(m.start(), m.end()),
                kind: if tokens.len() > 1 {
                    TrapKind::Phrase
                } else {
                    TrapKind::Word
                },
            });
        }

        resolve_overlaps(candidates)
    }
}

/// Case-insensitive scan for curated lexicon keys, on word boundaries.
fn lexicon_candidates(instructions: &str) -> Vec<Candidate> {
    // ASCII lowercasing preserves byte offsets into the original text.
    let haystack = instructions.to_ascii_lowercase();
    let mut found = Vec::new();

    for (key, _) in LEXICON {
        for (start, _) in haystack.match_indices(key) {
            let end = start + key.len();
            let boundary_before = start == 0
                || !haystack.as_bytes()[start - 1].is_ascii_alphanumeric();
            let boundary_after = end == haystack.len()
                || !haystack.as_bytes()[end].is_ascii_alphanumeric();
            if !boundary_before || !boundary_after {
                continue;
            }
            found.push(Candidate {
                text: instructions[start..end].to_string(),
                span: Span::new(start, end),
                kind: if key.contains(' ') {
                    TrapKind::Phrase
                } else {
                    TrapKind::Word
                },
            });
        }
    }
    found
}

/// Drop overlapping candidates deterministically: longer spans win, ties broken by
/// earlier start, then lexicographically by text. Survivors are returned in
/// positional order.
fn resolve_overlaps(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        b.span
            .len()
            .cmp(&a.span.len())
            .then(a.span.start.cmp(&b.span.start))
            .then(a.text.cmp(&b.text))
    });

    let mut kept: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        if kept.iter().all(|k| !k.span.overlaps(&candidate.span)) {
            kept.push(candidate);
        }
    }

    kept.sort_by_key(|c| c.span.start);
    kept.dedup();
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_number_with_hyphenated_unit() {
        let candidates = FragmentSelector.select("Write a 500-word essay.");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "500-word");
        assert_eq!(candidates[0].kind, TrapKind::Number);
        assert_eq!(candidates[0].span, Span::new(8, 16));
    }

    #[test]
    fn test_select_number_with_unit_word() {
        let candidates = FragmentSelector.select("Buy 6 apples for the class.");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "6 apples");
    }

    #[test]
    fn test_select_skips_stopword_unit() {
        let candidates = FragmentSelector.select("Pick 3 of them.");
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_select_lexicon_phrase() {
        let candidates =
            FragmentSelector.select("Discuss how artificial intelligence shapes society.");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "artificial intelligence");
        assert_eq!(candidates[0].kind, TrapKind::Phrase);
    }

    #[test]
    fn test_select_proper_phrase() {
        let candidates = FragmentSelector.select("Compare it with the Treaty of Tordesillas.");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "Treaty of Tordesillas");
        assert_eq!(candidates[0].kind, TrapKind::Phrase);
    }

    #[test]
    fn test_select_empty_and_no_candidates() {
        assert!(FragmentSelector.select("").is_empty());
        assert!(FragmentSelector.select("write about anything you like").is_empty());
    }

    #[test]
    fn test_select_is_deterministic() {
        let text = "Write a 500-word essay about artificial intelligence and the Industrial Revolution.";
        let first = FragmentSelector.select(text);
        let second = FragmentSelector.select(text);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_overlap_prefers_longer_candidate() {
        // The phrase span contains a number; the longer phrase must win.
        let a = Candidate {
            text: "500".to_string(),
            span: Span::new(8, 11),
            kind: TrapKind::Number,
        };
        let b = Candidate {
            text: "500-word essay".to_string(),
            span: Span::new(8, 22),
            kind: TrapKind::Phrase,
        };
        let kept = resolve_overlaps(vec![a, b.clone()]);
        assert_eq!(kept, vec![b]);
    }

    #[test]
    fn test_candidates_ordered_by_position() {
        let text = "Use primary sources to discuss climate change in a 1000-word report.";
        let candidates = FragmentSelector.select(text);
        let starts: Vec<usize> = candidates.iter().map(|c| c.span.start).collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        assert_eq!(starts, sorted);
        assert!(candidates.len() >= 3);
    }
}
