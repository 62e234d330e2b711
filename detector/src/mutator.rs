//! # Mutator
//!
//! Consumes selected candidates and produces the decoy ("modified") instruction text
//! plus the structured [`Trap`] records planted in it.
//!
//! The component is pure: it performs no I/O and persisting the result is the
//! caller's responsibility. Output text is byte-identical to the input everywhere
//! outside the replaced spans — the offset-stability precondition the matchers
//! rely on.

use crate::error::DetectorError;
use crate::types::{Candidate, Trap, TrapKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// Curated same-semantic-field replacements for word and phrase traps.
///
/// Each replacement is related-but-distinct, so an AI paraphraser reproducing the
/// decoy text is distinguishable from a human reading the original document, while
/// the mutated instructions stay grammatically well-formed. Keys are lowercase;
/// multi-word keys produce phrase traps, single-word keys produce word traps.
pub(crate) const LEXICON: &[(&str, &str)] = &[
    ("artificial intelligence", "machine learning"),
    ("machine learning", "deep learning"),
    ("climate change", "global warming"),
    ("global warming", "climate change"),
    ("renewable energy", "sustainable energy"),
    ("industrial revolution", "agricultural revolution"),
    ("french revolution", "russian revolution"),
    ("world war", "cold war"),
    ("solar system", "milky way"),
    ("primary sources", "secondary sources"),
    ("persuasive essay", "argumentative essay"),
    ("short story", "narrative essay"),
    ("bar chart", "line graph"),
    ("supply and demand", "market forces"),
    ("photosynthesis", "respiration"),
    ("metaphor", "simile"),
    ("democracy", "republic"),
    ("novel", "novella"),
    ("poem", "sonnet"),
    ("drought", "famine"),
    ("velocity", "acceleration"),
    ("bibliography", "glossary"),
];

static DIGIT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("digit-run regex must compile"));

/// Produces mutated instruction text and trap records from selected candidates.
pub struct Mutator;

impl Mutator {
    /// Apply a divergent same-category replacement at each candidate span.
    ///
    /// Candidates whose replacement cannot be guaranteed grammatical (a phrase with
    /// no curated counterpart, or a non-integer number) are dropped rather than
    /// mutated badly. Returned traps are ordered by span start.
    ///
    /// # Errors
    ///
    /// [`DetectorError::InputInvalid`] when a candidate span is out of bounds or its
    /// text does not match the instructions at that span — that indicates a caller
    /// bug, not a soft-skip situation.
    pub fn mutate(
        &self,
        instructions: &str,
        candidates: &[Candidate],
    ) -> Result<(String, Vec<Trap>), DetectorError> {
        for candidate in candidates {
            match instructions.get(candidate.span.start..candidate.span.end) {
                Some(slice) if slice == candidate.text => {}
                Some(_) => {
                    return Err(DetectorError::InputInvalid(format!(
                        "candidate text {:?} does not match instructions at {}..{}",
                        candidate.text, candidate.span.start, candidate.span.end
                    )));
                }
                None => {
                    return Err(DetectorError::InputInvalid(format!(
                        "candidate span {}..{} out of bounds",
                        candidate.span.start, candidate.span.end
                    )));
                }
            }
        }

        // Apply back-to-front so earlier spans keep their byte offsets.
        let mut ordered: Vec<&Candidate> = candidates.iter().collect();
        ordered.sort_by(|a, b| b.span.start.cmp(&a.span.start));

        // Overlapping spans would let a later replacement rewrite bytes inside an
        // already-replaced region, so the output would no longer agree with the
        // emitted traps. Same tier as the bounds check: a caller bug.
        for pair in ordered.windows(2) {
            if pair[0].span.overlaps(&pair[1].span) {
                return Err(DetectorError::InputInvalid(format!(
                    "candidate spans {}..{} and {}..{} overlap",
                    pair[1].span.start, pair[1].span.end, pair[0].span.start, pair[0].span.end
                )));
            }
        }

        let mut mutated = instructions.to_string();
        let mut traps = Vec::new();

        for candidate in ordered {
            let Some(replacement) = replacement_for(candidate) else {
                log::debug!("dropping candidate without safe replacement: {:?}", candidate.text);
                continue;
            };

            match Trap::new(
                candidate.text.clone(),
                replacement.clone(),
                candidate.span,
                candidate.kind,
            ) {
                Ok(trap) => {
                    mutated.replace_range(candidate.span.start..candidate.span.end, &replacement);
                    traps.push(trap);
                }
                Err(err) => {
                    log::debug!("dropping candidate {:?}: {err}", candidate.text);
                }
            }
        }

        traps.sort_by_key(|t| t.span.start);
        Ok((mutated, traps))
    }
}

/// Compute the replacement text for one candidate, or `None` to drop it.
fn replacement_for(candidate: &Candidate) -> Option<String> {
    match candidate.kind {
        TrapKind::Number => mutate_number(&candidate.text),
        TrapKind::Word | TrapKind::Phrase => lookup_replacement(&candidate.text),
        // Character-level substitutions (homoglyphs) are a different strategy this
        // mutator does not generate; the kind exists for wire compatibility.
        TrapKind::Character => None,
    }
}

/// Shift the integer inside a number candidate by `max(round(v / 2), 5)`.
///
/// At least a 50% increase for large values and an absolute minimum of +5 for small
/// ones, so the delta can never be mistaken for a rounding artifact: "500-word"
/// becomes "750-word" and "6 apples" becomes "11 apples". Everything around the
/// digits (units, hyphens) is preserved byte-for-byte.
fn mutate_number(text: &str) -> Option<String> {
    let m = DIGIT_RUN.find(text)?;
    // A digit run followed by '.' is a decimal; skip those rather than guess at
    // precision-preserving arithmetic.
    if text[m.end()..].starts_with('.') {
        return None;
    }
    let value: i64 = m.as_str().parse().ok()?;
    let delta = ((value as f64 / 2.0).round() as i64).max(5);
    let mutated_value = value + delta;

    let mut out = String::with_capacity(text.len() + 4);
    out.push_str(&text[..m.start()]);
    out.push_str(&mutated_value.to_string());
    out.push_str(&text[m.end()..]);
    Some(out)
}

/// Look up a curated replacement for a word/phrase candidate, preserving the
/// leading capital and an optional leading article.
fn lookup_replacement(text: &str) -> Option<String> {
    let lower = text.to_ascii_lowercase();

    let (prefix, key) = match lower.strip_prefix("the ") {
        Some(rest) => (&text[..4], rest),
        None => ("", lower.as_str()),
    };

    let replacement = LEXICON
        .iter()
        .find(|(original, _)| *original == key)
        .map(|(_, replacement)| *replacement)?;

    let mut out = String::with_capacity(prefix.len() + replacement.len());
    out.push_str(prefix);
    if prefix.is_empty() && text.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        let mut chars = replacement.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    } else {
        out.push_str(replacement);
    }
    Some(out)
}
