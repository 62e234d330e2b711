//! # Types Module
//!
//! Core data structures shared across the detection engine: trap records planted in
//! assignment instructions, per-trap match outcomes, and the confidence tiers derived
//! from them.

use crate::error::DetectorError;
use serde::{Deserialize, Serialize};

/// The category of text fragment a trap substitutes.
///
/// The modified side of a trap must plausibly belong to the same category as the
/// original (a number trap replaces a number with another number) so the mutated
/// instructions remain grammatically well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrapKind {
    Number,
    Word,
    Phrase,
    Character,
}

/// A half-open byte range `[start, end)` into the instruction text.
///
/// Spans are advisory: they anchor a trap to where it was planted, but matching a
/// submission never relies on them being exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the two spans share at least one byte.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A substitutable fragment proposed by the fragment selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// The exact fragment text as it appears in the instructions.
    pub text: String,
    /// Where the fragment sits in the instruction text.
    pub span: Span,
    pub kind: TrapKind,
}

/// A paired (original, modified) fragment planted in the instructions to distinguish
/// human-read from AI-pasted content.
///
/// Created once at assignment-generation time and read-only thereafter; never exposed
/// to students.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trap {
    /// What the human-visible rendered document shows (e.g. "6 apples").
    pub original_text: String,
    /// What an AI paste-and-generate tool sees instead (e.g. "11 apples").
    pub modified_text: String,
    /// Advisory position of the fragment in the instruction text.
    pub span: Span,
    #[serde(rename = "modification_type")]
    pub kind: TrapKind,
}

impl Trap {
    /// Build a trap, enforcing its invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::InvalidTrap`] when either side is empty or the two
    /// sides are equal under case-insensitive comparison.
    pub fn new(
        original_text: impl Into<String>,
        modified_text: impl Into<String>,
        span: Span,
        kind: TrapKind,
    ) -> Result<Self, DetectorError> {
        let trap = Trap {
            original_text: original_text.into(),
            modified_text: modified_text.into(),
            span,
            kind,
        };
        trap.validate()?;
        Ok(trap)
    }

    /// Re-check the trap invariants. Needed for traps that arrive via deserialization
    /// and therefore bypass [`Trap::new`].
    pub fn validate(&self) -> Result<(), DetectorError> {
        if self.original_text.trim().is_empty() {
            return Err(DetectorError::InvalidTrap(
                "original_text must not be empty".to_string(),
            ));
        }
        if self.modified_text.trim().is_empty() {
            return Err(DetectorError::InvalidTrap(
                "modified_text must not be empty".to_string(),
            ));
        }
        if self
            .original_text
            .eq_ignore_ascii_case(&self.modified_text)
        {
            return Err(DetectorError::InvalidTrap(format!(
                "modified_text must differ from original_text: {:?}",
                self.original_text
            )));
        }
        Ok(())
    }
}

/// How a submission relates to one trap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// The submission contains the original (human-visible) fragment.
    Original,
    /// The submission contains the modified (AI-visible) fragment.
    Modified,
    /// The submission contains neither fragment.
    Neither,
    /// An approximate match, biased toward one side by similarity.
    Partial,
}

/// The result of scoring one trap against a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub match_kind: MatchKind,
    /// Confidence in the classification, 0-100.
    pub confidence: f64,
    /// The literal matched/near-matched text, for audit display.
    pub found_in_submission: String,
    /// Best-effort human-readable locator ("word 12"), not guaranteed exact.
    pub location: String,
    /// For [`MatchKind::Partial`], which side the approximate match leans toward.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_bias: Option<MatchKind>,
}

impl MatchOutcome {
    /// The degenerate outcome for empty or unmatched submission text.
    pub fn not_found() -> Self {
        MatchOutcome {
            match_kind: MatchKind::Neither,
            confidence: 0.0,
            found_in_submission: String::new(),
            location: String::new(),
            partial_bias: None,
        }
    }
}

/// A trap paired with its scored outcome, as reported per submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrapOutcome {
    pub trap: Trap,
    pub outcome: MatchOutcome,
}

/// Confidence tier derived from the dispersion of per-trap confidences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

/// Outcome categories of the downstream oral follow-up interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictKind {
    LikelyCheated,
    Unclear,
    Legitimate,
}

/// The recorded result of a voice follow-up interview, produced by an external
/// human/LLM-driven process and fed back to the gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewVerdict {
    pub verdict: VerdictKind,
    pub reasoning: String,
    /// Confidence in the verdict, 0-100.
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trap_new_valid() {
        let trap = Trap::new("500-word", "750-word", Span::new(0, 8), TrapKind::Number);
        assert!(trap.is_ok());
    }

    #[test]
    fn test_trap_rejects_empty_original() {
        let trap = Trap::new("", "750-word", Span::new(0, 0), TrapKind::Number);
        assert!(matches!(trap, Err(DetectorError::InvalidTrap(_))));
    }

    #[test]
    fn test_trap_rejects_empty_modified() {
        let trap = Trap::new("500-word", "  ", Span::new(0, 8), TrapKind::Number);
        assert!(matches!(trap, Err(DetectorError::InvalidTrap(_))));
    }

    #[test]
    fn test_trap_rejects_case_insensitive_equal() {
        let trap = Trap::new("Apples", "apples", Span::new(0, 6), TrapKind::Word);
        assert!(matches!(trap, Err(DetectorError::InvalidTrap(_))));
    }

    #[test]
    fn test_span_overlap() {
        let a = Span::new(0, 5);
        let b = Span::new(4, 8);
        let c = Span::new(5, 8);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_trap_serde_field_names() {
        let trap = Trap::new("6 apples", "11 apples", Span::new(10, 18), TrapKind::Number).unwrap();
        let json = serde_json::to_value(&trap).unwrap();
        assert_eq!(json["modification_type"], "number");
        assert_eq!(json["original_text"], "6 apples");
    }

    #[test]
    fn test_verdict_serde_screaming_case() {
        let json = serde_json::to_value(VerdictKind::LikelyCheated).unwrap();
        assert_eq!(json, "LIKELY_CHEATED");
    }
}
