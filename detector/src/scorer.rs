//! # Scorer Module
//!
//! Pure aggregation arithmetic for detection results: tallying per-trap outcomes,
//! computing the 0-100 AI-detection score, and deriving the confidence tier.
//! Everything here is a deterministic function of its inputs, so aggregating the
//! same submission twice yields byte-identical numbers.

use crate::types::{ConfidenceLevel, MatchKind, MatchOutcome};

/// Round a float to two decimal places.
///
/// Uses the common multiply / round / divide trick. Kept local to this module
/// so it's cheap to inline and obvious where rounding is happening.
#[inline]
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Summary counts and weighted tallies over a submission's match outcomes.
///
/// The integer counts record whole-match classifications only. Partial matches
/// contribute `confidence / 100` to the weighted tally of the side they are biased
/// toward — the one weighting rule, applied uniformly — and appear in no integer
/// count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tally {
    pub matches_original: u32,
    pub matches_modified: u32,
    pub matches_neither: u32,
    pub weighted_original: f64,
    pub weighted_modified: f64,
}

/// Tally a slice of per-trap outcomes.
pub fn tally_outcomes(outcomes: &[MatchOutcome]) -> Tally {
    let mut tally = Tally::default();

    for outcome in outcomes {
        match outcome.match_kind {
            MatchKind::Original => {
                tally.matches_original += 1;
                tally.weighted_original += 1.0;
            }
            MatchKind::Modified => {
                tally.matches_modified += 1;
                tally.weighted_modified += 1.0;
            }
            MatchKind::Neither => {
                tally.matches_neither += 1;
            }
            MatchKind::Partial => {
                let weight = (outcome.confidence / 100.0).clamp(0.0, 1.0);
                match outcome.partial_bias {
                    Some(MatchKind::Modified) => tally.weighted_modified += weight,
                    Some(MatchKind::Original) => tally.weighted_original += weight,
                    // A partial outcome without a bias carries no signal either way.
                    _ => tally.matches_neither += 1,
                }
            }
        }
    }
    tally
}

/// Compute the 0-100 AI-detection score:
/// `100 * weighted_modified / total_traps_checked`, rounded to two decimals.
///
/// With zero traps the score is undefined; it is defined here as 0.0 and callers
/// must surface the zero-trap condition separately so the result is never read as
/// a clean bill of health.
pub fn compute_detection_score(tally: &Tally, total_traps: usize) -> f64 {
    if total_traps == 0 {
        return 0.0;
    }
    round2(100.0 * tally.weighted_modified / total_traps as f64)
}

/// Derive the confidence tier from per-trap confidences alone.
///
/// High requires a mean confidence of at least 85 over at least two checked traps;
/// medium requires a mean of at least 60. This is deliberately independent of the
/// final score — a confident "all original" result is still high confidence.
pub fn confidence_level(outcomes: &[MatchOutcome]) -> ConfidenceLevel {
    if outcomes.is_empty() {
        return ConfidenceLevel::Low;
    }
    let mean = outcomes.iter().map(|o| o.confidence).sum::<f64>() / outcomes.len() as f64;

    if mean >= 85.0 && outcomes.len() >= 2 {
        ConfidenceLevel::High
    } else if mean >= 60.0 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(kind: MatchKind, confidence: f64, bias: Option<MatchKind>) -> MatchOutcome {
        MatchOutcome {
            match_kind: kind,
            confidence,
            found_in_submission: String::new(),
            location: String::new(),
            partial_bias: bias,
        }
    }

    #[test]
    fn test_tally_whole_matches() {
        let outcomes = vec![
            outcome(MatchKind::Modified, 100.0, None),
            outcome(MatchKind::Original, 100.0, None),
            outcome(MatchKind::Neither, 20.0, None),
        ];
        let tally = tally_outcomes(&outcomes);
        assert_eq!(tally.matches_modified, 1);
        assert_eq!(tally.matches_original, 1);
        assert_eq!(tally.matches_neither, 1);
        assert_eq!(tally.weighted_modified, 1.0);
        assert_eq!(tally.weighted_original, 1.0);
    }

    #[test]
    fn test_partial_weights_by_confidence() {
        // A partial-modified match with confidence 60 contributes 0.6, not 1.
        let outcomes = vec![outcome(
            MatchKind::Partial,
            60.0,
            Some(MatchKind::Modified),
        )];
        let tally = tally_outcomes(&outcomes);
        assert_eq!(tally.matches_modified, 0);
        assert!((tally.weighted_modified - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_score_all_modified() {
        let outcomes = vec![
            outcome(MatchKind::Modified, 100.0, None),
            outcome(MatchKind::Modified, 100.0, None),
        ];
        let tally = tally_outcomes(&outcomes);
        assert_eq!(compute_detection_score(&tally, 2), 100.0);
    }

    #[test]
    fn test_score_mixed_with_partial() {
        let outcomes = vec![
            outcome(MatchKind::Modified, 100.0, None),
            outcome(MatchKind::Partial, 80.0, Some(MatchKind::Modified)),
            outcome(MatchKind::Original, 100.0, None),
            outcome(MatchKind::Neither, 10.0, None),
        ];
        let tally = tally_outcomes(&outcomes);
        // (1 + 0.8) / 4 = 45%.
        assert_eq!(compute_detection_score(&tally, 4), 45.0);
    }

    #[test]
    fn test_score_zero_traps_defined_as_zero() {
        assert_eq!(compute_detection_score(&Tally::default(), 0), 0.0);
    }

    #[test]
    fn test_score_monotone_in_modified_matches() {
        let mut outcomes = vec![
            outcome(MatchKind::Neither, 10.0, None),
            outcome(MatchKind::Neither, 10.0, None),
            outcome(MatchKind::Neither, 10.0, None),
        ];
        let mut previous = compute_detection_score(&tally_outcomes(&outcomes), outcomes.len());
        for i in 0..outcomes.len() {
            outcomes[i] = outcome(MatchKind::Modified, 100.0, None);
            let score = compute_detection_score(&tally_outcomes(&outcomes), outcomes.len());
            assert!(score >= previous);
            previous = score;
        }
        assert_eq!(previous, 100.0);
    }

    #[test]
    fn test_confidence_high_needs_two_traps() {
        let one = vec![outcome(MatchKind::Modified, 100.0, None)];
        assert_eq!(confidence_level(&one), ConfidenceLevel::Medium);

        let two = vec![
            outcome(MatchKind::Modified, 100.0, None),
            outcome(MatchKind::Original, 90.0, None),
        ];
        assert_eq!(confidence_level(&two), ConfidenceLevel::High);
    }

    #[test]
    fn test_confidence_tiers() {
        let medium = vec![
            outcome(MatchKind::Partial, 75.0, Some(MatchKind::Modified)),
            outcome(MatchKind::Neither, 50.0, None),
        ];
        assert_eq!(confidence_level(&medium), ConfidenceLevel::Medium);

        let low = vec![
            outcome(MatchKind::Neither, 10.0, None),
            outcome(MatchKind::Neither, 30.0, None),
        ];
        assert_eq!(confidence_level(&low), ConfidenceLevel::Low);
        assert_eq!(confidence_level(&[]), ConfidenceLevel::Low);
    }
}
