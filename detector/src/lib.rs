//! # Detector Library
//!
//! Core logic for the decoy-trap academic integrity engine. It supports selecting
//! substitutable fragments in assignment instructions, producing a mutated decoy
//! variant with structured trap records, scoring a student submission per trap, and
//! aggregating a calibrated AI-detection verdict with an interview-gate decision.
//!
//! ## Key Concepts
//! - **DetectionJob**: The main struct representing an analysis job for a single submission.
//! - **Matchers**: Pluggable strategies for locating a trap in submission text
//!   (numeric, exact, fuzzy), tried in order until one decides.
//! - **Traps**: Paired (original, modified) fragments planted in the instructions.
//! - **Reports**: Structured output summarizing per-trap outcomes, the 0-100 score,
//!   and the flagged/not-flagged verdict.
//!
//! ## Preconditions
//! The trap set passed to a job must be the complete, final set for the assignment;
//! the orchestration layer must persist it before accepting any submission. Per-trap
//! scoring has no ordering dependency and no shared state.

pub mod error;
pub mod gate;
pub mod matchers;
pub mod mutator;
pub mod report;
pub mod scorer;
pub mod selector;
pub mod traits;
pub mod types;
pub mod utilities;

use crate::error::DetectorError;
use crate::matchers::exact_matcher::ExactMatcher;
use crate::matchers::fuzzy_matcher::FuzzyMatcher;
use crate::matchers::numeric_matcher::NumericMatcher;
use crate::mutator::Mutator;
use crate::report::{ANALYSIS_METHOD, DEFAULT_THRESHOLD, DebugPayload, DetectionReport, GenerationOutput};
use crate::selector::FragmentSelector;
use crate::traits::matcher::TrapMatcher;
use crate::types::{MatchOutcome, Trap, TrapOutcome};

use chrono::{DateTime, Utc};
use std::path::Path;

/// Generate the decoy variant of assignment instructions plus its trap records.
///
/// Runs the fragment selector and the mutator in sequence. Consumed once per
/// assignment at creation time; the caller persists the result before accepting
/// submissions. Zero candidates is not an error — the output simply carries no
/// modifications, and the instructor-facing layer should warn about it.
///
/// # Errors
///
/// [`DetectorError::InputInvalid`] when `instructions` is empty or whitespace.
pub fn generate_traps(instructions: &str) -> Result<GenerationOutput, DetectorError> {
    if instructions.trim().is_empty() {
        return Err(DetectorError::InputInvalid(
            "instructions must not be empty".to_string(),
        ));
    }

    let candidates = FragmentSelector.select(instructions);
    let (mutated_instructions, modifications) = Mutator.mutate(instructions, &candidates)?;

    log::info!(
        "generated {} trap(s) from {} candidate(s)",
        modifications.len(),
        candidates.len()
    );

    Ok(GenerationOutput {
        mutated_instructions,
        total_modifications: modifications.len(),
        modifications,
    })
}

/// Load stored trap records from a JSON file.
///
/// # Errors
///
/// [`DetectorError::IoError`] when the file cannot be read, and
/// [`DetectorError::InvalidJson`] when its contents are not a valid trap array.
pub fn load_traps(path: impl AsRef<Path>) -> Result<Vec<Trap>, DetectorError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|err| {
        DetectorError::IoError(format!("failed to read {}: {err}", path.display()))
    })?;
    parse_traps(&json)
}

/// Parse a JSON array of stored trap records.
pub fn parse_traps(json: &str) -> Result<Vec<Trap>, DetectorError> {
    serde_json::from_str(json)
        .map_err(|err| DetectorError::InvalidJson(format!("not a valid trap array: {err}")))
}

/// Represents an analysis job for a single student submission.
///
/// Encapsulates the stored trap set, the submitted text, the flagging threshold,
/// and the matcher chain, and produces an immutable [`DetectionReport`].
///
/// # Fields
/// - `traps`: The complete, final trap set stored for the assignment.
/// - `submission_text`: Raw text extracted from the student's submission.
/// - `threshold`: Score at or above which the submission is flagged.
/// - `matchers`: Ordered matching strategies; the first decisive one wins per trap.
pub struct DetectionJob<'a> {
    traps: Vec<Trap>,
    submission_text: String,
    threshold: f64,
    matchers: Vec<Box<dyn TrapMatcher + Send + Sync + 'a>>,
    analyzed_at: Option<DateTime<Utc>>,
    with_debug: bool,
}

impl<'a> DetectionJob<'a> {
    /// Create a new detection job with the default matcher chain
    /// (numeric, exact, fuzzy) and the default threshold.
    ///
    /// # Arguments
    /// * `traps` - The stored trap set for the assignment.
    /// * `submission_text` - The student's submitted text.
    pub fn new(traps: Vec<Trap>, submission_text: impl Into<String>) -> Self {
        Self {
            traps,
            submission_text: submission_text.into(),
            threshold: DEFAULT_THRESHOLD,
            matchers: vec![
                Box::new(NumericMatcher),
                Box::new(ExactMatcher),
                Box::new(FuzzyMatcher::default()),
            ],
            analyzed_at: None,
            with_debug: false,
        }
    }

    /// Set the flagging threshold (0-100) for this job.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Replace the matcher chain. Matchers are tried in order per trap; the last
    /// one should always decide (the fuzzy matcher does).
    pub fn with_matchers(mut self, matchers: Vec<Box<dyn TrapMatcher + Send + Sync + 'a>>) -> Self {
        self.matchers = matchers;
        self
    }

    /// Pin the report timestamp. Audit re-runs pass the stored timestamp back in so
    /// aggregation stays byte-identical; when unset, the current time is used.
    pub fn with_analyzed_at(mut self, analyzed_at: DateTime<Utc>) -> Self {
        self.analyzed_at = Some(analyzed_at);
        self
    }

    /// Attach a versioned debug payload (matcher trace) to the report.
    pub fn with_debug(mut self) -> Self {
        self.with_debug = true;
        self
    }

    /// Run the analysis and produce the detection report.
    ///
    /// # Returns
    /// * `Ok(DetectionReport)` on success.
    /// * `Err(DetectorError)` only for a structurally invalid trap set; malformed
    ///   or empty submission text never errors and degrades to `neither`/0 per trap.
    ///
    /// # Steps
    /// 1. Validates every trap's invariants.
    /// 2. Scores each trap independently through the matcher chain.
    /// 3. Tallies outcomes, computes the 0-100 score, and compares it to the threshold.
    /// 4. Derives the confidence tier from per-trap confidences.
    pub fn run(self) -> Result<DetectionReport, DetectorError> {
        for trap in &self.traps {
            trap.validate()?;
        }

        let submission_empty = self.submission_text.trim().is_empty();
        let mut outcomes: Vec<MatchOutcome> = Vec::with_capacity(self.traps.len());
        let mut trace: Vec<String> = Vec::with_capacity(self.traps.len());

        for trap in &self.traps {
            if submission_empty {
                outcomes.push(MatchOutcome::not_found());
                trace.push("none".to_string());
                continue;
            }

            let mut decided = None;
            for matcher in &self.matchers {
                if let Some(outcome) = matcher.evaluate(trap, &self.submission_text) {
                    decided = Some((outcome, matcher.name()));
                    break;
                }
            }
            match decided {
                Some((outcome, name)) => {
                    outcomes.push(outcome);
                    trace.push(name.to_string());
                }
                None => {
                    outcomes.push(MatchOutcome::not_found());
                    trace.push("none".to_string());
                }
            }
        }

        let tally = scorer::tally_outcomes(&outcomes);
        let total = self.traps.len();
        let ai_detection_score = scorer::compute_detection_score(&tally, total);
        let is_flagged = total > 0 && ai_detection_score >= self.threshold;
        let confidence_level = scorer::confidence_level(&outcomes);

        log::info!(
            "analyzed submission against {total} trap(s): score {ai_detection_score}, flagged: {is_flagged}"
        );

        let trap_outcomes = self
            .traps
            .into_iter()
            .zip(outcomes)
            .map(|(trap, outcome)| TrapOutcome { trap, outcome })
            .collect();

        Ok(DetectionReport {
            trap_outcomes,
            total_modifications_checked: total,
            matches_original: tally.matches_original,
            matches_modified: tally.matches_modified,
            matches_neither: tally.matches_neither,
            ai_detection_score,
            threshold: self.threshold,
            is_flagged,
            needs_interview: is_flagged,
            confidence_level,
            no_traps_available: total == 0,
            analysis_method: ANALYSIS_METHOD.to_string(),
            analyzed_at: self.analyzed_at.unwrap_or_else(Utc::now),
            debug: self.with_debug.then_some(DebugPayload::V1 {
                matcher_trace: trace,
            }),
        })
    }
}
