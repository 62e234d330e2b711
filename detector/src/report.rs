//! # Detection Report Module
//!
//! Serializable output shapes for the two engine operations: trap generation and
//! submission analysis. Exactly one [`DetectionReport`] exists per submission;
//! re-analysis creates a superseding report rather than editing in place, which
//! preserves the audit trail.
//!
//! ## JSON Output Example
//!
//! ```json
//! {
//!   "success": true,
//!   "message": "Analysis complete.",
//!   "data": {
//!     "trap_outcomes": [ ... ],
//!     "total_modifications_checked": 2,
//!     "matches_original": 0,
//!     "matches_modified": 2,
//!     "matches_neither": 0,
//!     "ai_detection_score": 100.0,
//!     "threshold": 70.0,
//!     "is_flagged": true,
//!     "needs_interview": true,
//!     "confidence_level": "high",
//!     "no_traps_available": false,
//!     "analysis_method": "text_comparison",
//!     "analyzed_at": "2026-08-26T09:00:00Z"
//!   }
//! }
//! ```

use crate::types::{ConfidenceLevel, Trap, TrapOutcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default score threshold at or above which a submission is flagged.
pub const DEFAULT_THRESHOLD: f64 = 70.0;

/// Analysis method recorded on every report produced by this engine.
pub const ANALYSIS_METHOD: &str = "text_comparison";

/// Output of the trap-generation operation for one assignment.
///
/// The caller persists this and renders two documents: the human-visible one from
/// the untouched instructions, the decoy one from `mutated_instructions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOutput {
    pub mutated_instructions: String,
    pub modifications: Vec<Trap>,
    pub total_modifications: usize,
}

/// Versioned debug payload attached to a report on request.
///
/// Tagged rather than an untyped blob so the output stays statically checkable;
/// new shapes get a new version variant instead of mutating this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "version")]
pub enum DebugPayload {
    #[serde(rename = "v1")]
    V1 {
        /// Per trap, which matcher tier decided it, in trap order.
        matcher_trace: Vec<String>,
    },
}

/// The complete detection result for one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    /// Per-trap outcomes, in the order the traps were supplied.
    pub trap_outcomes: Vec<TrapOutcome>,
    /// Number of traps checked — the denominator of the score.
    pub total_modifications_checked: usize,
    /// Count of traps whose original fragment was found verbatim.
    pub matches_original: u32,
    /// Count of traps whose modified fragment was found verbatim.
    pub matches_modified: u32,
    /// Count of traps matching neither side.
    pub matches_neither: u32,
    /// 0-100 likelihood estimate that the submission reflects the decoy text.
    pub ai_detection_score: f64,
    /// The threshold the score was compared against.
    pub threshold: f64,
    /// `ai_detection_score >= threshold` (inclusive boundary).
    pub is_flagged: bool,
    /// Mirrors `is_flagged`; the signal the intake workflow hands to the
    /// voice-interview subsystem.
    pub needs_interview: bool,
    pub confidence_level: ConfidenceLevel,
    /// True when the assignment had no traps. A zero-trap result must never be
    /// presented as a clean pass; this flag is the warning channel for that.
    pub no_traps_available: bool,
    pub analysis_method: String,
    pub analyzed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugPayload>,
}

/// The API response envelope for detection results.
///
/// Wraps a [`DetectionReport`] with top-level `success` and `message` fields for
/// consistency with the rest of the platform's responses.
#[derive(Debug, Serialize)]
pub struct DetectionReportResponse {
    success: bool,
    message: String,
    data: DetectionReport,
}

impl From<DetectionReport> for DetectionReportResponse {
    fn from(report: DetectionReport) -> Self {
        DetectionReportResponse {
            success: true,
            message: "Analysis complete.".to_string(),
            data: report,
        }
    }
}
