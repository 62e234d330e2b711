//! # Interview Gate
//!
//! Policy layer deciding what happens to a submission after analysis: proceed to
//! grading, or require the oral follow-up interview. Both entry points are pure
//! functions — the surrounding workflow owns persistence and the interview itself.

use crate::report::DetectionReport;
use crate::types::{InterviewVerdict, VerdictKind};
use serde::{Deserialize, Serialize};

/// The gate's decision for a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// The submission proceeds to normal grading.
    Clear,
    /// The submission requires an oral follow-up before grading.
    RequireInterview,
}

/// Initial gating decision, a pure function of the flagged state.
pub fn decide(report: &DetectionReport) -> Decision {
    if report.is_flagged {
        Decision::RequireInterview
    } else {
        Decision::Clear
    }
}

/// Map a completed interview verdict back to a gate decision.
///
/// `Legitimate` clears the submission; both `LikelyCheated` and `Unclear` keep it
/// with the human reviewer — the engine never auto-penalizes.
pub fn resolve_verdict(verdict: &InterviewVerdict) -> Decision {
    match verdict.verdict {
        VerdictKind::Legitimate => Decision::Clear,
        VerdictKind::LikelyCheated | VerdictKind::Unclear => Decision::RequireInterview,
    }
}
