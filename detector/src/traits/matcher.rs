use crate::types::{MatchOutcome, Trap};

/// TrapMatcher is a strategy trait for locating one trap in submission text.
/// Each implementation provides a specific level of matching rigor; the detection
/// job tries its configured matchers in order and takes the first decision.
pub trait TrapMatcher: Send + Sync {
    /// Short identifier for this strategy, used in debug traces ("exact", "fuzzy").
    fn name(&self) -> &'static str;

    /// Evaluate one trap against the full submission text.
    ///
    /// - `trap`: the planted (original, modified) fragment pair.
    /// - `submission`: raw submission text; implementations normalize it themselves.
    ///
    /// Returns `Some(outcome)` when this strategy can decide, or `None` to fall
    /// through to the next strategy in the chain. Implementations must be
    /// deterministic: the same `(trap, submission)` pair always yields the same
    /// result, with no randomness and no external services.
    fn evaluate(&self, trap: &Trap, submission: &str) -> Option<MatchOutcome>;
}
