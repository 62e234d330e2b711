//! Detector Error Types
//!
//! This module defines the [`DetectorError`] enum, which encapsulates all error types that can
//! occur while generating traps for an assignment or analyzing a student submission.
//! Each variant carries a descriptive message for robust error handling and debugging.
//!
//! Only *structurally* invalid input surfaces as an error. Malformed submission text never
//! errors: scoring degrades to a definite, low-confidence classification instead, so the
//! consuming workflow can always proceed with some answer.

use std::fmt;

/// Represents all error types that can occur in the detection engine.
#[derive(Debug)]
pub enum DetectorError {
    /// Structurally invalid input (empty instructions, span out of bounds, mismatched candidate text).
    InputInvalid(String),
    /// A trap violates its own invariants (empty text, or original equal to modified).
    InvalidTrap(String),
    /// JSON is malformed or does not match the expected schema.
    InvalidJson(String),
    /// I/O error (file not found, unreadable, etc.).
    IoError(String),
}

impl fmt::Display for DetectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectorError::InputInvalid(msg) => write!(f, "invalid input: {msg}"),
            DetectorError::InvalidTrap(msg) => write!(f, "invalid trap: {msg}"),
            DetectorError::InvalidJson(msg) => write!(f, "invalid JSON: {msg}"),
            DetectorError::IoError(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for DetectorError {}
